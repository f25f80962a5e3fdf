use crate::error::StoreError;
use crate::types::AlertRecord;

pub trait AlertRepository {
    fn insert(&self, record: &AlertRecord) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<AlertRecord>, StoreError>;
}
