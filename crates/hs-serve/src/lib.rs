pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use hs_core::{IngestError, Ingestor, Settings};
use hs_db::DbStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

/// Opens the connection for one request.
pub fn build_ingestor(state: &AppState) -> Result<Ingestor<DbStore>, IngestError> {
    let store = DbStore::connect(&state.settings.db, state.settings.tables.clone())?;
    Ok(Ingestor::new(store))
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening for webhooks");
    axum::serve(listener, app(state)).await
}
