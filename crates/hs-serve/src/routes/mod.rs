pub mod alerts;
pub mod error;
pub mod telemetry;

use crate::AppState;
use crate::middleware::correlation::correlation_middleware;
use axum::Router;
use axum::middleware;
use hs_core::IngestError;
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::ToSchema;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(alerts::router(state.clone()))
        .merge(telemetry::router(state))
        .route_layer(middleware::from_fn(correlation_middleware))
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub message: String,
    /// Rows written by this request.
    pub inserted: usize,
    /// Records dropped for missing required fields.
    pub skipped: usize,
}

/// Runs storage work on the blocking pool. Once spawned it runs to
/// completion even if the client goes away.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, IngestError>
where
    F: FnOnce() -> Result<T, IngestError> + Send + 'static,
    T: Send + 'static,
{
    let span = Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(f))
        .await
        .map_err(|err| IngestError::Internal {
            message: err.to_string(),
        })?
}
