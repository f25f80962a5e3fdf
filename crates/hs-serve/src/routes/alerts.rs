use crate::middleware::correlation::CorrelationId;
use crate::routes::error::{ErrorBody, MessageBody, map_error};
use crate::routes::{IngestResponse, run_blocking};
use crate::{AppState, build_ingestor};
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use hs_core::RequestContext;
use hs_core::ingest::prepare_alerts;
use utoipa::ToSchema;

const SUCCESS: &str = "Alerts processed successfully";

/// A SIEM hit envelope: `result.input.payload.hits.hits[]`, a top-level
/// `hits[]` of flat alerts, or a bare array of hits.
#[derive(Debug, ToSchema)]
pub struct AlertPayload(pub serde_json::Value);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/post-alert", post(post_alert))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/post-alert",
    request_body = AlertPayload,
    responses(
        (status = 200, body = IngestResponse),
        (status = 400, body = MessageBody),
        (status = 500, body = ErrorBody)
    )
)]
pub(crate) async fn post_alert(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::new(Some(correlation.0));
    let outcome = run_blocking(move || {
        let batch = prepare_alerts(&body)?;
        let ingestor = build_ingestor(&state)?;
        ingestor.alerts().persist(&ctx, batch)
    })
    .await;
    match outcome {
        Ok(summary) => Json(IngestResponse {
            message: SUCCESS.to_string(),
            inserted: summary.inserted,
            skipped: summary.skipped,
        })
        .into_response(),
        Err(err) => map_error(&err),
    }
}
