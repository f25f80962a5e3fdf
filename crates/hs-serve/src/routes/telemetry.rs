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
use hs_core::ingest::prepare_telemetry;
use utoipa::ToSchema;

const SUCCESS: &str = "Records processed successfully";

/// One reading or an array of readings with `button_toggle`, `event_time`
/// and `light`.
#[derive(Debug, ToSchema)]
pub struct TelemetryPayload(pub serde_json::Value);

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/post-trial", post(post_trial))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/post-trial",
    request_body = TelemetryPayload,
    responses(
        (status = 200, body = IngestResponse),
        (status = 400, body = MessageBody),
        (status = 500, body = ErrorBody)
    )
)]
pub(crate) async fn post_trial(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    body: Bytes,
) -> Response {
    let ctx = RequestContext::new(Some(correlation.0));
    let outcome = run_blocking(move || {
        let batch = prepare_telemetry(&body)?;
        let ingestor = build_ingestor(&state)?;
        ingestor.telemetry().persist(&ctx, batch)
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
