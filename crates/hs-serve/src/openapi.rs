use utoipa::OpenApi;

use crate::routes::IngestResponse;
use crate::routes::alerts::AlertPayload;
use crate::routes::error::{ErrorBody, MessageBody};
use crate::routes::telemetry::TelemetryPayload;

#[derive(OpenApi)]
#[openapi(
    info(title = "hooksink", description = "Security alert and telemetry webhook receiver"),
    paths(
        crate::routes::alerts::post_alert,
        crate::routes::telemetry::post_trial,
    ),
    components(schemas(
        AlertPayload,
        TelemetryPayload,
        IngestResponse,
        MessageBody,
        ErrorBody
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}
