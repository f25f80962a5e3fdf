use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hs_core::IngestError;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of a rejected request.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Body of a failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

pub fn map_error(err: &IngestError) -> Response {
    match err {
        IngestError::Request(request) => (
            StatusCode::BAD_REQUEST,
            Json(MessageBody {
                message: request.to_string(),
            }),
        )
            .into_response(),
        IngestError::Store(_) | IngestError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: err.to_string(),
            }),
        )
            .into_response(),
    }
}
