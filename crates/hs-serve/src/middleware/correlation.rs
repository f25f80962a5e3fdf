use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{Instrument, info_span};
use ulid::Ulid;

#[derive(Clone, Debug)]
pub struct CorrelationId(pub String);

pub const HEADER_NAME: &str = "x-correlation-id";
const FALLBACK_HEADER: &str = "x-request-id";
const MAX_LEN: usize = 128;

/// Upstream senders usually set one of the two headers; anything unusable is
/// replaced with a fresh id.
fn incoming_id(headers: &HeaderMap) -> Option<String> {
    [HEADER_NAME, FALLBACK_HEADER]
        .into_iter()
        .filter_map(|name| headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty() && value.len() <= MAX_LEN)
        .map(str::to_string)
}

pub async fn correlation_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = incoming_id(request.headers()).unwrap_or_else(|| format!("corr_{}", Ulid::new()));
    let span = info_span!("webhook", correlation_id = %id, path = %request.uri().path());

    request.extensions_mut().insert(CorrelationId(id.clone()));
    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(HEADER_NAME), value);
    }
    response
}
