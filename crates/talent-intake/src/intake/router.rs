use std::any::Any;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, warn};

use super::domain::RequestMetadata;
use super::service::{IntakeError, IntakeService};
use super::store::ApplicationStore;

/// Largest request body read by the intake handler. Anything longer is treated as missing.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Router answering intake requests on every path not claimed by another route.
pub fn intake_router<S>(service: Arc<IntakeService<S>>) -> Router
where
    S: ApplicationStore + 'static,
{
    Router::new()
        .fallback(intake_handler::<S>)
        .with_state(service)
        .layer(CatchPanicLayer::custom(panic_response))
}

pub(crate) async fn intake_handler<S>(
    State(service): State<Arc<IntakeService<S>>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let cors = service.cors().headers_for(headers.get(header::ORIGIN));

    let response = match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => {
            let metadata = RequestMetadata::from_headers(&headers);
            // Unreadable or oversized bodies go through the pipeline as empty ones, so the
            // configuration check still comes first and the caller gets the usual 400.
            let body = match to_bytes(body, MAX_BODY_BYTES).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    warn!(error = %err, limit = MAX_BODY_BYTES, "request body unreadable");
                    Bytes::new()
                }
            };
            match service.submit(&body, metadata).await {
                Ok(_) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
                Err(err) => err.into_response(),
            }
        }
        _ => IntakeError::MethodNotAllowed.into_response(),
    };

    (cors, response).into_response()
}

fn panic_response(_payload: Box<dyn Any + Send + 'static>) -> Response {
    error!("intake handler panicked");
    let body = Json(json!({ "error": "Internal server error" }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
