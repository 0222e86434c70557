pub mod auth;
pub mod project;

use axum::body::Bytes;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Parse a raw request body as JSON. An empty body reads as `null`.
///
/// Handlers that must authorize before looking at the payload take the body
/// as [`Bytes`] and call this afterwards.
pub(crate) fn json_body(body: &Bytes) -> AppResult<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {e}")))
}
