//! Shared response types for API handlers.
//!
//! Reads return a `{ "data": ... }` envelope ([`DataResponse`]). Successful
//! writes return [`Redirect`]: a `303 See Other` pointing back at the listing,
//! with a one-shot flash acknowledgement in the body.

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// One-shot message shown after a redirect.
#[derive(Debug, Clone, Serialize)]
pub struct Flash {
    pub success: String,
}

/// Redirect-after-write response.
///
/// Serializes as `{"redirect": "<location>", "flash": {"success": "..."}}`
/// alongside a `Location` header.
#[derive(Debug, Clone, Serialize)]
pub struct Redirect {
    pub redirect: &'static str,
    pub flash: Flash,
}

impl Redirect {
    pub fn see_other(location: &'static str, success: impl Into<String>) -> Self {
        Self {
            redirect: location,
            flash: Flash {
                success: success.into(),
            },
        }
    }
}

impl IntoResponse for Redirect {
    fn into_response(self) -> Response {
        (StatusCode::SEE_OTHER, [(LOCATION, self.redirect)], Json(self)).into_response()
    }
}
