//! REST API module.
//!
//! Contains all API routes and handlers. List endpoints return bare arrays,
//! mutations without a payload answer `{"success": true}`.

mod gifts;
mod people;

pub use gifts::*;
pub use people::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Acknowledgement body for updates, deletes and reorders.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// A freshly created resource, answered with 201.
#[derive(Debug)]
pub struct Created<T: Serialize>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<T, crate::errors::AppError>;

/// Create an acknowledgement response.
pub fn success() -> ApiResult<SuccessResponse> {
    Ok(SuccessResponse { success: true })
}
