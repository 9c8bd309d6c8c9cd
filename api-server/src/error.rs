//! HTTP rendering of `ApplicationError` and the server's startup errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use repo_core::ApplicationError;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::ConfigError;

/// Handler error: written out as the wrapped error's status and JSON body.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(status = status.as_u16(), code = %self.0.code, message = %self.0.message, "request failed");
        } else {
            warn!(status = status.as_u16(), code = %self.0.code, message = %self.0.message, "request rejected");
        }
        (status, Json(self.0)).into_response()
    }
}

/// Failures that stop the server from starting or serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),
}
