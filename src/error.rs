use std::error::Error;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::service::ServiceError;

/// Failures reported to HTTP callers.
///
/// Only a generic message leaves the process; the underlying cause is logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body is not a valid article")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Error serving articles")]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("{}: {:?}", self, self.source());
        } else {
            warn!("{}: {:?}", self, self.source());
        }

        let message = status.canonical_reason().unwrap_or("Error");
        let payload = Json(json!({ "message": message }));

        (status, payload).into_response()
    }
}
