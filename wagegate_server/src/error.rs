//! Maps library failures to HTTP responses.
//!
//! Clients get a status code and a short message. Upstream bodies and
//! transport details stay in the server log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wagegate_lib::GatewayError;

/// Error returned by gateway handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request data (400).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No upstream data for the request (404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered with an error status (502).
    #[error("{message}")]
    UpstreamStatus {
        message: &'static str,
        upstream_status: u16,
    },

    /// Upstream could not be reached (502, or 504 on timeout).
    #[error("{message}")]
    UpstreamUnavailable {
        message: &'static str,
        timeout: bool,
    },

    /// Local fault (500).
    #[error("{0}")]
    Internal(&'static str),
}

impl ApiError {
    /// Converts a library error, logging it with the operation and subject
    /// it belongs to. `public` is the message shown for upstream and
    /// internal failures.
    pub fn from_gateway(
        operation: &'static str,
        subject: Option<&str>,
        public: &'static str,
        err: GatewayError,
    ) -> Self {
        let subject = subject.unwrap_or("-");
        match err {
            GatewayError::Validation(msg) => {
                tracing::warn!("{} rejected ({}): {}", operation, subject, msg);
                ApiError::BadRequest(msg)
            }
            GatewayError::NotFound(msg) => {
                tracing::info!("{} found nothing ({}): {}", operation, subject, msg);
                ApiError::NotFound(msg)
            }
            GatewayError::UpstreamHttp { status, body } => {
                tracing::error!(
                    "{} failed ({}): upstream status {} body: {}",
                    operation,
                    subject,
                    status,
                    body
                );
                ApiError::UpstreamStatus {
                    message: public,
                    upstream_status: status,
                }
            }
            GatewayError::UpstreamNetwork { message, timeout } => {
                tracing::error!(
                    "{} failed ({}): upstream unreachable (timeout: {}): {}",
                    operation,
                    subject,
                    timeout,
                    message
                );
                ApiError::UpstreamUnavailable {
                    message: public,
                    timeout,
                }
            }
            GatewayError::Internal(msg) => {
                tracing::error!("{} failed ({}): {}", operation, subject, msg);
                ApiError::Internal(public)
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::UpstreamStatus { .. } => StatusCode::BAD_GATEWAY,
            ApiError::UpstreamUnavailable { timeout: true, .. } => StatusCode::GATEWAY_TIMEOUT,
            ApiError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::UpstreamStatus {
                message,
                upstream_status,
            } => json!({
                "message": message,
                "status": status.as_u16(),
                "upstream_status": upstream_status,
            }),
            other => json!({
                "message": other.to_string(),
                "status": status.as_u16(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
