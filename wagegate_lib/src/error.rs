//! Error types for the library layer.

use std::fmt;

/// Errors produced by the catalog builder and wage aggregator.
///
/// Every upstream failure is folded into one of these variants so callers
/// can map it to a response without inspecting transport details.
#[derive(Debug)]
pub enum GatewayError {
    /// Caller input was missing or malformed.
    Validation(String),
    /// The upstream API has no data for the request.
    NotFound(String),
    /// The upstream API answered with a non-success status.
    UpstreamHttp { status: u16, body: String },
    /// No response was received from the upstream API.
    UpstreamNetwork { message: String, timeout: bool },
    /// A local processing fault (e.g. an undecodable upstream payload).
    Internal(String),
}

/// Fieldless view of [`GatewayError`], for mapping to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    UpstreamHttp,
    UpstreamNetwork,
    Internal,
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::UpstreamHttp { .. } => ErrorKind::UpstreamHttp,
            Self::UpstreamNetwork { .. } => ErrorKind::UpstreamNetwork,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// True for network failures caused by the outbound timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::UpstreamNetwork { timeout: true, .. })
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "Invalid input: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::UpstreamHttp { status, .. } => {
                write!(f, "Upstream responded with status {}", status)
            }
            Self::UpstreamNetwork { message, timeout } => {
                if *timeout {
                    write!(f, "Upstream request timed out: {}", message)
                } else {
                    write!(f, "Upstream unreachable: {}", message)
                }
            }
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<datausa_api::Error> for GatewayError {
    fn from(e: datausa_api::Error) -> Self {
        match e {
            datausa_api::Error::HttpStatus { status, body } => Self::UpstreamHttp { status, body },
            datausa_api::Error::Network { message, timeout } => {
                Self::UpstreamNetwork { message, timeout }
            }
            datausa_api::Error::Decode(msg) => Self::Internal(format!("decode: {}", msg)),
            datausa_api::Error::InvalidUrl(msg) => Self::Internal(format!("url: {}", msg)),
        }
    }
}
