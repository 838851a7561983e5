//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No usable response was received (connect failure, timeout, or the
    /// body could not be read).
    #[error("Request failed: {message}")]
    Network { message: String, timeout: bool },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response arrived but could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
    /// The endpoint URL could not be constructed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Returns true when the request gave up because of the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Network { timeout: true, .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Network {
            message: e.to_string(),
            timeout: e.is_timeout(),
        }
    }
}
