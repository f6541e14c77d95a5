//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The provider rejected the API key (HTTP 401 or 403).
    #[error("API key rejected by provider (HTTP {status})")]
    Unauthorized { status: u16 },
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}
