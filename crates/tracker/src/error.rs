/// Errors from the tracking-service client.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The API key was rejected (HTTP 401/403 or a null viewer).
    #[error("invalid tracking-service credential")]
    InvalidCredential,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status or GraphQL errors.
    #[error("tracking-service error ({status}): {message}")]
    Api {
        /// HTTP status code (200 for GraphQL-level errors).
        status: u16,
        /// Error text for debugging.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode tracking-service response: {0}")]
    Decode(String),
}
