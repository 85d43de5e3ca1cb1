use thiserror::Error;

/// Type alias for Result with DigestError
pub type Result<T> = std::result::Result<T, DigestError>;

/// Error types for the digest run
///
/// Only the final send step has explicit containment (handled by the
/// orchestrator); everything else either succeeds, skips, or aborts the run.
#[derive(Error, Debug)]
pub enum DigestError {
    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server returned 5xx error
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Resource not found (404) - e.g. a message deleted between list and fetch
    #[error("Message not found: {0}")]
    MessageNotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Summarization request failed
    #[error("Summarization failed: {0}")]
    Summarizer(#[from] async_openai::error::OpenAIError),

    /// The model returned a completion with no content
    #[error("Summarizer returned no content")]
    EmptySummary,

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<google_gmail1::Error> for DigestError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // HTTP response with status code (non-success responses)
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                let status_code = status.as_u16();
                let message = format!(
                    "HTTP {}: {}",
                    status_code,
                    status.canonical_reason().unwrap_or("Unknown")
                );

                match status_code {
                    // Not found
                    404 => DigestError::MessageNotFound("Resource not found".to_string()),
                    // Bad request
                    400 => DigestError::BadRequest(message),
                    // Forbidden
                    403 => DigestError::Forbidden(message),
                    // Server errors
                    500..=599 => DigestError::ServerError {
                        status: status_code,
                        message,
                    },
                    // Other non-success status codes
                    _ => DigestError::ApiError(message),
                }
            }
            // BadRequest variant (request not understood by server)
            google_gmail1::Error::BadRequest(ref err) => DigestError::BadRequest(format!("{}", err)),
            // Network/connection errors
            google_gmail1::Error::HttpError(ref err) => {
                DigestError::NetworkError(format!("Connection error: {}", err))
            }
            // IO errors
            google_gmail1::Error::Io(err) => DigestError::NetworkError(err.to_string()),
            // All other errors
            _ => DigestError::ApiError(error.to_string()),
        }
    }
}
