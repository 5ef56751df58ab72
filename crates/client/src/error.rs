use thiserror::Error;

/// Errors that can occur while talking to the API
///
/// Only transport-level failures and local misconfiguration are errors.
/// Responses with a non-2xx status are returned to the caller unchanged.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure from reqwest (timeout, refused connection, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL could not be parsed or joined with an endpoint path
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// Configuration value could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// Response body is not the expected JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Form parameters could not be encoded
    #[error("Encode error: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
