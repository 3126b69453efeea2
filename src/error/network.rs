//! Network-related error types.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
///
/// These errors represent issues with connectivity and HTTP transport,
/// as opposed to errors the server deliberately returned.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request timed out.
    Timeout { operation: String },

    /// HTTP status error (non-2xx response).
    HttpStatus { status: u16, message: String },

    /// Invalid response format.
    InvalidResponse { message: String },

    /// Generic network error.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and worth retrying manually.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the server. Check your connection.".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} request timed out. Try again.", operation)
            }
            NetworkError::HttpStatus { status, message } => match *status {
                400 => "The request was invalid.".to_string(),
                404 => "Not found on the server.".to_string(),
                500..=599 => "The server is having trouble. Try again later.".to_string(),
                _ => {
                    if message.is_empty() {
                        format!("The server returned an error (HTTP {}).", status)
                    } else {
                        message.clone()
                    }
                }
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a transport-level [`HttpError`] into a [`NetworkError`].
pub fn classify_http_error(err: HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: url.to_string(),
        },
        HttpError::ServerError { status, message } => NetworkError::HttpStatus { status, message },
        HttpError::Io(message) => NetworkError::Other { message },
        HttpError::InvalidUrl(message) => NetworkError::Other {
            message: format!("invalid URL: {}", message),
        },
        HttpError::Other(message) => NetworkError::Other { message },
    }
}
