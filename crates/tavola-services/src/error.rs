//! Service error types

use tavola_core::{GENERIC_ERROR_MESSAGE, TavolaError};
use tavola_table::FetchError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("Server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        message: Option<String>,
    },

    #[error("Invalid response body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] TavolaError),
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Text to show the user: the server's message, or a generic fallback
    pub fn user_message(&self) -> &str {
        match self {
            Self::Api {
                message: Some(message),
                ..
            } => message,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

impl From<ServiceError> for FetchError {
    fn from(err: ServiceError) -> Self {
        let status = err.status();
        let fetch = match err {
            ServiceError::Api {
                message: Some(message),
                ..
            } => FetchError::new(message),
            _ => FetchError::opaque(),
        };
        match status {
            Some(status) => fetch.with_status(status),
            None => fetch,
        }
    }
}
