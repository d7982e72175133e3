use thiserror::Error;

use crate::http::TransportError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a call against the backend can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Not signed in. Please log in to continue.")]
    AuthMissing,
    #[error("HTTP {status} {status_text}{}", detail(.message))]
    Http {
        status: u16,
        status_text: String,
        /// `message` from the response envelope, when the body carried one.
        message: Option<String>,
    },
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Validation(String),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!(": {message}"),
        _ => String::new(),
    }
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.message)
    }
}
