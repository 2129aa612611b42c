//! Error handling for the Kita Kita client

use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Message used when an error response carries no usable text
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Unified error type for the Kita Kita client
#[derive(Error, Debug)]
pub enum Error {
    /// The request never reached the server
    #[error(
        "Unable to reach the server at {url}. Check that the backend is running \
         and that KITAKITA_API_URL points to it ({source})"
    )]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status and a JSON body
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// The server answered with a body the caller cannot use
    #[error("{body}")]
    UnexpectedResponse { status: StatusCode, body: String },

    /// A form failed client-side validation; nothing was sent
    #[error("{0}")]
    Validation(String),

    /// The durable session store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// The backend offers no such operation for the resource
    #[error("{0}")]
    Unsupported(String),

    /// Errors raised while reading a response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new unsupported-operation error
    pub fn unsupported<T: fmt::Display>(msg: T) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } | Error::UnexpectedResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the credentials or the token
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// Whether the request failed before any response arrived
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
