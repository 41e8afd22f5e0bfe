//! Error taxonomy shared by the gateway, the façades and the session manager.

use reqwest::StatusCode;
use thiserror::Error;

use crate::{storage::StorageError, validation::ValidationError};

/// Coarse classification of a failure, used to decide how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The host was unreachable, the connection broke, or the body was not
    /// JSON.
    TransportFailure,
    /// The server answered with a non-success status.
    RequestFailed,
    /// Input was rejected before any request was made.
    ValidationFailure,
    /// The same operation is already running.
    InFlight,
    /// The local session storage could not be read or written.
    Storage,
}

/// Failure of a single gateway call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status; `message` is the server-supplied text.
    #[error("{message}")]
    RequestFailed {
        /// Status the server answered with.
        status: StatusCode,
        /// Display-ready server message.
        message: String,
    },
    /// The request never produced a response.
    #[error("request to {path} failed: {source}")]
    Transport {
        /// Request path, relative to the API root.
        path: String,
        /// Underlying client failure.
        #[source]
        source: reqwest::Error,
    },
    /// The response body was not the expected JSON.
    #[error("unreadable response from {path}: {source}")]
    Decode {
        /// Request path, relative to the API root.
        path: String,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// A successful envelope had no `data` where one was required.
    #[error("response from {path} did not include data")]
    MissingData {
        /// Request path, relative to the API root.
        path: String,
    },
}

impl ApiError {
    /// Classifies the failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RequestFailed { .. } => ErrorKind::RequestFailed,
            Self::Transport { .. } | Self::Decode { .. } | Self::MissingData { .. } => {
                ErrorKind::TransportFailure
            }
        }
    }

    /// HTTP status of a failed request, if the server answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Tagged failure returned by every session operation.
///
/// The payload is always a display-ready message string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthFailure {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Text to show the user.
    pub message: String,
}

impl AuthFailure {
    /// Builds a failure of `kind` carrying `message`.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn in_flight(operation: &str) -> Self {
        Self::new(
            ErrorKind::InFlight,
            format!("Request already in progress: {operation}"),
        )
    }
}

impl From<ApiError> for AuthFailure {
    fn from(err: ApiError) -> Self {
        let kind = err.kind();
        match err {
            ApiError::RequestFailed { message, .. } => Self::new(kind, message),
            other => Self::new(kind, other.to_string()),
        }
    }
}

impl From<StorageError> for AuthFailure {
    fn from(err: StorageError) -> Self {
        Self::new(ErrorKind::Storage, err.to_string())
    }
}

impl From<ValidationError> for AuthFailure {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorKind::ValidationFailure, err.to_string())
    }
}

/// Result of a session operation.
pub type AuthResult<T> = Result<T, AuthFailure>;
