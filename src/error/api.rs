//! Errors produced by the remote pet client.
//!
//! Every failure is reported as one [`ApiError`] whose `Display` is the
//! single human-readable message shown to the user, prefixed by the operation
//! that failed. The kind is kept for logging and tests.

use std::fmt;
use thiserror::Error;

use crate::traits::HttpError;

/// The client call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    FetchPets,
    FetchPet,
    CreatePet,
    UpdatePet,
}

impl ApiOperation {
    /// Human-readable description used as the message prefix.
    pub fn describe(&self) -> &'static str {
        match self {
            ApiOperation::FetchPets => "fetch pets",
            ApiOperation::FetchPet => "fetch pet",
            ApiOperation::CreatePet => "create pet",
            ApiOperation::UpdatePet => "update pet",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// What went wrong, independent of the operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiErrorKind {
    /// Transport failure before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Response received with a status outside 2xx
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// 404 on a single-resource request
    #[error("Pet with id {id} not found")]
    NotFound { id: String },

    /// Response body could not be decoded
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl From<HttpError> for ApiErrorKind {
    fn from(err: HttpError) -> Self {
        ApiErrorKind::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ApiErrorKind {
    fn from(err: serde_json::Error) -> Self {
        ApiErrorKind::Decode(err.to_string())
    }
}

/// A failed client call.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to {operation}: {kind}")]
pub struct ApiError {
    pub operation: ApiOperation,
    #[source]
    pub kind: ApiErrorKind,
}

impl ApiError {
    pub fn new(operation: ApiOperation, kind: impl Into<ApiErrorKind>) -> Self {
        Self {
            operation,
            kind: kind.into(),
        }
    }

    /// Whether the requested pet does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ApiErrorKind::NotFound { .. })
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::Network(_) => "E_API_NETWORK",
            ApiErrorKind::Http { .. } => "E_API_HTTP",
            ApiErrorKind::NotFound { .. } => "E_API_NOT_FOUND",
            ApiErrorKind::Decode(_) => "E_API_DECODE",
        }
    }
}
