//! Typed error handling for address operations
//!
//! Every service operation converts its failures into one of the kinds
//! below before building its outcome, so transport layers only ever
//! branch on [`ErrorKind`].
//!
//! # Error Categories
//!
//! - [`AddressError`]: failures of an address operation
//! - [`StoreError`]: failures reported by an [`AddressStore`](crate::core::store::AddressStore)
//! - [`ErrorResponse`]: body used for transport-level rejections

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field name → one or more human-readable messages, in field order
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Discriminant of an [`AddressError`], carried inside outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    ValidationFailed,
    NotFound,
    StoreFailure,
}

impl ErrorKind {
    /// HTTP status code for this kind
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code for programmatic handling
    pub fn error_code(self) -> &'static str {
        match self {
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::ValidationFailed => "VALIDATION_FAILED",
            ErrorKind::NotFound => "ADDRESS_NOT_FOUND",
            ErrorKind::StoreFailure => "STORE_FAILURE",
        }
    }
}

/// Errors of the address operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    /// No session in the request context
    #[error("Unauthorized")]
    Unauthorized,

    /// The session lacks the role the operation requires
    #[error("Forbidden")]
    Forbidden,

    /// Input failed validation
    #[error("Validation failed")]
    ValidationFailed(FieldErrors),

    /// Lookup by id yielded nothing
    #[error("Address not found.")]
    NotFound { id: String },

    /// Underlying data-access error, message passed through
    #[error("{0}")]
    Store(String),
}

impl AddressError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddressError::Unauthorized => ErrorKind::Unauthorized,
            AddressError::Forbidden => ErrorKind::Forbidden,
            AddressError::ValidationFailed(_) => ErrorKind::ValidationFailed,
            AddressError::NotFound { .. } => ErrorKind::NotFound,
            AddressError::Store(_) => ErrorKind::StoreFailure,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    pub fn error_code(&self) -> &'static str {
        self.kind().error_code()
    }

    /// Field-level errors, if this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AddressError::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        AddressError::NotFound { id: id.into() }
    }
}

/// Errors reported by an address store
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("Record {id} not found")]
    NotFound { id: Uuid },

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for AddressError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => AddressError::not_found(id.to_string()),
            StoreError::Backend(message) => AddressError::Store(message),
        }
    }
}

/// A specialized Result type for address operations
pub type AddressResult<T> = Result<T, AddressError>;

/// Error body for rejections that happen before an operation runs
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Rejection produced by request body extraction
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::UnsupportedContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::UnsupportedContentType(_) => "UNSUPPORTED_CONTENT_TYPE",
            RequestError::InvalidBody(_) => "INVALID_BODY",
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(self.error_code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
