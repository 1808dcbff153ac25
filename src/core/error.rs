//! Typed error handling for the record service
//!
//! Every fallible operation returns [`BizResult`]. Each error carries the HTTP
//! status it should be rendered with, so handlers never decide status codes
//! themselves.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a key did not match any company or invoice
//! - [`ValidationError`]: missing or malformed request input
//! - [`StorageError`]: the store failed or rejected a write
//! - [`RequestError`]: bad path parameters or unknown routes
//! - [`ConfigError`]: configuration could not be loaded (startup only)
//!
//! # Example
//!
//! ```rust,ignore
//! match repo.get_by_code("apple").await {
//!     Ok(company) => println!("{}", company.name),
//!     Err(BizError::Entity(EntityError::NotFound { key, .. })) => {
//!         println!("no company {}", key);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the service
#[derive(Debug)]
pub enum BizError {
    /// Lookup/update/delete key matched nothing
    Entity(EntityError),

    /// Request input is missing or malformed
    Validation(ValidationError),

    /// Store failures and rejected writes
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Configuration errors
    Config(ConfigError),

    /// Should not happen in normal operation
    Internal(String),
}

impl fmt::Display for BizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BizError::Entity(e) => write!(f, "{}", e),
            BizError::Validation(e) => write!(f, "{}", e),
            BizError::Storage(e) => write!(f, "{}", e),
            BizError::Request(e) => write!(f, "{}", e),
            BizError::Config(e) => write!(f, "{}", e),
            BizError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for BizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BizError::Entity(e) => Some(e),
            BizError::Validation(e) => Some(e),
            BizError::Storage(e) => Some(e),
            BizError::Request(e) => Some(e),
            BizError::Config(e) => Some(e),
            BizError::Internal(_) => None,
        }
    }
}

/// Error object nested in every failure body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: String,
    /// HTTP status the error was rendered with
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// JSON body of every failure: `{ "error": {...}, "message": "..." }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    /// Human-readable error message
    pub message: String,
}

impl BizError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BizError::Entity(e) => e.status_code(),
            BizError::Validation(_) => StatusCode::BAD_REQUEST,
            BizError::Storage(e) => e.status_code(),
            BizError::Request(e) => e.status_code(),
            BizError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            BizError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BizError::Entity(e) => e.error_code(),
            BizError::Validation(e) => e.error_code(),
            BizError::Storage(e) => e.error_code(),
            BizError::Request(e) => e.error_code(),
            BizError::Config(_) => "CONFIG_ERROR",
            BizError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for both kinds of "no such record"
    pub fn is_not_found(&self) -> bool {
        matches!(self, BizError::Entity(_))
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                status: self.status_code().as_u16(),
                details: self.details(),
            },
            message: self.to_string(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            BizError::Entity(EntityError::NotFound {
                entity_type, key, ..
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "key": key
            })),
            BizError::Entity(EntityError::Unmatched {
                entity_type,
                key,
                operation,
                ..
            }) => Some(serde_json::json!({
                "entity_type": entity_type,
                "key": key,
                "operation": operation
            })),
            BizError::Validation(ValidationError::MissingParameters { missing, .. }) => {
                Some(serde_json::json!({ "missing": missing }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for BizError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(code = self.error_code(), "request failed: {}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// A key did not match any record
///
/// `NotFound` is rendered 404. `Unmatched` is the same condition on a write;
/// it renders 400 unless [`rendered_as`](EntityError::rendered_as) says
/// otherwise (invoice update keeps 404).
#[derive(Debug)]
pub enum EntityError {
    NotFound {
        entity_type: String,
        key_name: String,
        key: String,
    },

    Unmatched {
        entity_type: String,
        key_name: String,
        key: String,
        operation: String,
        status: StatusCode,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, key_name: &str, key: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            key_name: key_name.to_string(),
            key: key.to_string(),
        }
    }

    pub fn unmatched(
        entity_type: &str,
        key_name: &str,
        key: impl ToString,
        operation: &str,
    ) -> Self {
        EntityError::Unmatched {
            entity_type: entity_type.to_string(),
            key_name: key_name.to_string(),
            key: key.to_string(),
            operation: operation.to_string(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    /// Override the status an `Unmatched` error is rendered with
    pub fn rendered_as(self, status: StatusCode) -> Self {
        match self {
            EntityError::Unmatched {
                entity_type,
                key_name,
                key,
                operation,
                ..
            } => EntityError::Unmatched {
                entity_type,
                key_name,
                key,
                operation,
                status,
            },
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Unmatched { status, .. } => *status,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Unmatched { .. } => "ENTITY_UNMATCHED",
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound {
                entity_type,
                key_name,
                ..
            } => {
                write!(f, "{} {} doesn't exist", capitalize(entity_type), key_name)
            }
            EntityError::Unmatched {
                entity_type,
                key_name,
                ..
            } => {
                write!(f, "Incorrect {} {}", entity_type, key_name)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for BizError {
    fn from(err: EntityError) -> Self {
        BizError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request input
#[derive(Debug)]
pub enum ValidationError {
    /// One or more required parameters were absent or empty
    MissingParameters {
        missing: Vec<String>,
        expected: Vec<String>,
    },

    /// Single field validation error
    FieldError { field: String, message: String },

    /// Body was not valid JSON for the operation
    InvalidJson { message: String },
}

impl ValidationError {
    pub fn missing(missing: &[&str], expected: &[&str]) -> Self {
        ValidationError::MissingParameters {
            missing: missing.iter().map(|s| s.to_string()).collect(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingParameters { .. } => "MISSING_PARAMETERS",
            ValidationError::FieldError { .. } => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
        }
    }
}

fn english_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} and {}", a, b),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingParameters { expected, .. } => {
                write!(
                    f,
                    "Missing parameters. Please input {}",
                    english_list(expected)
                )
            }
            ValidationError::FieldError { field, message } => {
                write!(f, "Validation error for field '{}': {}", field, message)
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for BizError {
    fn from(err: ValidationError) -> Self {
        BizError::Validation(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a store backend
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    ConnectionError { backend: String, message: String },

    /// Query execution error
    QueryError { backend: String, message: String },

    /// Write rejected by a key, foreign key or check constraint
    IntegrityError { message: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::IntegrityError { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_ERROR",
            StorageError::IntegrityError { .. } => "INTEGRITY_ERROR",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::IntegrityError { message } => {
                write!(f, "Data integrity error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for BizError {
    fn from(err: StorageError) -> Self {
        BizError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invoice ids are integers
    InvalidInvoiceId { id: String },

    /// Path segment is not a readable company code
    InvalidCompanyCode { code: String },

    /// No route matched
    RouteNotFound { method: String, path: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidInvoiceId { .. } | RequestError::InvalidCompanyCode { .. } => {
                StatusCode::BAD_REQUEST
            }
            RequestError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidInvoiceId { .. } => "INVALID_INVOICE_ID",
            RequestError::InvalidCompanyCode { .. } => "INVALID_COMPANY_CODE",
            RequestError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
        }
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidInvoiceId { id } => {
                write!(f, "Invalid invoice id: '{}'", id)
            }
            RequestError::InvalidCompanyCode { code } => {
                write!(f, "Invalid company code: '{}'", code)
            }
            RequestError::RouteNotFound { .. } => write!(f, "Not Found"),
        }
    }
}

impl std::error::Error for RequestError {}

impl From<RequestError> for BizError {
    fn from(err: RequestError) -> Self {
        BizError::Request(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for BizError {
    fn from(err: ConfigError) -> Self {
        BizError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for BizError {
    fn from(err: serde_json::Error) -> Self {
        BizError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for service operations
pub type BizResult<T> = Result<T, BizError>;
