//! Typed error handling for the payment validation service
//!
//! Validation failures are not errors in the engine itself: they are collected
//! into a [`ValidationResult`](crate::core::validation::ValidationResult).
//! This module covers everything that leaves the engine boundary, including
//! the mapping of a failed validation onto a problem-details HTTP response.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: configuration parsing and validation
//! - [`ReferenceDataError`]: transport-level failures talking to the reference data service
//! - [`RequestError`]: malformed inbound HTTP requests
//! - [`ValidationError`]: a submission failed one or more rules

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::core::validation::ValidationFailure;

/// The main error type for the service
#[derive(Debug, Error)]
pub enum PayvalError {
    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reference data transport errors
    #[error(transparent)]
    ReferenceData(#[from] ReferenceDataError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Error response structure for non-validation failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// Problem-details body returned when a submission fails validation
///
/// Field keys keep the order in which their first failure was reported.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    pub errors: IndexMap<String, Vec<String>>,
}

impl ProblemDetails {
    /// Group failures by field path, preserving declaration order
    pub fn from_failures(failures: &[ValidationFailure]) -> Self {
        let mut errors: IndexMap<String, Vec<String>> = IndexMap::new();
        for failure in failures {
            errors
                .entry(failure.field.clone())
                .or_default()
                .push(failure.message.clone());
        }

        Self {
            problem_type: "https://tools.ietf.org/html/rfc9110#section-15.5.1".to_string(),
            title: "One or more validation errors occurred.".to_string(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            errors,
        }
    }
}

impl PayvalError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PayvalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PayvalError::ReferenceData(_) => StatusCode::BAD_GATEWAY,
            PayvalError::Request(e) => e.status_code(),
            PayvalError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            PayvalError::Config(_) => "CONFIG_ERROR",
            PayvalError::ReferenceData(e) => e.error_code(),
            PayvalError::Request(e) => e.error_code(),
            PayvalError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for PayvalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            PayvalError::Validation(ValidationError::Failures(failures)) => {
                (status, Json(ProblemDetails::from_failures(&failures))).into_response()
            }
            other => (status, Json(other.to_response())).into_response(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", file.as_deref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration parsed but violates a constraint
    #[error("Invalid configuration: {message}")]
    InvalidValue { message: String },

    /// Configuration file could not be read
    #[error("Failed to read config file '{file}': {message}")]
    IoError { file: String, message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(err: validator::ValidationErrors) -> Self {
        ConfigError::InvalidValue {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Reference Data Errors
// =============================================================================

/// Transport failures talking to the reference data service
///
/// These never escape a provider as `Err`: the provider folds them into a
/// non-success `ApiResponse`. They exist so the client has something typed to
/// return and so construction-time failures can propagate.
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("invalid reference data base URL `{0}`")]
    InvalidBaseUrl(String),

    #[error("failed to join `{path}` onto reference data base URL: {message}")]
    UrlJoin { path: String, message: String },

    #[error("failed to build reference data HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("reference data request to `{path}` failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read reference data body from `{path}`: {source}")]
    Body {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ReferenceDataError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ReferenceDataError::InvalidBaseUrl(_) | ReferenceDataError::UrlJoin { .. } => {
                "REFERENCE_DATA_URL_ERROR"
            }
            ReferenceDataError::ClientBuild(_) => "REFERENCE_DATA_CLIENT_ERROR",
            ReferenceDataError::Request { .. } | ReferenceDataError::Body { .. } => {
                "REFERENCE_DATA_UNAVAILABLE"
            }
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A submission failed validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more rule failures, in evaluation order
    #[error("Validation errors: {}", format_failures(.0))]
    Failures(Vec<ValidationFailure>),
}

fn format_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{}: {}", f.field, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid request body
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// Body was not JSON
    #[error("Unsupported content type: {message}")]
    UnsupportedMediaType { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for service operations
pub type PayvalResult<T> = Result<T, PayvalError>;

// =============================================================================
// Tests
// =============================================================================
