//! Error types for the sports recommender
//!
//! One `thiserror` hierarchy for the whole service:
//! - request errors (validation, malformed input, unknown categories)
//! - classifier and artifact-cache errors
//! - configuration errors raised at startup
//!
//! Every variant maps to an HTTP status and renders as `{"error": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

/// Result type alias for recommender operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the recommender
#[derive(Debug, Error)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidConfig {
        key: &'static str,
        message: Cow<'static, str>,
    },

    // ========================================================================
    // Request Errors
    // ========================================================================
    #[error("{field} must be between {min} and {max}.")]
    Validation {
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Unrecognized {column} category: '{value}'")]
    UnrecognizedCategory { column: &'static str, value: String },

    #[error("Invalid data format: {message}")]
    InvalidFormat { message: Cow<'static, str> },

    // ========================================================================
    // Classifier Errors
    // ========================================================================
    #[error("Classifier error: {message}")]
    Classifier { message: Cow<'static, str> },

    #[error("Model artifact error: {message}")]
    Artifact {
        message: Cow<'static, str>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {message}")]
    Internal { message: Cow<'static, str> },
}

impl Error {
    // ========================================================================
    // Constructors for common error patterns
    // ========================================================================

    /// Create an out-of-range validation error for a request field
    pub fn validation(field: &'static str, min: u32, max: u32) -> Self {
        Self::Validation { field, min, max }
    }

    /// Create an unknown-category error for a categorical column
    pub fn unrecognized(column: &'static str, value: impl Into<String>) -> Self {
        Self::UnrecognizedCategory {
            column,
            value: value.into(),
        }
    }

    /// Create a malformed-input error
    pub fn invalid_format(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Create a classifier error
    pub fn classifier(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Classifier {
            message: message.into(),
        }
    }

    /// Create an artifact cache error with source
    pub fn artifact(
        message: impl Into<Cow<'static, str>>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Artifact {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error; the detail is logged, never sent to clients
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    // ========================================================================
    // Error Classification
    // ========================================================================

    /// Returns true if this error should be logged at error level
    pub fn is_error_level(&self) -> bool {
        matches!(
            self,
            Error::Classifier { .. }
                | Error::Artifact { .. }
                | Error::Io(_)
                | Error::Internal { .. }
        )
    }

    /// Get HTTP status code for this error
    ///
    /// Only range validation is a client error; everything else is a 500,
    /// unknown categories included.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code used for logs and metrics labels
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidConfig { .. } => "CONFIG_ERROR",
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::UnrecognizedCategory { .. } => "UNRECOGNIZED_CATEGORY",
            Error::InvalidFormat { .. } | Error::Json(_) => "INVALID_FORMAT",
            Error::Classifier { .. } => "CLASSIFIER_ERROR",
            Error::Artifact { .. } | Error::Io(_) => "ARTIFACT_ERROR",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

// ============================================================================
// Error Response for API
// ============================================================================

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_error_level() {
            tracing::error!(code = self.error_code(), "Request failed: {:?}", self);
        } else {
            tracing::debug!(code = self.error_code(), "Request rejected: {}", self);
        }
        metrics::counter!("recommendation_errors_total", "kind" => self.error_code()).increment(1);

        let message = match &self {
            Error::Internal { .. } => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_name_the_field() {
        assert_eq!(
            Error::validation("Age", 10, 100).to_string(),
            "Age must be between 10 and 100."
        );
        assert_eq!(
            Error::validation("BMI", 10, 60).to_string(),
            "BMI must be between 10 and 60."
        );
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            Error::validation("Age", 10, 100).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::unrecognized("Goal", "chess").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::invalid_format("age must be an integer").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Error::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let err = Error::internal("handler panicked: index out of bounds");
        assert!(err.is_error_level());
        assert_eq!(err.error_code(), "INTERNAL_ERROR");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "An internal error occurred");
    }

    #[test]
    fn test_unrecognized_category_message() {
        let err = Error::unrecognized("Preference", "underwater");
        assert_eq!(err.to_string(), "Unrecognized Preference category: 'underwater'");
        assert_eq!(err.error_code(), "UNRECOGNIZED_CATEGORY");
        assert!(!err.is_error_level());
    }
}
