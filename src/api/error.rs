use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::calculator::CalculationError;

/// API error types that can be returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Calculation input rejected; every violated constraint is listed
    #[error("Invalid calculation input")]
    InvalidInput(Vec<String>),

    /// A named strategy or tariff period could not be resolved
    #[error("Lookup error: {0}")]
    LookupError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Error response that gets serialized to JSON
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::LookupError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error type string
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NotFound",
            ApiError::ValidationError(_) | ApiError::InvalidInput(_) => "ValidationError",
            ApiError::LookupError(_) => "LookupError",
            ApiError::InternalError(_) => "InternalServerError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();

        let message = match &self {
            ApiError::InternalError(_) => {
                tracing::error!(error = %self, "API error occurred");
                "An internal error occurred".to_string()
            }
            ApiError::LookupError(_) => {
                tracing::warn!(error = %self, "calculation lookup failed");
                self.to_string()
            }
            _ => {
                tracing::debug!(error = %self, "Client error");
                self.to_string()
            }
        };

        let errors = match self {
            ApiError::InvalidInput(errors) => errors,
            _ => Vec::new(),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            errors,
        };

        (status, Json(error_response)).into_response()
    }
}

// Conversion from common error types

impl From<CalculationError> for ApiError {
    fn from(error: CalculationError) -> Self {
        match error {
            CalculationError::InvalidInput(errors) => ApiError::InvalidInput(errors),
            other if other.is_lookup() => ApiError::LookupError(other.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalError(format!("{error:#}"))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidInput(vec!["bad".to_string()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::LookupError("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InternalError("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_calculation_error_mapping() {
        let err: ApiError = CalculationError::InvalidInput(vec!["x".to_string()]).into();
        assert!(matches!(err, ApiError::InvalidInput(ref v) if v.len() == 1));

        let err: ApiError = CalculationError::MissingOffPeakPeriod.into();
        assert_eq!(err.error_type(), "LookupError");
        assert!(err.to_string().contains("Off-Peak"));
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::NotFound("Tariff 12".to_string());
        assert_eq!(error.to_string(), "Resource not found: Tariff 12");
    }
}
