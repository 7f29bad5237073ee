use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for the dispatch service
#[derive(Debug)]
pub enum DispatchError {
    // HTTP and API errors
    Forbidden(String),
    Conflict(String),
    InternalServer(String),

    // Business logic errors
    RideNotFound(String),
    DriverNotFound(String),
    InvalidStateTransition { current: String, action: String },
    DriverNotAvailable(String),
    DuplicateResource { resource: String, field: String, value: String },

    // Validation errors
    ValidationFailed(Vec<ValidationError>),
    MissingRequiredField(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            DispatchError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DispatchError::InternalServer(msg) => write!(f, "Internal server error: {}", msg),

            DispatchError::RideNotFound(id) => write!(f, "Ride not found: {}", id),
            DispatchError::DriverNotFound(id) => write!(f, "Driver not found: {}", id),
            DispatchError::InvalidStateTransition { current, action } => {
                write!(f, "Cannot {} a ride in state {}", action, current)
            }
            DispatchError::DriverNotAvailable(id) => write!(f, "Driver is not available: {}", id),
            DispatchError::DuplicateResource { resource, field, value } => {
                write!(f, "{} already exists with {} '{}'", resource, field, value)
            }

            DispatchError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            DispatchError::MissingRequiredField(field) => {
                write!(f, "Missing required field: {}", field)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            DispatchError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            DispatchError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            DispatchError::InternalServer(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg,
                None,
            ),

            DispatchError::RideNotFound(id) => (
                StatusCode::NOT_FOUND,
                "ride_not_found",
                format!("Ride not found: {}", id),
                None,
            ),
            DispatchError::DriverNotFound(id) => (
                StatusCode::NOT_FOUND,
                "driver_not_found",
                format!("Driver not found: {}", id),
                None,
            ),
            DispatchError::InvalidStateTransition { current, action } => (
                StatusCode::CONFLICT,
                "invalid_state_transition",
                format!("Cannot {} a ride in state {}", action, current),
                None,
            ),
            DispatchError::DriverNotAvailable(id) => (
                StatusCode::CONFLICT,
                "driver_not_available",
                format!("Driver is not available: {}", id),
                None,
            ),
            DispatchError::DuplicateResource { resource, field, value } => (
                StatusCode::CONFLICT,
                "duplicate_resource",
                format!("{} already exists with {} '{}'", resource, field, value),
                None,
            ),

            DispatchError::ValidationFailed(errors) => {
                let details = serde_json::to_value(&errors).ok();
                (
                    StatusCode::BAD_REQUEST,
                    "validation_failed",
                    "Validation errors occurred".to_string(),
                    details,
                )
            }
            DispatchError::MissingRequiredField(field) => (
                StatusCode::BAD_REQUEST,
                "missing_field",
                format!("Missing required field: {}", field),
                None,
            ),
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, axum::Json(error_response)).into_response()
    }
}

// Convenience type alias for Results
pub type DispatchResult<T> = Result<T, DispatchError>;

// Helper functions for creating common errors
impl DispatchError {
    pub fn forbidden(msg: impl Into<String>) -> Self {
        DispatchError::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        DispatchError::Conflict(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        DispatchError::InternalServer(msg.into())
    }

    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        DispatchError::ValidationFailed(vec![ValidationError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub fn ride_not_found(ride_id: impl Into<String>) -> Self {
        DispatchError::RideNotFound(ride_id.into())
    }

    pub fn driver_not_found(driver_id: impl Into<String>) -> Self {
        DispatchError::DriverNotFound(driver_id.into())
    }

    pub fn invalid_transition(current: impl Into<String>, action: impl Into<String>) -> Self {
        DispatchError::InvalidStateTransition {
            current: current.into(),
            action: action.into(),
        }
    }

    pub fn duplicate(
        resource: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        DispatchError::DuplicateResource {
            resource: resource.into(),
            field: field.into(),
            value: value.into(),
        }
    }
}
