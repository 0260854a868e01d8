//! Unified error types for the Staffbook API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors raised by services and ports
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Company name already taken: {0}")]
    DuplicateCompanyName(String),

    /// A full-name lookup matched more than one employee
    #[error("Employee name '{full_name}' is ambiguous ({} matches)", .candidates.len())]
    AmbiguousEmployee {
        full_name: String,
        candidates: Vec<String>,
    },

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn company_not_found(name: &str) -> Self {
        DomainError::CompanyNotFound(format!("Company with name '{}' not found", name))
    }

    pub fn employee_not_found(key: &str) -> Self {
        DomainError::EmployeeNotFound(format!("Employee '{}' not found", key))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized")]
    Unauthorized,
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Domain(DomainError::CompanyNotFound(msg)) => (
                StatusCode::NOT_FOUND,
                "Company not found",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::EmployeeNotFound(msg)) => (
                StatusCode::NOT_FOUND,
                "Employee not found",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::DuplicateCompanyName(msg)) => (
                StatusCode::CONFLICT,
                "Company name already taken",
                Some(msg.clone()),
            ),
            AppError::Domain(e @ DomainError::AmbiguousEmployee { candidates, .. }) => (
                StatusCode::CONFLICT,
                "Ambiguous employee name",
                Some(format!("{}; candidate ids: {}", e, candidates.join(", "))),
            ),
            AppError::Domain(DomainError::AlreadyExists(msg)) => {
                (StatusCode::CONFLICT, "Already exists", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Validation(msg)) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            AppError::Domain(DomainError::Unauthorized(msg)) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, "Forbidden", Some(msg.clone()))
            }
            AppError::Domain(DomainError::Database(msg)) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(errors.to_string()),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized", None),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_errors_map_to_404() {
        let company = AppError::from(DomainError::company_not_found("Acme")).into_response();
        let employee = AppError::from(DomainError::employee_not_found("JaneDoe")).into_response();

        assert_eq!(company.status(), StatusCode::NOT_FOUND);
        assert_eq!(employee.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn duplicate_name_maps_to_conflict() {
        let response =
            AppError::from(DomainError::DuplicateCompanyName("Acme".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn ambiguous_employee_maps_to_conflict() {
        let err = DomainError::AmbiguousEmployee {
            full_name: "JaneDoe".to_string(),
            candidates: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(err.to_string(), "Employee name 'JaneDoe' is ambiguous (2 matches)");
        assert_eq!(
            AppError::from(err).into_response().status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn database_error_is_hidden_behind_500() {
        let response =
            AppError::from(DomainError::Database("connection refused".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_names_the_key() {
        assert_eq!(
            DomainError::company_not_found("Globex").to_string(),
            "Company not found: Company with name 'Globex' not found"
        );
        assert_eq!(
            DomainError::employee_not_found("JaneDoe").to_string(),
            "Employee not found: Employee 'JaneDoe' not found"
        );
    }
}
