//! Employee handlers
//!
//! Employees are addressed by id (`/employees/:id`) or by full name
//! (`/employees/by-name/:full_name`).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::app::{authorize, Operation};
use crate::domain::entities::{
    EducationLevel, EmployeeDetails, EmployeeId, EmployeeSummary, NewEmployee, User,
};
use crate::error::AppError;
use crate::AppState;

/// Request to hire an employee
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 2, message = "First name must be at least 2 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, message = "Last name must be at least 2 characters"))]
    pub last_name: String,
    #[validate(custom(function = "not_in_future", message = "Birth date cannot be in the future"))]
    pub birth_date: NaiveDate,
    pub education_level: EducationLevel,
    #[validate(length(min = 1, message = "Job title cannot be empty"))]
    pub job_title: String,
    #[validate(range(min = 0.01, message = "Salary must be at least 0.01"))]
    pub salary: f64,
    /// Employer; an unknown name leaves the employee unattached
    pub company_name: Option<String>,
}

/// Request to move an employee to another company
#[derive(Debug, Deserialize, Validate)]
pub struct TransferRequest {
    #[validate(length(min = 1, message = "Company name cannot be empty"))]
    pub company_name: String,
}

/// Query parameters for the full-name search
#[derive(Debug, Deserialize)]
pub struct SearchEmployeesQuery {
    pub full_name: String,
}

fn not_in_future(date: &NaiveDate) -> Result<(), ValidationError> {
    if *date > Utc::now().date_naive() {
        return Err(ValidationError::new("future_date"));
    }
    Ok(())
}

/// GET /employees
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<EmployeeSummary>>, AppError> {
    authorize(&user, Operation::Read)?;

    let employees = state.employee_service.list_all().await?;
    Ok(Json(employees))
}

/// GET /employees/search?full_name=
pub async fn search_employees(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<SearchEmployeesQuery>,
) -> Result<Json<Vec<EmployeeSummary>>, AppError> {
    authorize(&user, Operation::Read)?;

    let employees = state
        .employee_service
        .search_by_full_name(&query.full_name)
        .await?;
    Ok(Json(employees))
}

/// GET /employees/by-name/:full_name
pub async fn get_employee_by_name(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(full_name): Path<String>,
) -> Result<Json<EmployeeDetails>, AppError> {
    authorize(&user, Operation::Read)?;

    let details = state.employee_service.info(&full_name).await?;
    Ok(Json(details))
}

/// GET /employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeDetails>, AppError> {
    authorize(&user, Operation::Read)?;

    let details = state.employee_service.info_by_id(&EmployeeId(id)).await?;
    Ok(Json(details))
}

/// POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeDetails>), AppError> {
    authorize(&user, Operation::AddEmployee)?;
    request.validate()?;

    let employee = state
        .employee_service
        .add_employee(NewEmployee {
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            education_level: request.education_level,
            job_title: request.job_title,
            salary: request.salary,
            company_name: request
                .company_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// DELETE /employees/by-name/:full_name
pub async fn fire_employee_by_name(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(full_name): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&user, Operation::FireEmployee)?;

    state.employee_service.fire(&full_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /employees/:id
pub async fn fire_employee(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    authorize(&user, Operation::FireEmployee)?;

    state.employee_service.fire_by_id(&EmployeeId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /employees/by-name/:full_name/transfer
pub async fn transfer_employee_by_name(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(full_name): Path<String>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<EmployeeDetails>, AppError> {
    authorize(&user, Operation::TransferEmployee)?;
    request.validate()?;

    let details = state
        .employee_service
        .transfer(&full_name, &request.company_name)
        .await?;
    Ok(Json(details))
}

/// POST /employees/:id/transfer
pub async fn transfer_employee(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(request): Json<TransferRequest>,
) -> Result<Json<EmployeeDetails>, AppError> {
    authorize(&user, Operation::TransferEmployee)?;
    request.validate()?;

    let details = state
        .employee_service
        .transfer_by_id(&EmployeeId(id), &request.company_name)
        .await?;
    Ok(Json(details))
}
