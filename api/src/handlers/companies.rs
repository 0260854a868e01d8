//! Company handlers
//!
//! Listing, lookup, registration and removal of companies.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::{authorize, Operation};
use crate::domain::entities::{Company, NewCompany, Page, PageRequest, User};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing companies
#[derive(Debug, Deserialize)]
pub struct ListCompaniesQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub size: u64,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// When non-blank, replaces pagination with a name/description search
    pub search: Option<String>,
}

fn default_page_size() -> u64 {
    10
}

fn default_sort_by() -> String {
    "name".to_string()
}

/// Query parameters for the budget filter
#[derive(Debug, Deserialize)]
pub struct BudgetQuery {
    pub min: f64,
}

/// Request to register a company
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 2, max = 10, message = "Name must be 2-10 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 10, message = "Town must be 2-10 characters"))]
    pub town: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(range(min = 1.0, message = "Budget must be at least 1"))]
    pub budget: f64,
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub name: String,
    pub town: String,
    pub description: String,
    pub budget: f64,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        CompanyResponse {
            id: company.id.to_string(),
            name: company.name,
            town: company.town,
            description: company.description,
            budget: company.budget,
        }
    }
}

/// Response for removing a company
#[derive(Debug, Serialize)]
pub struct RemoveCompanyResponse {
    pub name: String,
    pub removed_employees: u64,
}

fn to_responses(companies: Vec<Company>) -> Vec<CompanyResponse> {
    companies.into_iter().map(CompanyResponse::from).collect()
}

/// GET /companies
///
/// One page of companies, or search results when `search` is given.
pub async fn list_companies(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<ListCompaniesQuery>,
) -> Result<Json<Page<CompanyResponse>>, AppError> {
    authorize(&user, Operation::Read)?;

    let term = query.search.as_deref().map(str::trim).unwrap_or_default();
    if !term.is_empty() {
        let found = state.company_service.search(term).await?;
        let total = found.len() as u64;
        let request = PageRequest {
            page: 0,
            size: total,
            sort_by: Default::default(),
        };
        return Ok(Json(Page::new(to_responses(found), &request, total)));
    }

    let page = state
        .company_service
        .list_paginated(query.page, query.size, &query.sort_by)
        .await?;

    Ok(Json(Page {
        items: to_responses(page.items),
        page: page.page,
        size: page.size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }))
}

/// GET /companies/all
pub async fn list_all_companies(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    authorize(&user, Operation::Read)?;

    let companies = state.company_service.list_all().await?;
    Ok(Json(to_responses(companies)))
}

/// GET /companies/town/:town
pub async fn companies_by_town(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(town): Path<String>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    authorize(&user, Operation::Read)?;

    let companies = state.company_service.find_by_town(&town).await?;
    Ok(Json(to_responses(companies)))
}

/// GET /companies/budget?min=
pub async fn companies_by_budget(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<BudgetQuery>,
) -> Result<Json<Vec<CompanyResponse>>, AppError> {
    authorize(&user, Operation::Read)?;

    let companies = state
        .company_service
        .find_by_budget_greater_than(query.min)
        .await?;
    Ok(Json(to_responses(companies)))
}

/// GET /companies/:name
pub async fn get_company(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(name): Path<String>,
) -> Result<Json<CompanyResponse>, AppError> {
    authorize(&user, Operation::Read)?;

    let company = state.company_service.details(&name).await?;
    Ok(Json(company.into()))
}

/// POST /companies
pub async fn create_company(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateCompanyRequest>,
) -> Result<(StatusCode, Json<CompanyResponse>), AppError> {
    authorize(&user, Operation::AddCompany)?;
    request.validate()?;

    let company = state
        .company_service
        .add_company(NewCompany {
            name: request.name,
            town: request.town,
            description: request.description,
            budget: request.budget,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(company.into())))
}

/// DELETE /companies/:name
///
/// Removes the company and every employee attached to it.
pub async fn remove_company(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(name): Path<String>,
) -> Result<Json<RemoveCompanyResponse>, AppError> {
    authorize(&user, Operation::RemoveCompany)?;

    let removed_employees = state.company_service.remove(&name).await?;
    Ok(Json(RemoveCompanyResponse {
        name,
        removed_employees,
    }))
}
