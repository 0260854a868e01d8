//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod companies;
pub mod employees;
pub mod users;

pub use companies::{
    companies_by_budget, companies_by_town, create_company, get_company, list_all_companies,
    list_companies, remove_company,
};
pub use employees::{
    create_employee, fire_employee, fire_employee_by_name, get_employee, get_employee_by_name,
    list_employees, search_employees, transfer_employee, transfer_employee_by_name,
};
pub use users::{login, logout, profile, register};
