//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod company_repo;
pub mod employee_repo;
pub mod schema;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

pub use company_repo::PostgresCompanyRepository;
pub use employee_repo::PostgresEmployeeRepository;
pub use schema::ensure_schema;
pub use user_repo::PostgresUserRepository;
