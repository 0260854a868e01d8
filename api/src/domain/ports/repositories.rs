//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use chrono::{DateTime, Utc};

use crate::domain::entities::{
    Company, CompanyId, Employee, EmployeeId, NewCompany, NewEmployee, NewSession, NewUser, Page,
    PageRequest, Role, User, UserId,
};
use crate::error::DomainError;

/// Repository for Company entities
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find a company by ID
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError>;

    /// Find a company by its unique name
    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, DomainError>;

    /// Check whether a company with this name exists
    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError>;

    /// All companies, ordered by name
    async fn find_all(&self) -> Result<Vec<Company>, DomainError>;

    /// One page of companies sorted ascending by the requested column
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Company>, DomainError>;

    /// Companies located in exactly this town
    async fn find_by_town(&self, town: &str) -> Result<Vec<Company>, DomainError>;

    /// Companies with a budget strictly above `min_budget`, richest first
    async fn find_by_budget_greater_than(
        &self,
        min_budget: f64,
    ) -> Result<Vec<Company>, DomainError>;

    /// Case-insensitive substring search over name or description
    async fn search(&self, term: &str) -> Result<Vec<Company>, DomainError>;

    /// Number of stored companies
    async fn count(&self) -> Result<u64, DomainError>;

    /// Create a new company.
    ///
    /// Fails with `DuplicateCompanyName` if the unique name constraint is violated.
    async fn create(&self, company: &NewCompany) -> Result<Company, DomainError>;

    /// Delete a company and all of its employees in one transaction.
    ///
    /// Returns the number of employees removed alongside the company, or
    /// `CompanyNotFound` without touching the store.
    async fn delete_by_name(&self, name: &str) -> Result<u64, DomainError>;
}

/// Repository for Employee entities
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Find an employee by ID
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError>;

    /// All employees with their company names, ordered by last then first name
    async fn find_all(&self) -> Result<Vec<Employee>, DomainError>;

    /// Every employee whose whitespace-free first+last name equals the key of `full_name`
    async fn find_by_full_name(&self, full_name: &str) -> Result<Vec<Employee>, DomainError>;

    /// Number of stored employees
    async fn count(&self) -> Result<u64, DomainError>;

    /// Create a new employee attached to `company` (or unattached)
    async fn create(
        &self,
        employee: &NewEmployee,
        company: Option<&Company>,
    ) -> Result<Employee, DomainError>;

    /// Delete an employee, failing with `EmployeeNotFound` if absent
    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError>;

    /// Point an employee at a different company.
    ///
    /// Runs in one transaction that re-checks both rows: `EmployeeNotFound` or
    /// `CompanyNotFound` leave the stored assignment untouched.
    async fn reassign_company(
        &self,
        id: &EmployeeId,
        company_id: &CompanyId,
    ) -> Result<Employee, DomainError>;
}

/// Repository for users, their roles and login sessions
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Number of registered users
    async fn count(&self) -> Result<u64, DomainError>;

    /// Create a user and link its roles
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Insert any of `roles` that are missing. Returns how many were inserted.
    async fn seed_roles(&self, roles: &[Role]) -> Result<u64, DomainError>;

    /// Store a new login session
    async fn create_session(&self, session: &NewSession) -> Result<(), DomainError>;

    /// Resolve an unexpired session to its user
    async fn find_by_session(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError>;

    /// Remove a session. Returns whether it existed.
    async fn delete_session(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Remove every session that expired at or before `now`. Returns how many went.
    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
