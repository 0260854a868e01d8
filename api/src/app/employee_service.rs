//! Employee service
//!
//! Hiring, lookup, firing and transfers. Employees are addressed either by their
//! stable id or by full name; a full name that matches several employees is
//! rejected as ambiguous rather than resolved arbitrarily.

use std::sync::Arc;

use crate::app::cache_policy::{self, ALL_KEY, EMPLOYEE_WRITE};
use crate::domain::entities::{
    Company, Employee, EmployeeDetails, EmployeeId, EmployeeSummary, NewEmployee,
};
use crate::domain::ports::{CacheRegion, CompanyRepository, EmployeeRepository, ReadCache};
use crate::error::DomainError;

/// Service for managing employees
pub struct EmployeeService<ER, CR, RC>
where
    ER: EmployeeRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    RC: ReadCache + ?Sized,
{
    employees: Arc<ER>,
    companies: Arc<CR>,
    cache: Arc<RC>,
}

impl<ER, CR, RC> EmployeeService<ER, CR, RC>
where
    ER: EmployeeRepository + ?Sized,
    CR: CompanyRepository + ?Sized,
    RC: ReadCache + ?Sized,
{
    pub fn new(employees: Arc<ER>, companies: Arc<CR>, cache: Arc<RC>) -> Self {
        Self {
            employees,
            companies,
            cache,
        }
    }

    /// Hire an employee.
    ///
    /// A company name that does not resolve leaves the employee unattached.
    pub async fn add_employee(&self, employee: NewEmployee) -> Result<Employee, DomainError> {
        tracing::debug!(
            first_name = %employee.first_name,
            last_name = %employee.last_name,
            "Adding employee"
        );

        let company = self.resolve_optional_company(&employee).await?;
        let created = self.employees.create(&employee, company.as_ref()).await?;
        cache_policy::evict_regions(self.cache.as_ref(), EMPLOYEE_WRITE).await;

        tracing::info!(
            employee = %created.full_name(),
            id = %created.id,
            company = created.company_name().unwrap_or("-"),
            "Employee added"
        );
        Ok(created)
    }

    /// Summaries of every employee with their company name
    pub async fn list_all(&self) -> Result<Vec<EmployeeSummary>, DomainError> {
        let employees = self.employees.clone();

        cache_policy::get_or_populate(
            self.cache.as_ref(),
            CacheRegion::Employees,
            ALL_KEY,
            || async move {
                let all = employees.find_all().await?;
                Ok(all.iter().map(EmployeeSummary::from).collect())
            },
        )
        .await
    }

    /// Every employee matching `full_name`; empty when nobody does
    pub async fn search_by_full_name(
        &self,
        full_name: &str,
    ) -> Result<Vec<EmployeeSummary>, DomainError> {
        let found = self.employees.find_by_full_name(full_name).await?;
        Ok(found.iter().map(EmployeeSummary::from).collect())
    }

    pub async fn info(&self, full_name: &str) -> Result<EmployeeDetails, DomainError> {
        Ok(self.resolve_by_full_name(full_name).await?.into())
    }

    pub async fn info_by_id(&self, id: &EmployeeId) -> Result<EmployeeDetails, DomainError> {
        Ok(self.resolve_by_id(id).await?.into())
    }

    pub async fn fire(&self, full_name: &str) -> Result<(), DomainError> {
        let employee = self.resolve_by_full_name(full_name).await?;
        self.delete(employee).await
    }

    pub async fn fire_by_id(&self, id: &EmployeeId) -> Result<(), DomainError> {
        let employee = self.resolve_by_id(id).await?;
        self.delete(employee).await
    }

    /// Move the employee called `full_name` to `company_name`
    pub async fn transfer(
        &self,
        full_name: &str,
        company_name: &str,
    ) -> Result<EmployeeDetails, DomainError> {
        let employee = self.resolve_by_full_name(full_name).await?;
        self.reassign(employee, company_name).await
    }

    pub async fn transfer_by_id(
        &self,
        id: &EmployeeId,
        company_name: &str,
    ) -> Result<EmployeeDetails, DomainError> {
        let employee = self.resolve_by_id(id).await?;
        self.reassign(employee, company_name).await
    }

    async fn resolve_optional_company(
        &self,
        employee: &NewEmployee,
    ) -> Result<Option<Company>, DomainError> {
        let Some(name) = employee.company_name.as_deref() else {
            return Ok(None);
        };

        let company = self.companies.find_by_name(name).await?;
        if company.is_none() {
            tracing::warn!(
                company = %name,
                employee = %format!("{} {}", employee.first_name, employee.last_name),
                "Company not found, employee left unattached"
            );
        }

        Ok(company)
    }

    async fn resolve_by_full_name(&self, full_name: &str) -> Result<Employee, DomainError> {
        let mut found = self.employees.find_by_full_name(full_name).await?;

        match found.len() {
            0 => {
                tracing::warn!(employee = %full_name, "Employee lookup failed");
                Err(DomainError::employee_not_found(full_name))
            }
            1 => Ok(found.remove(0)),
            _ => {
                tracing::warn!(
                    employee = %full_name,
                    matches = found.len(),
                    "Employee name is ambiguous"
                );
                Err(DomainError::AmbiguousEmployee {
                    full_name: full_name.to_string(),
                    candidates: found.iter().map(|e| e.id.to_string()).collect(),
                })
            }
        }
    }

    async fn resolve_by_id(&self, id: &EmployeeId) -> Result<Employee, DomainError> {
        self.employees.find_by_id(id).await?.ok_or_else(|| {
            tracing::warn!(id = %id, "Employee lookup failed");
            DomainError::employee_not_found(&id.to_string())
        })
    }

    async fn delete(&self, employee: Employee) -> Result<(), DomainError> {
        self.employees.delete(&employee.id).await?;
        cache_policy::evict_regions(self.cache.as_ref(), EMPLOYEE_WRITE).await;

        tracing::info!(employee = %employee.full_name(), id = %employee.id, "Employee fired");
        Ok(())
    }

    async fn reassign(
        &self,
        employee: Employee,
        company_name: &str,
    ) -> Result<EmployeeDetails, DomainError> {
        let company = self
            .companies
            .find_by_name(company_name)
            .await?
            .ok_or_else(|| {
                tracing::warn!(company = %company_name, "Transfer target not found");
                DomainError::company_not_found(company_name)
            })?;

        let updated = self
            .employees
            .reassign_company(&employee.id, &company.id)
            .await?;
        cache_policy::evict_regions(self.cache.as_ref(), EMPLOYEE_WRITE).await;

        tracing::info!(
            employee = %updated.full_name(),
            from = employee.company_name().unwrap_or("-"),
            to = %company.name,
            "Employee transferred"
        );
        Ok(updated.into())
    }
}
