//! Company service
//!
//! Registration, lookup, pagination and removal of companies.

use std::sync::Arc;

use crate::app::cache_policy::{self, ALL_KEY, COMPANY_REMOVE, COMPANY_WRITE};
use crate::domain::entities::{Company, CompanySortField, NewCompany, Page, PageRequest};
use crate::domain::ports::{CacheRegion, CompanyRepository, ReadCache};
use crate::error::DomainError;

/// Service for managing companies
pub struct CompanyService<CR, RC>
where
    CR: CompanyRepository + ?Sized,
    RC: ReadCache + ?Sized,
{
    companies: Arc<CR>,
    cache: Arc<RC>,
}

impl<CR, RC> CompanyService<CR, RC>
where
    CR: CompanyRepository + ?Sized,
    RC: ReadCache + ?Sized,
{
    pub fn new(companies: Arc<CR>, cache: Arc<RC>) -> Self {
        Self { companies, cache }
    }

    /// Register a new company.
    ///
    /// Fails with `DuplicateCompanyName` when the name is taken; nothing is stored.
    pub async fn add_company(&self, company: NewCompany) -> Result<Company, DomainError> {
        tracing::debug!(company = %company.name, "Adding company");

        if self.companies.exists_by_name(&company.name).await? {
            tracing::warn!(company = %company.name, "Rejected duplicate company name");
            return Err(DomainError::DuplicateCompanyName(format!(
                "Company '{}' already exists",
                company.name
            )));
        }

        let created = self.companies.create(&company).await?;
        cache_policy::evict_regions(self.cache.as_ref(), COMPANY_WRITE).await;

        tracing::info!(company = %created.name, id = %created.id, "Company added");
        Ok(created)
    }

    /// Every company, ordered by name
    pub async fn list_all(&self) -> Result<Vec<Company>, DomainError> {
        let companies = self.companies.clone();

        cache_policy::get_or_populate(
            self.cache.as_ref(),
            CacheRegion::Companies,
            ALL_KEY,
            || async move { companies.find_all().await },
        )
        .await
    }

    /// One zero-based page sorted ascending by `sort_by`
    pub async fn list_paginated(
        &self,
        page: u64,
        size: u64,
        sort_by: &str,
    ) -> Result<Page<Company>, DomainError> {
        if size == 0 {
            return Err(DomainError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }

        let sort_by: CompanySortField = sort_by.parse().map_err(DomainError::Validation)?;

        self.companies
            .find_page(&PageRequest {
                page,
                size,
                sort_by,
            })
            .await
    }

    /// Case-insensitive substring search over name and description
    pub async fn search(&self, term: &str) -> Result<Vec<Company>, DomainError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DomainError::Validation(
                "Search term must not be blank".to_string(),
            ));
        }

        self.companies.search(term).await
    }

    pub async fn find_by_town(&self, town: &str) -> Result<Vec<Company>, DomainError> {
        self.companies.find_by_town(town).await
    }

    /// Companies with a budget strictly above `min_budget`, richest first
    pub async fn find_by_budget_greater_than(
        &self,
        min_budget: f64,
    ) -> Result<Vec<Company>, DomainError> {
        if !min_budget.is_finite() {
            return Err(DomainError::Validation(
                "Minimum budget must be a number".to_string(),
            ));
        }

        self.companies.find_by_budget_greater_than(min_budget).await
    }

    /// A single company by name. Only hits are cached.
    pub async fn details(&self, name: &str) -> Result<Company, DomainError> {
        let companies = self.companies.clone();
        let lookup = name.to_string();

        let result = cache_policy::get_or_populate(
            self.cache.as_ref(),
            CacheRegion::Company,
            name,
            || async move {
                companies
                    .find_by_name(&lookup)
                    .await?
                    .ok_or_else(|| DomainError::company_not_found(&lookup))
            },
        )
        .await;

        if let Err(DomainError::CompanyNotFound(_)) = &result {
            tracing::warn!(company = %name, "Company lookup failed");
        }

        result
    }

    /// Delete a company together with its employees.
    ///
    /// Returns the number of employees removed.
    pub async fn remove(&self, name: &str) -> Result<u64, DomainError> {
        tracing::debug!(company = %name, "Removing company");

        let removed_staff = match self.companies.delete_by_name(name).await {
            Ok(count) => count,
            Err(e @ DomainError::CompanyNotFound(_)) => {
                tracing::warn!(company = %name, "Cannot remove unknown company");
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        cache_policy::evict_regions(self.cache.as_ref(), COMPANY_REMOVE).await;

        tracing::info!(company = %name, removed_staff, "Company removed");
        Ok(removed_staff)
    }
}
