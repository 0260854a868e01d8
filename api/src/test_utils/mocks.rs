//! In-memory implementations of port traits
//!
//! Company and employee repositories share one `InMemoryStore` so that
//! cascading deletes and company lookups behave like the database does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    full_name_key, Company, CompanyId, CompanyRef, CompanySortField, Employee, EmployeeId,
    NewCompany, NewEmployee, NewSession, NewUser, Page, PageRequest, Role, User, UserId,
};
use crate::domain::ports::{CompanyRepository, EmployeeRepository, UserRepository};
use crate::error::DomainError;

// ============================================================================
// Shared company/employee store
// ============================================================================

#[derive(Default)]
pub struct InMemoryStore {
    companies: RwLock<HashMap<CompanyId, Company>>,
    employees: RwLock<HashMap<EmployeeId, Employee>>,
    company_find_all_calls: AtomicUsize,
    company_find_by_name_calls: AtomicUsize,
    employee_find_all_calls: AtomicUsize,
}

fn sorted_by_name(mut companies: Vec<Company>) -> Vec<Company> {
    companies.sort_by(|a, b| a.name.cmp(&b.name));
    companies
}

fn company_ref(company: &Company) -> CompanyRef {
    CompanyRef {
        id: company.id,
        name: company.name.clone(),
    }
}

// ============================================================================
// In-Memory Company Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryCompanyRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a company for testing
    pub fn with_company(self, company: Company) -> Self {
        self.store
            .companies
            .write()
            .unwrap()
            .insert(company.id, company);
        self
    }

    /// Employee repository over the same store
    pub fn employees(&self) -> InMemoryEmployeeRepository {
        InMemoryEmployeeRepository {
            store: self.store.clone(),
        }
    }

    pub fn find_all_calls(&self) -> usize {
        self.store.company_find_all_calls.load(Ordering::SeqCst)
    }

    pub fn find_by_name_calls(&self) -> usize {
        self.store.company_find_by_name_calls.load(Ordering::SeqCst)
    }

    fn filtered(&self, predicate: impl Fn(&Company) -> bool) -> Vec<Company> {
        let companies = self.store.companies.read().unwrap();
        sorted_by_name(companies.values().filter(|c| predicate(c)).cloned().collect())
    }
}

#[async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_by_id(&self, id: &CompanyId) -> Result<Option<Company>, DomainError> {
        Ok(self.store.companies.read().unwrap().get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, DomainError> {
        self.store
            .company_find_by_name_calls
            .fetch_add(1, Ordering::SeqCst);
        let companies = self.store.companies.read().unwrap();
        Ok(companies.values().find(|c| c.name == name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, DomainError> {
        let companies = self.store.companies.read().unwrap();
        Ok(companies.values().any(|c| c.name == name))
    }

    async fn find_all(&self) -> Result<Vec<Company>, DomainError> {
        self.store.company_find_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.filtered(|_| true))
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Company>, DomainError> {
        let mut all = self.filtered(|_| true);
        all.sort_by(|a, b| match request.sort_by {
            CompanySortField::Name => a.name.cmp(&b.name),
            CompanySortField::Town => a.town.cmp(&b.town),
            CompanySortField::Budget => a.budget.total_cmp(&b.budget),
            CompanySortField::Description => a.description.cmp(&b.description),
        });

        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip((request.page * request.size) as usize)
            .take(request.size as usize)
            .collect();

        Ok(Page::new(items, request, total))
    }

    async fn find_by_town(&self, town: &str) -> Result<Vec<Company>, DomainError> {
        Ok(self.filtered(|c| c.town == town))
    }

    async fn find_by_budget_greater_than(
        &self,
        min_budget: f64,
    ) -> Result<Vec<Company>, DomainError> {
        let mut found = self.filtered(|c| c.budget > min_budget);
        found.sort_by(|a, b| b.budget.total_cmp(&a.budget));
        Ok(found)
    }

    async fn search(&self, term: &str) -> Result<Vec<Company>, DomainError> {
        let needle = term.to_lowercase();
        Ok(self.filtered(|c| {
            c.name.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        }))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.store.companies.read().unwrap().len() as u64)
    }

    async fn create(&self, new_company: &NewCompany) -> Result<Company, DomainError> {
        let mut companies = self.store.companies.write().unwrap();

        if companies.values().any(|c| c.name == new_company.name) {
            return Err(DomainError::DuplicateCompanyName(format!(
                "Company '{}' already exists",
                new_company.name
            )));
        }

        let company = Company {
            id: CompanyId::new(),
            name: new_company.name.clone(),
            town: new_company.town.clone(),
            description: new_company.description.clone(),
            budget: new_company.budget,
        };
        companies.insert(company.id, company.clone());

        Ok(company)
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, DomainError> {
        let mut companies = self.store.companies.write().unwrap();
        let mut employees = self.store.employees.write().unwrap();

        let id = companies
            .values()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .ok_or_else(|| DomainError::company_not_found(name))?;

        let before = employees.len();
        employees.retain(|_, e| e.company.as_ref().map(|c| c.id) != Some(id));
        companies.remove(&id);

        Ok((before - employees.len()) as u64)
    }
}

// ============================================================================
// In-Memory Employee Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryEmployeeRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryEmployeeRepository {
    /// Pre-populate with an employee for testing
    pub fn with_employee(self, employee: Employee) -> Self {
        self.store
            .employees
            .write()
            .unwrap()
            .insert(employee.id, employee);
        self
    }

    pub fn find_all_calls(&self) -> usize {
        self.store.employee_find_all_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        Ok(self.store.employees.read().unwrap().get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Employee>, DomainError> {
        self.store
            .employee_find_all_calls
            .fetch_add(1, Ordering::SeqCst);
        let employees = self.store.employees.read().unwrap();
        let mut all: Vec<Employee> = employees.values().cloned().collect();
        all.sort_by(|a, b| {
            (a.last_name.as_str(), a.first_name.as_str())
                .cmp(&(b.last_name.as_str(), b.first_name.as_str()))
        });
        Ok(all)
    }

    async fn find_by_full_name(&self, full_name: &str) -> Result<Vec<Employee>, DomainError> {
        let key = full_name_key(full_name);
        let employees = self.store.employees.read().unwrap();
        let mut found: Vec<Employee> = employees
            .values()
            .filter(|e| full_name_key(&format!("{}{}", e.first_name, e.last_name)) == key)
            .cloned()
            .collect();
        found.sort_by_key(|e| e.id.0);
        Ok(found)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.store.employees.read().unwrap().len() as u64)
    }

    async fn create(
        &self,
        new_employee: &NewEmployee,
        company: Option<&Company>,
    ) -> Result<Employee, DomainError> {
        let employee = Employee {
            id: EmployeeId::new(),
            first_name: new_employee.first_name.clone(),
            last_name: new_employee.last_name.clone(),
            birth_date: new_employee.birth_date,
            education_level: new_employee.education_level,
            job_title: new_employee.job_title.clone(),
            salary: new_employee.salary,
            company: company.map(company_ref),
        };

        self.store
            .employees
            .write()
            .unwrap()
            .insert(employee.id, employee.clone());

        Ok(employee)
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        match self.store.employees.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::employee_not_found(&id.to_string())),
        }
    }

    async fn reassign_company(
        &self,
        id: &EmployeeId,
        company_id: &CompanyId,
    ) -> Result<Employee, DomainError> {
        let companies = self.store.companies.read().unwrap();
        let mut employees = self.store.employees.write().unwrap();

        let employee = employees
            .get_mut(id)
            .ok_or_else(|| DomainError::employee_not_found(&id.to_string()))?;
        let company = companies.get(company_id).ok_or_else(|| {
            DomainError::CompanyNotFound(format!("Company {} not found", company_id))
        })?;

        employee.company = Some(company_ref(company));
        Ok(employee.clone())
    }
}

// ============================================================================
// In-Memory User Repository
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    roles: Arc<RwLock<Vec<Role>>>,
    sessions: Arc<RwLock<HashMap<String, (UserId, DateTime<Utc>)>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a user for testing
    pub fn with_user(self, user: User) -> Self {
        self.users.write().unwrap().insert(user.id, user);
        self
    }

    /// Roles inserted by `seed_roles`, in insertion order
    pub fn seeded_roles(&self) -> Vec<Role> {
        self.roles.read().unwrap().clone()
    }

    /// Number of stored sessions, expired ones included
    pub fn session_count(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.users.read().unwrap().len() as u64)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.write().unwrap();

        if users
            .values()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(DomainError::AlreadyExists(format!(
                "User '{}' or email '{}' is already registered",
                new_user.username, new_user.email
            )));
        }

        let user = User {
            id: UserId::new(),
            username: new_user.username.clone(),
            full_name: new_user.full_name.clone(),
            email: new_user.email.clone(),
            age: new_user.age,
            password_hash: new_user.password_hash.clone(),
            roles: new_user.roles.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn seed_roles(&self, roles: &[Role]) -> Result<u64, DomainError> {
        let mut seeded = self.roles.write().unwrap();
        let existing: HashSet<Role> = seeded.iter().copied().collect();

        let mut inserted = 0;
        for role in roles {
            if !existing.contains(role) {
                seeded.push(*role);
                inserted += 1;
            }
        }

        Ok(inserted)
    }

    async fn create_session(&self, session: &NewSession) -> Result<(), DomainError> {
        self.sessions.write().unwrap().insert(
            session.token_hash.clone(),
            (session.user_id, session.expires_at),
        );
        Ok(())
    }

    async fn find_by_session(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        let sessions = self.sessions.read().unwrap();
        let users = self.users.read().unwrap();

        Ok(sessions
            .get(token_hash)
            .filter(|(_, expires_at)| *expires_at > now)
            .and_then(|(user_id, _)| users.get(user_id).cloned()))
    }

    async fn delete_session(&self, token_hash: &str) -> Result<bool, DomainError> {
        Ok(self.sessions.write().unwrap().remove(token_hash).is_some())
    }

    async fn delete_expired_sessions(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, (_, expires_at)| *expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
