//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{NaiveDate, Utc};

use crate::app::user_service::hash_password;
use crate::domain::entities::{
    Company, CompanyId, CompanyRef, EducationLevel, Employee, EmployeeId, NewCompany,
    NewEmployee, Role, User, UserId,
};

/// Create a test company: Acme in Metro making widgets
pub fn test_company() -> Company {
    test_company_named("Acme")
}

/// Create a test company with a specific name
pub fn test_company_named(name: &str) -> Company {
    Company {
        id: CompanyId::new(),
        name: name.to_string(),
        town: "Metro".to_string(),
        description: "Widgets maker".to_string(),
        budget: 1000.0,
    }
}

/// Company registration data with the default description
pub fn new_company(name: &str, town: &str, budget: f64) -> NewCompany {
    NewCompany {
        name: name.to_string(),
        town: town.to_string(),
        description: "Widgets maker".to_string(),
        budget,
    }
}

/// Create a test employee, optionally attached to `company`
pub fn test_employee(first_name: &str, last_name: &str, company: Option<&Company>) -> Employee {
    Employee {
        id: EmployeeId::new(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        education_level: EducationLevel::Master,
        job_title: "Engineer".to_string(),
        salary: 5000.0,
        company: company.map(|c| CompanyRef {
            id: c.id,
            name: c.name.clone(),
        }),
    }
}

/// Hiring data for an employee at `company_name`
pub fn new_employee(first_name: &str, last_name: &str, company_name: Option<&str>) -> NewEmployee {
    NewEmployee {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        education_level: EducationLevel::Master,
        job_title: "Engineer".to_string(),
        salary: 5000.0,
        company_name: company_name.map(str::to_string),
    }
}

/// Create a test user whose password hash matches `password`
pub fn test_user(username: &str, password: &str, roles: &[Role]) -> User {
    User {
        password_hash: hash_password(password).unwrap(),
        ..test_user_without_password(username, roles)
    }
}

/// Create a test user with an unusable password hash
pub fn test_user_without_password(username: &str, roles: &[Role]) -> User {
    User {
        id: UserId::new(),
        username: username.to_string(),
        full_name: format!("{} Testerson", username),
        email: format!("{}@example.com", username),
        age: 30,
        password_hash: String::new(),
        roles: roles.to_vec(),
        created_at: Utc::now(),
    }
}
