//! Employee domain entity
//!
//! An employee belongs to at most one company. The full name (first name followed
//! by last name) is a convenience lookup key and is not unique.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::company::CompanyId;

/// Unique identifier for an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EmployeeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EmployeeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest completed education
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    Secondary,
    Vocational,
    Bachelor,
    Master,
    Doctorate,
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EducationLevel::Secondary => write!(f, "SECONDARY"),
            EducationLevel::Vocational => write!(f, "VOCATIONAL"),
            EducationLevel::Bachelor => write!(f, "BACHELOR"),
            EducationLevel::Master => write!(f, "MASTER"),
            EducationLevel::Doctorate => write!(f, "DOCTORATE"),
        }
    }
}

impl std::str::FromStr for EducationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SECONDARY" => Ok(EducationLevel::Secondary),
            "VOCATIONAL" => Ok(EducationLevel::Vocational),
            "BACHELOR" => Ok(EducationLevel::Bachelor),
            "MASTER" => Ok(EducationLevel::Master),
            "DOCTORATE" => Ok(EducationLevel::Doctorate),
            _ => Err(format!("Unknown education level: {}", s)),
        }
    }
}

/// Weak reference from an employee to the company employing them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyRef {
    pub id: CompanyId,
    pub name: String,
}

/// An employee, loaded together with the name of their company (if any)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub education_level: EducationLevel,
    pub job_title: String,
    pub salary: f64,
    pub company: Option<CompanyRef>,
}

impl Employee {
    /// Human readable full name, e.g. "Jane Doe"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company.as_ref().map(|c| c.name.as_str())
    }
}

/// Normalized full-name lookup key: the concatenated name with all whitespace removed,
/// so "JaneDoe" and "Jane Doe" address the same employee.
pub fn full_name_key(full_name: &str) -> String {
    full_name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Data needed to hire a new employee.
///
/// `company_name` that does not resolve to an existing company leaves the employee
/// unattached instead of rejecting the hire.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub education_level: EducationLevel,
    pub job_title: String,
    pub salary: f64,
    pub company_name: Option<String>,
}

/// Row of the employee listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub full_name: String,
    pub job_title: String,
    pub company_name: Option<String>,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        EmployeeSummary {
            id: employee.id,
            full_name: employee.full_name(),
            job_title: employee.job_title.clone(),
            company_name: employee.company_name().map(str::to_string),
        }
    }
}

/// Full employee card with the company reference flattened to its name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeDetails {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub education_level: EducationLevel,
    pub job_title: String,
    pub salary: f64,
    pub company_name: Option<String>,
}

impl From<Employee> for EmployeeDetails {
    fn from(employee: Employee) -> Self {
        let full_name = employee.full_name();
        EmployeeDetails {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            full_name,
            birth_date: employee.birth_date,
            education_level: employee.education_level,
            job_title: employee.job_title,
            salary: employee.salary,
            company_name: employee.company.map(|c| c.name),
        }
    }
}
