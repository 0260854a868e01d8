//! Company domain entity
//!
//! A company owns zero or more employees. Deleting a company deletes its staff.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a company
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompanyId(pub Uuid);

impl CompanyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompanyId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CompanyId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CompanyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A company. The name is globally unique and the budget is always positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub town: String,
    pub description: String,
    pub budget: f64,
}

/// Data needed to create a new company
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub town: String,
    pub description: String,
    pub budget: f64,
}

/// Columns a company listing may be sorted by (always ascending)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySortField {
    #[default]
    Name,
    Town,
    Budget,
    Description,
}

impl std::fmt::Display for CompanySortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompanySortField::Name => write!(f, "name"),
            CompanySortField::Town => write!(f, "town"),
            CompanySortField::Budget => write!(f, "budget"),
            CompanySortField::Description => write!(f, "description"),
        }
    }
}

impl std::str::FromStr for CompanySortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(CompanySortField::Name),
            "town" => Ok(CompanySortField::Town),
            "budget" => Ok(CompanySortField::Budget),
            "description" => Ok(CompanySortField::Description),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}
