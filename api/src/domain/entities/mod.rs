//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod company;
pub mod employee;
pub mod page;
pub mod user;

pub use company::{Company, CompanyId, CompanySortField, NewCompany};
pub use employee::{
    full_name_key, CompanyRef, EducationLevel, Employee, EmployeeDetails, EmployeeId,
    EmployeeSummary, NewEmployee,
};
pub use page::{Page, PageRequest};
pub use user::{NewSession, NewUser, Role, User, UserId};
