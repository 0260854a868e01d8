//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and the read cache.

pub mod authorization;
pub mod cache_policy;
pub mod company_service;
pub mod employee_service;
pub mod user_service;

pub use authorization::{authorize, Operation};
pub use company_service::CompanyService;
pub use employee_service::EmployeeService;
pub use user_service::{LoginSession, Registration, UserService};
