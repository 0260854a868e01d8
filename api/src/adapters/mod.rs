//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryReadCache;
pub use postgres::{
    ensure_schema, PostgresCompanyRepository, PostgresEmployeeRepository, PostgresUserRepository,
};
