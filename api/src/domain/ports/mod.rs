//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod cache;
pub mod repositories;

pub use cache::{CacheRegion, CacheStats, CachedValue, ReadCache};
pub use repositories::{CompanyRepository, EmployeeRepository, UserRepository};
