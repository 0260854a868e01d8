//! SeaORM entities
//!
//! Table definitions for the PostgreSQL adapters. Domain code never sees these;
//! repositories convert them with `From` impls.

pub mod companies;
pub mod employees;
pub mod roles;
pub mod sessions;
pub mod user_roles;
pub mod users;
