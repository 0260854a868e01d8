//! Test utilities
//!
//! Hand-written in-memory port implementations and test fixtures for unit testing.
//! Repositories hold their data behind `Arc`, so a clone handed to a service still
//! lets the test inspect what the service wrote.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
