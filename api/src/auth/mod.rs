//! Authentication
//!
//! Bearer-session middleware for the protected routes.

pub mod session;

pub use session::{auth_middleware, SessionToken};
