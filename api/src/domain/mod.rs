//! Domain layer
//!
//! Companies, employees and users, plus the ports the services depend on.
//! Nothing here knows about HTTP or SeaORM.

pub mod entities;
pub mod ports;
