//! Role-based authorization
//!
//! Every guarded operation declares the roles allowed to perform it. A user passes
//! when any of their roles is in that set.

use crate::domain::entities::{Role, User};
use crate::error::DomainError;

/// Operations that require more than a valid session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddCompany,
    RemoveCompany,
    AddEmployee,
    FireEmployee,
    TransferEmployee,
    /// Any read, including the caller's own profile
    Read,
}

impl Operation {
    pub fn required_roles(self) -> &'static [Role] {
        match self {
            Operation::AddCompany | Operation::RemoveCompany => &[Role::Admin],
            Operation::AddEmployee | Operation::FireEmployee | Operation::TransferEmployee => {
                &[Role::Admin, Role::Moderator]
            }
            Operation::Read => &Role::ALL,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::AddCompany => write!(f, "add company"),
            Operation::RemoveCompany => write!(f, "remove company"),
            Operation::AddEmployee => write!(f, "add employee"),
            Operation::FireEmployee => write!(f, "fire employee"),
            Operation::TransferEmployee => write!(f, "transfer employee"),
            Operation::Read => write!(f, "read"),
        }
    }
}

/// Check that `user` may perform `operation`
pub fn authorize(user: &User, operation: Operation) -> Result<(), DomainError> {
    if user.has_any_role(operation.required_roles()) {
        return Ok(());
    }

    tracing::warn!(user = %user.username, %operation, "Permission denied");
    Err(DomainError::Forbidden(format!(
        "User '{}' may not {}",
        user.username, operation
    )))
}
