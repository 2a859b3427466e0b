//! The authenticated identity attached to a single request.
//!
//! Services receive the caller explicitly rather than reading a process-wide
//! session, so every permission decision is visible in the call signature.

use super::{AuthenticatedUser, Error, UserId, UserRole};

/// Who is making a request, and in which role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    user_id: UserId,
    role: UserRole,
}

impl Caller {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Convenience constructor for a student caller.
    pub fn student(user_id: UserId) -> Self {
        Self::new(user_id, UserRole::Student)
    }

    /// Convenience constructor for an administrator caller.
    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Fail with `forbidden` unless the caller is a student.
    pub fn require_student(&self, action: &str) -> Result<(), Error> {
        match self.role {
            UserRole::Student => Ok(()),
            UserRole::Admin => Err(Error::forbidden(format!("only students may {action}"))),
        }
    }

    /// Fail with `forbidden` unless the caller is an administrator.
    pub fn require_admin(&self, action: &str) -> Result<(), Error> {
        match self.role {
            UserRole::Admin => Ok(()),
            UserRole::Student => Err(Error::forbidden(format!(
                "only administrators may {action}"
            ))),
        }
    }
}

impl From<AuthenticatedUser> for Caller {
    fn from(value: AuthenticatedUser) -> Self {
        Self::new(value.id, value.role)
    }
}
