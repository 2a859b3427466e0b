//! Port abstraction for account storage.
use async_trait::async_trait;

use crate::domain::{ProfileUpdate, User, UserId, UserRole};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A uniqueness constraint (username) rejected the write.
        Duplicate { message: String } => "user repository rejected duplicate: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user unless a record with the same id already exists.
    /// Returns `false` when the existing record was left untouched.
    async fn insert_if_absent(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by login name.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite the editable profile fields. Returns `false` when no row
    /// matched `id`.
    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<bool, UserPersistenceError>;

    /// Number of accounts holding `role`.
    async fn count_by_role(&self, role: UserRole) -> Result<u64, UserPersistenceError>;
}
