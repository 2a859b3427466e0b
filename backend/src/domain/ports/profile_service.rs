//! Driving port for the caller's own account.

use async_trait::async_trait;

use crate::domain::{Caller, Error, ProfileUpdate, User};

#[async_trait]
pub trait ProfileService: Send + Sync {
    /// The caller's account.
    async fn me(&self, caller: &Caller) -> Result<User, Error>;

    /// Students edit their own contact details; username and role are fixed.
    async fn update(&self, caller: &Caller, update: ProfileUpdate) -> Result<User, Error>;
}
