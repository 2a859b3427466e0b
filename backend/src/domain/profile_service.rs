//! Profile service for the caller's own account.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ProfileService, UserPersistenceError, UserRepository};
use crate::domain::{Caller, Error, ProfileUpdate, User};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { message } => Error::conflict(message),
    }
}

#[derive(Clone)]
pub struct ProfileServiceImpl<R> {
    users: Arc<R>,
}

impl<R> ProfileServiceImpl<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> ProfileServiceImpl<R>
where
    R: UserRepository,
{
    async fn load(&self, caller: &Caller) -> Result<User, Error> {
        self.users
            .find_by_id(caller.user_id())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", caller.user_id())))
    }
}

#[async_trait]
impl<R> ProfileService for ProfileServiceImpl<R>
where
    R: UserRepository,
{
    async fn me(&self, caller: &Caller) -> Result<User, Error> {
        self.load(caller).await
    }

    async fn update(&self, caller: &Caller, update: ProfileUpdate) -> Result<User, Error> {
        caller.require_student("edit their profile")?;
        let matched = self
            .users
            .update_profile(caller.user_id(), &update)
            .await
            .map_err(map_repository_error)?;
        if !matched {
            return Err(Error::not_found(format!(
                "user {} not found",
                caller.user_id()
            )));
        }
        info!(user = %caller.user_id(), "profile updated");
        self.load(caller).await
    }
}
