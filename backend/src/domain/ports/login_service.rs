//! Driving port for login.
//!
//! Credential verification belongs to an external auth provider. Inbound
//! adapters only need the confirmed identity and role back, so that is all
//! this port exposes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{AuthenticatedUser, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the caller's identity and role.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

/// Development stand-in for the auth provider.
///
/// Any stored account authenticates with the single shared password supplied
/// at construction. The role always comes from the stored account.
pub struct SharedPasswordLoginService<R> {
    users: Arc<R>,
    password: Zeroizing<String>,
}

impl<R> SharedPasswordLoginService<R> {
    pub fn new(users: Arc<R>, password: impl Into<String>) -> Self {
        Self {
            users,
            password: Zeroizing::new(password.into()),
        }
    }
}

#[async_trait]
impl<R> LoginService for SharedPasswordLoginService<R>
where
    R: UserRepository,
{
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        let user = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(|err| match err {
                UserPersistenceError::Connection { message } => {
                    Error::service_unavailable(format!("user repository unavailable: {message}"))
                }
                other => Error::internal(format!("user lookup failed: {other}")),
            })?;

        match user {
            Some(user) if credentials.password() == self.password.as_str() => {
                Ok(AuthenticatedUser {
                    id: user.id().clone(),
                    role: user.role(),
                })
            }
            _ => {
                warn!(username = credentials.username(), "login rejected");
                Err(Error::unauthorized("invalid credentials"))
            }
        }
    }
}
