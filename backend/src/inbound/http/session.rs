//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The cookie session holds the [`AuthenticatedUser`] confirmed at login:
//! user id and role. Handlers turn it into a [`Caller`] and pass that to the
//! services explicitly.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AuthenticatedUser, Caller, Error};

pub(crate) const AUTH_KEY: &str = "auth";

/// Newtype wrapper exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated identity, rotating the session key.
    pub fn persist(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(AUTH_KEY, user)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop everything stored in the session.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// The caller stored in the session, if any.
    ///
    /// A cookie that no longer deserialises is treated as logged out.
    pub fn caller(&self) -> Option<Caller> {
        match self.0.get::<AuthenticatedUser>(AUTH_KEY) {
            Ok(user) => user.map(Caller::from),
            Err(error) => {
                warn!(%error, "discarding unreadable session payload");
                None
            }
        }
    }

    /// Require an authenticated caller or return `401 Unauthorized`.
    pub fn require_caller(&self) -> Result<Caller, Error> {
        self.caller().ok_or_else(|| Error::unauthorized("login required"))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
