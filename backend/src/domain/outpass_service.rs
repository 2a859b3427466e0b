//! Outpass request service.
//!
//! Status changes follow a fixed sequence: authorise the role, read the
//! current row, validate the edge through the lifecycle table, write the
//! status column, then re-read so callers only ever see committed state.
//! There is no retry and no version check; the last writer wins.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    OutpassFilter, OutpassRepository, OutpassRepositoryError, OutpassService,
};
use crate::domain::{
    Caller, Error, OutpassDraft, OutpassRequest, OutpassStatus, WithStudent, authorise,
    transition,
};

fn map_repository_error(error: OutpassRepositoryError) -> Error {
    match error {
        OutpassRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("outpass repository unavailable: {message}"))
        }
        OutpassRepositoryError::Query { message } => {
            Error::internal(format!("outpass repository error: {message}"))
        }
    }
}

fn not_found(id: Uuid) -> Error {
    Error::not_found(format!("outpass request {id} not found"))
}

/// Outpass service backed by an [`OutpassRepository`].
#[derive(Clone)]
pub struct OutpassServiceImpl<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> OutpassServiceImpl<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> OutpassServiceImpl<R>
where
    R: OutpassRepository,
{
    async fn load(&self, id: Uuid) -> Result<WithStudent<OutpassRequest>, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> OutpassService for OutpassServiceImpl<R>
where
    R: OutpassRepository,
{
    async fn submit(
        &self,
        caller: &Caller,
        draft: OutpassDraft,
    ) -> Result<WithStudent<OutpassRequest>, Error> {
        caller.require_student("apply for an outpass")?;
        let request = OutpassRequest::submit(caller.user_id().clone(), draft, self.clock.utc())
            .map_err(|err| {
                Error::invalid_request(format!("invalid outpass request: {err}"))
                    .with_details(json!({ "code": "invalid_outpass", "message": err.to_string() }))
            })?;

        self.repo
            .insert(&request)
            .await
            .map_err(map_repository_error)?;
        info!(id = %request.id(), student = %caller.user_id(), "outpass request submitted");

        self.load(request.id()).await
    }

    async fn list(
        &self,
        caller: &Caller,
        status: Option<OutpassStatus>,
    ) -> Result<Vec<WithStudent<OutpassRequest>>, Error> {
        let filter = OutpassFilter {
            student_id: (!caller.is_admin()).then(|| caller.user_id().clone()),
            status,
        };
        self.repo.list(&filter).await.map_err(map_repository_error)
    }

    async fn set_status(
        &self,
        caller: &Caller,
        id: Uuid,
        target: OutpassStatus,
    ) -> Result<WithStudent<OutpassRequest>, Error> {
        authorise::<OutpassStatus>(caller.role())?;

        let current = self.load(id).await?;
        let from = current.record.status();
        let next = transition(from, target, caller.role())?;

        let updated = self
            .repo
            .update_status(&id, next)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(not_found(id));
        }

        let committed = self.load(id).await?;
        info!(
            entity = "outpass_request",
            %id,
            from = %from,
            to = %next,
            actor = %caller.user_id(),
            "status changed"
        );
        Ok(committed)
    }
}

#[cfg(test)]
#[path = "outpass_service_tests.rs"]
mod tests;
