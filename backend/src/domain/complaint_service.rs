//! Complaint service.
//!
//! Same read-validate-write-reread sequence as outpass requests, but the
//! complaint table lets administrators set any status from any status.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    ComplaintFilter, ComplaintRepository, ComplaintRepositoryError, ComplaintService,
};
use crate::domain::{
    Caller, Complaint, ComplaintStatus, Error, WithStudent, authorise, transition,
};

fn map_repository_error(error: ComplaintRepositoryError) -> Error {
    match error {
        ComplaintRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

fn not_found(id: Uuid) -> Error {
    Error::not_found(format!("complaint {id} not found"))
}

/// Complaint service backed by a [`ComplaintRepository`].
#[derive(Clone)]
pub struct ComplaintServiceImpl<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ComplaintServiceImpl<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

impl<R> ComplaintServiceImpl<R>
where
    R: ComplaintRepository,
{
    async fn load(&self, id: Uuid) -> Result<WithStudent<Complaint>, Error> {
        self.repo
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl<R> ComplaintService for ComplaintServiceImpl<R>
where
    R: ComplaintRepository,
{
    async fn submit(&self, caller: &Caller, text: &str) -> Result<WithStudent<Complaint>, Error> {
        caller.require_student("file a complaint")?;
        let complaint = Complaint::submit(caller.user_id().clone(), text, self.clock.utc())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.repo
            .insert(&complaint)
            .await
            .map_err(map_repository_error)?;
        info!(id = %complaint.id(), student = %caller.user_id(), "complaint filed");

        self.load(complaint.id()).await
    }

    async fn list(
        &self,
        caller: &Caller,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<WithStudent<Complaint>>, Error> {
        let filter = ComplaintFilter {
            student_id: (!caller.is_admin()).then(|| caller.user_id().clone()),
            status,
        };
        self.repo.list(&filter).await.map_err(map_repository_error)
    }

    async fn set_status(
        &self,
        caller: &Caller,
        id: Uuid,
        target: ComplaintStatus,
    ) -> Result<WithStudent<Complaint>, Error> {
        authorise::<ComplaintStatus>(caller.role())?;

        let current = self.load(id).await?;
        let from = current.record.status();
        let next = transition(from, target, caller.role())?;

        if !self
            .repo
            .update_status(&id, next)
            .await
            .map_err(map_repository_error)?
        {
            return Err(not_found(id));
        }

        let committed = self.load(id).await?;
        info!(
            entity = "complaint",
            %id,
            from = %from,
            to = %next,
            actor = %caller.user_id(),
            "status changed"
        );
        Ok(committed)
    }
}
