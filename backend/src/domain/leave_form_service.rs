//! Leave form service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    LeaveFormFilter, LeaveFormRepository, LeaveFormRepositoryError, LeaveFormService,
};
use crate::domain::{Caller, Error, LeaveForm, LeaveFormUpload, WithStudent};

fn map_repository_error(error: LeaveFormRepositoryError) -> Error {
    match error {
        LeaveFormRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("leave form repository unavailable: {message}"))
        }
        LeaveFormRepositoryError::Query { message } => {
            Error::internal(format!("leave form repository error: {message}"))
        }
    }
}

#[derive(Clone)]
pub struct LeaveFormServiceImpl<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> LeaveFormServiceImpl<R> {
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

#[async_trait]
impl<R> LeaveFormService for LeaveFormServiceImpl<R>
where
    R: LeaveFormRepository,
{
    async fn submit(
        &self,
        caller: &Caller,
        upload: LeaveFormUpload,
    ) -> Result<WithStudent<LeaveForm>, Error> {
        caller.require_student("submit leave forms")?;
        let form = LeaveForm::submit(caller.user_id().clone(), upload, self.clock.utc())
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        self.repo.insert(&form).await.map_err(map_repository_error)?;
        info!(id = %form.id(), student = %caller.user_id(), "leave form recorded");

        // Append-only table: the freshly inserted row heads the student's list.
        let filter = LeaveFormFilter {
            student_id: Some(caller.user_id().clone()),
        };
        self.repo
            .list(&filter)
            .await
            .map_err(map_repository_error)?
            .into_iter()
            .find(|row| row.record.id() == form.id())
            .ok_or_else(|| {
                Error::internal(format!("leave form {} missing after insert", form.id()))
            })
    }

    async fn list(&self, caller: &Caller) -> Result<Vec<WithStudent<LeaveForm>>, Error> {
        let filter = LeaveFormFilter {
            student_id: (!caller.is_admin()).then(|| caller.user_id().clone()),
        };
        self.repo.list(&filter).await.map_err(map_repository_error)
    }
}
