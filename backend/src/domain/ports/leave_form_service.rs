//! Driving port for leave form submissions.

use async_trait::async_trait;

use crate::domain::{Caller, Error, LeaveForm, LeaveFormUpload, WithStudent};

#[async_trait]
pub trait LeaveFormService: Send + Sync {
    /// Record metadata for a form the student has already uploaded.
    async fn submit(
        &self,
        caller: &Caller,
        upload: LeaveFormUpload,
    ) -> Result<WithStudent<LeaveForm>, Error>;

    /// Students see their own forms; administrators see all forms.
    async fn list(&self, caller: &Caller) -> Result<Vec<WithStudent<LeaveForm>>, Error>;
}
