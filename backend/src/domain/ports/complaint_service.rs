//! Driving port for complaints.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Caller, Complaint, ComplaintStatus, Error, WithStudent};

/// Complaint use-cases exposed to inbound adapters.
#[async_trait]
pub trait ComplaintService: Send + Sync {
    /// A student files a complaint. The new complaint is always `Open`.
    async fn submit(&self, caller: &Caller, text: &str) -> Result<WithStudent<Complaint>, Error>;

    /// Students see their own complaints; administrators see all of them,
    /// optionally narrowed to one status. Newest first.
    async fn list(
        &self,
        caller: &Caller,
        status: Option<ComplaintStatus>,
    ) -> Result<Vec<WithStudent<Complaint>>, Error>;

    /// Move a complaint to `target` and return the committed record.
    async fn set_status(
        &self,
        caller: &Caller,
        id: Uuid,
        target: ComplaintStatus,
    ) -> Result<WithStudent<Complaint>, Error>;
}
