//! Driving port for outpass requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Caller, Error, OutpassDraft, OutpassRequest, OutpassStatus, WithStudent};

/// Outpass use-cases exposed to inbound adapters.
#[async_trait]
pub trait OutpassService: Send + Sync {
    /// A student applies for an outpass. The new request is always `Pending`.
    async fn submit(
        &self,
        caller: &Caller,
        draft: OutpassDraft,
    ) -> Result<WithStudent<OutpassRequest>, Error>;

    /// Students see their own requests; administrators see every request,
    /// optionally narrowed to one status. Newest first.
    async fn list(
        &self,
        caller: &Caller,
        status: Option<OutpassStatus>,
    ) -> Result<Vec<WithStudent<OutpassRequest>>, Error>;

    /// Move a request to `target` and return the committed record.
    async fn set_status(
        &self,
        caller: &Caller,
        id: Uuid,
        target: OutpassStatus,
    ) -> Result<WithStudent<OutpassRequest>, Error>;
}
