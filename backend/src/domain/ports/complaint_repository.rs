//! Port for complaint storage.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Complaint, ComplaintStatus, UserId, WithStudent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "complaint repository query failed: {message}",
    }
}

/// Optional narrowing applied to list reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintFilter {
    pub student_id: Option<UserId>,
    pub status: Option<ComplaintStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError>;

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WithStudent<Complaint>>, ComplaintRepositoryError>;

    /// Complaints matching `filter`, newest first.
    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<WithStudent<Complaint>>, ComplaintRepositoryError>;

    /// Write the status column only. Returns `false` when no row matched.
    async fn update_status(
        &self,
        id: &Uuid,
        status: ComplaintStatus,
    ) -> Result<bool, ComplaintRepositoryError>;
}
