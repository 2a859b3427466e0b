//! Port for leave form metadata. Append-only.

use async_trait::async_trait;

use crate::domain::{LeaveForm, UserId, WithStudent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by leave form repository adapters.
    pub enum LeaveFormRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "leave form repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "leave form repository query failed: {message}",
    }
}

/// Restrict list reads to one student when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveFormFilter {
    pub student_id: Option<UserId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaveFormRepository: Send + Sync {
    async fn insert(&self, form: &LeaveForm) -> Result<(), LeaveFormRepositoryError>;

    /// Forms matching `filter`, most recently uploaded first.
    async fn list(
        &self,
        filter: &LeaveFormFilter,
    ) -> Result<Vec<WithStudent<LeaveForm>>, LeaveFormRepositoryError>;
}
