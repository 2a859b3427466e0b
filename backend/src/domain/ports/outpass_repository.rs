//! Port for outpass request storage.
//!
//! Reads always return the joined student summary. There is no version
//! column: concurrent status writes resolve as last write wins.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{OutpassRequest, OutpassStatus, UserId, WithStudent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by outpass repository adapters.
    pub enum OutpassRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "outpass repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "outpass repository query failed: {message}",
    }
}

/// Optional narrowing applied to list reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutpassFilter {
    pub student_id: Option<UserId>,
    pub status: Option<OutpassStatus>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OutpassRepository: Send + Sync {
    /// Persist a newly submitted request.
    async fn insert(&self, request: &OutpassRequest) -> Result<(), OutpassRepositoryError>;

    /// Fresh read of a single request.
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WithStudent<OutpassRequest>>, OutpassRepositoryError>;

    /// Requests matching `filter`, newest first.
    async fn list(
        &self,
        filter: &OutpassFilter,
    ) -> Result<Vec<WithStudent<OutpassRequest>>, OutpassRepositoryError>;

    /// Write the status column only. Returns `false` when no row matched.
    async fn update_status(
        &self,
        id: &Uuid,
        status: OutpassStatus,
    ) -> Result<bool, OutpassRepositoryError>;
}
