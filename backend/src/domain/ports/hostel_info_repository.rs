//! Port for the per-date hostel notice board.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::HostelInfo;

use super::define_port_error;

define_port_error! {
    /// Errors raised by hostel info repository adapters.
    pub enum HostelInfoRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "hostel info repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "hostel info repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HostelInfoRepository: Send + Sync {
    async fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<HostelInfo>, HostelInfoRepositoryError>;

    /// Insert the record, or replace the one already stored for its date.
    async fn upsert(&self, info: &HostelInfo) -> Result<(), HostelInfoRepositoryError>;
}
