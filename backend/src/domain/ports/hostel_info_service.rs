//! Driving port for the hostel notice board.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Caller, Error, HostelInfo, HostelInfoContent};

#[async_trait]
pub trait HostelInfoService: Send + Sync {
    /// Notice board for `date` (default today). `None` when nothing was
    /// published.
    async fn get(&self, caller: &Caller, date: Option<NaiveDate>)
    -> Result<Option<HostelInfo>, Error>;

    /// Publish or replace the notice board for `date` (default today).
    async fn publish(
        &self,
        caller: &Caller,
        date: Option<NaiveDate>,
        content: HostelInfoContent,
    ) -> Result<HostelInfo, Error>;
}
