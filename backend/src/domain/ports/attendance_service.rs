//! Driving port for attendance marking and review.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Attendance, Caller, Coordinates, Error, WithStudent};

/// A student's recent attendance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendance {
    pub today: NaiveDate,
    pub marked_today: bool,
    pub records: Vec<Attendance>,
}

/// Everyone who marked attendance on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRoster {
    pub date: NaiveDate,
    pub total_students: u64,
    pub records: Vec<WithStudent<Attendance>>,
}

#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Mark the calling student present for today.
    async fn mark(&self, caller: &Caller, coordinates: Coordinates) -> Result<Attendance, Error>;

    /// The calling student's marks for the recent history window.
    async fn history(&self, caller: &Caller) -> Result<StudentAttendance, Error>;

    /// Administrator view of one date, defaulting to today.
    async fn roster(
        &self,
        caller: &Caller,
        date: Option<NaiveDate>,
    ) -> Result<AttendanceRoster, Error>;
}
