//! Port for attendance marks.
//!
//! Adapters must enforce at most one row per (student, date) and report a
//! second insert as [`AttendanceRepositoryError::Duplicate`].

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Attendance, UserId, WithStudent};

use super::define_port_error;

define_port_error! {
    /// Errors raised by attendance repository adapters.
    pub enum AttendanceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "attendance repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "attendance repository query failed: {message}",
        /// The (student, date) pair already has a row.
        Duplicate { message: String } =>
            "attendance already recorded: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn insert(&self, attendance: &Attendance) -> Result<(), AttendanceRepositoryError>;

    /// A student's marks on or after `since`, newest date first.
    async fn list_for_student(
        &self,
        student_id: &UserId,
        since: NaiveDate,
    ) -> Result<Vec<Attendance>, AttendanceRepositoryError>;

    /// Every mark for `date`, ordered by student name.
    async fn list_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WithStudent<Attendance>>, AttendanceRepositoryError>;
}
