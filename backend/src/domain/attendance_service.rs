//! Attendance service.
//!
//! "Today" is always the UTC date of the injected clock. Uniqueness of
//! (student, date) is the store's job; this service only translates the
//! store's duplicate report into a conflict.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    AttendanceRepository, AttendanceRepositoryError, AttendanceRoster, AttendanceService,
    StudentAttendance, UserPersistenceError, UserRepository,
};
use crate::domain::{ATTENDANCE_HISTORY_DAYS, Attendance, Caller, Coordinates, Error, UserRole};

fn map_repository_error(error: AttendanceRepositoryError) -> Error {
    match error {
        AttendanceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("attendance repository unavailable: {message}"))
        }
        AttendanceRepositoryError::Query { message } => {
            Error::internal(format!("attendance repository error: {message}"))
        }
        AttendanceRepositoryError::Duplicate { .. } => {
            Error::conflict("attendance already marked for today")
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

#[derive(Clone)]
pub struct AttendanceServiceImpl<A, U> {
    attendance: Arc<A>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<A, U> AttendanceServiceImpl<A, U> {
    pub fn new(attendance: Arc<A>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            attendance,
            users,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

#[async_trait]
impl<A, U> AttendanceService for AttendanceServiceImpl<A, U>
where
    A: AttendanceRepository,
    U: UserRepository,
{
    async fn mark(&self, caller: &Caller, coordinates: Coordinates) -> Result<Attendance, Error> {
        caller.require_student("mark attendance")?;
        let now = self.clock.utc();
        let row = Attendance::mark(caller.user_id().clone(), now.date_naive(), coordinates, now);

        self.attendance
            .insert(&row)
            .await
            .map_err(map_repository_error)?;
        info!(student = %caller.user_id(), date = %row.date(), "attendance marked");
        Ok(row)
    }

    async fn history(&self, caller: &Caller) -> Result<StudentAttendance, Error> {
        caller.require_student("view their attendance")?;
        let today = self.today();
        let since = today
            .checked_sub_days(Days::new(ATTENDANCE_HISTORY_DAYS))
            .unwrap_or(NaiveDate::MIN);

        let records = self
            .attendance
            .list_for_student(caller.user_id(), since)
            .await
            .map_err(map_repository_error)?;
        let marked_today = records.iter().any(|row| row.date() == today);

        Ok(StudentAttendance {
            today,
            marked_today,
            records,
        })
    }

    async fn roster(
        &self,
        caller: &Caller,
        date: Option<NaiveDate>,
    ) -> Result<AttendanceRoster, Error> {
        caller.require_admin("view the attendance roster")?;
        let date = date.unwrap_or_else(|| self.today());

        let records = self
            .attendance
            .list_for_date(date)
            .await
            .map_err(map_repository_error)?;
        let total_students = self
            .users
            .count_by_role(UserRole::Student)
            .await
            .map_err(map_user_error)?;

        Ok(AttendanceRoster {
            date,
            total_students,
            records,
        })
    }
}
