//! PostgreSQL-backed `AttendanceRepository`.
//!
//! The `(student_id, date)` unique index is the authority on "already
//! marked"; a violation is reported as `Duplicate` so concurrent marks from
//! two devices resolve to exactly one stored row.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AttendanceRepository, AttendanceRepositoryError};
use crate::domain::{Attendance, UserId, WithStudent};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{AttendanceRow, StudentSummaryRow, with_student};
use super::pool::DbPool;
use super::schema::{attendance, users};

#[derive(Clone)]
pub struct DieselAttendanceRepository {
    pool: DbPool,
}

impl DieselAttendanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> AttendanceRepositoryError {
    if is_unique_violation(&error) {
        return AttendanceRepositoryError::duplicate("attendance already marked for this date");
    }
    map_diesel_error(
        error,
        AttendanceRepositoryError::query,
        AttendanceRepositoryError::connection,
    )
}

#[async_trait]
impl AttendanceRepository for DieselAttendanceRepository {
    async fn insert(&self, row: &Attendance) -> Result<(), AttendanceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AttendanceRepositoryError::connection))?;

        diesel::insert_into(attendance::table)
            .values(&AttendanceRow::from_domain(row))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn list_for_student(
        &self,
        student_id: &UserId,
        since: NaiveDate,
    ) -> Result<Vec<Attendance>, AttendanceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AttendanceRepositoryError::connection))?;

        let rows: Vec<AttendanceRow> = attendance::table
            .filter(attendance::student_id.eq(student_id.as_uuid()))
            .filter(attendance::date.ge(since))
            .order(attendance::date.desc())
            .select(AttendanceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        rows.into_iter()
            .map(AttendanceRow::into_domain)
            .collect::<Result<_, _>>()
            .map_err(AttendanceRepositoryError::query)
    }

    async fn list_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<WithStudent<Attendance>>, AttendanceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, AttendanceRepositoryError::connection))?;

        let rows: Vec<(AttendanceRow, StudentSummaryRow)> = attendance::table
            .inner_join(users::table)
            .filter(attendance::date.eq(date))
            .order(users::name.asc())
            .select((AttendanceRow::as_select(), StudentSummaryRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        rows.into_iter()
            .map(|joined| with_student(joined, AttendanceRow::into_domain))
            .collect::<Result<_, _>>()
            .map_err(AttendanceRepositoryError::query)
    }
}
