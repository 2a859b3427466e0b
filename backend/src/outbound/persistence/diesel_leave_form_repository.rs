//! PostgreSQL-backed `LeaveFormRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LeaveFormFilter, LeaveFormRepository, LeaveFormRepositoryError};
use crate::domain::{LeaveForm, WithStudent};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LeaveFormRow, StudentSummaryRow, with_student};
use super::pool::DbPool;
use super::schema::{leave_forms, users};

#[derive(Clone)]
pub struct DieselLeaveFormRepository {
    pool: DbPool,
}

impl DieselLeaveFormRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> LeaveFormRepositoryError {
    map_diesel_error(
        error,
        LeaveFormRepositoryError::query,
        LeaveFormRepositoryError::connection,
    )
}

#[async_trait]
impl LeaveFormRepository for DieselLeaveFormRepository {
    async fn insert(&self, form: &LeaveForm) -> Result<(), LeaveFormRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, LeaveFormRepositoryError::connection))?;

        diesel::insert_into(leave_forms::table)
            .values(&LeaveFormRow::from_domain(form))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn list(
        &self,
        filter: &LeaveFormFilter,
    ) -> Result<Vec<WithStudent<LeaveForm>>, LeaveFormRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, LeaveFormRepositoryError::connection))?;

        let mut query = leave_forms::table
            .inner_join(users::table)
            .select((LeaveFormRow::as_select(), StudentSummaryRow::as_select()))
            .order(leave_forms::uploaded_at.desc())
            .into_boxed();
        if let Some(student_id) = &filter.student_id {
            query = query.filter(leave_forms::student_id.eq(*student_id.as_uuid()));
        }

        let rows: Vec<(LeaveFormRow, StudentSummaryRow)> =
            query.load(&mut conn).await.map_err(map_error)?;
        rows.into_iter()
            .map(|joined| with_student(joined, LeaveFormRow::into_domain))
            .collect::<Result<_, _>>()
            .map_err(LeaveFormRepositoryError::query)
    }
}
