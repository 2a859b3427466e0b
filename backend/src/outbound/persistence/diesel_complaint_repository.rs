//! PostgreSQL-backed `ComplaintRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ComplaintFilter, ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{Complaint, ComplaintStatus, WithStudent};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ComplaintRow, StudentSummaryRow, with_student};
use super::pool::DbPool;
use super::schema::{complaints, users};

#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> ComplaintRepositoryError {
    map_diesel_error(
        error,
        ComplaintRepositoryError::query,
        ComplaintRepositoryError::connection,
    )
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, complaint: &Complaint) -> Result<(), ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ComplaintRepositoryError::connection))?;

        diesel::insert_into(complaints::table)
            .values(&ComplaintRow::from_domain(complaint))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WithStudent<Complaint>>, ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ComplaintRepositoryError::connection))?;

        let row: Option<(ComplaintRow, StudentSummaryRow)> = complaints::table
            .inner_join(users::table)
            .filter(complaints::id.eq(id))
            .select((ComplaintRow::as_select(), StudentSummaryRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(|joined| with_student(joined, ComplaintRow::into_domain))
            .transpose()
            .map_err(ComplaintRepositoryError::query)
    }

    async fn list(
        &self,
        filter: &ComplaintFilter,
    ) -> Result<Vec<WithStudent<Complaint>>, ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ComplaintRepositoryError::connection))?;

        let mut query = complaints::table
            .inner_join(users::table)
            .select((ComplaintRow::as_select(), StudentSummaryRow::as_select()))
            .order(complaints::created_at.desc())
            .into_boxed();
        if let Some(student_id) = &filter.student_id {
            query = query.filter(complaints::student_id.eq(*student_id.as_uuid()));
        }
        if let Some(status) = filter.status {
            query = query.filter(complaints::status.eq(status.as_str()));
        }

        let rows: Vec<(ComplaintRow, StudentSummaryRow)> =
            query.load(&mut conn).await.map_err(map_error)?;
        rows.into_iter()
            .map(|joined| with_student(joined, ComplaintRow::into_domain))
            .collect::<Result<_, _>>()
            .map_err(ComplaintRepositoryError::query)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: ComplaintStatus,
    ) -> Result<bool, ComplaintRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ComplaintRepositoryError::connection))?;

        let updated = diesel::update(complaints::table.filter(complaints::id.eq(id)))
            .set(complaints::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(updated > 0)
    }
}
