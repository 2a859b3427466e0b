//! PostgreSQL-backed `OutpassRepository`.
//!
//! Reads join `users` so list views carry the student's name, username and
//! room number without a second round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{OutpassFilter, OutpassRepository, OutpassRepositoryError};
use crate::domain::{OutpassRequest, OutpassStatus, WithStudent};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{OutpassRow, StudentSummaryRow, with_student};
use super::pool::DbPool;
use super::schema::{outpass_requests, users};

#[derive(Clone)]
pub struct DieselOutpassRepository {
    pool: DbPool,
}

impl DieselOutpassRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> OutpassRepositoryError {
    map_diesel_error(
        error,
        OutpassRepositoryError::query,
        OutpassRepositoryError::connection,
    )
}

type JoinedRow = (OutpassRow, StudentSummaryRow);

fn into_joined(
    rows: Vec<JoinedRow>,
) -> Result<Vec<WithStudent<OutpassRequest>>, OutpassRepositoryError> {
    rows.into_iter()
        .map(|joined| with_student(joined, OutpassRow::into_domain))
        .collect::<Result<_, _>>()
        .map_err(OutpassRepositoryError::query)
}

#[async_trait]
impl OutpassRepository for DieselOutpassRepository {
    async fn insert(&self, request: &OutpassRequest) -> Result<(), OutpassRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OutpassRepositoryError::connection))?;

        diesel::insert_into(outpass_requests::table)
            .values(&OutpassRow::from_domain(request))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }

    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<WithStudent<OutpassRequest>>, OutpassRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OutpassRepositoryError::connection))?;

        let row: Option<JoinedRow> = outpass_requests::table
            .inner_join(users::table)
            .filter(outpass_requests::id.eq(id))
            .select((OutpassRow::as_select(), StudentSummaryRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(|joined| with_student(joined, OutpassRow::into_domain))
            .transpose()
            .map_err(OutpassRepositoryError::query)
    }

    async fn list(
        &self,
        filter: &OutpassFilter,
    ) -> Result<Vec<WithStudent<OutpassRequest>>, OutpassRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OutpassRepositoryError::connection))?;

        let mut query = outpass_requests::table
            .inner_join(users::table)
            .select((OutpassRow::as_select(), StudentSummaryRow::as_select()))
            .order(outpass_requests::created_at.desc())
            .into_boxed();
        if let Some(student_id) = &filter.student_id {
            query = query.filter(outpass_requests::student_id.eq(*student_id.as_uuid()));
        }
        if let Some(status) = filter.status {
            query = query.filter(outpass_requests::status.eq(status.as_str()));
        }

        let rows: Vec<JoinedRow> = query.load(&mut conn).await.map_err(map_error)?;
        into_joined(rows)
    }

    async fn update_status(
        &self,
        id: &Uuid,
        status: OutpassStatus,
    ) -> Result<bool, OutpassRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, OutpassRepositoryError::connection))?;

        let updated = diesel::update(outpass_requests::table.filter(outpass_requests::id.eq(id)))
            .set(outpass_requests::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(updated > 0)
    }
}
