//! PostgreSQL-backed `HostelInfoRepository`.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::HostelInfo;
use crate::domain::ports::{HostelInfoRepository, HostelInfoRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::HostelInfoRow;
use super::pool::DbPool;
use super::schema::hostel_info;

#[derive(Clone)]
pub struct DieselHostelInfoRepository {
    pool: DbPool,
}

impl DieselHostelInfoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> HostelInfoRepositoryError {
    map_diesel_error(
        error,
        HostelInfoRepositoryError::query,
        HostelInfoRepositoryError::connection,
    )
}

#[async_trait]
impl HostelInfoRepository for DieselHostelInfoRepository {
    async fn find_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Option<HostelInfo>, HostelInfoRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, HostelInfoRepositoryError::connection))?;

        hostel_info::table
            .filter(hostel_info::date.eq(date))
            .select(HostelInfoRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(HostelInfoRow::into_domain)
            .transpose()
            .map_err(HostelInfoRepositoryError::query)
    }

    async fn upsert(&self, info: &HostelInfo) -> Result<(), HostelInfoRepositoryError> {
        let row = HostelInfoRow::from_domain(info).map_err(HostelInfoRepositoryError::query)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, HostelInfoRepositoryError::connection))?;

        diesel::insert_into(hostel_info::table)
            .values(&row)
            .on_conflict(hostel_info::date)
            .do_update()
            .set(row.content())
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_error)
    }
}
