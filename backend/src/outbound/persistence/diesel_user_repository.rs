//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{ProfileUpdate, User, UserId, UserRole};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, ProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> UserPersistenceError {
    if is_unique_violation(&error) {
        return UserPersistenceError::duplicate("username is already taken");
    }
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert_if_absent(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username(),
            name: user.name(),
            room_number: user.room_number(),
            phone: user.phone(),
            parent_phone: user.parent_phone(),
            role: user.role().as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .on_conflict(users::id)
            .do_nothing()
            .execute(&mut conn)
            .await
            .map(|inserted| inserted > 0)
            .map_err(map_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?
            .map(UserRow::into_domain)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let changes = ProfileChangeset {
            name: update.name(),
            room_number: update.room_number(),
            phone: update.phone(),
            parent_phone: update.parent_phone(),
        };
        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_error)?;
        Ok(updated > 0)
    }

    async fn count_by_role(&self, role: UserRole) -> Result<u64, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let count: i64 = users::table
            .filter(users::role.eq(role.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_error)?;
        u64::try_from(count).map_err(|err| UserPersistenceError::query(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    struct Info;

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"users_username_key\""
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("users")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some("users_username_key")
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[rstest]
    fn unique_violation_becomes_duplicate() {
        let err = map_error(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Info),
        ));
        assert!(matches!(err, UserPersistenceError::Duplicate { .. }));
    }

    #[rstest]
    fn closed_connection_becomes_connection_error() {
        let err = map_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(Info),
        ));
        assert!(matches!(err, UserPersistenceError::Connection { .. }));
    }
}
