//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every read filters out soft-deleted rows. Email uniqueness is enforced by
//! a partial unique index, so a registration racing another one for the same
//! address fails here with `DuplicateEmail`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Email, NewUser, User, UserId};

use super::diesel_basic_error_mapping::{map_diesel_error_with_duplicate, map_pool_error};
use super::models::{NewUserRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_diesel_error_with_duplicate(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
        UserRepositoryError::duplicate_email,
    )
}

fn to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    User::try_from(row).map_err(UserRepositoryError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            name: user.name.as_str(),
            email: user.email.as_str(),
            password_hash: &user.password_hash,
            created_at: user.created_at,
            updated_at: user.created_at,
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_user(inserted)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::id.eq(id.as_i64()))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::email.eq(email.as_str()))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_user)
            .transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let raw: Vec<i64> = ids.iter().map(|id| id.as_i64()).collect();

        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(raw))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_user).collect()
    }

    async fn update_profile(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = UserProfileChangeset {
            name: user.name.as_str(),
            skills: &user.skills,
            bio: &user.bio,
            updated_at: user.updated_at,
        };

        diesel::update(
            users::table
                .filter(users::id.eq(user.id.as_i64()))
                .filter(users::deleted_at.is_null()),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(diesel_error)
    }
}
