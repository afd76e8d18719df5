//! PostgreSQL-backed `MembershipRepository` implementation using Diesel ORM.
//!
//! The `(project_id, user_id)` unique constraint decides concurrent
//! applications: the losing insert reports `Duplicate`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MembershipRepository, MembershipRepositoryError};
use crate::domain::{
    MembershipId, MembershipStatus, NewMembership, ProjectId, ProjectMember, UserId,
};

use super::diesel_basic_error_mapping::{map_diesel_error_with_duplicate, map_pool_error};
use super::models::{MemberRow, NewMemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::project_members;

/// Diesel-backed implementation of the membership repository port.
#[derive(Clone)]
pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> MembershipRepositoryError {
    map_pool_error(error, MembershipRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> MembershipRepositoryError {
    map_diesel_error_with_duplicate(
        error,
        MembershipRepositoryError::query,
        MembershipRepositoryError::connection,
        MembershipRepositoryError::duplicate,
    )
}

fn to_member(row: MemberRow) -> Result<ProjectMember, MembershipRepositoryError> {
    ProjectMember::try_from(row).map_err(MembershipRepositoryError::query)
}

#[async_trait]
impl MembershipRepository for DieselMembershipRepository {
    async fn create(
        &self,
        membership: &NewMembership,
    ) -> Result<ProjectMember, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewMemberRow {
            project_id: membership.project_id.as_i64(),
            user_id: membership.user_id.as_i64(),
            status: MembershipStatus::Pending.as_str(),
            created_at: membership.created_at,
            updated_at: membership.created_at,
        };

        let inserted = diesel::insert_into(project_members::table)
            .values(&row)
            .returning(MemberRow::as_returning())
            .get_result::<MemberRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_member(inserted)
    }

    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> Result<Option<ProjectMember>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        project_members::table
            .filter(project_members::project_id.eq(project_id.as_i64()))
            .filter(project_members::user_id.eq(user_id.as_i64()))
            .select(MemberRow::as_select())
            .first::<MemberRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_member)
            .transpose()
    }

    async fn update_status(
        &self,
        id: MembershipId,
        status: MembershipStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(project_members::table.filter(project_members::id.eq(id.as_i64())))
            .set((
                project_members::status.eq(status.as_str()),
                project_members::updated_at.eq(updated_at),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<ProjectMember>, MembershipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<MemberRow> = project_members::table
            .filter(project_members::project_id.eq(project_id.as_i64()))
            .order(project_members::id.asc())
            .select(MemberRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_member).collect()
    }
}
