//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProjectRepository, ProjectRepositoryError};
use crate::domain::{NewProject, Project, ProjectFilter, ProjectId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProjectRow, ProjectChangeset, ProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed implementation of the project repository port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProjectRepositoryError {
    map_pool_error(error, ProjectRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_diesel_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

fn to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    Project::try_from(row).map_err(ProjectRepositoryError::query)
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn create(&self, project: &NewProject) -> Result<Project, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let draft = &project.draft;
        let row = NewProjectRow {
            owner_id: project.owner_id.as_i64(),
            title: draft.title.as_str(),
            description: &draft.description,
            category: &draft.category,
            level: &draft.level,
            created_at: project.created_at,
            updated_at: project.created_at,
        };

        let inserted = diesel::insert_into(projects::table)
            .values(&row)
            .returning(ProjectRow::as_returning())
            .get_result::<ProjectRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_project(inserted)
    }

    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        projects::table
            .filter(projects::id.eq(id.as_i64()))
            .filter(projects::deleted_at.is_null())
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_project)
            .transpose()
    }

    async fn list(&self, filter: &ProjectFilter) -> Result<Vec<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let mut query = projects::table
            .filter(projects::deleted_at.is_null())
            .select(ProjectRow::as_select())
            .order(projects::id.asc())
            .into_boxed();
        if let Some(category) = filter.category() {
            query = query.filter(projects::category.eq(category.to_owned()));
        }
        if let Some(level) = filter.level() {
            query = query.filter(projects::level.eq(level.to_owned()));
        }

        let rows: Vec<ProjectRow> = query.load(&mut conn).await.map_err(diesel_error)?;
        rows.into_iter().map(to_project).collect()
    }

    async fn update(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = ProjectChangeset {
            title: project.title.as_str(),
            description: &project.description,
            category: &project.category,
            level: &project.level,
            updated_at: project.updated_at,
        };

        diesel::update(
            projects::table
                .filter(projects::id.eq(project.id.as_i64()))
                .filter(projects::deleted_at.is_null()),
        )
        .set(&changes)
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(diesel_error)
    }

    async fn soft_delete(
        &self,
        id: ProjectId,
        deleted_at: DateTime<Utc>,
    ) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(
            projects::table
                .filter(projects::id.eq(id.as_i64()))
                .filter(projects::deleted_at.is_null()),
        )
        .set(projects::deleted_at.eq(Some(deleted_at)))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(diesel_error)
    }
}
