//! PostgreSQL-backed `MessageRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MessageRepository, MessageRepositoryError};
use crate::domain::{Message, NewMessage, ProjectId};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MessageRow, NewMessageRow};
use super::pool::{DbPool, PoolError};
use super::schema::messages;

/// Diesel-backed implementation of the message repository port.
#[derive(Clone)]
pub struct DieselMessageRepository {
    pool: DbPool,
}

impl DieselMessageRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> MessageRepositoryError {
    map_pool_error(error, MessageRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> MessageRepositoryError {
    map_diesel_error(
        error,
        MessageRepositoryError::query,
        MessageRepositoryError::connection,
    )
}

fn to_message(row: MessageRow) -> Result<Message, MessageRepositoryError> {
    Message::try_from(row).map_err(MessageRepositoryError::query)
}

#[async_trait]
impl MessageRepository for DieselMessageRepository {
    async fn create(&self, message: &NewMessage) -> Result<Message, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewMessageRow {
            project_id: message.project_id.as_i64(),
            author_id: message.author_id.as_i64(),
            content: message.content.as_str(),
            created_at: message.created_at,
        };

        let inserted = diesel::insert_into(messages::table)
            .values(&row)
            .returning(MessageRow::as_returning())
            .get_result::<MessageRow>(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_message(inserted)
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Message>, MessageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<MessageRow> = messages::table
            .filter(messages::project_id.eq(project_id.as_i64()))
            .order((messages::created_at.asc(), messages::id.asc()))
            .select(MessageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(to_message).collect()
    }
}
