//! Message repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use crate::adapters::messages_sea::{self as messages_adapter, MessageCreate};
use crate::errors::domain::DomainError;

/// Message domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: i64,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    pub user_id: i64,
}

pub async fn create_message(
    txn: &DatabaseTransaction,
    user_id: i64,
    text: &str,
) -> Result<Message, DomainError> {
    let message = messages_adapter::create_message(txn, MessageCreate::new(user_id, text)).await?;
    Ok(Message::from(message))
}

pub async fn find_messages_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Message>, DomainError> {
    let messages = messages_adapter::find_messages_by_user(conn, user_id).await?;
    Ok(messages.into_iter().map(Message::from).collect())
}

pub async fn delete_message(
    txn: &DatabaseTransaction,
    message_id: i64,
) -> Result<bool, DomainError> {
    let removed = messages_adapter::delete_message(txn, message_id).await?;
    Ok(removed > 0)
}

impl From<crate::entities::messages::Model> for Message {
    fn from(model: crate::entities::messages::Model) -> Self {
        Self {
            id: model.id,
            text: model.text,
            created_at: model.created_at,
            user_id: model.user_id,
        }
    }
}
