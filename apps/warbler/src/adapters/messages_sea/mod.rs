//! SeaORM adapter for messages.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use time::{Duration, OffsetDateTime};

use crate::entities::messages;

pub mod dto;

pub use dto::MessageCreate;

/// Whole-second precision; `id` orders messages posted within the same second.
fn now_to_second() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - Duration::nanoseconds(i64::from(now.nanosecond()))
}

pub async fn create_message(
    txn: &DatabaseTransaction,
    dto: MessageCreate,
) -> Result<messages::Model, sea_orm::DbErr> {
    let message_active = messages::ActiveModel {
        id: NotSet,
        text: Set(dto.text),
        created_at: Set(now_to_second()),
        user_id: Set(dto.user_id),
    };

    message_active.insert(txn).await
}

/// Newest first; id breaks ties between messages created in the same instant.
pub async fn find_messages_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<messages::Model>, sea_orm::DbErr> {
    messages::Entity::find()
        .filter(messages::Column::UserId.eq(user_id))
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .all(conn)
        .await
}

pub async fn delete_message(
    txn: &DatabaseTransaction,
    message_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = messages::Entity::delete_by_id(message_id).exec(txn).await?;
    Ok(res.rows_affected)
}
