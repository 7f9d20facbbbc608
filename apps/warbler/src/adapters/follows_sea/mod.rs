//! SeaORM adapter for follow edges.
//!
//! `following`/`followers` are computed by joining `users` against `follows`
//! on every call; nothing about the relationship is cached on a user row.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{follows, users};

fn edge(follower_id: i64, followed_id: i64) -> follows::ActiveModel {
    follows::ActiveModel {
        follower_id: Set(follower_id),
        followed_id: Set(followed_id),
    }
}

/// Plain insert; a duplicate edge fails on the primary key.
pub async fn insert_follow(
    txn: &DatabaseTransaction,
    follower_id: i64,
    followed_id: i64,
) -> Result<(), sea_orm::DbErr> {
    follows::Entity::insert(edge(follower_id, followed_id))
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

/// Insert unless the edge already exists. Returns whether a row was written.
pub async fn ensure_follow(
    txn: &DatabaseTransaction,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let rows = follows::Entity::insert(edge(follower_id, followed_id))
        .on_conflict(
            OnConflict::columns([follows::Column::FollowerId, follows::Column::FollowedId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    Ok(rows == 1)
}

pub async fn delete_follow(
    txn: &DatabaseTransaction,
    follower_id: i64,
    followed_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = follows::Entity::delete_by_id((follower_id, followed_id))
        .exec(txn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn follow_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let found = follows::Entity::find_by_id((follower_id, followed_id))
        .one(conn)
        .await?;
    Ok(found.is_some())
}

/// Users that `user_id` follows, ordered by id.
pub async fn find_following<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .join(JoinType::InnerJoin, follows::Relation::Followed.def().rev())
        .filter(follows::Column::FollowerId.eq(user_id))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

/// Users following `user_id`, ordered by id.
pub async fn find_followers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .join(JoinType::InnerJoin, follows::Relation::Follower.def().rev())
        .filter(follows::Column::FollowedId.eq(user_id))
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}
