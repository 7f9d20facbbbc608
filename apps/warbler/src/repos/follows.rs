//! Follow edge repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::follows_sea as follows_adapter;
use crate::errors::domain::DomainError;
use crate::repos::users::User;

pub async fn insert_follow(
    txn: &DatabaseTransaction,
    follower_id: i64,
    followed_id: i64,
) -> Result<(), DomainError> {
    follows_adapter::insert_follow(txn, follower_id, followed_id).await?;
    Ok(())
}

/// Returns false when the edge was already present.
pub async fn ensure_follow(
    txn: &DatabaseTransaction,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, DomainError> {
    Ok(follows_adapter::ensure_follow(txn, follower_id, followed_id).await?)
}

/// Returns true when an edge was removed.
pub async fn delete_follow(
    txn: &DatabaseTransaction,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, DomainError> {
    let removed = follows_adapter::delete_follow(txn, follower_id, followed_id).await?;
    Ok(removed > 0)
}

pub async fn follow_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    follower_id: i64,
    followed_id: i64,
) -> Result<bool, DomainError> {
    Ok(follows_adapter::follow_exists(conn, follower_id, followed_id).await?)
}

pub async fn find_following<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<User>, DomainError> {
    let users = follows_adapter::find_following(conn, user_id).await?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn find_followers<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<User>, DomainError> {
    let users = follows_adapter::find_followers(conn, user_id).await?;
    Ok(users.into_iter().map(User::from).collect())
}
