//! Follow graph operations on [`UserDirectory`].

use tracing::debug;

use super::directory::UserDirectory;
use crate::config::directory::DuplicateFollowPolicy;
use crate::db::session::Session;
use crate::errors::domain::{DomainError, IntegrityKind};
use crate::repos::follows as follows_repo;
use crate::repos::users::User;

impl UserDirectory {
    /// Record that `follower_id` follows `followed_id`.
    ///
    /// A repeated edge is rejected or ignored according to the configured
    /// [`DuplicateFollowPolicy`]; an unknown user is a foreign key violation.
    pub async fn follow(
        &self,
        session: &mut Session,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<(), DomainError> {
        let txn = session.flushed_txn().await?;

        let result = match self.follow_policy {
            DuplicateFollowPolicy::Reject => {
                match follows_repo::follow_exists(txn, follower_id, followed_id).await {
                    Ok(true) => Err(DomainError::integrity(
                        IntegrityKind::DuplicateFollow,
                        "Already following this user",
                    )),
                    Ok(false) => follows_repo::insert_follow(txn, follower_id, followed_id).await,
                    Err(e) => Err(e),
                }
            }
            DuplicateFollowPolicy::Ignore => {
                follows_repo::ensure_follow(txn, follower_id, followed_id)
                    .await
                    .map(|inserted| {
                        if !inserted {
                            debug!(follower_id, followed_id, "Follow already present");
                        }
                    })
            }
        };

        session.guard_write(result).await?;
        debug!(follower_id, followed_id, "Follow recorded");
        Ok(())
    }

    /// Returns true when an edge was removed.
    pub async fn unfollow(
        &self,
        session: &mut Session,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<bool, DomainError> {
        let txn = session.flushed_txn().await?;
        let result = follows_repo::delete_follow(txn, follower_id, followed_id).await;
        session.guard_write(result).await
    }

    /// Users `user_id` follows, by id.
    pub async fn following(
        &self,
        session: &mut Session,
        user_id: i64,
    ) -> Result<Vec<User>, DomainError> {
        let txn = session.flushed_txn().await?;
        follows_repo::find_following(txn, user_id).await
    }

    /// Users following `user_id`, by id.
    pub async fn followers(
        &self,
        session: &mut Session,
        user_id: i64,
    ) -> Result<Vec<User>, DomainError> {
        let txn = session.flushed_txn().await?;
        follows_repo::find_followers(txn, user_id).await
    }

    /// Does `user_id` follow `other_id`?
    pub async fn is_following(
        &self,
        session: &mut Session,
        user_id: i64,
        other_id: i64,
    ) -> Result<bool, DomainError> {
        let txn = session.flushed_txn().await?;
        follows_repo::follow_exists(txn, user_id, other_id).await
    }

    /// Is `user_id` followed by `other_id`?
    pub async fn is_followed_by(
        &self,
        session: &mut Session,
        user_id: i64,
        other_id: i64,
    ) -> Result<bool, DomainError> {
        let txn = session.flushed_txn().await?;
        follows_repo::follow_exists(txn, other_id, user_id).await
    }
}
