//! User directory service: signup, authentication and user lookup.

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::users_sea::UserCreate;
use crate::auth::password::{BcryptHasher, PasswordHasher};
use crate::config::directory::{DirectoryConfig, DuplicateFollowPolicy};
use crate::db::session::{PendingUser, Session};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::redact_username;
use crate::logging::security;
use crate::repos::users::{self as users_repo, User};

/// Owns users, their messages and the follow graph.
///
/// Every operation takes the caller's [`Session`]; reads autoflush staged
/// signups first so they observe them before commit.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    pub(crate) hasher: Arc<dyn PasswordHasher>,
    pub(crate) follow_policy: DuplicateFollowPolicy,
}

impl UserDirectory {
    pub fn new(config: &DirectoryConfig) -> Self {
        Self {
            hasher: Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            follow_policy: config.duplicate_follow,
        }
    }

    /// Swap the password hasher.
    pub fn with_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn follow_policy(&self) -> DuplicateFollowPolicy {
        self.follow_policy
    }

    /// Hash `password` and stage a new user.
    ///
    /// Nothing is written yet: a missing, empty or duplicate username or
    /// email is reported by the next flush or commit as an integrity violation.
    pub fn signup(
        &self,
        session: &mut Session,
        username: Option<&str>,
        email: Option<&str>,
        password: &str,
        image_url: Option<&str>,
    ) -> Result<PendingUser, DomainError> {
        let hash = self.hasher.hash(password)?;
        let handle = session.add(UserCreate::from_parts(username, email, hash, image_url));

        debug!(
            username = %username.map(redact_username).unwrap_or_default(),
            "User staged for signup"
        );
        Ok(handle)
    }

    /// `Some(user)` when `username` exists and `password` matches its hash.
    pub async fn authenticate(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let txn = session.flushed_txn().await?;
        let Some(user) = users_repo::find_user_by_username(txn, username).await? else {
            security::login_failed("unknown_username", username);
            return Ok(None);
        };

        if !self.hasher.verify(password, &user.password) {
            security::login_failed("bad_password", username);
            return Ok(None);
        }

        info!(user_id = user.id, "User authenticated");
        Ok(Some(user))
    }

    pub async fn find_user(
        &self,
        session: &mut Session,
        user_id: i64,
    ) -> Result<Option<User>, DomainError> {
        let txn = session.flushed_txn().await?;
        users_repo::find_user_by_id(txn, user_id).await
    }

    pub async fn find_by_username(
        &self,
        session: &mut Session,
        username: &str,
    ) -> Result<Option<User>, DomainError> {
        let txn = session.flushed_txn().await?;
        users_repo::find_user_by_username(txn, username).await
    }

    /// Remove a user together with their messages and every follow edge
    /// touching them.
    pub async fn delete_user(&self, session: &mut Session, user_id: i64) -> Result<(), DomainError> {
        let txn = session.flushed_txn().await?;
        let result = users_repo::delete_user(txn, user_id).await;
        let removed = session.guard_write(result).await?;

        if !removed {
            return Err(DomainError::not_found(
                NotFoundKind::User,
                format!("User {user_id} not found"),
            ));
        }
        info!(user_id, "User deleted");
        Ok(())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(&DirectoryConfig::default())
    }
}
