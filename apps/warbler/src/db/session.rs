//! Unit of work over a single database transaction.
//!
//! Signups are staged here and only written on `flush`/`commit`, so
//! constraint violations surface at flush time rather than at staging time.

use std::collections::HashMap;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, warn};

use crate::adapters::users_sea::UserCreate;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::users as users_repo;

/// Handle to a user staged in a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingUser(usize);

/// Holds staged users and, once the database is first touched, an open transaction.
pub struct Session {
    db: DatabaseConnection,
    txn: Option<DatabaseTransaction>,
    staged: Vec<(PendingUser, UserCreate)>,
    /// Ids of flushed users, kept for the life of the session so `resolve`
    /// keeps working after commit. Entries flushed inside a transaction that
    /// is later rolled back are removed again.
    identities: HashMap<PendingUser, i64>,
    /// Handles flushed inside the current transaction.
    uncommitted: Vec<PendingUser>,
    next_handle: usize,
}

impl Session {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self {
            db: db.clone(),
            txn: None,
            staged: Vec::new(),
            identities: HashMap::new(),
            uncommitted: Vec::new(),
            next_handle: 0,
        }
    }

    /// Stage a user row. Nothing is written until the next flush.
    pub fn add(&mut self, user: UserCreate) -> PendingUser {
        let handle = PendingUser(self.next_handle);
        self.next_handle += 1;
        self.staged.push((handle, user));
        handle
    }

    /// Override the identifier a staged user will be inserted with.
    pub fn assign_id(&mut self, handle: PendingUser, id: i64) -> Result<(), DomainError> {
        match self.staged.iter_mut().find(|(h, _)| *h == handle) {
            Some((_, user)) => {
                user.id = Some(id);
                Ok(())
            }
            None => Err(DomainError::validation(
                "identifier can only be assigned to a user that has not been flushed",
            )),
        }
    }

    /// Persisted id of a staged user, once flushed.
    pub fn resolve(&self, handle: PendingUser) -> Option<i64> {
        self.identities.get(&handle).copied()
    }

    pub fn has_pending(&self) -> bool {
        !self.staged.is_empty()
    }

    pub fn in_transaction(&self) -> bool {
        self.txn.is_some()
    }

    /// Current transaction, begun on first use.
    pub async fn txn(&mut self) -> Result<&DatabaseTransaction, DomainError> {
        if self.txn.is_none() {
            let txn = self.db.begin().await?;
            debug!("Session transaction started");
            self.txn = Some(txn);
        }
        self.txn.as_ref().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::Other("Session".into()),
                "transaction was not started",
            )
        })
    }

    /// Flush staged rows, then hand out the transaction. Used before every query.
    pub async fn flushed_txn(&mut self) -> Result<&DatabaseTransaction, DomainError> {
        self.flush().await?;
        self.txn().await
    }

    /// Insert staged users in staging order inside the current transaction.
    ///
    /// On failure the transaction is rolled back and everything staged or
    /// flushed since it began is discarded.
    pub async fn flush(&mut self) -> Result<(), DomainError> {
        if self.staged.is_empty() {
            return Ok(());
        }
        self.txn().await?;

        let staged = std::mem::take(&mut self.staged);
        let mut failure = None;
        if let Some(txn) = self.txn.as_ref() {
            for (handle, user) in staged {
                match users_repo::create_user(txn, user).await {
                    Ok(created) => {
                        self.identities.insert(handle, created.id);
                        self.uncommitted.push(handle);
                    }
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }
            }
        }

        if let Some(err) = failure {
            return Err(self.abort(err).await);
        }
        debug!(uncommitted = self.uncommitted.len(), "Session flushed");
        Ok(())
    }

    /// Flush, then commit the open transaction (if any).
    pub async fn commit(&mut self) -> Result<(), DomainError> {
        self.flush().await?;

        if let Some(txn) = self.txn.take() {
            if let Err(e) = txn.commit().await {
                self.forget_uncommitted();
                return Err(e.into());
            }
            debug!("Session committed");
        }
        self.uncommitted.clear();
        Ok(())
    }

    /// Discard staged rows and roll back. A no-op with no open transaction.
    pub async fn rollback(&mut self) -> Result<(), DomainError> {
        self.staged.clear();
        self.forget_uncommitted();

        if let Some(txn) = self.txn.take() {
            txn.rollback().await?;
            debug!("Session rolled back");
        }
        Ok(())
    }

    /// Roll back after a failed write and hand the original error back.
    pub(crate) async fn abort(&mut self, err: DomainError) -> DomainError {
        if let Err(rollback_err) = self.rollback().await {
            warn!(error = %rollback_err, "Rollback after failed write also failed");
        }
        err
    }

    /// Pass a write result through, aborting the session if it failed.
    pub(crate) async fn guard_write<T>(
        &mut self,
        result: Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        match result {
            Ok(val) => Ok(val),
            Err(err) => Err(self.abort(err).await),
        }
    }

    fn forget_uncommitted(&mut self) {
        for handle in self.uncommitted.drain(..) {
            self.identities.remove(&handle);
        }
    }
}
