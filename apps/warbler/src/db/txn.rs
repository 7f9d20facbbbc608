use futures::future::BoxFuture;
use sea_orm::DatabaseConnection;

use super::session::Session;
use crate::errors::domain::DomainError;

/// Run `f` in a fresh [`Session`]; commit on `Ok`, roll back on `Err`.
///
/// The closure returns a boxed future borrowing the session:
/// `with_session(&db, |s| Box::pin(async move { ... }))`.
pub async fn with_session<R, F>(db: &DatabaseConnection, f: F) -> Result<R, DomainError>
where
    F: for<'s> FnOnce(&'s mut Session) -> BoxFuture<'s, Result<R, DomainError>>,
{
    let mut session = Session::new(db);

    match f(&mut session).await {
        Ok(val) => {
            session.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = session.rollback().await;
            Err(err)
        }
    }
}
