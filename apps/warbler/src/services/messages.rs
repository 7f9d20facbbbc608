//! Message operations on [`UserDirectory`].

use tracing::debug;

use super::directory::UserDirectory;
use crate::db::session::Session;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::messages::{self as messages_repo, Message};

pub const MAX_MESSAGE_CHARS: usize = 140;

fn validate_text(text: &str) -> Result<(), DomainError> {
    if text.is_empty() {
        return Err(DomainError::validation("Message text must not be empty"));
    }
    let chars = text.chars().count();
    if chars > MAX_MESSAGE_CHARS {
        return Err(DomainError::validation(format!(
            "Message text is {chars} characters; the limit is {MAX_MESSAGE_CHARS}"
        )));
    }
    Ok(())
}

impl UserDirectory {
    pub async fn post_message(
        &self,
        session: &mut Session,
        user_id: i64,
        text: &str,
    ) -> Result<Message, DomainError> {
        validate_text(text)?;

        let txn = session.flushed_txn().await?;
        let result = messages_repo::create_message(txn, user_id, text).await;
        let message = session.guard_write(result).await?;

        debug!(user_id, message_id = message.id, "Message posted");
        Ok(message)
    }

    /// Messages owned by `user_id`, newest first.
    pub async fn messages(
        &self,
        session: &mut Session,
        user_id: i64,
    ) -> Result<Vec<Message>, DomainError> {
        let txn = session.flushed_txn().await?;
        messages_repo::find_messages_by_user(txn, user_id).await
    }

    pub async fn delete_message(
        &self,
        session: &mut Session,
        message_id: i64,
    ) -> Result<(), DomainError> {
        let txn = session.flushed_txn().await?;
        let result = messages_repo::delete_message(txn, message_id).await;
        if !session.guard_write(result).await? {
            return Err(DomainError::not_found(
                NotFoundKind::Message,
                format!("Message {message_id} not found"),
            ));
        }
        Ok(())
    }
}
