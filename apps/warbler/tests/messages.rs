//! Messages: posting, ordering, validation and ownership cascades.

mod common;
mod support;

use serial_test::serial;
use support::{seed_user, test_db, test_directory};
use warbler::{DomainError, IntegrityKind, Session};

#[tokio::test]
#[serial]
async fn test_post_and_list_newest_first() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let author = seed_user(&directory, &mut session, "author").await?;
    let first = directory.post_message(&mut session, author, "first").await?;
    let second = directory.post_message(&mut session, author, "second").await?;
    session.commit().await?;

    assert_eq!(first.user_id, author);
    assert!(second.created_at >= first.created_at);

    let texts: Vec<String> = directory
        .messages(&mut session, author)
        .await?
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(texts, vec!["second".to_string(), "first".to_string()]);
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_message_text_is_validated_before_storage() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let author = seed_user(&directory, &mut session, "author").await?;

    let err = directory.post_message(&mut session, author, "").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let too_long = "x".repeat(141);
    let err = directory
        .post_message(&mut session, author, &too_long)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    let blank = directory.post_message(&mut session, author, "   ").await?;
    assert_eq!(blank.text, "   ");

    // Validation does not abort the session: the seeded user is still visible.
    assert!(directory.find_user(&mut session, author).await?.is_some());
    directory
        .post_message(&mut session, author, &"x".repeat(140))
        .await?;
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_post_for_unknown_user_is_foreign_key_violation() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let err = directory
        .post_message(&mut session, 9999, "hello")
        .await
        .unwrap_err();
    assert_eq!(err.integrity_kind(), Some(&IntegrityKind::ForeignKey));

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_delete_message() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let author = seed_user(&directory, &mut session, "author").await?;
    let keep = directory.post_message(&mut session, author, "keep").await?;
    let dropped = directory.post_message(&mut session, author, "drop").await?;

    directory.delete_message(&mut session, dropped.id).await?;
    let remaining = directory.messages(&mut session, author).await?;
    assert_eq!(remaining, vec![keep]);

    let err = directory
        .delete_message(&mut session, dropped.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(..)));
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_delete_user_cascades_to_messages() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let author = seed_user(&directory, &mut session, "author").await?;
    let bystander = seed_user(&directory, &mut session, "bystander").await?;
    let doomed = directory.post_message(&mut session, author, "soon gone").await?;
    directory
        .post_message(&mut session, bystander, "still here")
        .await?;
    session.commit().await?;

    directory.delete_user(&mut session, author).await?;
    session.commit().await?;

    assert!(directory.messages(&mut session, author).await?.is_empty());
    assert_eq!(directory.messages(&mut session, bystander).await?.len(), 1);

    let err = directory
        .delete_message(&mut session, doomed.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(..)));
    session.rollback().await?;

    Ok(())
}
