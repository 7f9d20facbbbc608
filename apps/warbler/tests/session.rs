//! Unit-of-work behavior: lazy transactions, flush, commit and recovery.

mod common;
mod support;

use serial_test::serial;
use support::{test_db, test_directory};
use warbler::{with_session, DomainError, IntegrityKind, Session, UserCreate};

#[tokio::test]
#[serial]
async fn test_transaction_begins_on_first_access() -> Result<(), DomainError> {
    let db = test_db().await;
    let mut session = Session::new(&db);

    session.add(UserCreate::new("lazy", "lazy@test.com", "HASHED_PASSWORD"));
    assert!(!session.in_transaction());

    session.flush().await?;
    assert!(session.in_transaction());
    assert!(!session.has_pending());

    session.commit().await?;
    assert!(!session.in_transaction());

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_rollback_discards_flushed_rows() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let handle = session.add(UserCreate::new("temp", "temp@test.com", "HASHED_PASSWORD"));
    session.flush().await?;
    let id = session.resolve(handle).expect("flushed user has an id");
    assert!(directory.find_user(&mut session, id).await?.is_some());

    session.rollback().await?;
    assert_eq!(session.resolve(handle), None);
    assert!(directory.find_user(&mut session, id).await?.is_none());
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_failed_commit_leaves_no_partial_rows() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();
    let mut session = Session::new(&db);

    let good = session.add(UserCreate::new("good", "good@test.com", "HASHED_PASSWORD"));
    session.add(UserCreate::new("good", "dupe@test.com", "HASHED_PASSWORD"));

    let err = session.commit().await.unwrap_err();
    assert_eq!(err.integrity_kind(), Some(&IntegrityKind::UniqueUsername));
    assert_eq!(session.resolve(good), None);
    assert!(!session.in_transaction());

    // The same session is usable afterwards and the first row never landed.
    assert!(directory
        .find_by_username(&mut session, "good")
        .await?
        .is_none());

    let retry = session.add(UserCreate::new("good", "good@test.com", "HASHED_PASSWORD"));
    session.commit().await?;
    assert!(session.resolve(retry).is_some());

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_assign_id_after_flush_is_rejected() -> Result<(), DomainError> {
    let db = test_db().await;
    let mut session = Session::new(&db);

    let handle = session.add(UserCreate::new("fixed", "fixed@test.com", "HASHED_PASSWORD"));
    session.assign_id(handle, 4242)?;
    session.flush().await?;

    assert_eq!(session.resolve(handle), Some(4242));
    assert!(matches!(
        session.assign_id(handle, 1),
        Err(DomainError::Validation(_))
    ));
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_with_session_commits_on_ok() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();

    let writer = directory.clone();
    let id = with_session(&db, move |s| {
        Box::pin(async move {
            let handle = writer.signup(s, Some("kept"), Some("kept@test.com"), "password", None)?;
            s.flush().await?;
            Ok(s.resolve(handle))
        })
    })
    .await?
    .expect("flushed user has an id");

    let mut session = Session::new(&db);
    let user = directory.find_user(&mut session, id).await?;
    assert_eq!(user.map(|u| u.username), Some("kept".to_string()));
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_with_session_rolls_back_on_err() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();

    let writer = directory.clone();
    let result: Result<(), DomainError> = with_session(&db, move |s| {
        Box::pin(async move {
            writer.signup(s, Some("dropped"), Some("dropped@test.com"), "password", None)?;
            s.flush().await?;
            Err(DomainError::validation("caller bailed out"))
        })
    })
    .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let mut session = Session::new(&db);
    assert!(directory
        .find_by_username(&mut session, "dropped")
        .await?
        .is_none());
    session.rollback().await?;

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_with_session_surfaces_commit_integrity_errors() -> Result<(), DomainError> {
    let db = test_db().await;
    let directory = test_directory();

    let writer = directory.clone();
    let err = with_session(&db, move |s| {
        Box::pin(async move {
            writer.signup(s, Some("twin"), Some("twin@test.com"), "password", None)?;
            writer.signup(s, Some("twin"), Some("other@test.com"), "password", None)?;
            Ok(())
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.integrity_kind(), Some(&IntegrityKind::UniqueUsername));

    Ok(())
}

#[tokio::test]
#[serial]
async fn test_committed_identities_outlive_later_rollbacks() -> Result<(), DomainError> {
    let db = test_db().await;
    let mut session = Session::new(&db);

    let kept = session.add(UserCreate::new("kept", "kept@test.com", "HASHED_PASSWORD"));
    session.commit().await?;
    let kept_id = session.resolve(kept).expect("committed user has an id");

    let discarded = session.add(UserCreate::new("gone", "gone@test.com", "HASHED_PASSWORD"));
    session.flush().await?;
    assert!(session.resolve(discarded).is_some());

    session.rollback().await?;
    assert_eq!(session.resolve(discarded), None);
    assert_eq!(session.resolve(kept), Some(kept_id));

    Ok(())
}
