#![allow(dead_code)]

use migration::{migrate, MigrationCommand};
use sea_orm::DatabaseConnection;
use warbler::config::db::{db_url, DbProfile};
use warbler::config::directory::{DirectoryConfig, DuplicateFollowPolicy, MIN_BCRYPT_COST};
use warbler::{connect_db, DomainError, Session, UserDirectory};

/// Connect to the test database and rebuild the schema from scratch.
///
/// Defaults to in-memory SQLite; set `TEST_DATABASE_URL` to run against Postgres.
pub async fn test_db() -> DatabaseConnection {
    let url = db_url(DbProfile::Test).expect("resolve test database url");
    let conn = connect_db(&url).await.expect("connect test database");
    migrate(&conn, MigrationCommand::Fresh)
        .await
        .expect("rebuild test schema");
    conn
}

pub fn directory_with(policy: DuplicateFollowPolicy) -> UserDirectory {
    let config = DirectoryConfig::default()
        .with_bcrypt_cost(MIN_BCRYPT_COST)
        .expect("minimum bcrypt cost is valid")
        .with_duplicate_follow(policy);
    UserDirectory::new(&config)
}

/// Directory with the cheapest bcrypt cost and the default follow policy.
pub fn test_directory() -> UserDirectory {
    directory_with(DuplicateFollowPolicy::Reject)
}

/// Sign up and flush a user, returning the persisted id.
pub async fn seed_user(
    directory: &UserDirectory,
    session: &mut Session,
    username: &str,
) -> Result<i64, DomainError> {
    let email = format!("{username}@test.com");
    let handle = directory.signup(session, Some(username), Some(&email), "password", None)?;
    session.flush().await?;
    Ok(session
        .resolve(handle)
        .expect("flushed user has an identity"))
}
