//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use crate::adapters::users_sea::{self as users_adapter, UserCreate};
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plaintext
    #[serde(skip_serializing)]
    pub password: String,
    pub image_url: Option<String>,
}

pub async fn create_user(txn: &DatabaseTransaction, dto: UserCreate) -> Result<User, DomainError> {
    let user = users_adapter::create_user(txn, dto).await?;
    Ok(User::from(user))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_username(conn, username).await?;
    Ok(user.map(User::from))
}

/// Returns true when a row was removed.
pub async fn delete_user(txn: &DatabaseTransaction, user_id: i64) -> Result<bool, DomainError> {
    let removed = users_adapter::delete_user(txn, user_id).await?;
    Ok(removed > 0)
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password: model.password,
            image_url: model.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_user_omits_password() {
        let user = User {
            id: 7,
            username: "testuser".into(),
            email: "test@test.com".into(),
            password: "$2b$04$abcdefghijklmnopqrstuuAbCdEfGhIjKlMnOpQrStUvWxYz012".into(),
            image_url: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "testuser");
        assert!(json.get("password").is_none());
    }
}
