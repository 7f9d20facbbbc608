//! DTOs for users_sea adapter.

/// DTO for inserting a user row.
///
/// `username` and `email` are optional here on purpose: a missing value is
/// left out of the INSERT and the schema's NOT NULL rule rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCreate {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub image_url: Option<String>,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: Some(username.into()),
            email: Some(email.into()),
            password: password.into(),
            image_url: None,
        }
    }

    /// Build from possibly-missing fields, as handed over by a signup form.
    pub fn from_parts(
        username: Option<&str>,
        email: Option<&str>,
        password: impl Into<String>,
        image_url: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            username: username.map(str::to_owned),
            email: email.map(str::to_owned),
            password: password.into(),
            image_url: image_url.map(str::to_owned),
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}
