//! DTOs for messages_sea adapter.

/// DTO for inserting a message row.
#[derive(Debug, Clone)]
pub struct MessageCreate {
    pub user_id: i64,
    pub text: String,
}

impl MessageCreate {
    pub fn new(user_id: i64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: text.into(),
        }
    }
}
