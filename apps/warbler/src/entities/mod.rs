pub mod follows;
pub mod messages;
pub mod users;

pub use follows::Entity as Follows;
pub use follows::Model as Follow;
pub use messages::Entity as Messages;
pub use messages::Model as Message;
pub use users::Entity as Users;
pub use users::Model as User;
