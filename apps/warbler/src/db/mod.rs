pub mod session;
pub mod txn;

pub use session::{PendingUser, Session};
pub use txn::with_session;
