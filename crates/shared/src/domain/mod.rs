pub mod requests;
pub mod responses;
mod role;
mod session;
mod user;

pub use self::role::{LOGIN_PATH, Role};
pub use self::session::Session;
pub use self::user::UserProfile;
