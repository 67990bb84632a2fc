mod auth;

pub use self::auth::LoginResponse;
