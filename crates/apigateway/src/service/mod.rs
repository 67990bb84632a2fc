mod auth;
mod resource;

#[cfg(test)]
pub(crate) mod testing;

pub use self::auth::{AuthService, LOGIN_ENDPOINT, LOGOUT_ENDPOINT, ME_ENDPOINT};
pub use self::resource::ResourceService;
