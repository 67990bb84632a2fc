pub mod auth;
pub mod client;
pub mod resource;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::client::{ApiClientTrait, DynApiClient};
pub use self::resource::{DynResourceService, ResourceServiceTrait};
