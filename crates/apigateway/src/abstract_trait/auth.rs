use async_trait::async_trait;
use shared::{
    domain::{UserProfile, requests::LoginRequest},
    errors::ServiceError,
};
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn login(&self, input: &LoginRequest) -> Result<UserProfile, ServiceError>;
    async fn logout(&self) -> Result<(), ServiceError>;
    async fn me(&self) -> Result<UserProfile, ServiceError>;
    fn current_user(&self) -> Option<UserProfile>;
}
