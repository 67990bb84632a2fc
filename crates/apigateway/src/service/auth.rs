use crate::{
    abstract_trait::{auth::AuthServiceTrait, client::DynApiClient},
    client::{RequestBody, RequestOptions},
};
use async_trait::async_trait;
use serde_json::json;
use shared::{
    abstract_trait::DynSessionStore,
    domain::{UserProfile, requests::LoginRequest, responses::LoginResponse},
    errors::{ClientError, ServiceError},
};
use tracing::{info, warn};
use validator::Validate;

pub const LOGIN_ENDPOINT: &str = "/auth/login";
pub const LOGOUT_ENDPOINT: &str = "/auth/logout";
pub const ME_ENDPOINT: &str = "/auth/me";

#[derive(Clone)]
pub struct AuthService {
    client: DynApiClient,
    session: DynSessionStore,
}

impl AuthService {
    pub fn new(client: DynApiClient, session: DynSessionStore) -> Self {
        Self { client, session }
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn login(&self, input: &LoginRequest) -> Result<UserProfile, ServiceError> {
        info!("Logging in user: {}", input.email);

        input.validate()?;

        let body = RequestBody::Json(json!({
            "email": input.email,
            "password": input.password,
        }));

        let payload = match self
            .client
            .post(LOGIN_ENDPOINT, body, RequestOptions::public())
            .await
        {
            Ok(payload) => payload,
            Err(ClientError::AuthorizationLost) => {
                warn!("Login rejected for {}", input.email);
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let response: LoginResponse = payload
            .decode()
            .map_err(|e| ServiceError::InvalidResponse(format!("login response: {e}")))?;

        if response.token.trim().is_empty() {
            return Err(ServiceError::InvalidResponse(
                "login response carried an empty token".to_string(),
            ));
        }

        self.session.set_session(&response.token, &response.user)?;

        info!(
            "User {} logged in with role {}",
            response.user.email, response.user.role
        );

        Ok(response.user)
    }

    async fn logout(&self) -> Result<(), ServiceError> {
        if self.session.is_authenticated()
            && let Err(e) = self
                .client
                .post(LOGOUT_ENDPOINT, RequestBody::None, RequestOptions::default())
                .await
        {
            warn!("Server-side logout failed, clearing local session anyway: {e}");
        }

        self.session.clear_session()?;
        info!("Logged out");
        Ok(())
    }

    async fn me(&self) -> Result<UserProfile, ServiceError> {
        let payload = self.client.get(ME_ENDPOINT, RequestOptions::default()).await?;

        let user: UserProfile = payload
            .decode()
            .map_err(|e| ServiceError::InvalidResponse(format!("profile response: {e}")))?;

        if let Some(token) = self.session.get_token() {
            self.session.set_session(&token, &user)?;
        }

        Ok(user)
    }

    fn current_user(&self) -> Option<UserProfile> {
        self.session.get_user()
    }
}
