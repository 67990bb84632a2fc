use crate::{
    abstract_trait::{DynStorage, SessionStoreTrait},
    domain::UserProfile,
    errors::StorageError,
};
use tracing::{debug, error};

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Token and user profile held in durable storage under two fixed keys.
#[derive(Clone)]
pub struct SessionStore {
    storage: DynStorage,
}

impl SessionStore {
    pub fn new(storage: DynStorage) -> Self {
        Self { storage }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read session key '{}': {:?}", key, e);
                None
            }
        }
    }
}

impl SessionStoreTrait for SessionStore {
    fn set_session(&self, token: &str, user: &UserProfile) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)?;

        if let Err(e) = self
            .storage
            .set_items(&[(USER_KEY, &user_json), (TOKEN_KEY, token)])
        {
            error!("Failed to store session, dropping it: {:?}", e);
            // a half-written pair must never authenticate
            if let Err(e) = self.storage.remove_items(&[TOKEN_KEY, USER_KEY]) {
                error!("Failed to drop partial session: {:?}", e);
            }
            return Err(e);
        }

        debug!("Session stored for user_id: {}", user.id);
        Ok(())
    }

    fn clear_session(&self) -> Result<(), StorageError> {
        // token first: without it the stored user is ignored
        self.storage.remove_items(&[TOKEN_KEY, USER_KEY])?;

        debug!("Session cleared");
        Ok(())
    }

    fn get_token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    fn get_user(&self) -> Option<UserProfile> {
        if !self.is_authenticated() {
            return None;
        }

        let data = self.read(USER_KEY)?;
        match serde_json::from_str::<UserProfile>(&data) {
            Ok(user) => Some(user),
            Err(e) => {
                error!("Failed to deserialize stored user: {:?}", e);
                None
            }
        }
    }

    fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}
