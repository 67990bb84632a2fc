use crate::domain::user::UserProfile;
use serde::{Deserialize, Serialize};

/// Snapshot of what the session store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn new(token: Option<String>, user: Option<UserProfile>) -> Self {
        Self { token, user }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Authentication is token-gated: without a token the stored user is ignored.
    pub fn user(&self) -> Option<&UserProfile> {
        if self.is_authenticated() {
            self.user.as_ref()
        } else {
            None
        }
    }
}
