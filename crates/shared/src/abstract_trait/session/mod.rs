use crate::{
    domain::{Session, UserProfile},
    errors::StorageError,
};
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

pub trait SessionStoreTrait {
    fn set_session(&self, token: &str, user: &UserProfile) -> Result<(), StorageError>;
    fn clear_session(&self) -> Result<(), StorageError>;
    fn get_token(&self) -> Option<String>;
    fn get_user(&self) -> Option<UserProfile>;
    fn is_authenticated(&self) -> bool;

    fn session(&self) -> Session {
        Session::new(self.get_token(), self.get_user())
    }
}
