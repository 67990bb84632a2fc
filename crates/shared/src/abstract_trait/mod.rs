mod session;
mod storage;

pub use self::session::{DynSessionStore, SessionStoreTrait};
pub use self::storage::{DynStorage, KeyValueStorage};
