mod file_store;
mod memory_store;
mod session;

pub use self::file_store::{FileStorage, SESSION_FILE};
pub use self::memory_store::MemoryStorage;
pub use self::session::{SessionStore, TOKEN_KEY, USER_KEY};
