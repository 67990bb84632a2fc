mod myconfig;

pub use self::myconfig::{Config, DEFAULT_API_BASE_URL, DEFAULT_SESSION_DIR};
