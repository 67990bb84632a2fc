mod logs;
mod metrics;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Method, Metrics, Status, encode_metrics};
