mod resource;

pub use self::resource::{ExportFormat, Resource};
