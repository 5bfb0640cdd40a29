//! Layered configuration lookup by dotted key.

mod error;
mod file;
mod flatten;
mod source;
mod store;

pub use error::ConfigError;
pub use file::ConfigFormat;
pub use flatten::flatten;
pub use source::{override_files, OverrideFile, Tier};
pub use store::{ConfigStore, KeyPath, DEFAULT_DIRECTORY};
