pub mod config;
pub mod context;
pub mod debug;
mod error;
mod value;

pub use config::{ConfigError, ConfigFormat, ConfigStore};
pub use context::AppContext;
pub use debug::Printer;
pub use error::Error;
pub use value::Value;
