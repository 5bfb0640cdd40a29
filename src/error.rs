use crate::config::ConfigError;
use thiserror::Error;

/// Top-level error type for the layer-fnd library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("debug output error: {0}")]
    Output(#[from] std::io::Error),
}
