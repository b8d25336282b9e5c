//! # Economy Error Types
//!
//! Only configuration handling can fail. Upgrade attempts never return an
//! error; see [`crate::resolver::UpgradeOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or saving configuration.
#[derive(Error, Debug)]
pub enum CofferError {
    /// Reading or writing the config file failed.
    #[error("config file {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("config parse failed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config could not be written as TOML.
    #[error("config serialize failed: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result type for configuration operations.
pub type CofferResult<T> = Result<T, CofferError>;
