use crate::fetch::FetchError;
use crate::index::IndexParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FwMirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation failed: {details}")]
    ConfigValidation { details: String },

    #[error("CLI argument validation failed: {details}")]
    CliArgumentValidation { details: String },

    #[error("Failed to download firmware index: {0}")]
    IndexFetch(#[from] FetchError),

    #[error("Failed to parse firmware index: {0}")]
    IndexParse(#[from] IndexParseError),

    #[error("No devices found in firmware index {index}")]
    EmptyIndex { index: String },

    #[error("Output directory creation failed at {path}: {reason}")]
    OutputDirectoryCreation {
        path: std::path::PathBuf,
        reason: String,
    },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
