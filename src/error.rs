use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting, fetching or renaming attributions
#[derive(Error, Debug)]
pub enum AttributionError {
    /// Failed to read or write a file
    #[error("I/O error on {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the structured dump
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Failed to read or write the download manifest
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Failed to build the HTTP client
    #[error("HTTP client error: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl AttributionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AttributionError::IoError {
            path: path.into(),
            source,
        }
    }
}
