//! Error types for mp-dash

use thiserror::Error;

/// Result type alias for mp-dash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for mp-dash
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Analytics API error: {0}")]
    ApiError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}
