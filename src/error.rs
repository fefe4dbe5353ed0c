//! Error handling module for the Docker tag pruner

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrunerError>;

#[derive(Error, Debug)]
pub enum PrunerError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Authentication error: {0}")]
    Authentication(String),
    #[error("Registry error: {0}")]
    Registry(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Failed to delete tag '{tag}': {message}")]
    Deletion { tag: String, message: String },
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
