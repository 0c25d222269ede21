//! Error types for deck tooling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl From<serde_json::Error> for DeckError {
    fn from(e: serde_json::Error) -> Self {
        DeckError::SerializationError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeckError>;
