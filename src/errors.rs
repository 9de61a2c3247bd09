use crate::chain::{ChainError, ParseNetworkError};
use crate::codec::CodecError;
use crate::types::ClassificationError;
use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Hex input on the command line
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Base43 / compression errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Address, key, script or transaction errors
    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    /// Input was classified and rejected
    #[error("Rejected: {0}")]
    Rejected(#[from] ClassificationError),

    /// Input did not match any known shape
    #[error("Cannot classify input: {0}")]
    Unclassifiable(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<ParseNetworkError> for AppError {
    fn from(err: ParseNetworkError) -> Self {
        AppError::Config(err.to_string())
    }
}
