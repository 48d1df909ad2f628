//! Error types for Cube Forge

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CubeError {
    #[error("Invalid inventory row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Invalid player count: {0} (expected a positive number)")]
    InvalidPlayerCount(usize),

    #[error("Invalid build configuration: {0}")]
    InvalidConfig(String),

    #[error("No cards were loaded from {0}")]
    NoCardsLoaded(String),

    #[error("Cube is {missing} cards short of the {target}-card target")]
    Shortfall { missing: usize, target: usize },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CubeError>;
