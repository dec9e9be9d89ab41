use thiserror::Error;

use crate::core::types::ZoneId;

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Zone not found: {0}")]
    ZoneNotFound(ZoneId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, CounterError>;
