use thiserror::Error;

use crate::core::types::TrooperId;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Trooper not found: {0}")]
    TrooperNotFound(TrooperId),

    #[error("Invalid field: {0}")]
    InvalidField(String),

    #[error("Unknown equipment item: {0}")]
    UnknownItem(String),

    #[error("Invalid value {value:?} for {field}")]
    InvalidValue { field: String, value: String },

    #[error("Capacity exceeded: {0}")]
    CapacityExceeded(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TrackerError {
    pub(crate) fn invalid_value(field: &str, value: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
