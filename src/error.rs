//! Error types for SenaFleet

use thiserror::Error;

/// SenaFleet error type
#[derive(Error, Debug)]
pub enum FleetError {
    /// Send or receive failure at the transport seam
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Message failed its construction-time invariants
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Configuration could not be loaded or did not validate
    #[error("Configuration error: {0}")]
    Config(String),

    /// Navigation graph could not be loaded or is inconsistent
    #[error("Navigation graph error: {0}")]
    Graph(String),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for FleetError {
    fn from(e: serde_yaml::Error) -> Self {
        FleetError::Config(e.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, FleetError>;
