//! Error types for Tavola

use thiserror::Error;

/// Message shown when a failure carries no server-provided text.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Core error type for Tavola operations
#[derive(Error, Debug)]
pub enum TavolaError {
    #[error("Invalid sort descriptor: {0}")]
    InvalidSort(String),

    #[error("Invalid filter condition: {0}")]
    InvalidFilter(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
