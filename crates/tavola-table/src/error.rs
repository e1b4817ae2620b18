//! Table errors: configuration, filter rejection and fetch failures

use tavola_core::{GENERIC_ERROR_MESSAGE, OperandType};
use thiserror::Error;

/// Rejection of a filter condition by the page's filter registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("'{0}' is not a filterable field")]
    UnknownField(String),

    #[error("Field '{field}' expects a {expected:?} operand, got {actual:?}")]
    OperandMismatch {
        field: String,
        expected: OperandType,
        actual: OperandType,
    },

    #[error("'{value}' is not an option of field '{field}'")]
    UnknownOption { field: String, value: String },

    #[error("Filter on '{0}' needs a value")]
    EmptyValue(String),

    #[error("Range on '{0}' has its lower bound above its upper bound")]
    InvertedRange(String),
}

/// Table configuration and state errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    #[error("Table '{0}' has no columns")]
    NoColumns(String),

    #[error("Duplicate column id '{0}'")]
    DuplicateColumn(String),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{0}' is not sortable")]
    NotSortable(String),

    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// A failed list fetch, as reported by a row source
///
/// Displays the server's message when one was provided and a generic
/// fallback otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.display_message())]
pub struct FetchError {
    /// HTTP status, when the failure came from a response
    pub status: Option<u16>,
    /// Message supplied by the server
    pub message: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
        }
    }

    /// A failure with nothing to tell the user beyond the fallback text
    pub fn opaque() -> Self {
        Self {
            status: None,
            message: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn display_message(&self) -> &str {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
    }
}
