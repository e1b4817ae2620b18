//! Table controller events
//!
//! Recorded by the controller as its state changes and drained by the host,
//! which re-renders or refetches in response.

use tavola_core::SortDescriptor;

use crate::column_layout::PinSide;

#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    /// The outbound request changed; the host should refetch
    RequestChanged { revision: u64 },

    PageChanged { page_index: usize },

    PageSizeChanged { page_size: usize },

    SortChanged(Option<SortDescriptor>),

    /// The filter set was replaced
    FiltersChanged { count: usize },

    KeywordChanged(Option<String>),

    /// `column` now sits where `target` was
    ColumnMoved { column: String, target: String },

    ColumnPinned {
        column: String,
        side: Option<PinSide>,
    },

    ColumnVisibilityChanged { column: String, visible: bool },

    FetchStarted { ticket: u64 },

    FetchSucceeded { ticket: u64, rows: usize, total: u64 },

    FetchFailed { ticket: u64, message: String },

    /// A response arrived for a request that has since been superseded
    StaleResponseDiscarded { ticket: u64 },
}
