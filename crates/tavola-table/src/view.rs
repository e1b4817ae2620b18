//! Render model of a table
//!
//! [`TableController::view`](crate::TableController::view) produces a
//! [`TableView`]: the visible headers in screen order and exactly one body
//! state. An empty result is a successful body of its own, distinct from the
//! error body.

use crate::header::ColumnHeader;

/// Text of the body shown for a successful fetch with no rows
pub const EMPTY_MESSAGE: &str = "No rows to display.";

/// Label of the affordance offered next to a fetch error
pub const RETRY_LABEL: &str = "Retry";

#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub table_id: String,
    /// Visible columns, left-pinned first and right-pinned last
    pub headers: Vec<ColumnHeader>,
    pub body: TableBody,
}

impl TableView {
    pub fn header_titles(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| match h.sort.indicator() {
                "" => h.label.clone(),
                indicator => format!("{} {}", h.label, indicator),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// Nothing to show yet; render placeholder rows
    Loading { skeleton_rows: usize },
    Error {
        message: String,
        retry_label: &'static str,
    },
    Empty { message: &'static str },
    Rows {
        rows: Vec<RowView>,
        pager: PagerView,
        /// A newer request is in flight; these rows are from the previous one
        refreshing: bool,
    },
}

impl TableBody {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn rows(&self) -> Option<&[RowView]> {
        match self {
            Self::Rows { rows, .. } => Some(rows),
            _ => None,
        }
    }

    pub fn pager(&self) -> Option<&PagerView> {
        match self {
            Self::Rows { pager, .. } => Some(pager),
            _ => None,
        }
    }
}

/// One rendered row; `cells` follow the header order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerView {
    pub page_index: usize,
    pub page_count: Option<usize>,
    pub page_size: usize,
    pub total: Option<u64>,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub available_page_sizes: Vec<usize>,
    /// e.g. "21-25 of 25"
    pub summary: String,
}
