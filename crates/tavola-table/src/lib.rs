//! Headless data table controller
//!
//! Every admin list page drives one [`TableController`]. The controller owns
//! the page's pagination, single sort descriptor, filter set, search keyword
//! and column layout, turns them into a memoized [`ListRequest`], tracks the
//! outcome of fetching that request, and renders a [`TableView`] model.
//!
//! ```text
//! ColumnHeader ──(HeaderDelegate)──▶ TableController ──ListRequest──▶ RowSource
//!                                         │
//!                                         └──▶ TableView (loading / error / empty / rows)
//! ```
//!
//! The controller never talks to the network. Fetching is delegated to a
//! [`RowSource`] supplied by the caller.
//!
//! [`ListRequest`]: tavola_core::ListRequest

mod column;
mod column_layout;
mod controller;
mod error;
mod events;
mod filter_registry;
mod header;
mod pagination;
mod search;
mod source;
mod view;

pub use column::{CellRenderer, ColumnDescriptor, HeaderLabel, TableRow};
pub use column_layout::{ColumnLayout, ColumnLayoutSnapshot, ColumnUiState, PinSide};
pub use controller::{FetchTicket, LoadState, TableBuilder, TableController};
pub use error::{FetchError, FilterError, TableError};
pub use events::TableEvent;
pub use filter_registry::{EnumOption, FilterDefinition, FilterRegistry, FilterRegistryBuilder};
pub use header::{
    COLUMN_DRAG_TYPE, ColumnHeader, ColumnSort, DragColumn, HeaderDelegate, PinAction,
    PinMenuItem,
};
pub use pagination::{DEFAULT_PAGE_SIZES, PaginationState};
pub use search::SearchDebouncer;
pub use source::RowSource;
pub use view::{EMPTY_MESSAGE, PagerView, RETRY_LABEL, RowView, TableBody, TableView};
