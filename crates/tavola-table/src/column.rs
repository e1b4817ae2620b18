//! Column model
//!
//! A [`ColumnDescriptor`] declares one tabular field: its accessor key, header,
//! optional cell renderer and which header affordances it supports. The set of
//! descriptors is fixed when the table is built.

use std::fmt;
use std::sync::Arc;

use tavola_core::CellValue;

use crate::column_layout::PinSide;

/// A row that can be shown in a table
pub trait TableRow {
    /// Read the value behind an accessor key. Unknown keys yield [`CellValue::Null`].
    fn cell(&self, accessor_key: &str) -> CellValue;

    /// Stable identity of the row, used as the rendered row key
    fn row_key(&self) -> String;
}

/// Custom cell rendering for a column
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Column header content
#[derive(Clone)]
pub enum HeaderLabel {
    Text(String),
    Custom(Arc<dyn Fn() -> String + Send + Sync>),
}

impl HeaderLabel {
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Custom(render) => render(),
        }
    }
}

impl fmt::Debug for HeaderLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for HeaderLabel {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for HeaderLabel {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Declarative description of a table column
pub struct ColumnDescriptor<T> {
    /// Accessor key; also the sort field and the column's identity
    pub id: String,
    pub header: HeaderLabel,
    pub cell: Option<CellRenderer<T>>,
    pub sortable: bool,
    pub pinnable: bool,
    pub hideable: bool,
    pub movable: bool,
    /// Side the column starts pinned to
    pub pinned: Option<PinSide>,
}

impl<T> ColumnDescriptor<T> {
    /// A sortable, pinnable, hideable, movable column
    pub fn new(id: impl Into<String>, header: impl Into<HeaderLabel>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            cell: None,
            sortable: true,
            pinnable: true,
            hideable: true,
            movable: true,
            pinned: None,
        }
    }

    /// Set a custom header renderer
    pub fn header_with(mut self, render: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.header = HeaderLabel::Custom(Arc::new(render));
        self
    }

    /// Set a custom cell renderer
    pub fn cell(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.cell = Some(Arc::new(render));
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn pinnable(mut self, pinnable: bool) -> Self {
        self.pinnable = pinnable;
        self
    }

    pub fn hideable(mut self, hideable: bool) -> Self {
        self.hideable = hideable;
        self
    }

    pub fn movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn pinned(mut self, side: PinSide) -> Self {
        self.pinned = Some(side);
        self
    }

    pub fn header_text(&self) -> String {
        self.header.render()
    }
}

impl<T: TableRow> ColumnDescriptor<T> {
    pub fn render_cell(&self, row: &T) -> String {
        match &self.cell {
            Some(render) => render(row),
            None => row.cell(&self.id).to_string(),
        }
    }
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            cell: self.cell.clone(),
            sortable: self.sortable,
            pinnable: self.pinnable,
            hideable: self.hideable,
            movable: self.movable,
            pinned: self.pinned,
        }
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("custom_cell", &self.cell.is_some())
            .field("sortable", &self.sortable)
            .field("pinnable", &self.pinnable)
            .field("hideable", &self.hideable)
            .field("movable", &self.movable)
            .field("pinned", &self.pinned)
            .finish()
    }
}
