//! Draggable column header controller
//!
//! A [`ColumnHeader`] is a snapshot of one column's header affordances: the
//! sort cycle, the pin menu, hiding, and drag-and-drop reordering. It never
//! changes table state itself; every effect is delegated to a
//! [`HeaderDelegate`], normally the owning [`TableController`].
//!
//! [`TableController`]: crate::TableController

use tavola_core::{SortDescriptor, SortDirection};

use crate::column_layout::PinSide;

/// Drag-and-drop type shared by all column headers
pub const COLUMN_DRAG_TYPE: &str = "column";

/// Payload carried while a column header is dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragColumn {
    /// Table the drag started in; drops on other tables are ignored
    pub table_id: String,
    pub column_id: String,
}

/// Receiver of header actions
pub trait HeaderDelegate {
    /// Move `dragged` to `target`'s position
    fn reorder_column(&mut self, dragged: &str, target: &str);

    fn pin_column(&mut self, column: &str, side: Option<PinSide>);

    fn set_column_visible(&mut self, column: &str, visible: bool);

    /// Replace the table's sort; `None` clears it
    fn set_sort(&mut self, sort: Option<SortDescriptor>);
}

/// Sort state of one column as seen from its header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSort {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl ColumnSort {
    /// This column's state given the table's single sort descriptor
    pub fn of(field: &str, current: Option<&SortDescriptor>) -> Self {
        match current {
            Some(sort) if sort.is_on(field) => match sort.direction() {
                SortDirection::Ascending => Self::Ascending,
                SortDirection::Descending => Self::Descending,
            },
            _ => Self::Unsorted,
        }
    }

    /// unsorted -> ascending -> descending -> unsorted
    pub fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    pub fn descriptor(self, field: &str) -> Option<SortDescriptor> {
        match self {
            Self::Unsorted => None,
            Self::Ascending => Some(SortDescriptor::ascending(field)),
            Self::Descending => Some(SortDescriptor::descending(field)),
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            Self::Unsorted => "",
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Entries of the header's pin menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinAction {
    PinLeft,
    PinRight,
    Unpin,
}

impl PinAction {
    pub fn side(self) -> Option<PinSide> {
        match self {
            Self::PinLeft => Some(PinSide::Left),
            Self::PinRight => Some(PinSide::Right),
            Self::Unpin => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PinLeft => "Pin left",
            Self::PinRight => "Pin right",
            Self::Unpin => "Unpin",
        }
    }

    pub fn all() -> &'static [PinAction] {
        &[Self::PinLeft, Self::PinRight, Self::Unpin]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMenuItem {
    pub action: PinAction,
    pub label: &'static str,
    /// Set when choosing the item would not change anything
    pub disabled: bool,
}

/// Header affordances of one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub table_id: String,
    pub column_id: String,
    pub label: String,
    pub sortable: bool,
    pub pinnable: bool,
    pub hideable: bool,
    pub movable: bool,
    pub sort: ColumnSort,
    pub pinned: Option<PinSide>,
}

impl ColumnHeader {
    /// Advance the sort cycle. Returns the column's new sort state, or `None`
    /// when the column is not sortable.
    pub fn on_sort_click<D: HeaderDelegate + ?Sized>(&self, delegate: &mut D) -> Option<ColumnSort> {
        if !self.sortable {
            return None;
        }
        let next = self.sort.next();
        delegate.set_sort(next.descriptor(&self.column_id));
        Some(next)
    }

    pub fn pin_menu(&self) -> Vec<PinMenuItem> {
        if !self.pinnable {
            return Vec::new();
        }
        PinAction::all()
            .iter()
            .map(|&action| PinMenuItem {
                action,
                label: action.label(),
                disabled: action.side() == self.pinned,
            })
            .collect()
    }

    /// Apply a pin menu choice; disabled choices do nothing
    pub fn on_pin<D: HeaderDelegate + ?Sized>(&self, action: PinAction, delegate: &mut D) -> bool {
        if !self.pinnable || action.side() == self.pinned {
            return false;
        }
        delegate.pin_column(&self.column_id, action.side());
        true
    }

    pub fn on_hide<D: HeaderDelegate + ?Sized>(&self, delegate: &mut D) -> bool {
        if !self.hideable {
            return false;
        }
        delegate.set_column_visible(&self.column_id, false);
        true
    }

    /// Payload to start dragging this header, if it can be moved
    pub fn drag_payload(&self) -> Option<DragColumn> {
        self.movable.then(|| DragColumn {
            table_id: self.table_id.clone(),
            column_id: self.column_id.clone(),
        })
    }

    pub fn accepts_drop(&self, drag: &DragColumn) -> bool {
        self.movable && drag.table_id == self.table_id && drag.column_id != self.column_id
    }

    /// Handle a header dropped onto this one
    pub fn on_drop<D: HeaderDelegate + ?Sized>(&self, drag: &DragColumn, delegate: &mut D) -> bool {
        if !self.accepts_drop(drag) {
            return false;
        }
        delegate.reorder_column(&drag.column_id, &self.column_id);
        true
    }
}
