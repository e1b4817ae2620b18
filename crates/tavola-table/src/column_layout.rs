//! Per-table column layout: order, visibility and pinning
//!
//! The layout belongs to exactly one table instance. `table_id` namespaces it so
//! a snapshot taken from one table is never applied to another.

use serde::{Deserialize, Serialize};

/// Side a column is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSide {
    Left,
    Right,
}

/// UI state of a single column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnUiState {
    pub id: String,
    pub visible: bool,
    pub pinned: Option<PinSide>,
    /// Position among all columns, pinned or not
    pub order: usize,
}

impl ColumnUiState {
    pub fn new(id: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            visible: true,
            pinned: None,
            order,
        }
    }

    fn pin_rank(&self) -> u8 {
        match self.pinned {
            Some(PinSide::Left) => 0,
            None => 1,
            Some(PinSide::Right) => 2,
        }
    }
}

/// Serializable copy of a table's column layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayoutSnapshot {
    pub table_id: String,
    pub columns: Vec<ColumnUiState>,
}

/// Column order, visibility and pinning for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    table_id: String,
    /// Kept sorted by `order`
    columns: Vec<ColumnUiState>,
}

impl ColumnLayout {
    pub fn new<I, S>(table_id: impl Into<String>, column_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = column_ids
            .into_iter()
            .enumerate()
            .map(|(order, id)| ColumnUiState::new(id, order))
            .collect();

        Self {
            table_id: table_id.into(),
            columns,
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Columns in their current order, hidden ones included
    pub fn columns(&self) -> &[ColumnUiState] {
        &self.columns
    }

    pub fn get(&self, id: &str) -> Option<&ColumnUiState> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    fn renumber(&mut self) {
        for (order, column) in self.columns.iter_mut().enumerate() {
            column.order = order;
        }
    }

    /// Move `dragged` to the position currently held by `target`
    pub fn move_column(&mut self, dragged: &str, target: &str) -> bool {
        if dragged == target {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(dragged), self.position(target)) else {
            return false;
        };

        let column = self.columns.remove(from);
        self.columns.insert(to, column);
        self.renumber();
        true
    }

    /// Pin or unpin a column. Returns false when nothing changed.
    pub fn pin(&mut self, id: &str, side: Option<PinSide>) -> bool {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(column) if column.pinned != side => {
                column.pinned = side;
                true
            }
            _ => false,
        }
    }

    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.columns.iter_mut().find(|c| c.id == id) {
            Some(column) if column.visible != visible => {
                column.visible = visible;
                true
            }
            _ => false,
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|c| c.visible)
    }

    /// Make every column visible; returns how many were hidden
    pub fn show_all(&mut self) -> usize {
        let mut shown = 0;
        for column in self.columns.iter_mut().filter(|c| !c.visible) {
            column.visible = true;
            shown += 1;
        }
        shown
    }

    pub fn visible_count(&self) -> usize {
        self.columns.iter().filter(|c| c.visible).count()
    }

    pub fn hidden_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.visible)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Visible columns as they are laid out on screen: left-pinned, then
    /// unpinned, then right-pinned, each group by order
    pub fn display_order(&self) -> Vec<&ColumnUiState> {
        let mut visible: Vec<&ColumnUiState> = self.columns.iter().filter(|c| c.visible).collect();
        visible.sort_by_key(|c| (c.pin_rank(), c.order));
        visible
    }

    pub fn snapshot(&self) -> ColumnLayoutSnapshot {
        ColumnLayoutSnapshot {
            table_id: self.table_id.clone(),
            columns: self.columns.clone(),
        }
    }

    /// Apply a snapshot taken from this table.
    ///
    /// Columns the snapshot does not know about keep their relative order after
    /// the restored ones; snapshot entries for unknown columns are dropped.
    pub fn restore(&mut self, snapshot: &ColumnLayoutSnapshot) -> bool {
        if snapshot.table_id != self.table_id {
            tracing::warn!(
                table_id = %self.table_id,
                snapshot_table_id = %snapshot.table_id,
                "Ignoring column layout snapshot from another table"
            );
            return false;
        }

        let mut saved: Vec<&ColumnUiState> = snapshot.columns.iter().collect();
        saved.sort_by_key(|c| c.order);

        let mut restored = Vec::with_capacity(self.columns.len());
        for state in saved {
            if let Some(ix) = self.position(&state.id) {
                let mut column = self.columns.remove(ix);
                column.visible = state.visible;
                column.pinned = state.pinned;
                restored.push(column);
            }
        }
        restored.append(&mut self.columns);
        self.columns = restored;
        self.renumber();
        true
    }
}
