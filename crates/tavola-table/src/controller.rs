//! Table orchestrator
//!
//! Owns the four query axes of one list page (pagination, sort, filters,
//! keyword) plus page-specific parameters and the column layout. The axes are
//! folded into a memoized [`ListRequest`] whose revision only moves when a
//! value actually changes. Fetching is ticketed: only the response to the most
//! recently issued ticket is applied.

use std::collections::BTreeMap;

use tavola_core::{FilterCondition, ListRequest, Page, SortDescriptor};

use crate::column::{ColumnDescriptor, TableRow};
use crate::column_layout::{ColumnLayout, ColumnLayoutSnapshot, PinSide};
use crate::error::{FetchError, TableError};
use crate::events::TableEvent;
use crate::filter_registry::FilterRegistry;
use crate::header::{ColumnHeader, ColumnSort, HeaderDelegate};
use crate::pagination::{DEFAULT_PAGE_SIZES, PaginationState};
use crate::source::RowSource;
use crate::view::{EMPTY_MESSAGE, PagerView, RETRY_LABEL, RowView, TableBody, TableView};

/// Handle for one in-flight fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub id: u64,
    /// Request revision the ticket was issued for
    pub revision: u64,
    pub request: ListRequest,
}

/// Outcome of the latest fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet
    Idle,
    /// A fetch is in flight; `previous` is the last loaded page, if any
    Loading { previous: Option<Page<T>> },
    Loaded(Page<T>),
    Failed(FetchError),
}

/// Builder for [`TableController`]
pub struct TableBuilder<T> {
    table_id: String,
    resource: String,
    columns: Vec<ColumnDescriptor<T>>,
    filters: FilterRegistry,
    page_size: usize,
    available_page_sizes: Vec<usize>,
    reset_page_on_size_change: bool,
    skeleton_rows: usize,
    sort: Option<SortDescriptor>,
    params: BTreeMap<String, String>,
}

impl<T> TableBuilder<T> {
    fn new(table_id: String, resource: String) -> Self {
        Self {
            table_id,
            resource,
            columns: Vec::new(),
            filters: FilterRegistry::empty(),
            page_size: DEFAULT_PAGE_SIZES[0],
            available_page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            reset_page_on_size_change: true,
            skeleton_rows: 5,
            sort: None,
            params: BTreeMap::new(),
        }
    }

    pub fn column(mut self, column: ColumnDescriptor<T>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnDescriptor<T>>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn available_page_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        self.available_page_sizes = sizes.into();
        self
    }

    /// Whether a page size change jumps back to the first page (default true)
    pub fn reset_page_on_size_change(mut self, reset: bool) -> Self {
        self.reset_page_on_size_change = reset;
        self
    }

    pub fn skeleton_rows(mut self, rows: usize) -> Self {
        self.skeleton_rows = rows;
        self
    }

    pub fn initial_sort(mut self, sort: SortDescriptor) -> Self {
        self.sort = Some(sort);
        self
    }

    /// A page-specific request parameter, e.g. the branch a list is scoped to
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<TableController<T>, TableError> {
        if self.columns.is_empty() {
            return Err(TableError::NoColumns(self.table_id));
        }
        if self.page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }
        for (ix, column) in self.columns.iter().enumerate() {
            if self.columns[..ix].iter().any(|c| c.id == column.id) {
                return Err(TableError::DuplicateColumn(column.id.clone()));
            }
        }

        let mut layout = ColumnLayout::new(&self.table_id, self.columns.iter().map(|c| &c.id));
        for column in &self.columns {
            if column.pinned.is_some() {
                layout.pin(&column.id, column.pinned);
            }
        }

        let pagination = PaginationState::new(self.page_size)
            .with_available_page_sizes(self.available_page_sizes);

        let mut controller = TableController {
            table_id: self.table_id,
            resource: self.resource,
            columns: self.columns,
            layout,
            registry: self.filters,
            pagination,
            sort: None,
            filters: Vec::new(),
            keyword: None,
            params: self.params,
            reset_page_on_size_change: self.reset_page_on_size_change,
            skeleton_rows: self.skeleton_rows,
            request: ListRequest::new(0, self.page_size),
            revision: 0,
            issued: 0,
            load_state: LoadState::Idle,
            events: Vec::new(),
        };

        if let Some(sort) = self.sort {
            controller.check_sortable(&sort)?;
            controller.sort = Some(sort);
        }
        controller.request = controller.build_request();

        tracing::debug!(
            table_id = %controller.table_id,
            resource = %controller.resource,
            columns = controller.columns.len(),
            "Table controller created"
        );

        Ok(controller)
    }
}

/// Coordinates pagination, sort, filter and search state for one table
pub struct TableController<T> {
    table_id: String,
    resource: String,
    columns: Vec<ColumnDescriptor<T>>,
    layout: ColumnLayout,
    registry: FilterRegistry,
    pagination: PaginationState,
    sort: Option<SortDescriptor>,
    filters: Vec<FilterCondition>,
    keyword: Option<String>,
    params: BTreeMap<String, String>,
    reset_page_on_size_change: bool,
    skeleton_rows: usize,
    request: ListRequest,
    revision: u64,
    issued: u64,
    load_state: LoadState<T>,
    events: Vec<TableEvent>,
}

impl<T> TableController<T> {
    pub fn builder(table_id: impl Into<String>, resource: impl Into<String>) -> TableBuilder<T> {
        TableBuilder::new(table_id.into(), resource.into())
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    /// Resource path of the list endpoint; also the query invalidation key
    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn columns(&self) -> &[ColumnDescriptor<T>] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDescriptor<T>> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    pub fn filter_registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn sort(&self) -> Option<&SortDescriptor> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &[FilterCondition] {
        &self.filters
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The request for the current state
    pub fn request(&self) -> &ListRequest {
        &self.request
    }

    /// Bumped every time the request changes
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load_state(&self) -> &LoadState<T> {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load_state, LoadState::Loading { .. })
    }

    pub fn error(&self) -> Option<&FetchError> {
        match &self.load_state {
            LoadState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// The loaded page, or the previous one while a refetch is in flight
    pub fn page(&self) -> Option<&Page<T>> {
        match &self.load_state {
            LoadState::Loaded(page) => Some(page),
            LoadState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    fn build_request(&self) -> ListRequest {
        ListRequest {
            page: self.pagination.page_index(),
            size: self.pagination.page_size(),
            sort_by: self.sort.clone(),
            filters: self.filters.clone(),
            keyword: self.keyword.clone(),
            extra: self.params.clone(),
        }
    }

    fn sync_request(&mut self) {
        let request = self.build_request();
        if request == self.request {
            return;
        }
        self.request = request;
        self.revision += 1;
        tracing::debug!(
            table_id = %self.table_id,
            revision = self.revision,
            page = self.request.page,
            size = self.request.size,
            "List request changed"
        );
        self.events.push(TableEvent::RequestChanged {
            revision: self.revision,
        });
    }

    fn navigate(&mut self, step: impl FnOnce(&mut PaginationState) -> bool) -> bool {
        if !step(&mut self.pagination) {
            return false;
        }
        self.events.push(TableEvent::PageChanged {
            page_index: self.pagination.page_index(),
        });
        self.sync_request();
        true
    }

    pub fn set_page_index(&mut self, page_index: usize) -> bool {
        self.navigate(|p| p.go_to(page_index))
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(PaginationState::go_next)
    }

    pub fn prev_page(&mut self) -> bool {
        self.navigate(PaginationState::go_prev)
    }

    pub fn first_page(&mut self) -> bool {
        self.navigate(PaginationState::go_first)
    }

    pub fn last_page(&mut self) -> bool {
        self.navigate(PaginationState::go_last)
    }

    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if !self
            .pagination
            .set_page_size(page_size, self.reset_page_on_size_change)
        {
            return false;
        }
        self.events.push(TableEvent::PageSizeChanged { page_size });
        self.sync_request();
        true
    }

    /// Reset pagination because the result set is about to change
    fn reset_page(&mut self) {
        if self.pagination.reset() {
            self.events.push(TableEvent::PageChanged { page_index: 0 });
        }
    }

    fn check_sortable(&self, sort: &SortDescriptor) -> Result<(), TableError> {
        let column = self
            .column(sort.field())
            .ok_or_else(|| TableError::UnknownColumn(sort.field().to_string()))?;
        if !column.sortable {
            return Err(TableError::NotSortable(column.id.clone()));
        }
        Ok(())
    }

    /// Replace the single active sort. Setting a sort on one column clears any
    /// other column's sort.
    pub fn apply_sort(&mut self, sort: Option<SortDescriptor>) -> Result<bool, TableError> {
        if let Some(sort) = &sort {
            self.check_sortable(sort)?;
        }
        if sort == self.sort {
            return Ok(false);
        }
        self.sort = sort;
        self.events.push(TableEvent::SortChanged(self.sort.clone()));
        self.sync_request();
        Ok(true)
    }

    /// Advance a column's sort cycle as its header would
    pub fn toggle_sort(&mut self, column_id: &str) -> Result<Option<SortDescriptor>, TableError> {
        let header = self
            .header(column_id)
            .ok_or_else(|| TableError::UnknownColumn(column_id.to_string()))?;
        if !header.sortable {
            return Err(TableError::NotSortable(column_id.to_string()));
        }
        self.apply_sort(header.sort.next().descriptor(column_id))?;
        Ok(self.sort.clone())
    }

    /// Replace the whole filter set. Every condition is validated first; on
    /// any rejection the current set is kept.
    pub fn set_filters(&mut self, filters: Vec<FilterCondition>) -> Result<bool, TableError> {
        self.registry.validate_all(&filters)?;
        if same_conditions(&filters, &self.filters) {
            return Ok(false);
        }
        self.filters = filters;
        tracing::debug!(
            table_id = %self.table_id,
            count = self.filters.len(),
            "Filter set replaced"
        );
        self.events.push(TableEvent::FiltersChanged {
            count: self.filters.len(),
        });
        self.reset_page();
        self.sync_request();
        Ok(true)
    }

    pub fn add_filter(&mut self, condition: FilterCondition) -> Result<bool, TableError> {
        let mut filters = self.filters.clone();
        filters.push(condition);
        self.set_filters(filters)
    }

    /// Drop every condition on `field`
    pub fn remove_filter(&mut self, field: &str) -> bool {
        if !self.filters.iter().any(|c| c.field == field) {
            return false;
        }
        let filters = self
            .filters
            .iter()
            .filter(|c| c.field != field)
            .cloned()
            .collect();
        // Remaining conditions were validated when added.
        self.set_filters(filters).unwrap_or(false)
    }

    pub fn clear_filters(&mut self) -> bool {
        self.set_filters(Vec::new()).unwrap_or(false)
    }

    /// Set the free-text search keyword; blank clears it
    pub fn set_keyword(&mut self, keyword: &str) -> bool {
        let keyword = Some(keyword.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        if keyword == self.keyword {
            return false;
        }
        self.keyword = keyword;
        self.events
            .push(TableEvent::KeywordChanged(self.keyword.clone()));
        self.reset_page();
        self.sync_request();
        true
    }

    /// Set or remove a page-specific request parameter
    pub fn set_param(&mut self, key: &str, value: Option<String>) -> bool {
        let changed = match value {
            Some(value) => self.params.insert(key.to_string(), value.clone()) != Some(value),
            None => self.params.remove(key).is_some(),
        };
        if !changed {
            return false;
        }
        self.reset_page();
        self.sync_request();
        true
    }

    /// Header affordances of one column
    pub fn header(&self, column_id: &str) -> Option<ColumnHeader> {
        let column = self.column(column_id)?;
        let state = self.layout.get(column_id)?;
        Some(ColumnHeader {
            table_id: self.table_id.clone(),
            column_id: column.id.clone(),
            label: column.header_text(),
            sortable: column.sortable,
            pinnable: column.pinnable,
            hideable: column.hideable,
            movable: column.movable,
            sort: ColumnSort::of(&column.id, self.sort.as_ref()),
            pinned: state.pinned,
        })
    }

    /// Headers of the visible columns in screen order
    pub fn headers(&self) -> Vec<ColumnHeader> {
        self.layout
            .display_order()
            .into_iter()
            .filter_map(|state| self.header(&state.id))
            .collect()
    }

    pub fn move_column(&mut self, dragged: &str, target: &str) -> bool {
        if !self.layout.move_column(dragged, target) {
            return false;
        }
        self.events.push(TableEvent::ColumnMoved {
            column: dragged.to_string(),
            target: target.to_string(),
        });
        true
    }

    pub fn set_pinned(&mut self, column: &str, side: Option<PinSide>) -> bool {
        if !self.column(column).is_some_and(|c| c.pinnable) || !self.layout.pin(column, side) {
            return false;
        }
        self.events.push(TableEvent::ColumnPinned {
            column: column.to_string(),
            side,
        });
        true
    }

    pub fn set_visible(&mut self, column: &str, visible: bool) -> bool {
        if !visible && !self.column(column).is_some_and(|c| c.hideable) {
            return false;
        }
        if !self.layout.set_visible(column, visible) {
            return false;
        }
        self.events.push(TableEvent::ColumnVisibilityChanged {
            column: column.to_string(),
            visible,
        });
        true
    }

    pub fn show_all_columns(&mut self) -> usize {
        let hidden = self.layout.hidden_columns();
        let shown = self.layout.show_all();
        for column in hidden {
            self.events.push(TableEvent::ColumnVisibilityChanged {
                column,
                visible: true,
            });
        }
        shown
    }

    pub fn layout_snapshot(&self) -> ColumnLayoutSnapshot {
        self.layout.snapshot()
    }

    /// Apply a saved layout. Column rules win over the snapshot: fixed
    /// columns stay visible and unpinnable columns keep their declared pin.
    pub fn restore_layout(&mut self, snapshot: &ColumnLayoutSnapshot) -> bool {
        if !self.layout.restore(snapshot) {
            return false;
        }
        for column in &self.columns {
            if !column.hideable {
                self.layout.set_visible(&column.id, true);
            }
            if !column.pinnable {
                self.layout.pin(&column.id, column.pinned);
            }
        }
        true
    }

    /// Issue a ticket for the current request and enter the loading state
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        let previous = match std::mem::replace(&mut self.load_state, LoadState::Idle) {
            LoadState::Loaded(page) => Some(page),
            LoadState::Loading { previous } => previous,
            LoadState::Idle | LoadState::Failed(_) => None,
        };
        self.load_state = LoadState::Loading { previous };
        self.events.push(TableEvent::FetchStarted { ticket: self.issued });

        FetchTicket {
            id: self.issued,
            revision: self.revision,
            request: self.request.clone(),
        }
    }

    /// Apply the outcome of a fetch. Outcomes for superseded tickets are
    /// discarded and `false` is returned.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Page<T>, FetchError>,
    ) -> bool {
        if ticket.id != self.issued {
            tracing::warn!(
                table_id = %self.table_id,
                ticket = ticket.id,
                latest = self.issued,
                "Discarding stale list response"
            );
            self.events
                .push(TableEvent::StaleResponseDiscarded { ticket: ticket.id });
            return false;
        }

        match result {
            Ok(page) => {
                tracing::info!(
                    table_id = %self.table_id,
                    rows = page.len(),
                    total = page.total,
                    page = page.page_index,
                    "List page loaded"
                );
                self.pagination.set_total(Some(page.total));
                self.events.push(TableEvent::FetchSucceeded {
                    ticket: ticket.id,
                    rows: page.len(),
                    total: page.total,
                });
                self.load_state = LoadState::Loaded(page);

                // The result set shrank under the current page (e.g. after a delete).
                let past_end = self
                    .pagination
                    .page_count()
                    .is_some_and(|count| self.pagination.page_index() >= count);
                if past_end && self.navigate(PaginationState::go_last) {
                    tracing::debug!(
                        table_id = %self.table_id,
                        page_index = self.pagination.page_index(),
                        "Moved back to the last page"
                    );
                }
            }
            Err(error) => {
                tracing::warn!(
                    table_id = %self.table_id,
                    status = ?error.status,
                    "List fetch failed: {}",
                    error
                );
                self.events.push(TableEvent::FetchFailed {
                    ticket: ticket.id,
                    message: error.display_message().to_string(),
                });
                self.load_state = LoadState::Failed(error);
            }
        }
        true
    }

    fn pager(&self, rows_on_page: usize) -> PagerView {
        PagerView {
            page_index: self.pagination.page_index(),
            page_count: self.pagination.page_count(),
            page_size: self.pagination.page_size(),
            total: self.pagination.total(),
            can_go_prev: self.pagination.can_go_prev(),
            can_go_next: self.pagination.can_go_next(),
            available_page_sizes: self.pagination.available_page_sizes().to_vec(),
            summary: self.pagination.range_label(rows_on_page),
        }
    }
}

impl<T: Send> TableController<T> {
    /// Fetch the current request from `source` and apply the outcome
    pub async fn refresh<S>(&mut self, source: &S) -> bool
    where
        S: RowSource<T> + ?Sized,
    {
        let ticket = self.begin_fetch();
        let result = source.fetch(&ticket.request).await;
        self.complete_fetch(&ticket, result)
    }
}

impl<T: TableRow> TableController<T> {
    pub fn view(&self) -> TableView {
        let headers = self.headers();
        let body = match &self.load_state {
            LoadState::Idle | LoadState::Loading { previous: None } => TableBody::Loading {
                skeleton_rows: self.skeleton_rows,
            },
            LoadState::Loading {
                previous: Some(page),
            } => self.rows_body(page, &headers, true),
            LoadState::Loaded(page) => self.rows_body(page, &headers, false),
            LoadState::Failed(error) => TableBody::Error {
                message: error.display_message().to_string(),
                retry_label: RETRY_LABEL,
            },
        };

        TableView {
            table_id: self.table_id.clone(),
            headers,
            body,
        }
    }

    fn rows_body(&self, page: &Page<T>, headers: &[ColumnHeader], refreshing: bool) -> TableBody {
        if page.is_empty() {
            return TableBody::Empty {
                message: EMPTY_MESSAGE,
            };
        }

        let columns: Vec<&ColumnDescriptor<T>> = headers
            .iter()
            .filter_map(|h| self.column(&h.column_id))
            .collect();
        let rows = page
            .rows
            .iter()
            .map(|row| RowView {
                key: row.row_key(),
                cells: columns.iter().map(|c| c.render_cell(row)).collect(),
            })
            .collect();

        TableBody::Rows {
            rows,
            pager: self.pager(page.len()),
            refreshing,
        }
    }
}

impl<T> HeaderDelegate for TableController<T> {
    fn reorder_column(&mut self, dragged: &str, target: &str) {
        self.move_column(dragged, target);
    }

    fn pin_column(&mut self, column: &str, side: Option<PinSide>) {
        self.set_pinned(column, side);
    }

    fn set_column_visible(&mut self, column: &str, visible: bool) {
        self.set_visible(column, visible);
    }

    fn set_sort(&mut self, sort: Option<SortDescriptor>) {
        if let Err(err) = self.apply_sort(sort) {
            tracing::warn!(table_id = %self.table_id, "Sort rejected: {}", err);
        }
    }
}

/// Filter sets are AND-combined, so order does not matter
fn same_conditions(a: &[FilterCondition], b: &[FilterCondition]) -> bool {
    a.len() == b.len() && a.iter().all(|c| b.contains(c)) && b.iter().all(|c| a.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_layout::ColumnUiState;
    use crate::error::FilterError;
    use crate::header::DragColumn;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tavola_core::CellValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Dish {
        id: i64,
        name: String,
        category: String,
        price: f64,
    }

    impl TableRow for Dish {
        fn cell(&self, accessor_key: &str) -> CellValue {
            match accessor_key {
                "id" => self.id.into(),
                "name" => self.name.as_str().into(),
                "category" => self.category.as_str().into(),
                "price" => self.price.into(),
                _ => CellValue::Null,
            }
        }

        fn row_key(&self) -> String {
            self.id.to_string()
        }
    }

    fn dish(id: i64, name: &str) -> Dish {
        Dish {
            id,
            name: name.to_string(),
            category: "MAIN".to_string(),
            price: 12.0,
        }
    }

    fn builder() -> TableBuilder<Dish> {
        TableController::builder("menu-items", "menu-items")
            .column(
                ColumnDescriptor::new("id", "ID")
                    .sortable(false)
                    .pinnable(false)
                    .hideable(false)
                    .movable(false)
                    .pinned(PinSide::Left),
            )
            .column(ColumnDescriptor::new("name", "Name"))
            .column(ColumnDescriptor::new("category", "Category"))
            .column(ColumnDescriptor::new("price", "Price").cell(|d: &Dish| format!("${:.2}", d.price)))
            .filters(
                FilterRegistry::builder()
                    .enumeration("category", "Category", [("MAIN", "Main"), ("DESSERT", "Dessert")])
                    .text("name", "Name")
                    .build(),
            )
            .page_size(10)
    }

    fn table() -> TableController<Dish> {
        builder().build().unwrap()
    }

    fn sorted_columns(table: &TableController<Dish>) -> usize {
        table
            .headers()
            .iter()
            .filter(|h| h.sort != ColumnSort::Unsorted)
            .count()
    }

    #[test]
    fn test_build_rejects_bad_configuration() {
        let empty = TableController::<Dish>::builder("t", "t").build();
        assert!(matches!(empty, Err(TableError::NoColumns(_))));

        let duplicate = builder().column(ColumnDescriptor::new("name", "Again")).build();
        assert!(matches!(duplicate, Err(TableError::DuplicateColumn(id)) if id == "name"));

        assert!(matches!(
            builder().page_size(0).build(),
            Err(TableError::InvalidPageSize)
        ));
        assert!(matches!(
            builder().initial_sort(SortDescriptor::ascending("id")).build(),
            Err(TableError::NotSortable(_))
        ));
    }

    #[test]
    fn test_scenario_third_page_then_sort_other_column() {
        let mut table = builder()
            .initial_sort(SortDescriptor::ascending("name"))
            .build()
            .unwrap();
        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(1, "Pho")], 25, 0)));

        assert!(table.set_page_index(2));
        let request = table.request();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 10);
        assert_eq!(request.offset(), 20);
        assert_eq!(request.sort_by.as_ref().unwrap().to_string(), "name:asc");

        let sort = table.toggle_sort("category").unwrap();
        assert_eq!(sort.unwrap().to_string(), "category:asc");
        assert_eq!(table.header("name").unwrap().sort, ColumnSort::Unsorted);
        assert_eq!(sorted_columns(&table), 1);
    }

    #[test]
    fn test_sort_cycle_through_headers() {
        let mut table = table();
        for expected in ["price:asc", "price:desc"] {
            let header = table.header("price").unwrap();
            header.on_sort_click(&mut table);
            assert_eq!(table.sort().unwrap().to_string(), expected);
            assert!(sorted_columns(&table) <= 1);
        }
        let header = table.header("price").unwrap();
        header.on_sort_click(&mut table);
        assert_eq!(table.sort(), None);
        assert_eq!(sorted_columns(&table), 0);
    }

    #[test]
    fn test_unsortable_column() {
        let mut table = table();
        assert_eq!(
            table.toggle_sort("id"),
            Err(TableError::NotSortable("id".into()))
        );
        assert_eq!(
            table.apply_sort(Some(SortDescriptor::ascending("calories"))),
            Err(TableError::UnknownColumn("calories".into()))
        );
        assert_eq!(table.sort(), None);
    }

    #[test]
    fn test_keyword_resets_page() {
        let mut table = table();
        table.set_page_index(3);
        assert_eq!(table.request().page, 3);

        assert!(table.set_keyword("  noodles "));
        assert_eq!(table.keyword(), Some("noodles"));
        assert_eq!(table.request().page, 0);
        assert_eq!(table.request().keyword.as_deref(), Some("noodles"));

        assert!(!table.set_keyword("noodles"));
        assert!(table.set_keyword(""));
        assert_eq!(table.request().keyword, None);
    }

    #[test]
    fn test_filters_reset_page_and_validate() {
        let mut table = table();
        table.set_page_index(4);

        assert_eq!(
            table.set_filters(vec![FilterCondition::enumeration("category", "MAIN")]),
            Ok(true)
        );
        assert_eq!(table.pagination().page_index(), 0);
        assert_eq!(table.request().filters.len(), 1);

        table.set_page_index(2);
        let rejected = table.set_filters(vec![FilterCondition::enumeration("category", "SOUP")]);
        assert!(matches!(
            rejected,
            Err(TableError::Filter(FilterError::UnknownOption { .. }))
        ));
        assert_eq!(table.pagination().page_index(), 2);
        assert_eq!(table.filters().len(), 1);
    }

    #[test]
    fn test_filter_set_is_unordered() {
        let mut table = table();
        let a = FilterCondition::enumeration("category", "MAIN");
        let b = FilterCondition::text("name", "pho");
        assert_eq!(table.set_filters(vec![a.clone(), b.clone()]), Ok(true));
        let revision = table.revision();

        assert_eq!(table.set_filters(vec![b, a]), Ok(false));
        assert_eq!(table.revision(), revision);

        assert!(table.remove_filter("name"));
        assert_eq!(table.filters().len(), 1);
        assert!(!table.remove_filter("name"));
        assert!(table.clear_filters());
        assert!(table.filters().is_empty());
    }

    #[test]
    fn test_page_size_change_resets_by_default() {
        let mut table = table();
        table.set_page_index(3);
        assert!(table.set_page_size(20));
        assert_eq!(table.request().page, 0);
        assert_eq!(table.request().size, 20);
    }

    #[test]
    fn test_page_size_change_can_preserve_page() {
        let mut table = builder().reset_page_on_size_change(false).build().unwrap();
        table.set_page_index(3);
        assert!(table.set_page_size(20));
        assert_eq!(table.request().page, 3);
    }

    #[test]
    fn test_request_is_memoized() {
        let mut table = table();
        let revision = table.revision();

        assert!(!table.set_page_index(0));
        assert!(!table.set_keyword(""));
        assert_eq!(table.apply_sort(None), Ok(false));
        assert!(!table.set_param("branchId", None));
        assert_eq!(table.revision(), revision);

        assert!(table.set_param("branchId", Some("3".into())));
        assert_eq!(table.revision(), revision + 1);
        assert!(!table.set_param("branchId", Some("3".into())));
        assert_eq!(table.request().extra.get("branchId").map(String::as_str), Some("3"));
    }

    #[test]
    fn test_error_then_successful_retry() {
        let mut table = table();

        let ticket = table.begin_fetch();
        assert!(table.view().body.is_loading());
        table.complete_fetch(&ticket, Err(FetchError::new("Menu service unavailable")));

        let view = table.view();
        assert_eq!(
            view.body,
            TableBody::Error {
                message: "Menu service unavailable".into(),
                retry_label: RETRY_LABEL,
            }
        );
        assert!(view.body.rows().is_none());

        let ticket = table.begin_fetch();
        assert!(table.view().body.is_loading());
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(1, "Pho")], 1, 0)));

        let view = table.view();
        assert!(!view.body.is_error());
        assert_eq!(view.body.rows().unwrap().len(), 1);
        assert_eq!(table.error(), None);
    }

    #[test]
    fn test_error_without_message_uses_fallback() {
        let mut table = table();
        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Err(FetchError::opaque().with_status(500)));
        match table.view().body {
            TableBody::Error { message, .. } => {
                assert_eq!(message, tavola_core::GENERIC_ERROR_MESSAGE)
            }
            other => panic!("expected error body, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let mut table = table();
        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::empty(0)));

        let body = table.view().body;
        assert_eq!(
            body,
            TableBody::Empty {
                message: EMPTY_MESSAGE
            }
        );
        assert!(!body.is_error());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut table = table();
        let first = table.begin_fetch();
        table.next_page();
        let second = table.begin_fetch();

        assert!(table.complete_fetch(&second, Ok(Page::new(vec![dish(11, "Laksa")], 25, 1))));
        assert!(!table.complete_fetch(&first, Ok(Page::new(vec![dish(1, "Pho")], 25, 0))));

        assert_eq!(table.page().unwrap().rows[0].name, "Laksa");
        assert!(table
            .drain_events()
            .contains(&TableEvent::StaleResponseDiscarded { ticket: first.id }));
    }

    #[test]
    fn test_refetch_keeps_previous_rows_visible() {
        let mut table = table();
        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(1, "Pho")], 1, 0)));

        table.begin_fetch();
        match table.view().body {
            TableBody::Rows { refreshing, rows, .. } => {
                assert!(refreshing);
                assert_eq!(rows.len(), 1);
            }
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_view_renders_visible_columns_in_screen_order() {
        let mut table = table();
        table.set_pinned("price", Some(PinSide::Right));
        table.set_visible("category", false);
        table.apply_sort(Some(SortDescriptor::descending("name"))).unwrap();

        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(7, "Bun cha")], 25, 0)));

        let view = table.view();
        assert_eq!(view.header_titles(), vec!["ID", "Name ▼", "Price"]);
        let rows = view.body.rows().unwrap();
        assert_eq!(rows[0].key, "7");
        assert_eq!(rows[0].cells, vec!["7", "Bun cha", "$12.00"]);

        let pager = view.body.pager().unwrap();
        assert_eq!(pager.page_count, Some(3));
        assert!(pager.can_go_next);
        assert!(!pager.can_go_prev);
        assert_eq!(pager.summary, "1-1 of 25");
    }

    #[test]
    fn test_header_drop_reorders_through_controller() {
        let mut table = table();
        let drag = table.header("price").unwrap().drag_payload().unwrap();
        let target = table.header("name").unwrap();

        assert!(target.on_drop(&drag, &mut table));
        let order: Vec<&str> = table.layout().columns().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(order, vec!["id", "price", "name", "category"]);

        let moves: Vec<TableEvent> = table
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, TableEvent::ColumnMoved { .. }))
            .collect();
        assert_eq!(
            moves,
            vec![TableEvent::ColumnMoved {
                column: "price".into(),
                target: "name".into()
            }]
        );

        let own = DragColumn {
            table_id: "menu-items".into(),
            column_id: "name".into(),
        };
        let name = table.header("name").unwrap();
        assert!(!name.on_drop(&own, &mut table));
    }

    #[test]
    fn test_column_rules_are_enforced() {
        let mut table = table();
        assert!(!table.set_visible("id", false));
        assert!(table.set_visible("name", false));
        assert!(!table.set_pinned("id", None));
        table.drain_events();
        assert_eq!(table.show_all_columns(), 1);
        assert!(table.layout().is_visible("name"));
        assert_eq!(
            table.drain_events(),
            vec![TableEvent::ColumnVisibilityChanged {
                column: "name".into(),
                visible: true,
            }]
        );
        assert_eq!(table.header("id").unwrap().pinned, Some(PinSide::Left));
    }

    #[test]
    fn test_layout_changes_do_not_touch_request() {
        let mut table = table();
        let revision = table.revision();
        table.set_pinned("name", Some(PinSide::Left));
        table.set_visible("category", false);
        table.move_column("price", "name");
        assert_eq!(table.revision(), revision);

        let snapshot = table.layout_snapshot();
        let mut other = self::table();
        assert!(other.restore_layout(&snapshot));
        assert_eq!(other.layout(), table.layout());
    }

    #[test]
    fn test_shrunk_result_moves_back_to_last_page() {
        let mut table = table();
        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(1, "Pho")], 25, 0)));
        assert!(table.set_page_index(2));
        let revision = table.revision();

        let ticket = table.begin_fetch();
        assert!(table.complete_fetch(&ticket, Ok(Page::new(Vec::new(), 5, 2))));

        assert_eq!(table.pagination().page_index(), 0);
        assert_eq!(table.request().page, 0);
        assert_eq!(table.revision(), revision + 1);
        assert!(table
            .drain_events()
            .contains(&TableEvent::PageChanged { page_index: 0 }));
    }

    #[test]
    fn test_last_page_within_total_is_kept() {
        let mut table = table();
        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(1, "Pho")], 25, 0)));
        table.set_page_index(2);

        let ticket = table.begin_fetch();
        table.complete_fetch(&ticket, Ok(Page::new(vec![dish(21, "Xoi")], 21, 2)));
        assert_eq!(table.pagination().page_index(), 2);
    }

    #[test]
    fn test_restored_layout_respects_column_rules() {
        let mut table = table();
        let snapshot = ColumnLayoutSnapshot {
            table_id: "menu-items".into(),
            columns: vec![
                ColumnUiState {
                    id: "id".into(),
                    visible: false,
                    pinned: Some(PinSide::Right),
                    order: 3,
                },
                ColumnUiState {
                    id: "name".into(),
                    visible: false,
                    pinned: Some(PinSide::Right),
                    order: 0,
                },
            ],
        };

        assert!(table.restore_layout(&snapshot));
        let id = table.layout().get("id").unwrap();
        assert!(id.visible);
        assert_eq!(id.pinned, Some(PinSide::Left));

        let name = table.layout().get("name").unwrap();
        assert!(!name.visible);
        assert_eq!(name.pinned, Some(PinSide::Right));
    }

    struct ScriptedSource {
        responses: Mutex<Vec<Result<Page<Dish>, FetchError>>>,
        requests: Mutex<Vec<ListRequest>>,
    }

    #[async_trait]
    impl RowSource<Dish> for ScriptedSource {
        async fn fetch(&self, request: &ListRequest) -> Result<Page<Dish>, FetchError> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn test_refresh_uses_current_request() {
        let source = ScriptedSource {
            responses: Mutex::new(vec![
                Err(FetchError::new("timeout")),
                Ok(Page::new(vec![dish(1, "Pho"), dish(2, "Com tam")], 2, 0)),
            ]),
            requests: Mutex::new(Vec::new()),
        };
        let mut table = table();
        table.set_keyword("pho");

        assert!(table.refresh(&source).await);
        assert!(table.view().body.is_error());

        assert!(table.refresh(&source).await);
        assert_eq!(table.view().body.rows().unwrap().len(), 2);

        let requests = source.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests
            .iter()
            .all(|r| r.keyword.as_deref() == Some("pho")));
    }
}
