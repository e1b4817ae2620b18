//! List page query binding
//!
//! A [`ListQuery`] owns one page's [`TableController`] and refetches through
//! its [`RowSource`] when the controller's request revision or the resource's
//! cache generation has moved since the last fetch. Failed fetches are not
//! retried automatically; [`ListQuery::retry`] is the explicit path.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tavola_table::{RowSource, SearchDebouncer, TableController, TableRow, TableView};

use crate::invalidation::QueryInvalidator;

/// (request revision, resource generation) a fetch was made for
type QueryKey = (u64, u64);

pub struct ListQuery<T: Send> {
    controller: TableController<T>,
    source: Arc<dyn RowSource<T>>,
    invalidator: QueryInvalidator,
    search: SearchDebouncer,
    fetched: Option<QueryKey>,
}

impl<T: Send> ListQuery<T> {
    pub fn new(
        controller: TableController<T>,
        source: Arc<dyn RowSource<T>>,
        invalidator: QueryInvalidator,
    ) -> Self {
        Self {
            controller,
            source,
            invalidator,
            search: SearchDebouncer::default(),
            fetched: None,
        }
    }

    pub fn with_search_debounce(mut self, delay: Duration) -> Self {
        self.search = SearchDebouncer::new(delay);
        self
    }

    pub fn controller(&self) -> &TableController<T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TableController<T> {
        &mut self.controller
    }

    fn key(&self) -> QueryKey {
        (
            self.controller.revision(),
            self.invalidator.generation(self.controller.resource()),
        )
    }

    /// Whether the data on screen no longer matches the request or the server
    pub fn is_stale(&self) -> bool {
        self.fetched != Some(self.key())
    }

    /// Fetch if stale. Returns whether a response was applied.
    pub async fn sync(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }
        self.fetch().await
    }

    /// Fetch again regardless of staleness
    pub async fn retry(&mut self) -> bool {
        tracing::debug!(table_id = %self.controller.table_id(), "Retrying list fetch");
        self.fetch().await
    }

    async fn fetch(&mut self) -> bool {
        let key = self.key();
        let applied = self.controller.refresh(self.source.as_ref()).await;
        if applied {
            self.fetched = Some(key);
        }
        applied
    }

    /// Feed raw search box input; applied once it settles
    pub fn input_search(&mut self, text: &str, now: Instant) {
        self.search.input(text, now);
    }

    /// When the search box should next be polled
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Apply settled search input to the controller. Returns whether the
    /// keyword changed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(keyword) => self.controller.set_keyword(&keyword),
            None => false,
        }
    }

    /// Apply pending search input immediately, e.g. on Enter
    pub fn flush_search(&mut self) -> bool {
        match self.search.flush() {
            Some(keyword) => self.controller.set_keyword(&keyword),
            None => false,
        }
    }

    pub fn clear_search(&mut self) -> bool {
        match self.search.clear() {
            Some(keyword) => self.controller.set_keyword(&keyword),
            None => false,
        }
    }
}

impl<T: TableRow + Send> ListQuery<T> {
    pub fn view(&self) -> TableView {
        self.controller.view()
    }
}
