//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tavola_core::{CellValue, ListRequest, Page};
use tavola_table::{ColumnDescriptor, FetchError, FilterRegistry, RowSource, TableController, TableRow};

/// Row type used across service tests
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: u32,
    pub guest: String,
    pub party_size: u32,
    pub status: String,
}

impl Booking {
    pub fn new(id: u32, guest: &str) -> Self {
        Self {
            id,
            guest: guest.to_string(),
            party_size: 2,
            status: "PENDING".to_string(),
        }
    }
}

impl TableRow for Booking {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => i64::from(self.id).into(),
            "guest" => self.guest.as_str().into(),
            "partySize" => i64::from(self.party_size).into(),
            "status" => self.status.as_str().into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn bookings_table() -> TableController<Booking> {
    TableController::builder("bookings", "bookings")
        .column(ColumnDescriptor::new("id", "#").sortable(false))
        .column(ColumnDescriptor::new("guest", "Guest"))
        .column(ColumnDescriptor::new("partySize", "Guests"))
        .column(ColumnDescriptor::new("status", "Status"))
        .filters(
            FilterRegistry::builder()
                .enumeration(
                    "status",
                    "Status",
                    [("PENDING", "Pending"), ("CONFIRMED", "Confirmed")],
                )
                .build(),
        )
        .page_size(10)
        .build()
        .expect("valid bookings table")
}

/// Mock row source for exercising list queries without a server.
///
/// Scripted responses are returned in order; once they run out the default
/// response is repeated. Every request is logged for assertions.
pub struct MockRowSource {
    pub scripted: parking_lot::Mutex<VecDeque<Result<Page<Booking>, FetchError>>>,
    pub default_rows: Vec<Booking>,
    pub request_log: Arc<parking_lot::Mutex<Vec<ListRequest>>>,
}

impl MockRowSource {
    pub fn new() -> Self {
        Self {
            scripted: parking_lot::Mutex::new(VecDeque::new()),
            default_rows: Vec::new(),
            request_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Booking>) -> Self {
        self.default_rows = rows;
        self
    }

    pub fn then_fail(self, message: &str) -> Self {
        self.scripted
            .lock()
            .push_back(Err(FetchError::new(message).with_status(503)));
        self
    }

    pub fn then_return(self, page: Page<Booking>) -> Self {
        self.scripted.lock().push_back(Ok(page));
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.request_log.lock().len()
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.request_log.lock().clone()
    }
}

#[async_trait]
impl RowSource<Booking> for MockRowSource {
    async fn fetch(&self, request: &ListRequest) -> Result<Page<Booking>, FetchError> {
        self.request_log.lock().push(request.clone());

        if let Some(response) = self.scripted.lock().pop_front() {
            return response;
        }

        let total = self.default_rows.len() as u64;
        let rows = self
            .default_rows
            .iter()
            .skip(request.offset())
            .take(request.size)
            .cloned()
            .collect();
        Ok(Page::new(rows, total, request.page))
    }
}

pub fn bookings(count: u32) -> Vec<Booking> {
    (1..=count)
        .map(|id| Booking::new(id, &format!("Guest {}", id)))
        .collect()
}
