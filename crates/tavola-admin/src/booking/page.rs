//! Bookings list page

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tavola_core::{CellValue, SortDescriptor};
use tavola_settings::TableSettings;
use tavola_table::{ColumnDescriptor, FilterRegistry, TableController, TableError, TableRow};

use crate::common::{builder, option_label};

pub const TABLE_ID: &str = "bookings";
pub const RESOURCE: &str = "bookings";

/// Query parameter scoping the list to one branch
pub const BRANCH_PARAM: &str = "branchId";

pub const STATUSES: &[(&str, &str)] = &[
    ("PENDING", "Pending"),
    ("CONFIRMED", "Confirmed"),
    ("CHECKED_IN", "Checked in"),
    ("COMPLETED", "Completed"),
    ("CANCELLED", "Cancelled"),
    ("NO_SHOW", "No show"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub branch_name: String,
    pub guest_count: u32,
    pub booking_date: NaiveDate,
    pub booking_time: NaiveTime,
    pub status: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl TableRow for Booking {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => self.id.into(),
            "customerName" => self.customer_name.as_str().into(),
            "phone" => self.phone.clone().into(),
            "branchName" => self.branch_name.as_str().into(),
            "guestCount" => self.guest_count.into(),
            "bookingDate" => self.booking_date.into(),
            "bookingTime" => self.booking_time.into(),
            "status" => self.status.as_str().into(),
            "note" => self.note.clone().into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Booking>> {
    vec![
        ColumnDescriptor::new("id", "#").hideable(false).movable(false),
        ColumnDescriptor::new("customerName", "Customer"),
        ColumnDescriptor::new("phone", "Phone").sortable(false),
        ColumnDescriptor::new("branchName", "Branch"),
        ColumnDescriptor::new("guestCount", "Guests"),
        ColumnDescriptor::new("bookingDate", "Date"),
        ColumnDescriptor::new("bookingTime", "Time"),
        ColumnDescriptor::new("status", "Status")
            .cell(|booking: &Booking| option_label(STATUSES, &booking.status)),
        ColumnDescriptor::new("note", "Note").sortable(false),
    ]
}

pub fn filters() -> FilterRegistry {
    FilterRegistry::builder()
        .enumeration("status", "Status", STATUSES.iter().copied())
        .text("branchName", "Branch")
        .number_range("guestCount", "Guests")
        .date_range("bookingDate", "Date")
        .build()
}

pub fn table(settings: &TableSettings) -> Result<TableController<Booking>, TableError> {
    builder(TABLE_ID, RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .initial_sort(SortDescriptor::descending("bookingDate"))
        .build()
}

/// Bookings of a single branch
pub fn table_for_branch(
    settings: &TableSettings,
    branch_id: i64,
) -> Result<TableController<Booking>, TableError> {
    builder(&format!("{}-branch-{}", TABLE_ID, branch_id), RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .initial_sort(SortDescriptor::descending("bookingDate"))
        .param(BRANCH_PARAM, branch_id.to_string())
        .build()
}
