//! Branches list page

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use tavola_core::CellValue;
use tavola_settings::TableSettings;
use tavola_table::{ColumnDescriptor, FilterRegistry, TableController, TableError, TableRow};

use crate::common::{builder, option_label};

pub const TABLE_ID: &str = "branches";
pub const RESOURCE: &str = "branches";

pub const STATUSES: &[(&str, &str)] = &[
    ("OPEN", "Open"),
    ("CLOSED", "Closed"),
    ("UNDER_RENOVATION", "Under renovation"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub status: String,
    #[serde(default)]
    pub opening_time: Option<NaiveTime>,
    #[serde(default)]
    pub closing_time: Option<NaiveTime>,
}

impl Branch {
    /// e.g. "10:00 - 22:00"; empty when either end is unknown
    pub fn opening_hours(&self) -> String {
        match (self.opening_time, self.closing_time) {
            (Some(open), Some(close)) => {
                format!("{} - {}", open.format("%H:%M"), close.format("%H:%M"))
            }
            _ => String::new(),
        }
    }
}

impl TableRow for Branch {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "address" => self.address.as_str().into(),
            "city" => self.city.as_str().into(),
            "phone" => self.phone.clone().into(),
            "status" => self.status.as_str().into(),
            "openingTime" => self.opening_time.into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Branch>> {
    vec![
        ColumnDescriptor::new("name", "Branch").hideable(false),
        ColumnDescriptor::new("address", "Address").sortable(false),
        ColumnDescriptor::new("city", "City"),
        ColumnDescriptor::new("phone", "Phone").sortable(false),
        ColumnDescriptor::new("status", "Status")
            .cell(|branch: &Branch| option_label(STATUSES, &branch.status)),
        ColumnDescriptor::new("openingTime", "Opening hours")
            .cell(Branch::opening_hours),
    ]
}

pub fn filters() -> FilterRegistry {
    FilterRegistry::builder()
        .enumeration("status", "Status", STATUSES.iter().copied())
        .text("city", "City")
        .build()
}

pub fn table(settings: &TableSettings) -> Result<TableController<Branch>, TableError> {
    builder(TABLE_ID, RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .build()
}
