//! Employees list page

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tavola_core::{CellValue, SortDescriptor};
use tavola_settings::TableSettings;
use tavola_table::{
    ColumnDescriptor, FilterRegistry, PinSide, TableController, TableError, TableRow,
};

use crate::common::{builder, option_label};

pub const TABLE_ID: &str = "employees";
pub const RESOURCE: &str = "employees";

pub const POSITIONS: &[(&str, &str)] = &[
    ("MANAGER", "Manager"),
    ("CHEF", "Chef"),
    ("WAITER", "Waiter"),
    ("CASHIER", "Cashier"),
    ("RECEPTIONIST", "Receptionist"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub position: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub hired_on: Option<NaiveDate>,
}

impl TableRow for Employee {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => self.id.into(),
            "fullName" => self.full_name.as_str().into(),
            "email" => self.email.as_str().into(),
            "phone" => self.phone.clone().into(),
            "position" => self.position.as_str().into(),
            "branchName" => self.branch_name.clone().into(),
            "active" => self.active.into(),
            "hiredOn" => self.hired_on.into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Employee>> {
    vec![
        ColumnDescriptor::new("fullName", "Name")
            .hideable(false)
            .pinned(PinSide::Left),
        ColumnDescriptor::new("email", "Email"),
        ColumnDescriptor::new("phone", "Phone").sortable(false),
        ColumnDescriptor::new("position", "Position")
            .cell(|employee: &Employee| option_label(POSITIONS, &employee.position)),
        ColumnDescriptor::new("branchName", "Branch"),
        ColumnDescriptor::new("active", "Status").cell(|employee: &Employee| {
            let label = if employee.active { "Active" } else { "Inactive" };
            label.to_string()
        }),
        ColumnDescriptor::new("hiredOn", "Hired"),
    ]
}

pub fn filters() -> FilterRegistry {
    FilterRegistry::builder()
        .enumeration("position", "Position", POSITIONS.iter().copied())
        .boolean("active", "Active")
        .text("fullName", "Name")
        .build()
}

pub fn table(settings: &TableSettings) -> Result<TableController<Employee>, TableError> {
    builder(TABLE_ID, RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .initial_sort(SortDescriptor::ascending("fullName"))
        .build()
}
