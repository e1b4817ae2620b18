//! Work schedules list page

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tavola_core::{CellValue, SortDescriptor};
use tavola_settings::TableSettings;
use tavola_table::{ColumnDescriptor, FilterRegistry, TableController, TableError, TableRow};

use crate::common::{builder, option_label};

pub const TABLE_ID: &str = "schedules";
pub const RESOURCE: &str = "schedules";
pub const BRANCH_PARAM: &str = "branchId";

pub const SHIFTS: &[(&str, &str)] = &[
    ("MORNING", "Morning"),
    ("AFTERNOON", "Afternoon"),
    ("EVENING", "Evening"),
    ("NIGHT", "Night"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub employee_name: String,
    pub shift: String,
    pub work_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub branch_name: Option<String>,
}

impl Schedule {
    /// Shift length in hours; overnight shifts wrap past midnight
    pub fn hours(&self) -> f64 {
        let minutes = (self.end_time - self.start_time).num_minutes();
        let minutes = if minutes < 0 { minutes + 24 * 60 } else { minutes };
        minutes as f64 / 60.0
    }
}

impl TableRow for Schedule {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => self.id.into(),
            "employeeName" => self.employee_name.as_str().into(),
            "shift" => self.shift.as_str().into(),
            "workDate" => self.work_date.into(),
            "startTime" => self.start_time.into(),
            "endTime" => self.end_time.into(),
            "hours" => self.hours().into(),
            "branchName" => self.branch_name.clone().into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Schedule>> {
    vec![
        ColumnDescriptor::new("workDate", "Date").hideable(false),
        ColumnDescriptor::new("employeeName", "Employee"),
        ColumnDescriptor::new("shift", "Shift")
            .cell(|schedule: &Schedule| option_label(SHIFTS, &schedule.shift)),
        ColumnDescriptor::new("startTime", "Start"),
        ColumnDescriptor::new("endTime", "End"),
        ColumnDescriptor::new("hours", "Hours")
            .sortable(false)
            .cell(|schedule: &Schedule| format!("{:.1}", schedule.hours())),
        ColumnDescriptor::new("branchName", "Branch"),
    ]
}

pub fn filters() -> FilterRegistry {
    FilterRegistry::builder()
        .enumeration("shift", "Shift", SHIFTS.iter().copied())
        .date_range("workDate", "Date")
        .text("employeeName", "Employee")
        .build()
}

pub fn table(settings: &TableSettings) -> Result<TableController<Schedule>, TableError> {
    builder(TABLE_ID, RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .initial_sort(SortDescriptor::ascending("workDate"))
        .build()
}

/// Schedules of a single branch
pub fn table_for_branch(
    settings: &TableSettings,
    branch_id: i64,
) -> Result<TableController<Schedule>, TableError> {
    builder(&format!("{}-branch-{}", TABLE_ID, branch_id), RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .initial_sort(SortDescriptor::ascending("workDate"))
        .param(BRANCH_PARAM, branch_id.to_string())
        .build()
}
