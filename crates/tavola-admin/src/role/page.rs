//! Roles list page

use serde::{Deserialize, Serialize};
use tavola_core::CellValue;
use tavola_settings::TableSettings;
use tavola_table::{ColumnDescriptor, FilterRegistry, TableController, TableError, TableRow};

use crate::common::builder;

pub const TABLE_ID: &str = "roles";
pub const RESOURCE: &str = "roles";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub system: bool,
}

impl TableRow for Role {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.clone().into(),
            "permissions" => (self.permissions.len() as i64).into(),
            "system" => self.system.into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn columns() -> Vec<ColumnDescriptor<Role>> {
    vec![
        ColumnDescriptor::new("name", "Role").hideable(false),
        ColumnDescriptor::new("description", "Description").sortable(false),
        ColumnDescriptor::new("permissions", "Permissions")
            .sortable(false)
            .cell(|role: &Role| match role.permissions.len() {
                1 => "1 permission".to_string(),
                n => format!("{} permissions", n),
            }),
        ColumnDescriptor::new("system", "Built-in"),
    ]
}

pub fn filters() -> FilterRegistry {
    FilterRegistry::builder()
        .text("name", "Role")
        .boolean("system", "Built-in")
        .build()
}

pub fn table(settings: &TableSettings) -> Result<TableController<Role>, TableError> {
    builder(TABLE_ID, RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .build()
}
