//! Menu items list page: columns, filters and table wiring

use serde::{Deserialize, Serialize};
use tavola_core::{CellValue, SortDescriptor};
use tavola_settings::TableSettings;
use tavola_table::{
    ColumnDescriptor, FilterRegistry, PinSide, TableController, TableError, TableRow,
};

use crate::common::{builder, format_money, option_label};

pub const TABLE_ID: &str = "menu-items";
pub const RESOURCE: &str = "menu-items";

pub const CATEGORIES: &[(&str, &str)] = &[
    ("APPETIZER", "Appetizer"),
    ("MAIN_COURSE", "Main course"),
    ("DESSERT", "Dessert"),
    ("BEVERAGE", "Beverage"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_available() -> bool {
    true
}

impl TableRow for MenuItem {
    fn cell(&self, accessor_key: &str) -> CellValue {
        match accessor_key {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "category" => self.category.as_str().into(),
            "price" => self.price.into(),
            "available" => self.available.into(),
            "description" => self.description.clone().into(),
            _ => CellValue::Null,
        }
    }

    fn row_key(&self) -> String {
        self.id.to_string()
    }
}

pub fn columns() -> Vec<ColumnDescriptor<MenuItem>> {
    vec![
        ColumnDescriptor::new("id", "ID")
            .hideable(false)
            .movable(false)
            .pinned(PinSide::Left),
        ColumnDescriptor::new("name", "Name"),
        ColumnDescriptor::new("category", "Category")
            .cell(|item: &MenuItem| option_label(CATEGORIES, &item.category)),
        ColumnDescriptor::new("price", "Price").cell(|item: &MenuItem| format_money(item.price)),
        ColumnDescriptor::new("available", "Available").cell(|item: &MenuItem| {
            let label = if item.available { "Available" } else { "Sold out" };
            label.to_string()
        }),
        ColumnDescriptor::new("description", "Description").sortable(false),
    ]
}

pub fn filters() -> FilterRegistry {
    FilterRegistry::builder()
        .enumeration("category", "Category", CATEGORIES.iter().copied())
        .boolean("available", "Available")
        .text("name", "Name")
        .number_range("price", "Price")
        .build()
}

pub fn table(settings: &TableSettings) -> Result<TableController<MenuItem>, TableError> {
    builder(TABLE_ID, RESOURCE, settings)
        .columns(columns())
        .filters(filters())
        .initial_sort(SortDescriptor::ascending("name"))
        .build()
}
