//! Tests for the menu items page

use super::*;
use pretty_assertions::assert_eq;
use tavola_core::{CellValue, FilterCondition, Page};
use tavola_settings::TableSettings;
use tavola_table::{FilterError, TableBody, TableRow};

fn item() -> MenuItem {
    serde_json::from_str(
        r#"{"id": 12, "name": "Bun cha", "category": "MAIN_COURSE", "price": 1250,
            "description": "Grilled pork with noodles"}"#,
    )
    .unwrap()
}

#[test]
fn test_row_from_api_json() {
    let item = item();
    assert!(item.available);
    assert_eq!(item.image_url, None);
    assert_eq!(item.cell("price").as_f64(), Some(1250.0));
    assert_eq!(item.cell("unknown"), CellValue::Null);
}

#[test]
fn test_table_renders_formatted_cells() {
    let mut table = table(&TableSettings::default()).unwrap();
    assert_eq!(table.sort().unwrap().to_string(), "name:asc");

    let ticket = table.begin_fetch();
    table.complete_fetch(&ticket, Ok(Page::new(vec![item()], 1, 0)));

    let view = table.view();
    assert_eq!(
        view.header_titles(),
        vec!["ID", "Name ▲", "Category", "Price", "Available", "Description"]
    );
    match view.body {
        TableBody::Rows { rows, .. } => assert_eq!(
            rows[0].cells,
            vec![
                "12",
                "Bun cha",
                "Main course",
                "1,250.00",
                "Available",
                "Grilled pork with noodles"
            ]
        ),
        other => panic!("expected rows, got {:?}", other),
    }
}

#[test]
fn test_filters() {
    let registry = filters();
    assert_eq!(registry.len(), 4);
    assert!(registry
        .validate(&FilterCondition::enumeration("category", "DESSERT"))
        .is_ok());
    assert!(registry
        .validate(&FilterCondition::number_range("price", Some(50.0), Some(200.0)))
        .is_ok());
    assert!(matches!(
        registry.validate(&FilterCondition::number_range("price", Some(200.0), Some(50.0))),
        Err(FilterError::InvertedRange(_))
    ));
    assert!(matches!(
        registry.validate(&FilterCondition::boolean("vegan", true)),
        Err(FilterError::UnknownField(_))
    ));
}

#[test]
fn test_page_size_from_settings() {
    let settings = TableSettings {
        default_page_size: 20,
        ..TableSettings::default()
    };
    let table = table(&settings).unwrap();
    assert_eq!(table.request().size, 20);
}
