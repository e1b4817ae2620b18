//! Terminal rendering of table views

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use tavola_table::{FilterRegistry, PagerView, TableBody, TableView};

pub fn render_view(view: &TableView) -> String {
    match &view.body {
        TableBody::Loading { .. } => "Loading…".to_string(),
        TableBody::Error {
            message,
            retry_label,
        } => format!("Error: {} ({} with the same arguments)", message, retry_label),
        TableBody::Empty { message } => message.to_string(),
        TableBody::Rows { rows, pager, .. } => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(view.header_titles());
            for row in rows {
                table.add_row(row.cells.clone());
            }
            format!("{}\n{}", table, pager_line(pager))
        }
    }
}

/// e.g. "Page 3 of 3 | 21-25 of 25 | 10 per page"
pub fn pager_line(pager: &PagerView) -> String {
    let page = match pager.page_count {
        Some(count) => format!("Page {} of {}", pager.page_index + 1, count),
        None => format!("Page {}", pager.page_index + 1),
    };
    format!("{} | {} | {} per page", page, pager.summary, pager.page_size)
}

pub fn render_filters(registry: &FilterRegistry) -> String {
    if registry.is_empty() {
        return "This page has no filters.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Field", "Label", "Operand", "Options"]);
    for definition in registry.definitions() {
        let options = definition
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            definition.field.clone(),
            definition.label.clone(),
            definition.operand.label().to_string(),
            options,
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tavola_table::{EMPTY_MESSAGE, RETRY_LABEL};

    fn pager(total: Option<u64>) -> PagerView {
        PagerView {
            page_index: 2,
            page_count: total.map(|_| 3),
            page_size: 10,
            total,
            can_go_prev: true,
            can_go_next: false,
            available_page_sizes: vec![10, 20],
            summary: "21-25 of 25".to_string(),
        }
    }

    #[test]
    fn test_pager_line() {
        assert_eq!(
            pager_line(&pager(Some(25))),
            "Page 3 of 3 | 21-25 of 25 | 10 per page"
        );
        assert!(pager_line(&pager(None)).starts_with("Page 3 |"));
    }

    #[test]
    fn test_non_row_bodies() {
        let mut view = TableView {
            table_id: "roles".into(),
            headers: Vec::new(),
            body: TableBody::Empty {
                message: EMPTY_MESSAGE,
            },
        };
        assert_eq!(render_view(&view), EMPTY_MESSAGE);

        view.body = TableBody::Error {
            message: "Forbidden".into(),
            retry_label: RETRY_LABEL,
        };
        assert!(render_view(&view).starts_with("Error: Forbidden"));
    }

    #[test]
    fn test_filters_table_lists_options() {
        let rendered = render_filters(&tavola_admin::branch::filters());
        assert!(rendered.contains("UNDER_RENOVATION"));
        assert!(rendered.contains("city"));
    }
}
