use tavola_settings::TableSettings;
use tavola_table::{TableBuilder, TableController};

/// Builder with the user's table defaults applied
pub(crate) fn builder<T>(
    table_id: &str,
    resource: &str,
    settings: &TableSettings,
) -> TableBuilder<T> {
    TableController::builder(table_id, resource)
        .page_size(settings.default_page_size)
        .available_page_sizes(settings.page_sizes.clone())
        .reset_page_on_size_change(settings.reset_page_on_size_change)
        .skeleton_rows(settings.skeleton_rows)
}

/// Display label of an enum value, or the raw value when it is not listed
pub fn option_label(options: &[(&str, &str)], value: &str) -> String {
    options
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Price with two decimals and thousands separators, e.g. `1,250.00`
pub fn format_money(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (ix, digit) in whole.chars().enumerate() {
        if ix > 0 && (whole.len() - ix) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}
