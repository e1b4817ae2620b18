//! Tavola CLI
//!
//! Fetches an admin list page from the API and prints it as a table.
//!
//! ```bash
//! tavola list bookings --size 20 --sort bookingDate:desc --search linh
//! tavola list menu --filter '{"field":"category","operand":"ENUM","value":"DESSERT"}'
//! tavola filters employees
//! ```

mod logging;
mod render;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tavola_admin::{AdminPage, booking, branch, employee, menu, role, schedule};
use tavola_core::{FilterCondition, SortDescriptor};
use tavola_services::{ApiClient, ApiRowSource};
use tavola_settings::TavolaSettings;
use tavola_table::{FilterRegistry, TableBody, TableController, TableRow};

#[derive(Parser)]
#[command(name = "tavola")]
#[command(about = "Browse Tavola admin list pages from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides the settings file)
    #[arg(long, global = true, env = "TAVOLA_API_URL")]
    base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true, env = "TAVOLA_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print one page of a list
    List(ListArgs),

    /// Show the filters a page accepts
    Filters {
        #[arg(value_name = "PAGE")]
        page: AdminPage,
    },

    /// List the available pages
    Pages,

    /// Print the settings file location and effective settings
    Config,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// menu, branches, bookings, employees, roles or schedules
    #[arg(value_name = "PAGE")]
    page: AdminPage,

    /// Page number, starting at 1
    #[arg(long = "page", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page_number: u32,

    /// Rows per page (defaults to the settings file)
    #[arg(long, env = "TAVOLA_PAGE_SIZE")]
    size: Option<usize>,

    /// Sort as field:asc or field:desc
    #[arg(long)]
    sort: Option<SortDescriptor>,

    /// Free-text search keyword
    #[arg(long)]
    search: Option<String>,

    /// Filter condition as JSON; a single condition or an array. Repeatable.
    #[arg(long = "filter", value_name = "JSON")]
    filters: Vec<String>,

    /// Restrict bookings or schedules to one branch
    #[arg(long)]
    branch: Option<i64>,

    /// Print the request that would be sent instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let mut settings = TavolaSettings::load().context("Failed to load settings")?;
    if let Some(base_url) = cli.base_url {
        settings.api.base_url = base_url;
    }
    if let Some(token) = cli.token {
        settings.api.access_token = Some(token);
    }
    tracing::debug!(base_url = %settings.api.base_url, "Settings loaded");

    match cli.command {
        Commands::List(args) => list(&settings, args).await,
        Commands::Filters { page } => {
            println!("{}", render::render_filters(&filter_registry(page)));
            Ok(())
        }
        Commands::Pages => {
            for page in AdminPage::all() {
                println!("{:<10} {:<10} /{}", page.slug(), page.title(), page.resource());
            }
            Ok(())
        }
        Commands::Config => {
            println!("# {}", TavolaSettings::settings_path()?.display());
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

fn filter_registry(page: AdminPage) -> FilterRegistry {
    match page {
        AdminPage::Menu => menu::filters(),
        AdminPage::Branches => branch::filters(),
        AdminPage::Bookings => booking::filters(),
        AdminPage::Employees => employee::filters(),
        AdminPage::Roles => role::filters(),
        AdminPage::Schedules => schedule::filters(),
    }
}

async fn list(settings: &TavolaSettings, args: ListArgs) -> Result<()> {
    let table = &settings.table;
    if args.branch.is_some()
        && !matches!(args.page, AdminPage::Bookings | AdminPage::Schedules)
    {
        bail!("--branch only applies to bookings and schedules");
    }

    let client = Arc::new(ApiClient::new(&settings.api)?);
    match (args.page, args.branch) {
        (AdminPage::Menu, _) => show(menu::table(table)?, client, &args).await,
        (AdminPage::Branches, _) => show(branch::table(table)?, client, &args).await,
        (AdminPage::Bookings, Some(id)) => {
            show(booking::table_for_branch(table, id)?, client, &args).await
        }
        (AdminPage::Bookings, None) => show(booking::table(table)?, client, &args).await,
        (AdminPage::Employees, _) => show(employee::table(table)?, client, &args).await,
        (AdminPage::Roles, _) => show(role::table(table)?, client, &args).await,
        (AdminPage::Schedules, Some(id)) => {
            show(schedule::table_for_branch(table, id)?, client, &args).await
        }
        (AdminPage::Schedules, None) => show(schedule::table(table)?, client, &args).await,
    }
}

/// Parse `--filter` values; each is one condition or an array of them
fn parse_filters(values: &[String]) -> Result<Vec<FilterCondition>> {
    let mut conditions = Vec::new();
    for value in values {
        let parsed: serde_json::Value = serde_json::from_str(value)
            .with_context(|| format!("--filter is not valid JSON: {}", value))?;
        if parsed.is_array() {
            let many: Vec<FilterCondition> = serde_json::from_value(parsed)
                .with_context(|| format!("Invalid filter conditions: {}", value))?;
            conditions.extend(many);
        } else {
            let one: FilterCondition = serde_json::from_value(parsed)
                .with_context(|| format!("Invalid filter condition: {}", value))?;
            conditions.push(one);
        }
    }
    Ok(conditions)
}

/// Apply the arguments in the order a user would: size, filters, search,
/// sort, then the page to land on
fn apply_args<T>(table: &mut TableController<T>, args: &ListArgs) -> Result<()> {
    if let Some(size) = args.size {
        if size == 0 {
            bail!("--size must be greater than zero");
        }
        table.set_page_size(size);
    }
    table.set_filters(parse_filters(&args.filters)?)?;
    if let Some(keyword) = &args.search {
        table.set_keyword(keyword);
    }
    if let Some(sort) = &args.sort {
        table.apply_sort(Some(sort.clone()))?;
    }
    table.set_page_index(args.page_number as usize - 1);
    Ok(())
}

async fn show<T>(mut table: TableController<T>, client: Arc<ApiClient>, args: &ListArgs) -> Result<()>
where
    T: TableRow + DeserializeOwned + Send + 'static,
{
    apply_args(&mut table, args)?;
    tracing::debug!(
        page = %args.page,
        query = ?table.request().to_query_pairs(),
        "Prepared list request"
    );

    if args.dry_run {
        let url = client.endpoint(table.resource())?;
        println!("GET {}", url);
        for (key, value) in table.request().to_query_pairs() {
            println!("  {}={}", key, value);
        }
        return Ok(());
    }

    let source = ApiRowSource::<T>::new(client, table.resource());
    table.refresh(&source).await;
    for event in table.drain_events() {
        tracing::trace!(?event, "Table event");
    }

    let view = table.view();
    let rendered = render::render_view(&view);
    if let TableBody::Error { .. } = view.body {
        bail!(rendered);
    }
    println!("{}", rendered);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tavola_settings::TableSettings;

    fn args(extra: &[&str]) -> ListArgs {
        let mut argv = vec!["tavola", "list", "bookings"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::List(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_list_args_build_request() {
        let args = args(&[
            "--page",
            "3",
            "--size",
            "20",
            "--sort",
            "guestCount:asc",
            "--search",
            " linh ",
            "--filter",
            r#"{"field":"status","operand":"ENUM","value":"CONFIRMED"}"#,
        ]);
        let mut table = booking::table(&TableSettings::default()).unwrap();
        apply_args(&mut table, &args).unwrap();

        let request = table.request();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 20);
        assert_eq!(request.sort_by.as_ref().unwrap().to_string(), "guestCount:asc");
        assert_eq!(request.keyword.as_deref(), Some("linh"));
        assert_eq!(request.filters.len(), 1);
    }

    #[test]
    fn test_filter_arrays_and_errors() {
        let filters = parse_filters(&[
            r#"[{"field":"status","operand":"ENUM","value":"PENDING"},
                {"field":"guestCount","operand":"NUMBER_RANGE","value":{"min":4}}]"#
                .to_string(),
        ])
        .unwrap();
        assert_eq!(filters.len(), 2);

        assert!(parse_filters(&["{oops".to_string()]).is_err());
        assert!(parse_filters(&[r#"{"field":"status","operand":"BOGUS","value":1}"#.to_string()]).is_err());
    }

    #[test]
    fn test_unknown_filter_value_is_rejected() {
        let args = args(&[
            "--filter",
            r#"{"field":"status","operand":"ENUM","value":"LOST"}"#,
        ]);
        let mut table = booking::table(&TableSettings::default()).unwrap();
        assert!(apply_args(&mut table, &args).is_err());
    }

    #[test]
    fn test_page_number_starts_at_one() {
        assert!(Cli::try_parse_from(["tavola", "list", "menu", "--page", "0"]).is_err());
        assert!(Cli::try_parse_from(["tavola", "list", "orders"]).is_err());
    }
}
