//! Logging setup for the CLI
//!
//! Logs go to stderr so table output on stdout stays clean. RUST_LOG takes
//! precedence over the verbosity flag.

use tracing_subscriber::EnvFilter;

const TAVOLA_CRATES: &[&str] = &[
    "tavola_core",
    "tavola_table",
    "tavola_settings",
    "tavola_services",
    "tavola_admin",
    "tavola_cli",
];

/// Filter used when RUST_LOG is unset
pub fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut filter = String::from("warn");
    for krate in TAVOLA_CRATES {
        filter.push_str(&format!(",{}={}", krate, level));
    }
    filter
}

pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {}", err))
}
