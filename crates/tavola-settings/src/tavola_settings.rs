//! Tavola Settings
//!
//! Application settings persisted as pretty JSON:
//! - Table defaults (page size, page size options, search debounce)
//! - API endpoint (base URL, timeout, access token)
//!
//! Every field has a default, so a missing file or a partial file is valid.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory holding `settings.json`, e.g. `~/.config/tavola`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join("tavola"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TavolaSettings {
    pub table: TableSettings,
    pub api: ApiSettings,
}

impl TavolaSettings {
    /// Load from the user's config directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn settings_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("settings.json"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings JSON in {:?}", path))?;
        Ok(settings.normalized())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Repair values a hand-edited file may get wrong
    pub fn normalized(mut self) -> Self {
        self.table = self.table.normalized();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub default_page_size: usize,
    pub page_sizes: Vec<usize>,
    /// Whether changing the page size jumps back to the first page
    pub reset_page_on_size_change: bool,
    pub search_debounce_ms: u64,
    /// Placeholder rows shown before the first page arrives
    pub skeleton_rows: usize,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_sizes: vec![10, 20, 50, 100],
            reset_page_on_size_change: true,
            search_debounce_ms: 300,
            skeleton_rows: 5,
        }
    }
}

impl TableSettings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    fn normalized(mut self) -> Self {
        self.page_sizes.retain(|&size| size > 0);
        self.page_sizes.sort_unstable();
        self.page_sizes.dedup();
        if self.default_page_size == 0 {
            tracing::warn!("default_page_size must be positive, falling back to 10");
            self.default_page_size = 10;
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            self.page_sizes.push(self.default_page_size);
            self.page_sizes.sort_unstable();
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Sent as a bearer token when present
    pub access_token: Option<String>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout_secs: 30,
            access_token: None,
        }
    }
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
