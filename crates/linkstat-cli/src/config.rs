use std::fs;
use std::path::PathBuf;

use linkstat_core::TimeWindow;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_CLICKS: &str = "data/clickstream.csv";
pub const DEFAULT_LINKS: &str = "data/shortlinks.csv";
const DEFAULT_TOP_LINKS: usize = 20;
const DEFAULT_PAGE_SIZE: usize = 10;

const ENV_CONFIG: &str = "LINKSTAT_CONFIG";
const ENV_CLICKS: &str = "LINKSTAT_CLICKS";
const ENV_LINKS: &str = "LINKSTAT_LINKS";

/// `~/.config/linkstat/config.toml`. Every key is optional.
///
/// Priority: CLI flag > `LINKSTAT_*` env var > config file > default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkstatConfig {
    pub clicks: String,
    pub links: String,
    pub top_links: usize,
    pub page_size: usize,
    pub window: Option<String>,
}

impl Default for LinkstatConfig {
    fn default() -> Self {
        Self {
            clicks: DEFAULT_CLICKS.to_string(),
            links: DEFAULT_LINKS.to_string(),
            top_links: DEFAULT_TOP_LINKS,
            page_size: DEFAULT_PAGE_SIZE,
            window: None,
        }
    }
}

impl LinkstatConfig {
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("linkstat").join("config.toml"))
    }

    pub fn load() -> Self {
        let mut config = Self::config_path()
            .and_then(|path| {
                let content = fs::read_to_string(&path).ok()?;
                debug!("Using config {}", path.display());
                Some(Self::from_toml(&content).unwrap_or_else(|e| {
                    warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }))
            })
            .unwrap_or_default();

        config.apply_env();
        config
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_env(&mut self) {
        if let Ok(clicks) = std::env::var(ENV_CLICKS) {
            if !clicks.is_empty() {
                self.clicks = clicks;
            }
        }
        if let Ok(links) = std::env::var(ENV_LINKS) {
            if !links.is_empty() {
                self.links = links;
            }
        }
    }

    /// Window used when a command is run without `--window`.
    pub fn default_window(&self) -> TimeWindow {
        match self.window.as_deref() {
            None => TimeWindow::All,
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring config window: {}", e);
                TimeWindow::All
            }),
        }
    }
}
