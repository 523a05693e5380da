//! Viewer configuration loaded from `~/.config/pdfpane/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::render::{Platform, RenderStrategy, DEFAULT_VIEWER_BASE};

/// Remote document loaded by `read` when no URL is given.
pub const DEFAULT_DOCUMENT_URL: &str =
    "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Document fetched on mount by the reader.
    pub document_url: String,
    /// Embedded-viewer service for native hosts.
    pub viewer_base: String,
    /// Overrides the compile-time platform.
    pub platform: Option<Platform>,
    /// Root for downloaded documents.
    pub cache_dir: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document_url: DEFAULT_DOCUMENT_URL.to_string(),
            viewer_base: DEFAULT_VIEWER_BASE.to_string(),
            platform: None,
            cache_dir: None,
            connect_timeout_secs: 10,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load from the default location.
    ///
    /// Returns defaults if the file doesn't exist (configuration is optional).
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load from an explicit path, which must exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    pub fn render_strategy(&self) -> RenderStrategy {
        RenderStrategy::with_viewer(self.platform(), self.viewer_base.clone())
    }

    pub fn cache_root(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("pdfpane")
        })
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Return the path to the config file.
fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pdfpane")
        .join("config.toml")
}
