//! Render planning: how a host should display a document reference.
//!
//! Web hosts render PDFs in an inline frame straight from a URL or `data:`
//! URI. Native hosts have no built-in PDF renderer, so the reference is
//! handed to an external embedded-viewer service instead. If native
//! rendering becomes available this branch should go away.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Viewer service used by native hosts unless configured otherwise.
pub const DEFAULT_VIEWER_BASE: &str = "https://docs.google.com/gview";

/// Host platform capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Can render a document inline from a URI.
    Web,
    /// Needs an external viewer service.
    Native,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Web => "web",
            Self::Native => "native",
        })
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "web" => Ok(Self::Web),
            "native" => Ok(Self::Native),
            other => Err(format!("unknown platform {other:?} (expected web or native)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    InlineFrame,
    EmbeddedViewerUrl,
    None,
}

/// Decision record handed to the display layer.
///
/// `reference` is `None` exactly when `mode` is [`RenderMode::None`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    pub mode: RenderMode,
    pub reference: Option<String>,
}

impl RenderPlan {
    pub const fn none() -> Self {
        Self {
            mode: RenderMode::None,
            reference: None,
        }
    }
}

/// Platform plus viewer service, fixed at construction.
#[derive(Debug, Clone)]
pub struct RenderStrategy {
    platform: Platform,
    viewer_base: String,
}

impl RenderStrategy {
    pub fn new(platform: Platform) -> Self {
        Self::with_viewer(platform, DEFAULT_VIEWER_BASE)
    }

    pub fn with_viewer(platform: Platform, viewer_base: impl Into<String>) -> Self {
        Self {
            platform,
            viewer_base: viewer_base.into(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn plan(&self, reference: &str) -> RenderPlan {
        if reference.is_empty() {
            return RenderPlan::none();
        }

        match self.platform {
            Platform::Web => RenderPlan {
                mode: RenderMode::InlineFrame,
                reference: Some(reference.to_string()),
            },
            Platform::Native => RenderPlan {
                mode: RenderMode::EmbeddedViewerUrl,
                reference: Some(viewer_url(&self.viewer_base, reference)),
            },
        }
    }
}

impl Default for RenderStrategy {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

/// Plan `reference` for `platform` using the default viewer service.
pub fn plan(reference: &str, platform: Platform) -> RenderPlan {
    RenderStrategy::new(platform).plan(reference)
}

fn viewer_url(viewer_base: &str, reference: &str) -> String {
    let separator = if viewer_base.contains('?') { '&' } else { '?' };
    format!(
        "{viewer_base}{separator}embedded=true&url={}",
        urlencoding::encode(reference)
    )
}
