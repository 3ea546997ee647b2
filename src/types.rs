//! Shared types serialized between pipeline stages.
//!
//! The scan stage writes a [`Manifest`] as JSON; the generate stage reads
//! the same structure back.

use crate::config::SiteConfig;
use serde::{Deserialize, Serialize};

/// One photo in the portfolio grid.
///
/// Gallery items are declared in `config.toml` as `[[gallery]]` tables and
/// never change at runtime. The position in the list is the lightbox index;
/// `id` is only an identity for load tracking and must be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageItem {
    pub id: u32,
    /// Path relative to the assets directory. May be empty, in which case
    /// the placeholder image is shown.
    #[serde(default)]
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub category: String,
}

/// The about section, read from `about.md` in the content root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutPage {
    /// Title from the first `# heading`, or the configured heading.
    pub title: String,
    /// Markdown body with the title heading removed.
    pub body: String,
}

/// Manifest written by the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub config: SiteConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutPage>,
    /// Files under the assets directory, relative to it, sorted.
    #[serde(default)]
    pub assets: Vec<String>,
    /// Image references that point at files missing from the assets directory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_images: Vec<String>,
}
