//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root and is layered on top of stock defaults, so it only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! [site]
//! title = "Photography Portfolio"
//! name = "Your Name"           # Hero headline; the last word is accented
//! brand = ""                   # Nav logo text (defaults to the first name, uppercased)
//! tagline = "…"
//! description = "…"            # <meta name="description"> and Open Graph
//! keywords = ["photography"]
//! url = ""                     # Canonical URL for Open Graph
//! locale = "en_US"
//! og_image = "og-image.jpg"    # Relative to assets/
//! portfolio_heading = "SELECTED WORKS"
//! base_path = ""               # Sub-path the site is hosted under
//! # copyright_year = 2025      # Omit for the current year
//!
//! [hero]
//! images = ["hero-1.jpg", "hero-2.jpg"]
//! interval_ms = 7000
//! fade_ms = 1000
//! parallax_factor = 0.5
//!
//! [[gallery]]
//! id = 1
//! src = "portrait.jpg"
//! alt = "Portrait Photography"
//! caption = "Editorial Portrait Series"
//! category = "Portrait"
//!
//! [about]
//! heading = "ABOUT"
//! paragraphs = ["…"]           # Used when there is no about.md
//!
//! [contact]
//! heading = "LET'S CREATE"
//! blurb = "…"
//! email = "hello@example.com"
//! email_label = "EMAIL"
//! messaging_url = "https://wa.me/1234567890"
//! messaging_label = "WHATSAPP"
//!
//! [colors]
//! background = "#0B0B0B"
//! surface = "#121212"
//! text = "#F5F5F5"
//! text_muted = "#CFCFCF"
//! accent = "#C5A572"
//! ```
//!
//! ## Base Path
//!
//! `site.base_path` can be overridden at build time by the
//! `SIMPLE_FOLIO_BASE_PATH` environment variable, and both are overridden by
//! the `--base-path` flag. See [`apply_base_path_override`].
//!
//! Unknown keys are rejected to catch typos early.

use crate::assets::normalize_base_path;
use crate::controller::slideshow::{
    DEFAULT_FADE_MS, DEFAULT_INTERVAL_MS, DEFAULT_PARALLAX_FACTOR, SlideshowSettings,
};
use crate::types::ImageItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable that overrides `site.base_path` at build time.
pub const BASE_PATH_ENV: &str = "SIMPLE_FOLIO_BASE_PATH";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity, metadata and deployment settings.
    pub site: SiteInfo,
    /// Hero slideshow images and timing.
    pub hero: HeroConfig,
    /// Portfolio grid, in display order.
    pub gallery: Vec<ImageItem>,
    /// About section fallback text.
    pub about: AboutConfig,
    /// Contact section and outbound links.
    pub contact: ContactConfig,
    /// Palette, emitted as CSS custom properties.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hero.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "hero.interval_ms must be greater than zero".into(),
            ));
        }
        if !self.hero.parallax_factor.is_finite() || self.hero.parallax_factor < 0.0 {
            return Err(ConfigError::Validation(
                "hero.parallax_factor must be a non-negative number".into(),
            ));
        }
        let mut ids = BTreeSet::new();
        for item in &self.gallery {
            if !ids.insert(item.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate gallery id {}",
                    item.id
                )));
            }
        }
        validate_base_path(&self.site.base_path)?;
        Ok(())
    }

    /// Nav logo text: `site.brand`, or the first word of the name uppercased.
    pub fn brand(&self) -> String {
        let brand = self.site.brand.trim();
        if !brand.is_empty() {
            return brand.to_string();
        }
        self.site
            .name
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_uppercase()
    }

    /// Hero headline split into a plain part and an accented last word.
    pub fn headline(&self) -> (String, Option<String>) {
        let words: Vec<&str> = self.site.name.split_whitespace().collect();
        match words.split_last() {
            Some((last, rest)) if !rest.is_empty() => {
                (rest.join(" ").to_uppercase(), Some(last.to_uppercase()))
            }
            Some((only, _)) => (only.to_uppercase(), None),
            None => (String::new(), None),
        }
    }
}

/// Site identity and page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    /// Document `<title>` and Open Graph title.
    pub title: String,
    /// Photographer name, shown in the hero headline and footer.
    pub name: String,
    /// Nav logo text. Empty means "first word of `name`, uppercased".
    pub brand: String,
    /// Line under the hero headline.
    pub tagline: String,
    /// Meta and Open Graph description.
    pub description: String,
    /// Meta keywords.
    pub keywords: Vec<String>,
    /// Canonical site URL for Open Graph. Empty to omit.
    pub url: String,
    /// Open Graph locale.
    pub locale: String,
    /// Social preview image, relative to the assets directory. Empty to omit.
    pub og_image: String,
    /// Heading above the portfolio grid.
    pub portfolio_heading: String,
    /// Footer year; `None` means the year of the build.
    pub copyright_year: Option<i32>,
    /// Sub-path the site is served from, e.g. `/portfolio`.
    pub base_path: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Photography Portfolio".to_string(),
            name: "Your Name".to_string(),
            brand: String::new(),
            tagline: "Capturing moments that transcend the ordinary".to_string(),
            description: "Photography portfolio".to_string(),
            keywords: vec!["photography".to_string(), "portfolio".to_string()],
            url: String::new(),
            locale: "en_US".to_string(),
            og_image: String::new(),
            portfolio_heading: "SELECTED WORKS".to_string(),
            copyright_year: None,
            base_path: String::new(),
        }
    }
}

/// Hero slideshow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Slides in order, relative to the assets directory. Repeats are kept.
    pub images: Vec<String>,
    /// Milliseconds each slide stays up.
    pub interval_ms: u64,
    /// Cross-fade duration in milliseconds.
    pub fade_ms: u64,
    /// Parallax offset per pixel scrolled.
    pub parallax_factor: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            interval_ms: DEFAULT_INTERVAL_MS,
            fade_ms: DEFAULT_FADE_MS,
            parallax_factor: DEFAULT_PARALLAX_FACTOR,
        }
    }
}

impl HeroConfig {
    pub fn settings(&self) -> SlideshowSettings {
        SlideshowSettings {
            interval_ms: self.interval_ms,
            fade_ms: self.fade_ms,
            parallax_factor: self.parallax_factor,
        }
    }
}

/// About section settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AboutConfig {
    pub heading: String,
    /// Plain paragraphs used when the content root has no `about.md`.
    pub paragraphs: Vec<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            heading: "ABOUT".to_string(),
            paragraphs: Vec::new(),
        }
    }
}

/// Contact section settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub heading: String,
    pub blurb: String,
    /// Address for the `mailto:` button. Empty hides the button.
    pub email: String,
    pub email_label: String,
    /// Messaging deep link (e.g. `https://wa.me/…`). Empty hides the button.
    pub messaging_url: String,
    pub messaging_label: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            heading: "LET'S CREATE".to_string(),
            blurb: "Ready to bring your vision to life? Let's discuss your next project."
                .to_string(),
            email: String::new(),
            email_label: "EMAIL".to_string(),
            messaging_url: String::new(),
            messaging_label: "WHATSAPP".to_string(),
        }
    }
}

/// Page palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Page background.
    pub background: String,
    /// Alternate section background and grid placeholder.
    pub surface: String,
    /// Primary text.
    pub text: String,
    /// Body copy and secondary text.
    pub text_muted: String,
    /// Highlights, hover states and the accented headline word.
    pub accent: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#0B0B0B".to_string(),
            surface: "#121212".to_string(),
            text: "#F5F5F5".to_string(),
            text_muted: "#CFCFCF".to_string(),
            accent: "#C5A572".to_string(),
        }
    }
}

fn validate_base_path(base_path: &str) -> Result<(), ConfigError> {
    if base_path.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "site.base_path must not contain whitespace: {:?}",
            base_path
        )));
    }
    if base_path.contains("://") {
        return Err(ConfigError::Validation(format!(
            "site.base_path must be a path, not a URL: {:?}",
            base_path
        )));
    }
    Ok(())
}

/// Apply the deployment base path override.
///
/// Precedence: `cli` flag, then `env` (the value of [`BASE_PATH_ENV`]), then
/// whatever `config.toml` set. The winning value is normalized and stored
/// back into `config.site.base_path`.
pub fn apply_base_path_override(
    config: &mut SiteConfig,
    cli: Option<&str>,
    env: Option<&str>,
) -> Result<(), ConfigError> {
    let raw = cli.or(env).unwrap_or(&config.site.base_path).trim().to_string();
    validate_base_path(&raw)?;
    config.site.base_path = normalize_base_path(&raw);
    Ok(())
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# simple-folio configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Place this file at content/config.toml. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity and metadata
# ---------------------------------------------------------------------------
[site]
title = "Photography Portfolio"

# Hero headline. The last word is shown in the accent color.
name = "Your Name"

# Nav logo text. Empty means the first word of `name`, uppercased.
brand = ""

tagline = "Capturing moments that transcend the ordinary"
description = "Photography portfolio"
keywords = ["photography", "portfolio"]

# Canonical URL used in Open Graph tags. Empty to omit.
url = ""
locale = "en_US"

# Social preview image (1200x630), relative to assets/. Empty to omit.
og_image = ""

portfolio_heading = "SELECTED WORKS"

# Footer year. Omit to use the year of the build.
# copyright_year = 2025

# Sub-path the site is hosted under, e.g. "/portfolio" for project pages.
# Overridden by SIMPLE_FOLIO_BASE_PATH and by --base-path.
base_path = ""

# ---------------------------------------------------------------------------
# Hero slideshow
# ---------------------------------------------------------------------------
[hero]
# Slides in order, relative to assets/. Repeated entries are kept as-is.
images = []

# Milliseconds each slide stays up before rotating.
interval_ms = 7000

# Cross-fade duration in milliseconds.
fade_ms = 1000

# Background offset per pixel scrolled. 0 disables the parallax effect.
parallax_factor = 0.5

# ---------------------------------------------------------------------------
# About section (used when content/about.md is absent)
# ---------------------------------------------------------------------------
[about]
heading = "ABOUT"
paragraphs = []

# ---------------------------------------------------------------------------
# Contact section. Empty email / messaging_url hides that button.
# ---------------------------------------------------------------------------
[contact]
heading = "LET'S CREATE"
blurb = "Ready to bring your vision to life? Let's discuss your next project."
email = ""
email_label = "EMAIL"
messaging_url = ""
messaging_label = "WHATSAPP"

# ---------------------------------------------------------------------------
# Colors
# ---------------------------------------------------------------------------
[colors]
background = "#0B0B0B"
surface = "#121212"
text = "#F5F5F5"
text_muted = "#CFCFCF"
accent = "#C5A572"

# ---------------------------------------------------------------------------
# Portfolio grid, in display order. Ids must be unique.
# An empty src shows the placeholder image.
# ---------------------------------------------------------------------------
# [[gallery]]
# id = 1
# src = "portrait.jpg"
# alt = "Portrait Photography"
# caption = "Editorial Portrait Series"
# category = "Portrait"
"##
}

/// Generate CSS custom properties from color and hero config.
pub fn generate_theme_css(colors: &ColorConfig, hero: &HeroConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --fade-duration: {fade_ms}ms;
}}"#,
        background = colors.background,
        surface = colors.surface,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        fade_ms = hero.fade_ms,
    )
}
