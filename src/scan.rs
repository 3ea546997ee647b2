//! Content directory scanning and manifest generation.
//!
//! Stage 1 of the simple-folio build pipeline. Reads the content root and
//! produces a [`Manifest`] the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                 # Content root
//! ├── config.toml          # Site configuration (hero list, gallery, copy)
//! ├── about.md             # About section (optional)
//! └── assets/              # Copied verbatim to the output root
//!     ├── Vagabondo1.jpg
//!     ├── Neha1.jpg
//!     └── og-image.jpg
//! ```
//!
//! Images are not discovered by walking the tree: the hero list and the
//! gallery are declared in `config.toml`. The scan only inventories
//! `assets/` so that references to files that do not exist can be reported.
//! A missing image is not an error; the page falls back to the placeholder.

use crate::assets::{self, ASSETS_DIR};
use crate::config::{self, SiteConfig};
use crate::types::{AboutPage, Manifest};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the about page inside the content root.
pub const ABOUT_FILE: &str = "about.md";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Content directory not found: {0}")]
    MissingRoot(String),
}

/// Scan a content root.
///
/// `cli_base_path` and `env_base_path` override `site.base_path`, in that
/// order of precedence.
pub fn scan(
    root: &Path,
    cli_base_path: Option<&str>,
    env_base_path: Option<&str>,
) -> Result<Manifest, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::MissingRoot(root.display().to_string()));
    }

    let mut config = config::load_config(root)?;
    config::apply_base_path_override(&mut config, cli_base_path, env_base_path)?;
    log::debug!("base path resolved to {:?}", config.site.base_path);

    let about = parse_about(root, &config)?;
    let assets = assets::list_assets(&root.join(ASSETS_DIR))?;
    let missing_images = find_missing_images(&config, &assets);
    for missing in &missing_images {
        log::warn!("image not found in {}/: {}", ASSETS_DIR, missing);
    }

    Ok(Manifest {
        config,
        about,
        assets,
        missing_images,
    })
}

/// Read `about.md` if present.
///
/// The first `# heading` becomes the title and is removed from the body;
/// without one the configured `[about] heading` is used.
fn parse_about(root: &Path, config: &SiteConfig) -> Result<Option<AboutPage>, ScanError> {
    let path = root.join(ABOUT_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&path)?;
    Ok(Some(split_title(&content, &config.about.heading)))
}

fn split_title(content: &str, fallback: &str) -> AboutPage {
    let mut title = None;
    let mut body = Vec::new();
    for line in content.lines() {
        if title.is_none()
            && let Some(heading) = line.strip_prefix("# ")
        {
            title = Some(heading.trim().to_string());
            continue;
        }
        body.push(line);
    }
    AboutPage {
        title: title.unwrap_or_else(|| fallback.to_string()),
        body: body.join("\n").trim().to_string(),
    }
}

/// Every local image reference (hero, gallery, social preview) with no
/// matching file under `assets/`, in first-reference order, deduplicated.
fn find_missing_images(config: &SiteConfig, assets: &[String]) -> Vec<String> {
    let available: BTreeSet<&str> = assets.iter().map(String::as_str).collect();
    let references = config
        .hero
        .images
        .iter()
        .chain(config.gallery.iter().map(|item| &item.src))
        .chain(std::iter::once(&config.site.og_image));

    let mut seen = BTreeSet::new();
    let mut missing = Vec::new();
    for reference in references {
        let reference = reference.trim().trim_start_matches('/');
        if reference.is_empty() || assets::is_external(reference) {
            continue;
        }
        if !available.contains(reference) && seen.insert(reference.to_string()) {
            missing.push(reference.to_string());
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn scan_reads_fixture_config() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), None, None).unwrap();

        assert_eq!(manifest.config.site.name, "Leon Karsten");
        assert_eq!(manifest.config.hero.images.len(), 10);
        assert_eq!(gallery_captions(&manifest).len(), 6);
    }

    #[test]
    fn hero_duplicates_survive_scan() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), None, None).unwrap();
        let hero = &manifest.config.hero.images;
        assert_eq!(hero[0], hero[6]);
        assert_eq!(hero[1], hero[7]);
    }

    #[test]
    fn gallery_order_matches_config() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), None, None).unwrap();
        assert_eq!(
            gallery_captions(&manifest),
            vec![
                "Editorial Portrait Series",
                "Urban Minimalism",
                "Fashion Editorial",
                "Street Stories",
                "Abstract Forms",
                "Moody Landscapes",
            ]
        );
    }

    #[test]
    fn about_title_from_heading() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), None, None).unwrap();
        let about = manifest.about.expect("fixture has about.md");
        assert_eq!(about.title, "ABOUT");
        assert!(!about.body.starts_with("# "));
        assert!(about.body.contains("Leon Karsten"));
    }

    #[test]
    fn about_absent_without_file() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join(ABOUT_FILE)).unwrap();
        let manifest = scan(tmp.path(), None, None).unwrap();
        assert!(manifest.about.is_none());
    }

    #[test]
    fn split_title_falls_back_to_heading() {
        let page = split_title("Just text.\n\nMore.", "ABOUT ME");
        assert_eq!(page.title, "ABOUT ME");
        assert_eq!(page.body, "Just text.\n\nMore.");
    }

    #[test]
    fn split_title_only_first_heading() {
        let page = split_title("# One\n\nBody\n# Two", "x");
        assert_eq!(page.title, "One");
        assert_eq!(page.body, "Body\n# Two");
    }

    #[test]
    fn assets_inventoried() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), None, None).unwrap();
        assert!(manifest.assets.contains(&"Vagabondo1.svg".to_string()));
        assert!(manifest.missing_images.is_empty());
    }

    #[test]
    fn missing_images_reported_once() {
        let tmp = setup_fixtures();
        fs::remove_file(tmp.path().join("assets/Neha1.svg")).unwrap();
        let manifest = scan(tmp.path(), None, None).unwrap();
        // Neha1 appears twice in the hero list and once in the gallery
        assert_eq!(manifest.missing_images, vec!["Neha1.svg"]);
    }

    #[test]
    fn external_and_empty_sources_not_missing() {
        let mut config = SiteConfig::default();
        config.hero.images = vec!["https://cdn.example.com/a.jpg".into(), "".into()];
        assert!(find_missing_images(&config, &[]).is_empty());
    }

    #[test]
    fn base_path_override_applied() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path(), None, Some("/photografiLeon/")).unwrap();
        assert_eq!(manifest.config.site.base_path, "/photografiLeon");

        let manifest = scan(tmp.path(), Some("/cli"), Some("/env")).unwrap();
        assert_eq!(manifest.config.site.base_path, "/cli");
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = setup_fixtures();
        let result = scan(&tmp.path().join("nope"), None, None);
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }

    #[test]
    fn invalid_config_is_error() {
        let tmp = setup_fixtures();
        fs::write(tmp.path().join("config.toml"), "[hero]\nparallax = 1\n").unwrap();
        let result = scan(tmp.path(), None, None);
        assert!(matches!(result, Err(ScanError::Config(_))));
    }
}
