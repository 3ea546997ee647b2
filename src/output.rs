//! CLI output formatting for all pipeline stages.
//!
//! Output is **information-centric, not file-centric**: every slide and
//! photo leads with its positional index and its caption or file name, with
//! sources and warnings shown as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Hero (10 slides)
//!     001 Vagabondo1.jpg
//!     002 Neha1.jpg
//!
//! Gallery (6 photos)
//!     001 Editorial Portrait Series [Portrait]
//!         Source: Vagabondo1.jpg
//!
//! About
//!     ABOUT
//!         Source: about.md
//!
//! Config
//!     config.toml
//!     assets/ (12 files)
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//!     Hero starts at 004 Vagabondo1.jpg
//! 001 Editorial Portrait Series → photos/1/index.html
//!
//! Generated 1 page, 6 photo pages, copied 12 assets
//! ```
//!
//! ## Check
//!
//! ```text
//! Warning: image not found in assets/: Neha9.jpg
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::generate::GenerateReport;
use crate::types::{ImageItem, Manifest};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a section header with an optional count.
///
/// ```text
/// Hero (10 slides)
/// Gallery (1 photo)
/// ```
fn section_header(title: &str, count: usize, noun: &str) -> String {
    format!("{} ({})", title, plural(count, noun))
}

/// Format a gallery line: captioned items show caption (and category),
/// uncaptioned show the source in parens.
///
/// ```text
/// 001 Urban Minimalism [Architecture]
/// 002 (Neha1.jpg)
/// 003 (placeholder)
/// ```
fn gallery_line(index: usize, item: &ImageItem) -> String {
    let label = match (item.caption.as_str(), item.src.as_str()) {
        ("", "") => "(placeholder)".to_string(),
        ("", src) => format!("({})", src),
        (caption, _) => caption.to_string(),
    };
    if item.category.is_empty() {
        format!("{} {}", format_index(index), label)
    } else {
        format!("{} {} [{}]", format_index(index), label, item.category)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the declared site content.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let config = &manifest.config;
    let mut lines = Vec::new();

    // Hero
    let hero = &config.hero.images;
    lines.push(section_header("Hero", hero.len(), "slide"));
    for (i, src) in hero.iter().enumerate() {
        let name = if src.is_empty() { "(placeholder)" } else { src };
        lines.push(format!("{}{} {}", indent(1), format_index(i + 1), name));
    }

    // Gallery
    lines.push(String::new());
    lines.push(section_header("Gallery", config.gallery.len(), "photo"));
    for (i, item) in config.gallery.iter().enumerate() {
        lines.push(format!("{}{}", indent(1), gallery_line(i + 1, item)));
        if !item.caption.is_empty() && !item.src.is_empty() {
            lines.push(format!("{}Source: {}", indent(2), item.src));
        }
    }

    // About
    lines.push(String::new());
    lines.push("About".to_string());
    match &manifest.about {
        Some(about) => {
            lines.push(format!("{}{}", indent(1), about.title));
            lines.push(format!("{}Source: {}", indent(2), crate::scan::ABOUT_FILE));
        }
        None if !config.about.paragraphs.is_empty() => {
            lines.push(format!("{}{}", indent(1), config.about.heading));
            let first = truncate_desc(config.about.paragraphs[0].trim(), 60);
            lines.push(format!("{}{}", indent(2), first));
        }
        None => lines.push(format!("{}(none)", indent(1))),
    }

    // Config
    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    }
    if !manifest.assets.is_empty() {
        lines.push(format!(
            "{}{}/ ({})",
            indent(1),
            crate::assets::ASSETS_DIR,
            plural(manifest.assets.len(), "file")
        ));
    }
    if !config.site.base_path.is_empty() {
        lines.push(format!("{}Base path: {}", indent(1), config.site.base_path));
    }

    lines.extend(format_check_output(manifest));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Warnings for the manifest. Empty when there is nothing to report.
pub fn format_check_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();
    if manifest.missing_images.is_empty() {
        return lines;
    }
    lines.push(String::new());
    for missing in &manifest.missing_images {
        lines.push(format!(
            "Warning: image not found in {}/: {}",
            crate::assets::ASSETS_DIR,
            missing
        ));
    }
    lines
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output, mapping each entity to the page it produced.
pub fn format_generate_output(manifest: &Manifest, report: &GenerateReport) -> Vec<String> {
    let config = &manifest.config;
    let mut lines = Vec::new();

    lines.push("Home → index.html".to_string());
    if let Some(active) = report.active_slide
        && let Some(src) = config.hero.images.get(active)
    {
        lines.push(format!(
            "{}Hero starts at {} {}",
            indent(1),
            format_index(active + 1),
            src
        ));
    }

    let photo_pages: Vec<&String> = report
        .pages
        .iter()
        .filter(|page| page.as_str() != "index.html")
        .collect();
    for (i, (item, page)) in config.gallery.iter().zip(&photo_pages).enumerate() {
        lines.push(format!("{} → {}", gallery_line(i + 1, item), page));
    }

    lines.push(String::new());
    let mut summary = format!(
        "Generated 1 page, {}, copied {}",
        plural(photo_pages.len(), "photo page"),
        plural(report.assets_copied, "asset")
    );
    if report.placeholder_written {
        summary.push_str(", wrote placeholder");
    }
    lines.push(summary);
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, report: &GenerateReport) {
    for line in format_generate_output(manifest, report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::types::AboutPage;
    use std::path::PathBuf;

    fn item(id: u32, src: &str, caption: &str, category: &str) -> ImageItem {
        ImageItem {
            id,
            src: src.to_string(),
            alt: String::new(),
            caption: caption.to_string(),
            category: category.to_string(),
        }
    }

    fn manifest() -> Manifest {
        let mut config = SiteConfig::default();
        config.hero.images = vec!["Vagabondo1.jpg".into(), "Neha1.jpg".into()];
        config.gallery = vec![
            item(1, "Vagabondo1.jpg", "Editorial Portrait Series", "Portrait"),
            item(2, "Neha1.jpg", "", ""),
        ];
        Manifest {
            config,
            about: None,
            assets: vec!["Neha1.jpg".into(), "Vagabondo1.jpg".into()],
            missing_images: Vec::new(),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_single_digit() {
        assert_eq!(format_index(1), "001");
    }

    #[test]
    fn format_index_triple_digit() {
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn section_header_pluralizes() {
        assert_eq!(section_header("Hero", 10, "slide"), "Hero (10 slides)");
        assert_eq!(section_header("Gallery", 1, "photo"), "Gallery (1 photo)");
    }

    #[test]
    fn gallery_line_variants() {
        assert_eq!(
            gallery_line(1, &item(1, "a.jpg", "Urban Minimalism", "Architecture")),
            "001 Urban Minimalism [Architecture]"
        );
        assert_eq!(gallery_line(2, &item(2, "a.jpg", "", "")), "002 (a.jpg)");
        assert_eq!(gallery_line(3, &item(3, "", "", "")), "003 (placeholder)");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(50);
        assert_eq!(truncate_desc(&text, 40), format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn truncate_desc_multibyte_safe() {
        assert_eq!(truncate_desc("ééé", 2), "éé...");
    }

    // =========================================================================
    // Scan output
    // =========================================================================

    #[test]
    fn scan_output_lists_hero_and_gallery() {
        let lines = format_scan_output(&manifest(), Path::new("/nonexistent"));
        assert_eq!(lines[0], "Hero (2 slides)");
        assert_eq!(lines[1], "    001 Vagabondo1.jpg");
        assert!(lines.contains(&"Gallery (2 photos)".to_string()));
        assert!(lines.contains(&"    001 Editorial Portrait Series [Portrait]".to_string()));
        assert!(lines.contains(&"        Source: Vagabondo1.jpg".to_string()));
        assert!(lines.contains(&"    002 (Neha1.jpg)".to_string()));
        assert!(lines.contains(&"    assets/ (2 files)".to_string()));
    }

    #[test]
    fn scan_output_about_from_markdown() {
        let mut m = manifest();
        m.about = Some(AboutPage {
            title: "ABOUT".to_string(),
            body: "text".to_string(),
        });
        let lines = format_scan_output(&m, Path::new("/nonexistent"));
        assert!(lines.contains(&"        Source: about.md".to_string()));
    }

    #[test]
    fn scan_output_about_none() {
        let lines = format_scan_output(&manifest(), Path::new("/nonexistent"));
        assert!(lines.contains(&"    (none)".to_string()));
    }

    #[test]
    fn scan_output_shows_base_path() {
        let mut m = manifest();
        m.config.site.base_path = "/folio".to_string();
        let lines = format_scan_output(&m, Path::new("/nonexistent"));
        assert!(lines.contains(&"    Base path: /folio".to_string()));
    }

    // =========================================================================
    // Check output
    // =========================================================================

    #[test]
    fn check_output_empty_when_clean() {
        assert!(format_check_output(&manifest()).is_empty());
    }

    #[test]
    fn check_output_lists_missing() {
        let mut m = manifest();
        m.missing_images = vec!["Neha9.jpg".to_string()];
        let lines = format_check_output(&m);
        assert_eq!(lines[1], "Warning: image not found in assets/: Neha9.jpg");
    }

    // =========================================================================
    // Generate output
    // =========================================================================

    #[test]
    fn generate_output_maps_items_to_pages() {
        let report = GenerateReport {
            output_dir: PathBuf::from("dist"),
            pages: vec![
                "index.html".to_string(),
                "photos/1/index.html".to_string(),
                "photos/2/index.html".to_string(),
            ],
            assets_copied: 2,
            active_slide: Some(1),
            placeholder_written: true,
        };
        let lines = format_generate_output(&manifest(), &report);
        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "    Hero starts at 002 Neha1.jpg");
        assert_eq!(
            lines[2],
            "001 Editorial Portrait Series [Portrait] → photos/1/index.html"
        );
        assert_eq!(lines[3], "002 (Neha1.jpg) → photos/2/index.html");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 1 page, 2 photo pages, copied 2 assets, wrote placeholder"
        );
    }

    #[test]
    fn generate_output_without_hero() {
        let mut m = manifest();
        m.config.hero.images.clear();
        m.config.gallery.clear();
        let report = GenerateReport {
            pages: vec!["index.html".to_string()],
            assets_copied: 1,
            ..Default::default()
        };
        let lines = format_generate_output(&m, &report);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2], "Generated 1 page, 0 photo pages, copied 1 asset");
    }
}
