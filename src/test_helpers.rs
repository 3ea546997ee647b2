//! Shared test utilities for the simple-folio test suite.
//!
//! Provides fixture setup, bulk extractors over scan output, and small
//! HTML probes for generate-stage assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path(), None, None).unwrap();
//!
//! assert_eq!(gallery_captions(&manifest)[0], "Editorial Portrait Series");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::Manifest;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All gallery captions in display order.
pub fn gallery_captions(manifest: &Manifest) -> Vec<&str> {
    manifest
        .config
        .gallery
        .iter()
        .map(|item| item.caption.as_str())
        .collect()
}

// =========================================================================
// HTML probes
// =========================================================================

/// Number of non-overlapping occurrences of `needle` in `html`.
pub fn count_occurrences(html: &str, needle: &str) -> usize {
    html.matches(needle).count()
}

/// Assert `html` contains `needle`, showing a snippet of the page on failure.
pub fn assert_contains(html: &str, needle: &str) {
    assert!(
        html.contains(needle),
        "expected to find {needle:?} in:\n{}",
        html.chars().take(2000).collect::<String>()
    );
}
