//! Asset path resolution and copying.
//!
//! Every URL the generated page emits goes through [`AssetPaths`], which
//! prefixes it with the deployment base path. This is what lets a site be
//! hosted under a sub-path (`https://user.github.io/portfolio/`) without
//! any link pointing at the host root.
//!
//! Image references in `config.toml` are relative to the content's
//! `assets/` directory, whose files are copied to the output root:
//!
//! ```text
//! content/assets/Neha1.jpg   →   dist/Neha1.jpg   →   {base}/Neha1.jpg
//! ```
//!
//! Absolute URLs (`https://…`, `data:`) are left untouched.

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Name of the static-assets directory inside the content root.
pub const ASSETS_DIR: &str = "assets";

/// Fallback image, relative to the output root.
pub const PLACEHOLDER: &str = "placeholder.svg";

/// URL builder for a given deployment base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    base_path: String,
}

impl AssetPaths {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: normalize_base_path(base_path),
        }
    }

    /// Normalized base path: empty, or `/segment[/segment…]` with no trailing slash.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Prefix a site-relative path with the base path.
    pub fn url(&self, path: &str) -> String {
        if is_external(path) {
            return path.to_string();
        }
        format!("{}/{}", self.base_path, path.trim_start_matches('/'))
    }

    /// Resolved image URL, or the placeholder when `src` is empty.
    pub fn image_or_placeholder(&self, src: &str) -> String {
        if src.trim().is_empty() {
            self.placeholder()
        } else {
            self.url(src.trim())
        }
    }

    pub fn placeholder(&self) -> String {
        self.url(PLACEHOLDER)
    }

    /// Site root URL, always with a trailing slash.
    pub fn root(&self) -> String {
        format!("{}/", self.base_path)
    }
}

/// Normalize a raw base path: trims whitespace and slashes, then adds a
/// single leading slash. `""`, `"/"` and `"  "` all become `""`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

/// True for references that must not be prefixed.
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("data:")
        || path.starts_with("//")
}

/// List every non-hidden file under `dir`, relative to it, sorted.
///
/// A missing directory yields an empty list.
pub fn list_assets(dir: &Path) -> io::Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_entry(|e| !is_hidden(e)) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry.path().strip_prefix(dir).unwrap_or(entry.path());
            files.push(rel.to_string_lossy().replace('\\', "/"));
        }
    }
    files.sort();
    Ok(files)
}

/// Copy every non-hidden file under `src` into `dst`, preserving layout.
/// Returns the number of files copied.
pub fn copy_assets(src: &Path, dst: &Path) -> io::Result<usize> {
    let mut copied = 0;
    for rel in list_assets(src)? {
        let target = dst.join(&rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(src.join(&rel), &target)?;
        log::debug!("copied asset {}", rel);
        copied += 1;
    }
    Ok(copied)
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
