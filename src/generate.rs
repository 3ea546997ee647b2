//! HTML site generation.
//!
//! Stage 2 of the simple-folio build pipeline. Takes the scan manifest and
//! writes the final static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): nav, hero slideshow, portfolio grid,
//!   about, contact, footer, and the (hidden) lightbox markup
//! - **Photo pages** (`/photos/{n}/index.html`): one per gallery item, a
//!   script-free version of the lightbox with prev/next/close links
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── photos/
//! │   ├── 1/index.html
//! │   └── 2/index.html
//! ├── placeholder.svg        # Unless assets/ ships its own
//! ├── robots.txt
//! ├── Vagabondo1.jpg         # Copied from content/assets/
//! └── ...
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into each page:
//! - `static/style.css`: Base styles (colors injected from config)
//! - `static/folio.js`: Slideshow, lightbox, and photo-page keyboard nav
//!
//! The script reads its data from a JSON block
//! (`<script type="application/json" id="folio-config">`) so that no URL is
//! computed on the client.
//!
//! ## Build-time state
//!
//! The hero slide marked active in the HTML is `seeded(len, minute)` at the
//! moment of the build, and the photo pages' links come from the lightbox
//! transitions, so the page is coherent before (or without) scripts.

use crate::assets::{self, ASSETS_DIR, AssetPaths, PLACEHOLDER};
use crate::config::{self, SiteConfig};
use crate::controller::lightbox::{self, LightboxEvent, LightboxState};
use crate::controller::slideshow::{SlideshowSettings, SlideshowState};
use crate::types::{AboutPage, ImageItem, Manifest};
use chrono::{Datelike, Local, Timelike};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/folio.js");
const PLACEHOLDER_SVG: &str = include_str!("../static/placeholder.svg");

/// Directory holding the per-photo pages.
pub const PHOTOS_DIR: &str = "photos";

/// Wall-clock values baked into the page at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildClock {
    pub minute: u32,
    pub year: i32,
}

impl BuildClock {
    pub fn now() -> Self {
        let now = Local::now();
        Self {
            minute: now.minute(),
            year: now.year(),
        }
    }
}

/// What the generate stage wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub output_dir: PathBuf,
    /// Pages written, relative to the output directory.
    pub pages: Vec<String>,
    pub assets_copied: usize,
    /// Hero slide marked active in the HTML.
    pub active_slide: Option<usize>,
    pub placeholder_written: bool,
}

/// Read the manifest written by the scan stage.
pub fn load_manifest(manifest_path: &Path) -> Result<Manifest, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    Ok(serde_json::from_str(&manifest_content)?)
}

/// Write the site for an already-loaded manifest.
pub fn generate_site(
    manifest: &Manifest,
    source_dir: &Path,
    output_dir: &Path,
    clock: BuildClock,
) -> Result<GenerateReport, GenerateError> {
    let config = &manifest.config;
    let paths = AssetPaths::new(&config.site.base_path);
    let css = build_css(config);

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport {
        output_dir: output_dir.to_path_buf(),
        ..Default::default()
    };

    report.assets_copied = assets::copy_assets(&source_dir.join(ASSETS_DIR), output_dir)?;

    let placeholder_path = output_dir.join(PLACEHOLDER);
    if !placeholder_path.exists() {
        fs::write(&placeholder_path, PLACEHOLDER_SVG)?;
        report.placeholder_written = true;
    }

    fs::write(output_dir.join("robots.txt"), render_robots(config))?;

    let slideshow = SlideshowState::seeded(config.hero.images.len(), clock.minute);
    if !slideshow.is_empty() {
        report.active_slide = Some(slideshow.active_index());
    }

    let index_html = render_index(manifest, &paths, &css, &slideshow, clock.year)?;
    fs::write(output_dir.join("index.html"), index_html.into_string())?;
    report.pages.push("index.html".to_string());
    log::debug!("wrote index.html");

    let items = &config.gallery;
    for index in 0..items.len() {
        let closed = LightboxState::closed(items.len());
        let state = lightbox::transition(closed, LightboxEvent::Open(index));
        let Some(page) = render_photo_page(config, &paths, &css, &state) else {
            continue;
        };
        let rel = photo_page_path(index);
        let page_dir = output_dir.join(&rel);
        fs::create_dir_all(&page_dir)?;
        fs::write(page_dir.join("index.html"), page.into_string())?;
        report.pages.push(format!("{}/index.html", rel));
        log::debug!("wrote {}/index.html", rel);
    }

    Ok(report)
}

/// `photos/{n}` for a 0-based gallery index.
pub fn photo_page_path(index: usize) -> String {
    format!("{}/{}", PHOTOS_DIR, index + 1)
}

fn build_css(config: &SiteConfig) -> String {
    let theme_css = config::generate_theme_css(&config.colors, &config.hero);
    format!("{}\n\n{}", theme_css, CSS_STATIC)
}

fn render_robots(config: &SiteConfig) -> String {
    let mut robots = String::from("User-agent: *\nAllow: /\n");
    if !config.site.url.is_empty() {
        robots.push_str(&format!(
            "\nSitemap: {}/\n",
            config.site.url.trim_end_matches('/')
        ));
    }
    robots
}

// ============================================================================
// Client configuration
// ============================================================================

/// Data handed to `folio.js`. Every URL is already base-path resolved.
#[derive(Debug, Serialize)]
struct ClientConfig<'a> {
    hero: Vec<String>,
    settings: SlideshowSettings,
    gallery: Vec<ClientItem<'a>>,
    placeholder: String,
}

#[derive(Debug, Serialize)]
struct ClientItem<'a> {
    id: u32,
    src: String,
    alt: &'a str,
    caption: &'a str,
    category: &'a str,
    page: String,
}

fn client_config_json(config: &SiteConfig, paths: &AssetPaths) -> Result<String, GenerateError> {
    let client = ClientConfig {
        hero: config
            .hero
            .images
            .iter()
            .map(|src| paths.image_or_placeholder(src))
            .collect(),
        settings: config.hero.settings(),
        gallery: config
            .gallery
            .iter()
            .enumerate()
            .map(|(index, item)| ClientItem {
                id: item.id,
                src: paths.image_or_placeholder(&item.src),
                alt: &item.alt,
                caption: &item.caption,
                category: &item.category,
                page: paths.url(&format!("{}/", photo_page_path(index))),
            })
            .collect(),
        placeholder: paths.placeholder(),
    };
    // No raw `<` inside the script element: covers `</script>` and `<!--`.
    Ok(serde_json::to_string(&client)?.replace('<', "\\u003c"))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Title, description and social tags shared by every page.
fn page_head(config: &SiteConfig, paths: &AssetPaths, title: &str) -> Markup {
    let site = &config.site;
    let keywords = site.keywords.join(", ");
    let og_image = (!site.og_image.is_empty()).then(|| absolute_url(site, paths, &site.og_image));
    let og_url = (!site.url.is_empty()).then_some(site.url.as_str());

    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1.0";
        title { (title) }
        meta name="description" content=(site.description);
        @if !keywords.is_empty() {
            meta name="keywords" content=(keywords);
        }
        meta name="author" content=(site.name);
        meta name="creator" content=(site.name);
        meta name="robots" content="index, follow";
        meta property="og:type" content="website";
        meta property="og:locale" content=(site.locale);
        meta property="og:title" content=(title);
        meta property="og:description" content=(site.description);
        meta property="og:site_name" content=(site.title);
        @if let Some(url) = og_url {
            meta property="og:url" content=(url);
        }
        @if let Some(image) = &og_image {
            meta property="og:image" content=(image);
            meta property="og:image:width" content="1200";
            meta property="og:image:height" content="630";
            meta property="og:image:alt" content=(site.title);
        }
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(title);
        meta name="twitter:description" content=(site.description);
        @if let Some(image) = &og_image {
            meta name="twitter:image" content=(image);
        }
    }
}

/// Social previews want absolute URLs; without `site.url` the best we can
/// do is root-relative.
fn absolute_url(site: &config::SiteInfo, paths: &AssetPaths, path: &str) -> String {
    if site.url.is_empty() || assets::is_external(path) {
        paths.url(path)
    } else {
        format!(
            "{}/{}",
            site.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Renders the base HTML document structure
fn base_document(head: Markup, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                (head)
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Fixed top bar with the brand and the section anchors.
fn site_nav(config: &SiteConfig, home: &str) -> Markup {
    html! {
        nav.site-nav {
            a.brand href={ (home) "#hero" } { (config.brand()) }
            ul.nav-links {
                li { a href={ (home) "#portfolio" } { "PORTFOLIO" } }
                li { a href={ (home) "#about" } { "ABOUT" } }
                li { a href={ (home) "#contact" } { "CONTACT" } }
            }
        }
    }
}

fn hero_section(config: &SiteConfig, paths: &AssetPaths, slideshow: &SlideshowState) -> Markup {
    let (headline, accent) = config.headline();
    html! {
        section.hero #hero {
            div.hero-slides data-parallax=(config.hero.parallax_factor) {
                @for (index, src) in config.hero.images.iter().enumerate() {
                    @let active = index == slideshow.active_index();
                    img.hero-slide.is-active[active]
                        src=(paths.image_or_placeholder(src))
                        alt=""
                        aria-hidden="true"
                        data-index=(index)
                        loading=(if active { "eager" } else { "lazy" });
                }
            }
            div.hero-overlay {}
            div.hero-content {
                h1.hero-title {
                    span { (headline) }
                    @if let Some(accent) = accent {
                        br;
                        span.accent { (accent) }
                    }
                }
                @if !config.site.tagline.is_empty() {
                    p.hero-tagline { (config.site.tagline) }
                }
            }
            a.scroll-cue href="#portfolio" aria-label="Scroll to portfolio" {}
        }
    }
}

fn portfolio_section(config: &SiteConfig, paths: &AssetPaths) -> Markup {
    html! {
        section.portfolio #portfolio {
            h2.section-title { (config.site.portfolio_heading) }
            div.grid {
                @for (index, item) in config.gallery.iter().enumerate() {
                    (grid_tile(paths, index, item))
                }
            }
        }
    }
}

fn grid_tile(paths: &AssetPaths, index: usize, item: &ImageItem) -> Markup {
    html! {
        a.tile href=(paths.url(&format!("{}/", photo_page_path(index))))
            data-index=(index)
            data-id=(item.id) {
            div.tile-placeholder {}
            img.tile-image src=(paths.image_or_placeholder(&item.src)) alt=(item.alt) loading="lazy";
            div.tile-overlay {
                @if !item.category.is_empty() {
                    span.tile-category { (item.category) }
                }
                @if !item.caption.is_empty() {
                    span.tile-caption { (item.caption) }
                }
            }
        }
    }
}

fn about_section(config: &SiteConfig, about: Option<&AboutPage>) -> Markup {
    let title = about.map_or(config.about.heading.as_str(), |page| page.title.as_str());
    html! {
        section.about #about {
            h2.section-title { (title) }
            div.about-body {
                @if let Some(page) = about {
                    (PreEscaped(markdown_to_html(&page.body)))
                } @else {
                    @for paragraph in &config.about.paragraphs {
                        p { (paragraph) }
                    }
                }
            }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

fn contact_section(config: &SiteConfig) -> Markup {
    let contact = &config.contact;
    html! {
        section.contact #contact {
            h2.section-title { (contact.heading) }
            @if !contact.blurb.is_empty() {
                p.contact-blurb { (contact.blurb) }
            }
            div.contact-links {
                @if !contact.email.is_empty() {
                    a.button href={ "mailto:" (contact.email) } { (contact.email_label) }
                }
                @if !contact.messaging_url.is_empty() {
                    a.button.button-outline href=(contact.messaging_url) target="_blank" rel="noopener noreferrer" {
                        (contact.messaging_label)
                    }
                }
            }
        }
    }
}

fn site_footer(config: &SiteConfig, build_year: i32) -> Markup {
    let year = config.site.copyright_year.unwrap_or(build_year);
    html! {
        footer.site-footer {
            p { "© " (year) " " (config.site.name) ". All rights reserved." }
        }
    }
}

/// Modal shell filled in by `folio.js`; hidden until opened.
fn lightbox_shell() -> Markup {
    html! {
        div.lightbox #lightbox hidden role="dialog" aria-modal="true" aria-label="Image viewer" {
            button.lightbox-close type="button" aria-label="Close" { "×" }
            button.lightbox-prev type="button" aria-label="Previous image" { "‹" }
            button.lightbox-next type="button" aria-label="Next image" { "›" }
            figure.lightbox-figure {
                img.lightbox-image src="" alt="";
                figcaption {
                    p.lightbox-caption {}
                    p.lightbox-category {}
                    p.lightbox-counter {}
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the one-page site.
fn render_index(
    manifest: &Manifest,
    paths: &AssetPaths,
    css: &str,
    slideshow: &SlideshowState,
    build_year: i32,
) -> Result<Markup, GenerateError> {
    let config = &manifest.config;
    let client_json = client_config_json(config, paths)?;

    let content = html! {
        (site_nav(config, ""))
        main {
            (hero_section(config, paths, slideshow))
            (portfolio_section(config, paths))
            (about_section(config, manifest.about.as_ref()))
            (contact_section(config))
        }
        (site_footer(config, build_year))
        (lightbox_shell())
        script #folio-config type="application/json" { (PreEscaped(client_json)) }
        script { (PreEscaped(JS)) }
    };

    Ok(base_document(
        page_head(config, paths, &config.site.title),
        css,
        None,
        content,
    ))
}

/// Renders the static page for the lightbox state `state`.
///
/// Returns `None` when the state is closed or out of range.
fn render_photo_page(
    config: &SiteConfig,
    paths: &AssetPaths,
    css: &str,
    state: &LightboxState,
) -> Option<Markup> {
    let items = &config.gallery;
    let view = lightbox::view(state, items, paths)?;
    let prev = lightbox::transition(*state, LightboxEvent::Prev);
    let next = lightbox::transition(*state, LightboxEvent::Next);

    let prev_url = paths.url(&format!("{}/", photo_page_path(prev.active_index())));
    let next_url = paths.url(&format!("{}/", photo_page_path(next.active_index())));
    let close_url = format!("{}#portfolio", paths.root());

    let label = if view.item.caption.is_empty() {
        format!("Photo {}", view.position)
    } else {
        view.item.caption.clone()
    };
    let page_title = format!("{} - {}", label, config.site.title);

    let content = html! {
        (site_nav(config, &paths.root()))
        main.photo-view data-prev=(prev_url) data-next=(next_url) data-close=(close_url) {
            a.lightbox-close href=(close_url) aria-label="Close" { "×" }
            a.lightbox-prev href=(prev_url) aria-label="Previous image" { "‹" }
            a.lightbox-next href=(next_url) aria-label="Next image" { "›" }
            figure.lightbox-figure {
                img.lightbox-image src=(view.src) alt=(view.item.alt);
                figcaption {
                    @if !view.item.caption.is_empty() {
                        p.lightbox-caption { (view.item.caption) }
                    }
                    @if !view.item.category.is_empty() {
                        p.lightbox-category { (view.item.category) }
                    }
                    p.lightbox-counter { (view.position) " / " (view.total) }
                }
            }
        }
        script { (PreEscaped(JS)) }
    };

    Some(base_document(
        page_head(config, paths, &page_title),
        css,
        Some("photo-page"),
        content,
    ))
}

// ============================================================================
// Tests
// ============================================================================
