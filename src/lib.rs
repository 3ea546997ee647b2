//! # Simple Folio
//!
//! A static site generator for one-page photography portfolios: a rotating
//! hero slideshow, a photo grid with a lightbox viewer, and about/contact
//! sections. The output is plain HTML with inlined CSS and a small vanilla
//! script, and can be hosted under any sub-path.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (config + about + asset inventory)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! Each manifest is human-readable JSON you can inspect between stages.
//!
//! # Interaction Logic
//!
//! The slideshow and the lightbox are modelled in [`controller`] as pure
//! `(state, event) -> state` transitions with drivers that own their timers
//! and listeners through a [`controller::host::Host`]. Tests run them against
//! a virtual clock. The generator uses the same transitions to pick the
//! build-time hero slide and to link the script-free photo pages, and
//! `static/folio.js` runs them in the browser.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: loads config, reads `about.md`, inventories assets |
//! | [`generate`] | Stage 2: renders the page and photo pages with Maud |
//! | [`controller`] | Slideshow and lightbox state machines and drivers |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`assets`] | Base-path URL resolution and asset copying |
//! | [`types`] | Shared types serialized between stages (`Manifest`, `ImageItem`) |
//! | [`output`] | CLI output formatting for each stage |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error, template variables are Rust
//! expressions, and all interpolation is auto-escaped.
//!
//! ## Images As-Is
//!
//! Images are copied without re-encoding. Every reference goes through
//! [`assets::AssetPaths`], so a deployment base path applies uniformly,
//! including to the placeholder shown for a missing source.

pub mod assets;
pub mod config;
pub mod controller;
pub mod generate;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
