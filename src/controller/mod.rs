//! Interaction logic for the generated page.
//!
//! The page has two interactive pieces, the hero slideshow and the gallery
//! lightbox. Both are modelled here as pure state machines plus a thin
//! driver that owns its timers and listeners. The generated `folio.js`
//! runs the same transitions in the browser; the generator uses the Rust
//! side directly for the build-time slide seed and the static photo pages.
//!
//! | Module | Role |
//! |--------|------|
//! | [`cursor`] | Wrap-around index arithmetic |
//! | [`slideshow`] | Timer rotation, motion preference, parallax |
//! | [`lightbox`] | Open/close/next/prev and keyboard bindings |
//! | [`loaded`] | Grid image load flags |
//! | [`events`] | `subscribe → token` observer registry |
//! | [`host`] | Timer/listener environment and a virtual-clock host |

pub mod cursor;
pub mod events;
pub mod host;
pub mod lightbox;
pub mod loaded;
pub mod slideshow;
