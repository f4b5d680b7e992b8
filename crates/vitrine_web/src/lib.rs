//! DOM bindings for the vitrine carousels and lightbox.
//!
//! On `wasm32` with `--features web`, [`start`] is the module's start function:
//! it runs once when the wasm module is instantiated, reads the inline
//! `#vitrine-config` JSON (falling back to the default markup ids) and binds
//! every carousel plus the shared lightbox.
//!
//! Other builds expose an inert `start` so the workspace compiles and tests
//! natively.

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::start;

/// Nothing to bind outside a browser.
#[cfg(not(all(feature = "web", target_arch = "wasm32")))]
pub fn start() {}
