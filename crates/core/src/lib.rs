//! navigator-core
//!
//! Core library for static call-chain navigation of Java-like source trees.
//!
//! This crate defines the declaration model, the analysis pipeline (indexing,
//! call resolution, graph assembly, query matching, traversal), the renderers,
//! and project configuration.
//!
//! All substantive logic lives here so it is fully testable and reusable from
//! multiple frontends.

pub mod model;
pub mod analysis;
pub mod project;
pub mod render;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
