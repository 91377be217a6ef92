//! WKT Core - Backend logic for workout template duplication
//!
//! This crate resolves a workout folder against an editing project: it
//! finds or creates the destination bin, imports the folder's media,
//! locates the modality's template sequence, and duplicates and renames
//! it. The project itself is reached only through [`project::ProjectHost`].

pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod naming;
pub mod orchestrator;
pub mod project;
pub mod resolve;
pub mod search;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
