//! VCR Core - conversion engine for VCR Manager
//!
//! This crate contains all business logic with zero UI dependencies:
//! input classification, external tool discovery, the conversion pipeline,
//! configuration, and per-job logging. It can be used by the GUI
//! application or driven programmatically.

pub mod config;
pub mod logging;
pub mod media;
pub mod models;
pub mod orchestrator;
pub mod tools;
pub mod transcode;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
