//! runbox core library
//!
//! Turns a Python script into a disposable, isolated container run: infers
//! the script's external dependencies, assembles a minimal build context,
//! builds an image from it, runs the image to completion with bounded
//! waiting and log streaming, and guarantees container cleanup.

pub mod config;
pub mod context;
pub mod docker;
pub mod dockerfile;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod python;

// Re-export commonly used items
pub use config::{RunConfig, DEFAULT_VERSION};
pub use error::{Result, RunboxError};
pub use pipeline::execute;
pub use python::{scan_imports, DependencySet, SYSTEM_PACKAGES};
