//! Error types for runbox.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for runbox operations.
pub type Result<T> = std::result::Result<T, RunboxError>;

/// Main error type for runbox.
#[derive(Error, Debug)]
pub enum RunboxError {
    // Input errors
    #[error("Script not found: {path:?}")]
    ScriptNotFound { path: PathBuf },

    #[error("Failed to read script {path:?}: {source}")]
    ScriptRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Archive construction errors, one per build context entry
    #[error("Failed to build lockfile: {source}")]
    Lockfile {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build application: {source}")]
    Application {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build Dockerfile: {source}")]
    Dockerfile {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to finalize build context: {source}")]
    Archive {
        #[source]
        source: std::io::Error,
    },

    // Image build errors
    #[error("Image build failed: {reason}")]
    BuildFailed { reason: String },

    // Container lifecycle errors
    #[error("Container {id} exited with code {code}: {reason}")]
    ContainerExited { id: String, code: i64, reason: String },

    #[error("Container run timed out after {seconds}s")]
    WaitTimeout { seconds: u64 },

    #[error("Failed to stream container logs: {source}")]
    LogStream {
        #[source]
        source: std::io::Error,
    },

    // Daemon transport errors (connect, create, start, logs)
    #[error(transparent)]
    Docker(#[from] bollard::errors::Error),
}
