//! The build-and-run pipeline.
//!
//! One linear flow per invocation: read the script, scan its imports,
//! assemble the build context, derive the artifact name, build the image,
//! run the container. Each step must succeed before the next begins; the
//! container created by the final step is removed no matter how it ends.

use crate::config::RunConfig;
use crate::context::build_context;
use crate::docker;
use crate::error::{Result, RunboxError};
use crate::naming::derive_name;
use crate::python::{scan_imports, SYSTEM_PACKAGES};
use bollard::Docker;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Execute one script as a disposable container run.
///
/// All diagnostic and container output goes to this process's stdout;
/// nothing is persisted beyond the ephemeral image left on the daemon.
pub async fn execute(script_path: &Path, config: &RunConfig) -> Result<()> {
    if !script_path.is_file() {
        return Err(RunboxError::ScriptNotFound { path: script_path.to_path_buf() });
    }

    let content = fs::read(script_path).map_err(|source| RunboxError::ScriptRead {
        path: script_path.to_path_buf(),
        source,
    })?;

    // The scan is lexical; invalid UTF-8 sequences cannot hold an import line.
    let text = String::from_utf8_lossy(&content);
    let deps = scan_imports(&text, &SYSTEM_PACKAGES);
    debug!(
        "Found {} external package(s): {}",
        deps.len(),
        deps.names().collect::<Vec<_>>().join(", ")
    );

    let archive = build_context(&content, &deps, config)?;
    let name = derive_name(script_path, &content, config);
    info!("Run {} for {:?}", name, script_path);

    let client = Docker::connect_with_local_defaults()?;
    docker::build_image(&client, archive, &name).await?;
    docker::run_container(&client, &name, config).await
}
