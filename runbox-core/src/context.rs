//! Build context assembly.
//!
//! Packages the dependency manifest, the script, and the Dockerfile into a
//! single in-memory tar archive. Entry names and order are fixed: the
//! Dockerfile instructions reference the canonical names, so reordering or
//! renaming entries breaks the image build.

use crate::config::RunConfig;
use crate::dockerfile;
use crate::error::{Result, RunboxError};
use crate::python::DependencySet;
use tar::{Builder, Header};
use tracing::debug;

/// Canonical archive entry name for the dependency manifest.
pub const LOCKFILE_NAME: &str = "requirements.txt";

/// Canonical archive entry name for the script.
pub const APPLICATION_NAME: &str = "main.py";

/// Canonical archive entry name for the build recipe.
pub const DOCKERFILE_NAME: &str = "Dockerfile";

/// Assemble the build context archive for one run.
///
/// Each entry header declares the exact byte length of its content; the tar
/// writer enforces the invariant, so a mismatch surfaces here instead of as
/// a corrupt archive at build time.
pub fn build_context(
    script: &[u8],
    deps: &DependencySet,
    config: &RunConfig,
) -> Result<Vec<u8>> {
    let mut archive = Builder::new(Vec::new());

    let lockfile = deps.lockfile();
    append_entry(&mut archive, LOCKFILE_NAME, lockfile.as_bytes())
        .map_err(|source| RunboxError::Lockfile { source })?;

    append_entry(&mut archive, APPLICATION_NAME, script)
        .map_err(|source| RunboxError::Application { source })?;

    let recipe = dockerfile::render(config, !deps.is_empty());
    append_entry(&mut archive, DOCKERFILE_NAME, recipe.as_bytes())
        .map_err(|source| RunboxError::Dockerfile { source })?;

    let bytes = archive
        .into_inner()
        .map_err(|source| RunboxError::Archive { source })?;

    debug!(
        "Assembled build context: {} bytes, {} package(s)",
        bytes.len(),
        deps.len()
    );

    Ok(bytes)
}

fn append_entry(
    archive: &mut Builder<Vec<u8>>,
    name: &str,
    content: &[u8],
) -> std::io::Result<()> {
    let mut header = Header::new_gnu();
    header.set_path(name)?;
    header.set_size(content.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    archive.append(&header, content)
}
