//! `runbox run` command

use anyhow::{Context, Result};
use colored::Colorize;
use runbox_core::RunConfig;
use std::path::Path;

/// Run a script in a disposable container.
pub async fn run(
    script: &Path,
    version: String,
    ports: Vec<String>,
    arguments: String,
    params: String,
) -> Result<()> {
    if script.extension().and_then(|e| e.to_str()) != Some("py") {
        anyhow::bail!("Invalid script path: {} (expected a .py file)", script.display());
    }
    if !script.is_file() {
        anyhow::bail!("Script not found: {}", script.display());
    }

    let config = RunConfig { version, ports, arguments, params };

    println!(
        "{} Running {} on {}",
        "→".cyan().bold(),
        script.display().to_string().bold(),
        config.version.cyan()
    );
    if !config.ports.is_empty() {
        println!("  Ports: {}", config.ports.join(", ").yellow());
    }

    runbox_core::execute(script, &config)
        .await
        .with_context(|| format!("Run failed for {}", script.display()))?;

    println!("{} Run complete", "✓".green().bold());
    Ok(())
}
