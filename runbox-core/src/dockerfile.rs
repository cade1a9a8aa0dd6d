//! Build recipe rendering.
//!
//! Generates the Dockerfile placed in the build context. The instructions
//! reference the canonical entry names written by [`crate::context`], so the
//! two modules must stay in sync.

use crate::config::RunConfig;
use crate::context::{APPLICATION_NAME, LOCKFILE_NAME};

/// Render the Dockerfile for one run.
///
/// `has_packages` controls whether a dependency-install layer is emitted;
/// a script with no external imports builds without ever invoking pip.
pub fn render(config: &RunConfig, has_packages: bool) -> String {
    let mut recipe = String::new();

    recipe.push_str(&format!("FROM {}\n\n", config.version));
    recipe.push_str("WORKDIR /app\n\n");

    if has_packages {
        recipe.push_str(&format!("COPY {} .\n", LOCKFILE_NAME));
        recipe.push_str(&format!(
            "RUN pip install --no-cache-dir -r {}\n\n",
            LOCKFILE_NAME
        ));
    }

    recipe.push_str(&format!("COPY {} .\n", APPLICATION_NAME));

    for port in &config.ports {
        recipe.push_str(&format!("EXPOSE {}\n", port));
    }
    if !config.ports.is_empty() {
        recipe.push('\n');
    }

    // Default launch command; overridden at container create with the same shape.
    let mut cmd = vec!["python".to_string(), APPLICATION_NAME.to_string()];
    if !config.arguments.is_empty() {
        cmd.push(config.arguments.clone());
    }
    if !config.params.is_empty() {
        cmd.push(config.params.clone());
    }
    let rendered: Vec<String> = cmd.iter().map(|part| format!("\"{}\"", part)).collect();
    recipe.push_str(&format!("CMD [{}]\n", rendered.join(", ")));

    recipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_packages() {
        let recipe = render(&RunConfig::default(), true);
        assert!(recipe.starts_with("FROM python:3.13-slim\n"));
        assert!(recipe.contains("COPY requirements.txt .\n"));
        assert!(recipe.contains("RUN pip install --no-cache-dir -r requirements.txt\n"));
        assert!(recipe.contains("COPY main.py .\n"));
        assert!(recipe.ends_with("CMD [\"python\", \"main.py\"]\n"));
    }

    #[test]
    fn test_render_without_packages_skips_install() {
        let recipe = render(&RunConfig::default(), false);
        assert!(!recipe.contains("pip install"));
        assert!(!recipe.contains(LOCKFILE_NAME));
        assert!(recipe.contains("COPY main.py .\n"));
    }

    #[test]
    fn test_render_expose_directives() {
        let config = RunConfig {
            ports: vec!["8080".to_string(), "9090".to_string()],
            ..Default::default()
        };
        let recipe = render(&config, false);
        assert!(recipe.contains("EXPOSE 8080\n"));
        assert!(recipe.contains("EXPOSE 9090\n"));
    }

    #[test]
    fn test_render_launch_command_with_arguments() {
        let config = RunConfig {
            arguments: "--check".to_string(),
            params: "-v".to_string(),
            ..Default::default()
        };
        let recipe = render(&config, false);
        assert!(recipe.ends_with("CMD [\"python\", \"main.py\", \"--check\", \"-v\"]\n"));
    }

    #[test]
    fn test_render_custom_version() {
        let config = RunConfig { version: "python:3.12-slim".to_string(), ..Default::default() };
        let recipe = render(&config, true);
        assert!(recipe.starts_with("FROM python:3.12-slim\n"));
    }
}
