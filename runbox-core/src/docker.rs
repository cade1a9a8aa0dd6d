//! Docker daemon operations: image build and container lifecycle.
//!
//! The build half submits the in-memory build context to the daemon and
//! relays the build log. The run half drives the container state machine:
//! create, start, bounded wait, log drain, and unconditional removal.

use crate::config::RunConfig;
use crate::context::{APPLICATION_NAME, DOCKERFILE_NAME};
use crate::error::{Result, RunboxError};
use bollard::container::{
    Config, CreateContainerOptions, LogsOptions, RemoveContainerOptions, StartContainerOptions,
    WaitContainerOptions,
};
use bollard::errors::Error as DockerError;
use bollard::image::BuildImageOptions;
use bollard::models::{ContainerWaitResponse, HostConfig, PortBinding};
use bollard::Docker;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Repository namespace for every image this pipeline builds.
pub const IMAGE_REPOSITORY: &str = "runbox/python";

/// Deadline for a container run, measured from start.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Full image reference for an artifact name.
pub fn image_tag(name: &str) -> String {
    format!("{}:{}", IMAGE_REPOSITORY, name)
}

/// Build an image from the assembled context archive, tagged with `name`.
///
/// The daemon's textual build log is relayed to stdout as it streams. Any
/// daemon-reported error aborts the pipeline; partially built layers are
/// left to daemon-side garbage collection.
pub async fn build_image(docker: &Docker, archive: Vec<u8>, name: &str) -> Result<()> {
    let tag = image_tag(name);
    info!("Building image {}", tag);

    let options = BuildImageOptions {
        dockerfile: DOCKERFILE_NAME.to_string(),
        t: tag,
        rm: true,
        ..Default::default()
    };

    let mut stream = docker.build_image(options, None, Some(Bytes::from(archive)));

    while let Some(update) = stream.next().await {
        let update = update.map_err(|e| RunboxError::BuildFailed { reason: e.to_string() })?;

        if let Some(line) = update.stream {
            print!("{}", line);
            std::io::stdout().flush().ok();
        }
        if let Some(status) = update.status {
            debug!("Build status: {}", status);
        }
        if let Some(error) = update.error {
            return Err(RunboxError::BuildFailed { reason: error });
        }
    }

    Ok(())
}

/// Run the tagged image to completion and remove the container.
///
/// The container is named after the artifact so the daemon view stays
/// auditable. Removal happens exactly once, on every exit path, after the
/// wait-and-log phase; a removal failure is logged but never overrides the
/// run outcome.
pub async fn run_container(docker: &Docker, name: &str, config: &RunConfig) -> Result<()> {
    let container = docker
        .create_container(
            Some(CreateContainerOptions { name: name.to_string(), platform: None }),
            container_config(name, config),
        )
        .await?;
    info!("Created container {} ({})", name, container.id);

    let outcome = supervise(docker, &container.id).await;

    // Force removal so a timed-out, still-running container is destroyed too.
    let options = RemoveContainerOptions { force: true, ..Default::default() };
    if let Err(e) = docker.remove_container(&container.id, Some(options)).await {
        warn!("Failed to remove container {}: {}", container.id, e);
    } else {
        debug!("Removed container {}", container.id);
    }

    outcome
}

/// Start the container, wait for it to leave the running state, and drain
/// its logs to stdout.
///
/// The wait races the daemon's combined error/status stream against the
/// fixed deadline; whichever fires first determines the outcome. Logs are
/// drained afterwards even when the wait failed, so output produced before
/// a non-zero exit stays visible.
async fn supervise(docker: &Docker, id: &str) -> Result<()> {
    docker
        .start_container(id, None::<StartContainerOptions<String>>)
        .await?;

    let mut wait = docker.wait_container(id, Some(WaitContainerOptions { condition: "not-running" }));

    // None means the deadline fired before any daemon signal.
    let signal = tokio::time::timeout(WAIT_TIMEOUT, wait.next()).await.ok();
    if signal.is_none() {
        warn!("Container {} still running after {}s, abandoning wait", id, WAIT_TIMEOUT.as_secs());
    }
    let outcome = wait_outcome(id, signal);

    match drain_logs(docker, id, follow_logs(&outcome)).await {
        Ok(()) => outcome,
        Err(e) if outcome.is_ok() => Err(e),
        Err(e) => {
            warn!("Failed to stream logs for {}: {}", id, e);
            outcome
        }
    }
}

/// Map the first wait signal to a run outcome.
///
/// `None` is the expired deadline; the inner layers are the daemon's wait
/// stream, which folds the error and status channels into one `Result`.
/// A non-zero exit carries its exact status code whether it arrives as a
/// wait response or as the daemon's wait error.
fn wait_outcome(
    id: &str,
    signal: Option<Option<std::result::Result<ContainerWaitResponse, DockerError>>>,
) -> Result<()> {
    match signal {
        None => Err(RunboxError::WaitTimeout { seconds: WAIT_TIMEOUT.as_secs() }),
        Some(Some(Ok(response))) if response.status_code != 0 => {
            let reason = response.error.and_then(|e| e.message).unwrap_or_default();
            Err(RunboxError::ContainerExited {
                id: id.to_string(),
                code: response.status_code,
                reason,
            })
        }
        Some(Some(Ok(_))) | Some(None) => Ok(()),
        Some(Some(Err(DockerError::DockerContainerWaitError { error, code }))) => {
            Err(RunboxError::ContainerExited { id: id.to_string(), code, reason: error })
        }
        Some(Some(Err(e))) => Err(e.into()),
    }
}

/// Follow-mode only once the container has stopped; after a timeout the
/// container is still alive and a followed stream would never close.
fn follow_logs(outcome: &Result<()>) -> bool {
    !matches!(outcome, Err(RunboxError::WaitTimeout { .. }))
}

/// Copy combined stdout/stderr container logs to this process's stdout.
async fn drain_logs(docker: &Docker, id: &str, follow: bool) -> Result<()> {
    let options = LogsOptions::<String> {
        stdout: true,
        stderr: true,
        follow,
        ..Default::default()
    };
    let mut logs = docker.logs(id, Some(options));
    let mut out = std::io::stdout();

    while let Some(chunk) = logs.next().await {
        let output = chunk?;
        out.write_all(&output.into_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| RunboxError::LogStream { source })?;
    }

    Ok(())
}

/// Container configuration for one run: image, launch command, and port
/// bindings mapping each configured host port to the identical container
/// port over TCP on all interfaces.
fn container_config(name: &str, config: &RunConfig) -> Config<String> {
    let mut exposed_ports: HashMap<String, HashMap<(), ()>> = HashMap::new();
    for (key, _) in port_bindings(&config.ports) {
        exposed_ports.insert(key, HashMap::new());
    }

    Config {
        image: Some(image_tag(name)),
        cmd: Some(launch_command(config)),
        exposed_ports: (!exposed_ports.is_empty()).then_some(exposed_ports),
        host_config: Some(HostConfig {
            port_bindings: Some(port_bindings(&config.ports)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// The fixed interpreter invocation plus any non-empty argument strings,
/// each appended as one token.
fn launch_command(config: &RunConfig) -> Vec<String> {
    let mut cmd = vec!["python".to_string(), APPLICATION_NAME.to_string()];
    if !config.arguments.is_empty() {
        cmd.push(config.arguments.clone());
    }
    if !config.params.is_empty() {
        cmd.push(config.params.clone());
    }
    cmd
}

fn port_bindings(ports: &[String]) -> HashMap<String, Option<Vec<PortBinding>>> {
    ports
        .iter()
        .map(|port| {
            let binding = PortBinding {
                host_ip: Some("0.0.0.0".to_string()),
                host_port: Some(port.clone()),
            };
            (format!("{}/tcp", port), Some(vec![binding]))
        })
        .collect()
}
