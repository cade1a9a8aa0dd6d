//! Run configuration.

/// Default base image used when no `--version` is given.
pub const DEFAULT_VERSION: &str = "python:3.13-slim";

/// Options recognized for one pipeline run.
///
/// Immutable once constructed; the fields only interact through string
/// concatenation into the container command.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base runtime image, e.g. "python:3.13-slim".
    pub version: String,

    /// Host ports to expose; each maps to the identical container port over TCP.
    pub ports: Vec<String>,

    /// Opaque string appended to the launch command.
    pub arguments: String,

    /// Opaque string appended to the launch command after `arguments`.
    pub params: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            ports: Vec::new(),
            arguments: String::new(),
            params: String::new(),
        }
    }
}

impl RunConfig {
    /// Canonical serialization of all fields, fed into the artifact name hash.
    ///
    /// The field order is fixed; changing it would change every fingerprint.
    pub fn fingerprint_string(&self) -> String {
        format!(
            "{}-{}-{}-{}",
            self.version,
            self.arguments,
            self.params,
            self.ports.join(",")
        )
    }
}
