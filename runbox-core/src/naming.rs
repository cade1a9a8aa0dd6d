//! Artifact naming.
//!
//! Every run produces a fresh image tag and container name of the form
//! `{timestamp}-{fingerprint}`. The fingerprint is derived from the script
//! path, the script bytes, and the run configuration, so identical inputs
//! are auditable across runs; the timestamp keeps each invocation unique.
//! This is a naming scheme for traceability, not a build cache.

use crate::config::RunConfig;
use chrono::Local;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Hex digits of the digest kept in the artifact name.
const FINGERPRINT_LEN: usize = 6;

/// Content fingerprint for (path, content, configuration).
///
/// Stable across time: two calls with the same inputs return the same value.
pub fn content_fingerprint(path: &Path, content: &[u8], config: &RunConfig) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    hasher.update(content);
    hasher.update(config.fingerprint_string().as_bytes());

    let digest = hex::encode(hasher.finalize());
    digest[..FINGERPRINT_LEN].to_string()
}

/// Derive the artifact identifier used as both image tag suffix and
/// container name.
///
/// The timestamp prefix (`%Y%m%d%H%M%S`) sorts lexically by creation time.
pub fn derive_name(path: &Path, content: &[u8], config: &RunConfig) -> String {
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    format!("{}-{}", timestamp, content_fingerprint(path, content, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let path = PathBuf::from("/tmp/script.py");
        let config = RunConfig::default();
        let first = content_fingerprint(&path, b"print(1)\n", &config);
        let second = content_fingerprint(&path, b"print(1)\n", &config);
        assert_eq!(first, second);
        assert_eq!(first.len(), FINGERPRINT_LEN);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_varies_with_inputs() {
        let path = PathBuf::from("/tmp/script.py");
        let config = RunConfig::default();
        let base = content_fingerprint(&path, b"print(1)\n", &config);

        assert_ne!(base, content_fingerprint(&path, b"print(2)\n", &config));
        assert_ne!(
            base,
            content_fingerprint(&PathBuf::from("/tmp/other.py"), b"print(1)\n", &config)
        );

        let other_config = RunConfig { ports: vec!["8080".to_string()], ..Default::default() };
        assert_ne!(base, content_fingerprint(&path, b"print(1)\n", &other_config));
    }

    #[test]
    fn test_derive_name_shape() {
        let path = PathBuf::from("/tmp/script.py");
        let config = RunConfig::default();
        let name = derive_name(&path, b"print(1)\n", &config);

        let (timestamp, fingerprint) = name.split_once('-').unwrap();
        assert_eq!(timestamp.len(), 14);
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(fingerprint, content_fingerprint(&path, b"print(1)\n", &config));
    }
}
