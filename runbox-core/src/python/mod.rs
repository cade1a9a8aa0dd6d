//! Python import scanning.
//!
//! Extracts external package dependencies from a script with a best-effort
//! lexical pass, not a parser: each line is matched against the two import
//! forms (`import a.b` and `from a.b import c`) and the first dot-separated
//! segment of the dotted name is taken as the candidate package. Anything
//! else on the line, and any line that does not match (comments, decorators,
//! multi-line constructs), is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

/// Standard-library exclusion list, embedded at compile time.
///
/// One top-level module name per line. Loaded once per process and treated
/// as read-only; the scanner takes the set as an argument so tests can
/// substitute their own.
pub static SYSTEM_PACKAGES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    include_str!("packages.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
});

static IMPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:import|from)\s+([\w.]+)").expect("invalid import pattern"));

/// External packages found in a script, in first-seen order.
///
/// The count per package is informational; the manifest only ever lists
/// each name once.
#[derive(Debug, Default, Clone)]
pub struct DependencySet {
    entries: Vec<(String, u32)>,
}

impl DependencySet {
    /// Record one occurrence of `package`, preserving first-seen order.
    pub fn record(&mut self, package: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == package) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((package.to_string(), 1)),
        }
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence count for `package`, if recorded.
    pub fn count(&self, package: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == package)
            .map(|(_, count)| *count)
    }

    /// Iterate package names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Render the name-only dependency manifest, one package per line.
    ///
    /// No version constraints are emitted.
    pub fn lockfile(&self) -> String {
        let mut out = String::new();
        for name in self.names() {
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

/// Scan script text for imported packages not present in `excludes`.
///
/// Never fails on malformed content; unparseable lines are skipped.
pub fn scan_imports(source: &str, excludes: &[&str]) -> DependencySet {
    let mut deps = DependencySet::default();

    for line in source.lines() {
        let Some(captures) = IMPORT_PATTERN.captures(line) else {
            continue;
        };
        let dotted = &captures[1];
        let package = dotted.split('.').next().unwrap_or(dotted);

        if excludes.contains(&package) {
            continue;
        }
        deps.record(package);
    }

    deps
}
