//! CLI command implementations.

mod run;

pub use run::run;
