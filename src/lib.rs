//! Per-project session storage for CLI agent sessions.
//!
//! On `session:start` the current project (version-control root, or the
//! working directory) is mapped to `<storage_base>/<slug>-<fingerprint>/`,
//! where the project's `metadata.json` and `index.json` are kept up to date.

pub mod config;
pub mod fingerprint;
pub mod hooks;
pub mod index;
pub mod isolation;
pub mod metadata;
pub mod naming;
pub mod slug;
pub mod store;
pub mod timestamp;
pub mod types;
pub mod vcs;
