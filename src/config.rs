use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STORAGE_BASE: &str = "~/.amplifier/projects";

const DEFAULT_GIT_TIMEOUT_MS: u64 = 2000;

/// Settings for the project isolation hook.
///
/// Usually read from a TOML file:
///
/// ```toml
/// use_git_root = true
/// storage_base = "~/.amplifier/projects"
/// create_dirs = true
/// git_timeout_ms = 2000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsolationConfig {
    /// Resolve the project to its git top-level directory when possible.
    #[serde(default = "default_true")]
    pub use_git_root: bool,

    /// Directory that holds one subdirectory per project. A leading `~` is
    /// expanded to the home directory.
    #[serde(default = "default_storage_base")]
    pub storage_base: PathBuf,

    /// Create the storage directories and write metadata and index files.
    /// When false, paths are only computed.
    #[serde(default = "default_true")]
    pub create_dirs: bool,

    /// Bounded wait for each git query, in milliseconds.
    #[serde(default = "default_git_timeout_ms")]
    pub git_timeout_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_storage_base() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_BASE)
}

fn default_git_timeout_ms() -> u64 {
    DEFAULT_GIT_TIMEOUT_MS
}

impl Default for IsolationConfig {
    fn default() -> Self {
        Self {
            use_git_root: default_true(),
            storage_base: default_storage_base(),
            create_dirs: default_true(),
            git_timeout_ms: default_git_timeout_ms(),
        }
    }
}

impl IsolationConfig {
    /// Load settings from a TOML file. Missing keys take their defaults; a
    /// missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// `storage_base` with a leading `~` expanded.
    pub fn storage_base(&self) -> PathBuf {
        expand_tilde(&self.storage_base)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_millis(self.git_timeout_ms)
    }
}

/// Replace a leading `~` component with the user's home directory. Paths
/// without one, or with no known home directory, are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
