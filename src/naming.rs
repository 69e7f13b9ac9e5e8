use crate::fingerprint::path_fingerprint;
use crate::slug::slugify;
use std::path::{Path, PathBuf};

/// Subdirectory of a project directory that holds session data.
pub const SESSIONS_DIR: &str = "sessions";

/// Storage identity derived from a project's root path.
///
/// Recomputed on every session start and never persisted itself; only the
/// directory it names exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    pub root_path: PathBuf,
    pub slug: String,
    pub fingerprint: String,
    pub directory_name: String,
}

impl ProjectIdentity {
    /// Derive the identity of the project rooted at `root_path`. Depends on
    /// nothing but the path itself.
    pub fn from_root(root_path: &Path) -> Self {
        let basename = root_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        let slug = slugify(&basename);
        let fingerprint = path_fingerprint(&root_path.to_string_lossy());
        let directory_name = format!("{slug}-{fingerprint}");
        Self {
            root_path: root_path.to_path_buf(),
            slug,
            fingerprint,
            directory_name,
        }
    }

    /// `<storage_base>/<slug>-<fingerprint>`
    pub fn project_dir(&self, storage_base: &Path) -> PathBuf {
        storage_base.join(&self.directory_name)
    }

    /// `<storage_base>/<slug>-<fingerprint>/sessions`
    pub fn storage_path(&self, storage_base: &Path) -> PathBuf {
        self.project_dir(storage_base).join(SESSIONS_DIR)
    }
}
