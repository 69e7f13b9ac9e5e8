use crate::slug::slugify;
use crate::store::{read_json_file, write_json_file};
use crate::vcs::GitInfo;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const METADATA_FILE: &str = "metadata.json";

/// Recorded when the session context carries no `purpose`.
pub const DEFAULT_PURPOSE: &str = "Amplifier CLI session";

/// Per-project metadata, stored as `<project_dir>/metadata.json`.
///
/// `first_seen` and `slug` are written once, when the document is created.
/// Everything else is refreshed on every session start. Keys this type does
/// not know about are carried through rewrites untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub first_seen: DateTime<Utc>,
    pub slug: String,
    #[serde(default)]
    pub full_path: String,
    #[serde(default)]
    pub git_remote: Option<String>,
    #[serde(default)]
    pub git_branch: Option<String>,
    #[serde(default, deserialize_with = "crate::timestamp::deserialize")]
    pub last_accessed: DateTime<Utc>,
    #[serde(default)]
    pub purpose: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProjectMetadata {
    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(METADATA_FILE)
    }

    /// Read the metadata document. Returns `None` if it does not exist yet.
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        read_json_file(&Self::path(project_dir))
    }

    /// A record for a project seen for the first time at `now`.
    fn fresh(root_path: &Path, now: DateTime<Utc>) -> Self {
        let basename = root_path
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        Self {
            first_seen: now,
            slug: slugify(&basename),
            full_path: String::new(),
            git_remote: None,
            git_branch: None,
            last_accessed: now,
            purpose: String::new(),
            extra: Map::new(),
        }
    }

    /// Create or refresh the metadata document for a project.
    ///
    /// A malformed existing document is an error and is left as is.
    pub fn upsert(
        project_dir: &Path,
        root_path: &Path,
        git: &GitInfo,
        purpose: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut meta = Self::load(project_dir)?.unwrap_or_else(|| Self::fresh(root_path, now));

        meta.full_path = root_path.to_string_lossy().into_owned();
        meta.git_remote = git.remote.clone();
        meta.git_branch = git.branch.clone();
        meta.last_accessed = now;
        meta.purpose = purpose.to_string();

        write_json_file(&Self::path(project_dir), &meta)?;
        Ok(meta)
    }
}
