use crate::store::{read_json_file, write_json_file};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.json";

/// Recorded when the session context carries no `session_id`.
pub const UNKNOWN_SESSION_ID: &str = "unknown";

/// One session start, as listed in a project's index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEntry {
    pub session_id: String,
    #[serde(deserialize_with = "crate::timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub message_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionEntry {
    pub fn new(session_id: impl Into<String>, timestamp: DateTime<Utc>, message_count: u64) -> Self {
        Self {
            session_id: session_id.into(),
            timestamp,
            message_count,
            extra: Map::new(),
        }
    }
}

/// Every session started against a project, newest first.
///
/// Stored as `<project_dir>/index.json`. Entries are only ever appended: the
/// same session id may appear more than once and nothing is pruned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionIndex {
    pub sessions: Vec<SessionEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionIndex {
    pub fn path(project_dir: &Path) -> PathBuf {
        project_dir.join(INDEX_FILE)
    }

    /// Read the index. Returns `None` if it does not exist yet.
    pub fn load(project_dir: &Path) -> Result<Option<Self>> {
        read_json_file(&Self::path(project_dir))
    }

    /// Add an entry and restore newest-first order.
    ///
    /// The sort is stable, so entries with equal timestamps keep their
    /// relative order.
    pub fn record(&mut self, entry: SessionEntry) {
        self.sessions.push(entry);
        self.sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }

    /// Read-modify-write: load the index (or start empty), record `entry`,
    /// and write the whole document back.
    pub fn append(project_dir: &Path, entry: SessionEntry) -> Result<Self> {
        let mut index = Self::load(project_dir)?.unwrap_or_default();
        index.record(entry);
        write_json_file(&Self::path(project_dir), &index)?;
        Ok(index)
    }
}
