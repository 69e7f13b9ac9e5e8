use crate::config::IsolationConfig;
use crate::hooks::EventSubscriber;
use crate::index::{SessionEntry, SessionIndex};
use crate::metadata::ProjectMetadata;
use crate::naming::ProjectIdentity;
use crate::types::{Context, HookAction, SESSION_START, SessionStartRequest, SessionStartResponse};
use crate::vcs::{GitInfo, VcsQuery, detect_project_root};
use anyhow::{Context as _, Result};
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Session-start handler: maps the current project to its storage directory
/// and keeps the project's metadata and session index current.
///
/// Holds no state between calls. The working directory is fixed at
/// construction so nothing reads ambient process state.
pub struct ProjectIsolation<V> {
    config: IsolationConfig,
    storage_base: PathBuf,
    cwd: PathBuf,
    vcs: V,
}

impl<V: VcsQuery> ProjectIsolation<V> {
    pub fn new(config: IsolationConfig, cwd: impl Into<PathBuf>, vcs: V) -> Self {
        let storage_base = config.storage_base();
        Self {
            config,
            storage_base,
            cwd: cwd.into(),
            vcs,
        }
    }

    /// Resolve the current project and derive its storage identity.
    pub fn identify(&self) -> ProjectIdentity {
        let root = detect_project_root(&self.vcs, &self.cwd, self.config.use_git_root);
        ProjectIdentity::from_root(&root)
    }

    /// Compute the project's storage location and, when `create_dirs` is on,
    /// create it and record this session.
    ///
    /// Failures reading or writing `metadata.json`/`index.json` are returned
    /// as is; nothing is retried.
    pub fn on_session_start(&self, request: &SessionStartRequest) -> Result<SessionStartResponse> {
        let identity = self.identify();
        let project_dir = identity.project_dir(&self.storage_base);
        let storage_path = identity.storage_path(&self.storage_base);
        debug!(
            root = %identity.root_path.display(),
            dir = %identity.directory_name,
            "resolved project"
        );

        if self.config.create_dirs {
            fs::create_dir_all(&storage_path)
                .with_context(|| format!("creating {}", storage_path.display()))?;

            let now = Utc::now();
            let git = GitInfo::query(&self.vcs);
            ProjectMetadata::upsert(
                &project_dir,
                &identity.root_path,
                &git,
                request.purpose(),
                now,
            )?;
            let index = SessionIndex::append(
                &project_dir,
                SessionEntry::new(request.session_id(), now, request.message_count()),
            )?;
            debug!(
                dir = %project_dir.display(),
                sessions = index.sessions.len(),
                "recorded session"
            );
        }

        Ok(SessionStartResponse {
            storage_path,
            project_root: identity.root_path,
            project_slug: identity.slug,
            project_dir_name: identity.directory_name,
        })
    }
}

impl<V: VcsQuery> EventSubscriber for ProjectIsolation<V> {
    fn handle(&self, event_name: &str, context: &mut Context) -> Result<HookAction> {
        if event_name != SESSION_START {
            return Ok(HookAction::Continue);
        }
        let request = SessionStartRequest::from_context(context);
        let response = self.on_session_start(&request)?;
        response.write_into(context);
        Ok(HookAction::Continue)
    }
}
