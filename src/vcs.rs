use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Default bounded wait for a single version-control query.
pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Read-only questions asked of the surrounding version-control tool.
///
/// Every method is fail-soft: "not a repository", a missing tool or a
/// timeout all come back as `None`.
pub trait VcsQuery {
    /// Top-level directory of the working tree.
    fn top_level(&self) -> Option<PathBuf>;
    /// URL of the `origin` remote.
    fn remote_url(&self) -> Option<String>;
    /// Name of the checked-out branch.
    fn current_branch(&self) -> Option<String>;
}

/// Remote and branch as recorded in project metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitInfo {
    pub remote: Option<String>,
    pub branch: Option<String>,
}

impl GitInfo {
    pub fn query(vcs: &impl VcsQuery) -> Self {
        Self {
            remote: vcs.remote_url(),
            branch: vcs.current_branch(),
        }
    }
}

/// Resolve "the project": the version-control root when enabled and
/// available, otherwise `cwd` as given.
pub fn detect_project_root(vcs: &impl VcsQuery, cwd: &Path, use_git_root: bool) -> PathBuf {
    if use_git_root {
        if let Some(root) = vcs.top_level() {
            return root;
        }
    }
    cwd.to_path_buf()
}

/// [`VcsQuery`] backed by the `git` executable, run in a fixed directory.
#[derive(Debug, Clone)]
pub struct GitCli {
    cwd: PathBuf,
    timeout: Duration,
}

impl GitCli {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run `git <args>` and return trimmed stdout, or `None` on any failure
    /// or empty output.
    fn query(&self, args: &[&str]) -> Option<String> {
        match run_blocking("git", args, &self.cwd, self.timeout) {
            Ok(out) if !out.is_empty() => Some(out),
            Ok(_) => None,
            Err(err) => {
                debug!(cwd = %self.cwd.display(), "git {}: {err:#}", args.join(" "));
                None
            }
        }
    }
}

impl VcsQuery for GitCli {
    fn top_level(&self) -> Option<PathBuf> {
        self.query(&["rev-parse", "--show-toplevel"])
            .map(PathBuf::from)
    }

    fn remote_url(&self) -> Option<String> {
        self.query(&["remote", "get-url", "origin"])
    }

    fn current_branch(&self) -> Option<String> {
        self.query(&["branch", "--show-current"])
    }
}

/// Run `program` in `cwd` on a single-threaded runtime, killing it if it has
/// not exited within `timeout`. Returns trimmed stdout on a zero exit status.
fn run_blocking(program: &str, args: &[&str], cwd: &Path, timeout: Duration) -> Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    runtime.block_on(run_with_timeout(program, args, cwd, timeout))
}

async fn run_with_timeout(
    program: &str,
    args: &[&str],
    cwd: &Path,
    timeout: Duration,
) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, output).await {
        Ok(result) => result.with_context(|| format!("spawning {program}"))?,
        Err(_) => bail!("{program} timed out after {}ms", timeout.as_millis()),
    };

    if !output.status.success() {
        bail!("{program} exited with {}", output.status);
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
