#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub fn run_cli(args: &[&str], stdin_json: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_project-isolation"))
        .args(args)
        .env_remove("PROJECT_ISOLATION_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    // The binary may exit before reading stdin (e.g. on a bad flag).
    match child.stdin.take().unwrap().write_all(stdin_json.as_bytes()) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
        Err(e) => panic!("writing hook input: {e}"),
    }

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Run the hook and parse its stdout, asserting a clean exit.
pub fn run_ok(args: &[&str], stdin_json: &str) -> Value {
    let (code, stdout, stderr) = run_cli(args, stdin_json);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.is_empty(), "expected no stderr, got: {stderr}");
    serde_json::from_str(&stdout).unwrap()
}

/// Create a temp dir containing a git repo with an `origin` remote and an
/// initial commit. The `TempDir` must be kept alive for the duration of the
/// test.
pub fn temp_git_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let repo = git2::Repository::init(dir.path()).unwrap();
    repo.remote("origin", "https://example.com/acme/widgets.git")
        .unwrap();

    // Configure user identity for commits.
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();

    // Create an initial commit so HEAD exists.
    let sig = repo.signature().unwrap();
    let tree_oid = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
        .unwrap();

    dir
}

/// A `session:start` hook input for `cwd` with the given context.
pub fn session_start(cwd: &Path, context: Value) -> String {
    json!({
        "hook_event_name": "session:start",
        "cwd": cwd,
        "context": context,
    })
    .to_string()
}

/// Project directories under `storage_base`, sorted.
pub fn project_dirs(storage_base: &Path) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = std::fs::read_dir(storage_base)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    dirs.sort();
    dirs
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
