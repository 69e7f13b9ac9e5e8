use crate::index::UNKNOWN_SESSION_ID;
use crate::metadata::DEFAULT_PURPOSE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The untyped key-value context handed over by the host.
pub type Context = Map<String, Value>;

/// Event name the project isolation hook subscribes to.
pub const SESSION_START: &str = "session:start";

/// Hook input, deserialized from stdin JSON. One event per invocation.
#[derive(Debug, Deserialize)]
pub struct HookInput {
    pub hook_event_name: String,
    /// Directory the session runs in. Falls back to the process's current
    /// directory when absent.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
    #[serde(default)]
    pub context: Context,
}

/// What the host should do after the hook ran. This hook only annotates the
/// context, so it never halts or redirects the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookAction {
    Continue,
}

/// Hook output, serialized to stdout JSON.
#[derive(Debug, Serialize, Deserialize)]
pub struct HookOutput {
    pub action: HookAction,
    pub context: Context,
}

/// Recognized inputs of `session:start`, lifted out of the context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStartRequest {
    pub session_id: Option<String>,
    pub message_count: Option<u64>,
    pub purpose: Option<String>,
}

impl SessionStartRequest {
    /// Read the recognized keys. Values of the wrong type are ignored with a
    /// warning and the key's default applies.
    pub fn from_context(context: &Context) -> Self {
        let session_id = match context.get("session_id") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                warn!(value = %other, "ignoring non-string session_id");
                None
            }
        };

        let message_count = match context.get("message_count") {
            None | Some(Value::Null) => None,
            Some(v) => match v.as_u64() {
                Some(n) => Some(n),
                None => {
                    warn!(value = %v, "ignoring message_count that is not a non-negative integer");
                    None
                }
            },
        };

        let purpose = match context.get("purpose") {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        };

        Self {
            session_id,
            message_count,
            purpose,
        }
    }

    pub fn session_id(&self) -> &str {
        self.session_id.as_deref().unwrap_or(UNKNOWN_SESSION_ID)
    }

    pub fn message_count(&self) -> u64 {
        self.message_count.unwrap_or(0)
    }

    pub fn purpose(&self) -> &str {
        self.purpose.as_deref().unwrap_or(DEFAULT_PURPOSE)
    }
}

/// Outputs of `session:start`, written back into the context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStartResponse {
    pub storage_path: PathBuf,
    pub project_root: PathBuf,
    pub project_slug: String,
    pub project_dir_name: String,
}

impl SessionStartResponse {
    pub fn write_into(&self, context: &mut Context) {
        context.insert("storage_path".into(), path_value(&self.storage_path));
        context.insert("project_root".into(), path_value(&self.project_root));
        context.insert("project_slug".into(), Value::String(self.project_slug.clone()));
        context.insert(
            "project_dir_name".into(),
            Value::String(self.project_dir_name.clone()),
        );
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests;
