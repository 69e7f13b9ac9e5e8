use super::*;
use serde_json::json;

fn context(value: Value) -> Context {
    value.as_object().unwrap().clone()
}

// =================================================================
// Hook input / output
// =================================================================

#[test]
fn deserialize_full_hook_input() {
    let input: HookInput = serde_json::from_value(json!({
        "hook_event_name": "session:start",
        "cwd": "/home/user/project",
        "context": { "session_id": "sess-1", "user": "test-user" }
    }))
    .unwrap();
    assert_eq!(input.hook_event_name, SESSION_START);
    assert_eq!(input.cwd, Some(PathBuf::from("/home/user/project")));
    assert_eq!(input.context["user"], "test-user");
}

#[test]
fn deserialize_minimal_hook_input() {
    let input: HookInput =
        serde_json::from_str(r#"{ "hook_event_name": "session:start" }"#).unwrap();
    assert!(input.cwd.is_none());
    assert!(input.context.is_empty());
}

#[test]
fn hook_input_requires_event_name() {
    let err = serde_json::from_str::<HookInput>(r#"{ "context": {} }"#).unwrap_err();
    assert!(err.to_string().contains("hook_event_name"));
}

#[test]
fn serialize_hook_output() {
    let out = HookOutput {
        action: HookAction::Continue,
        context: context(json!({ "project_slug": "demo" })),
    };
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value, json!({ "action": "continue", "context": { "project_slug": "demo" } }));
}

// =================================================================
// SessionStartRequest
// =================================================================

#[test]
fn request_reads_recognized_keys() {
    let req = SessionStartRequest::from_context(&context(json!({
        "session_id": "abc",
        "message_count": 12,
        "purpose": "code review"
    })));
    assert_eq!(req.session_id(), "abc");
    assert_eq!(req.message_count(), 12);
    assert_eq!(req.purpose(), "code review");
}

#[test]
fn request_defaults_when_absent() {
    let req = SessionStartRequest::from_context(&Context::new());
    assert_eq!(req, SessionStartRequest::default());
    assert_eq!(req.session_id(), UNKNOWN_SESSION_ID);
    assert_eq!(req.message_count(), 0);
    assert_eq!(req.purpose(), DEFAULT_PURPOSE);
}

#[test]
fn request_ignores_wrongly_typed_values() {
    let req = SessionStartRequest::from_context(&context(json!({
        "session_id": 42,
        "message_count": -3,
        "purpose": ["not", "a", "string"]
    })));
    assert_eq!(req.session_id(), UNKNOWN_SESSION_ID);
    assert_eq!(req.message_count(), 0);
    assert_eq!(req.purpose(), DEFAULT_PURPOSE);

    let req = SessionStartRequest::from_context(&context(json!({ "message_count": 2.5 })));
    assert_eq!(req.message_count(), 0);

    let req = SessionStartRequest::from_context(&context(json!({ "session_id": null })));
    assert_eq!(req.session_id(), UNKNOWN_SESSION_ID);
}

// =================================================================
// SessionStartResponse
// =================================================================

#[test]
fn response_overwrites_output_keys_only() {
    let mut ctx = context(json!({
        "session_id": "abc",
        "project_slug": "stale",
        "user": "test-user"
    }));
    SessionStartResponse {
        storage_path: PathBuf::from("/base/demo-123abc/sessions"),
        project_root: PathBuf::from("/src/demo"),
        project_slug: "demo".into(),
        project_dir_name: "demo-123abc".into(),
    }
    .write_into(&mut ctx);

    assert_eq!(
        Value::Object(ctx),
        json!({
            "session_id": "abc",
            "user": "test-user",
            "storage_path": "/base/demo-123abc/sessions",
            "project_root": "/src/demo",
            "project_slug": "demo",
            "project_dir_name": "demo-123abc"
        })
    );
}
