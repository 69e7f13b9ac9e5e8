use crate::config::IsolationConfig;
use crate::isolation::ProjectIsolation;
use crate::types::{Context, HookAction, SESSION_START};
use crate::vcs::GitCli;
use anyhow::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Something the host calls when a named event fires.
pub trait EventSubscriber {
    /// React to `event_name`, annotating `context` in place.
    fn handle(&self, event_name: &str, context: &mut Context) -> Result<HookAction>;
}

/// Subscribers keyed by event name, run in registration order.
#[derive(Default)]
pub struct HookRegistry {
    subscribers: HashMap<String, Vec<Box<dyn EventSubscriber>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `subscriber` for `event_name`. Registering twice runs it twice.
    pub fn register(&mut self, event_name: impl Into<String>, subscriber: Box<dyn EventSubscriber>) {
        self.subscribers
            .entry(event_name.into())
            .or_default()
            .push(subscriber);
    }

    #[cfg(test)]
    fn subscriber_count(&self, event_name: &str) -> usize {
        self.subscribers.get(event_name).map_or(0, Vec::len)
    }

    /// Run every subscriber for `event_name`. The first error stops the
    /// chain and is returned; events nobody subscribed to pass through.
    pub fn dispatch(&self, event_name: &str, context: &mut Context) -> Result<HookAction> {
        if let Some(subscribers) = self.subscribers.get(event_name) {
            for subscriber in subscribers {
                subscriber.handle(event_name, context)?;
            }
        }
        Ok(HookAction::Continue)
    }
}

/// Register the project isolation handler for `session:start`, resolving
/// projects from `cwd` with the `git` executable.
pub fn mount(registry: &mut HookRegistry, config: IsolationConfig, cwd: impl Into<PathBuf>) {
    let cwd = cwd.into();
    let git = GitCli::new(&cwd).with_timeout(config.git_timeout());
    let handler = ProjectIsolation::new(config, cwd, git);
    registry.register(SESSION_START, Box::new(handler));
}
