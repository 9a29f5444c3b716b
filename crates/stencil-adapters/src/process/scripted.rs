//! Scripted command runner for tests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use stencil_core::{
    application::{ApplicationError, ports::CommandRunner},
    domain::{CommandLine, ProcessExit, Stdio},
    error::StencilResult,
};
use tracing::info;

/// Command runner that never starts a process.
///
/// Replies come from a table keyed by the rendered command line, falling
/// back to a default. Every call is recorded so tests can assert on what
/// would have run.
///
/// # Examples
///
/// ```
/// use stencil_adapters::ScriptedRunner;
/// use stencil_core::application::ports::CommandRunner;
/// use stencil_core::domain::{CommandLine, ProcessExit, Stdio};
///
/// let runner = ScriptedRunner::new();
/// runner.reply("npm root --global", ProcessExit::new(Some(0), "/usr/lib/node_modules\n"));
///
/// let cmd = CommandLine::new("npm").arg("root").arg("--global");
/// let exit = runner.run(&cmd, Stdio::Capture).unwrap();
/// assert!(exit.success());
/// assert_eq!(runner.history(), vec!["npm root --global".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    replies: Arc<Mutex<HashMap<String, ProcessExit>>>,
    default_reply: Arc<Mutex<Option<ProcessExit>>>,
    history: Arc<Mutex<Vec<String>>>,
}

impl ScriptedRunner {
    /// A runner with no replies; every command fails with exit status 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner where every command succeeds silently.
    pub fn succeeding() -> Self {
        let runner = Self::new();
        runner.reply_by_default(ProcessExit::new(Some(0), ""));
        runner
    }

    /// Reply to exactly `command` (as rendered by `Display`).
    pub fn reply(&self, command: &str, exit: ProcessExit) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert(command.to_string(), exit);
        }
    }

    /// Reply to anything without its own entry.
    pub fn reply_by_default(&self, exit: ProcessExit) {
        if let Ok(mut default_reply) = self.default_reply.lock() {
            *default_reply = Some(exit);
        }
    }

    /// Every command seen so far, in order.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    /// How many times `command` was run.
    pub fn count(&self, command: &str) -> usize {
        self.history().iter().filter(|c| *c == command).count()
    }

    fn lock<T>(mutex: &Mutex<T>) -> StencilResult<MutexGuard<'_, T>> {
        mutex.lock().map_err(|_| ApplicationError::LockPoisoned.into())
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &CommandLine, _stdio: Stdio) -> StencilResult<ProcessExit> {
        let rendered = command.to_string();
        info!(command = %rendered, "scripted run");
        Self::lock(&self.history)?.push(rendered.clone());

        if let Some(exit) = Self::lock(&self.replies)?.get(&rendered) {
            return Ok(exit.clone());
        }
        Ok(Self::lock(&self.default_reply)?
            .clone()
            .unwrap_or_else(|| ProcessExit::new(Some(1), "")))
    }
}
