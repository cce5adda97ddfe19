//! Verb table for script commands.
//!
//! Each verb maps to one handler. Registering a name twice replaces the
//! first handler; the unsupported-verb stubs go in first so any verb that
//! is implemented overrides its stub.

mod combat;
mod gumps;
mod messages;
mod movement;
mod objects;
mod targeting;
mod unsupported;
mod variables;
mod waits;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;

pub use unsupported::UNSUPPORTED_VERBS;

/// What the interpreter does after a command returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Move on to the next instruction
    Advance,
    /// Run this instruction again on the next firing
    Retry,
}

/// `(ctx, args, quiet, force)`
pub type CommandHandler = Arc<
    dyn Fn(&mut ScriptContext<'_>, &[Argument], bool, bool) -> Result<Continuation, ScriptError>
        + Send
        + Sync,
>;

#[derive(Clone, Default)]
pub struct CommandTable {
    handlers: HashMap<String, CommandHandler>,
}

impl CommandTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The full verb vocabulary
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        unsupported::register(&mut table);
        waits::register(&mut table);
        objects::register(&mut table);
        combat::register(&mut table);
        targeting::register(&mut table);
        gumps::register(&mut table);
        variables::register(&mut table);
        messages::register(&mut table);
        movement::register(&mut table);
        table
    }

    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut ScriptContext<'_>, &[Argument], bool, bool) -> Result<Continuation, ScriptError>
            + Send
            + Sync
            + 'static,
    {
        let key = name.to_ascii_lowercase();
        if self.handlers.insert(key, Arc::new(handler)).is_some() {
            debug!(
                target: "scripting",
                "Command '{}' re-registered, replacing previous handler",
                name
            );
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered verbs, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn execute(
        &self,
        ctx: &mut ScriptContext<'_>,
        name: &str,
        args: &[Argument],
        quiet: bool,
        force: bool,
    ) -> Result<Continuation, ScriptError> {
        let handler = self
            .handlers
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| ScriptError::UnknownCommand(name.to_string()))?;
        handler(ctx, args, quiet, force)
    }
}

impl fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTable")
            .field("verbs", &self.names())
            .finish()
    }
}
