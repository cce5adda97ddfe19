//! Named queries scripts use in conditions.
//!
//! With no argument an expression asks about the player; with one it asks
//! about whatever the argument resolves to. A query about something that
//! is not there reports softly and yields the zero value of its type.

mod objects;
mod session;
mod vitals;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use razor_client::{Mobile, Serial};
use tracing::debug;

use crate::argument::Argument;
use crate::context::ExpressionContext;
use crate::error::ScriptError;
use crate::value::Value;

/// `(ctx, args, quiet)`
pub type ExpressionHandler = Arc<
    dyn Fn(&mut ExpressionContext<'_, '_>, &[Argument], bool) -> Result<Value, ScriptError>
        + Send
        + Sync,
>;

#[derive(Clone, Default)]
pub struct ExpressionTable {
    handlers: HashMap<String, ExpressionHandler>,
}

impl ExpressionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        vitals::register(&mut table);
        objects::register(&mut table);
        session::register(&mut table);
        table
    }

    pub fn register<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut ExpressionContext<'_, '_>, &[Argument], bool) -> Result<Value, ScriptError>
            + Send
            + Sync
            + 'static,
    {
        let key = name.to_ascii_lowercase();
        if self.handlers.insert(key, Arc::new(handler)).is_some() {
            debug!(
                target: "scripting",
                "Expression '{}' re-registered, replacing previous handler",
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

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn evaluate(
        &self,
        ctx: &mut ExpressionContext<'_, '_>,
        name: &str,
        args: &[Argument],
        quiet: bool,
    ) -> Result<Value, ScriptError> {
        let handler = self
            .handlers
            .get(&name.to_ascii_lowercase())
            .ok_or_else(|| ScriptError::UnknownExpression(name.to_string()))?;
        handler(ctx, args, quiet)
    }
}

impl fmt::Debug for ExpressionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionTable")
            .field("names", &self.names())
            .finish()
    }
}

/// The player, or the object the first argument names
fn subject(ctx: &ExpressionContext<'_, '_>, args: &[Argument]) -> Serial {
    match args.first() {
        Some(arg) => ctx.resolve_serial(arg),
        None => ctx.world().player_serial(),
    }
}

fn subject_mobile<'a>(
    ctx: &ExpressionContext<'_, 'a>,
    args: &[Argument],
    quiet: bool,
    verb: &str,
) -> Option<&'a Mobile> {
    let serial = subject(ctx, args);
    let mobile = ctx.world().mobile(serial);
    if mobile.is_none() {
        ctx.soft_error(quiet, format_args!("{}: mobile {} not found", verb, serial));
    }
    mobile
}
