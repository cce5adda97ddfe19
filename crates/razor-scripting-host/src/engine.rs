//! The seam between a script language and the execution core.
//!
//! A [`ScriptEngine`] owns the parsed script and its instruction pointer.
//! On every firing the runner hands it an [`Interpreter`] and calls
//! [`ScriptEngine::step`] until the engine yields, finishes, or the
//! per-firing step budget runs out.

use razor_client::World;

use crate::argument::Argument;
use crate::commands::{CommandTable, Continuation};
use crate::context::{ExpressionContext, ScriptContext};
use crate::error::ScriptError;
use crate::expressions::ExpressionTable;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction ran; the engine can take another step this firing
    Advanced,
    /// Waiting on something; try again next firing
    Yield,
    /// Nothing left to run
    Finished,
}

pub trait ScriptEngine: Send {
    fn name(&self) -> &str;

    fn step(&mut self, interp: &mut Interpreter<'_, '_>) -> Result<StepOutcome, ScriptError>;

    /// Source line of the next instruction, for error reports
    fn line(&self) -> Option<usize> {
        None
    }
}

/// Command and expression dispatch bound to one script's context
pub struct Interpreter<'c, 'a> {
    ctx: &'c mut ScriptContext<'a>,
    commands: &'c CommandTable,
    expressions: &'c ExpressionTable,
}

impl<'c, 'a> Interpreter<'c, 'a> {
    pub fn new(
        ctx: &'c mut ScriptContext<'a>,
        commands: &'c CommandTable,
        expressions: &'c ExpressionTable,
    ) -> Self {
        Self {
            ctx,
            commands,
            expressions,
        }
    }

    pub fn execute(
        &mut self,
        verb: &str,
        args: &[Argument],
        quiet: bool,
        force: bool,
    ) -> Result<Continuation, ScriptError> {
        self.commands.execute(self.ctx, verb, args, quiet, force)
    }

    pub fn evaluate(
        &mut self,
        name: &str,
        args: &[Argument],
        quiet: bool,
    ) -> Result<Value, ScriptError> {
        let mut ctx = ExpressionContext::new(self.ctx);
        self.expressions.evaluate(&mut ctx, name, args, quiet)
    }

    pub fn world(&self) -> &'a World {
        self.ctx.world()
    }

    pub fn script_name(&self) -> &str {
        self.ctx.script_name()
    }
}
