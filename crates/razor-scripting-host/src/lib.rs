//! Execution core for razor scripts.
//!
//! A script language plugs in through [`ScriptEngine`]; everything it can
//! do goes through the [`CommandTable`] and [`ExpressionTable`]. The
//! [`ScriptRunner`] drives all running scripts once per scheduler firing.
pub mod alias;
pub mod argument;
pub mod commands;
pub mod context;
pub mod engine;
pub mod error;
pub mod expressions;
pub mod flat_script;
pub mod gate;
pub mod locator;
mod parse;
pub mod script_runner;
pub mod store;
pub mod value;

#[cfg(test)]
mod testing;

pub use argument::{Argument, ArgumentError};
pub use commands::{CommandTable, Continuation};
pub use context::{ExpressionContext, ScriptContext, FOUND_ALIAS};
pub use engine::{Interpreter, ScriptEngine, StepOutcome};
pub use error::ScriptError;
pub use expressions::ExpressionTable;
pub use flat_script::{FlatScript, Instruction, ParseError};
pub use gate::{GateStatus, PauseGate};
pub use locator::{LocateError, LocateRequest, SearchSource};
pub use script_runner::{ScriptExit, ScriptId, ScriptRunner, DEFAULT_MAX_STEPS_PER_TICK};
pub use store::{ListEnd, MemoryStore, PopTarget, ScriptStore};
pub use value::Value;
