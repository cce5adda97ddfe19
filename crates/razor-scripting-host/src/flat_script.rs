//! Straight-line scripts: one command per line, run top to bottom.
//!
//! ```text
//! // heal up before the fight
//! @setalias 'enemy' 0x2A3F
//! bandageself
//! pause 2500
//! cast! 'Greater Heal' self
//! ```
//!
//! A leading `@` makes the command quiet, a trailing `!` on the verb forces
//! it. Arguments are split on whitespace; single or double quotes keep
//! spaces together. There is no control flow.

use crate::argument::Argument;
use crate::commands::Continuation;
use crate::engine::{Interpreter, ScriptEngine, StepOutcome};
use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub verb: String,
    pub args: Vec<Argument>,
    pub quiet: bool,
    pub force: bool,
    /// 1-based source line
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Parse one source line. Blank lines and `//` comments give `Ok(None)`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<Instruction>, ParseError> {
    let error = |message: &str| ParseError {
        line: line_no,
        message: message.to_string(),
    };

    let mut tokens = tokenize(line).map_err(|message| error(message))?.into_iter();
    let Some(first) = tokens.next() else {
        return Ok(None);
    };

    let (quiet, verb) = match first.strip_prefix('@') {
        Some(rest) => (true, rest),
        None => (false, first.as_str()),
    };
    let (force, verb) = match verb.strip_suffix('!') {
        Some(rest) => (true, rest),
        None => (false, verb),
    };
    if verb.is_empty() {
        return Err(error("missing command name"));
    }

    Ok(Some(Instruction {
        verb: verb.to_ascii_lowercase(),
        args: tokens.map(Argument::from).collect(),
        quiet,
        force,
        line: line_no,
    }))
}

fn tokenize(line: &str) -> Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&c) = chars.peek() else {
            break;
        };
        match c {
            '\'' | '"' => {
                chars.next();
                let mut token = String::new();
                loop {
                    match chars.next() {
                        Some(ch) if ch == c => break,
                        Some(ch) => token.push(ch),
                        None => return Err("unterminated quote"),
                    }
                }
                tokens.push(token);
            }
            '/' if line_rest_is_comment(chars.clone()) => break,
            _ => {
                let mut token = String::new();
                while let Some(ch) = chars.next_if(|ch| !ch.is_whitespace()) {
                    token.push(ch);
                }
                tokens.push(token);
            }
        }
    }
    Ok(tokens)
}

fn line_rest_is_comment(mut rest: impl Iterator<Item = char>) -> bool {
    rest.next() == Some('/') && rest.next() == Some('/')
}

/// A parsed script with its instruction pointer
#[derive(Debug, Clone)]
pub struct FlatScript {
    name: String,
    instructions: Vec<Instruction>,
    pointer: usize,
}

impl FlatScript {
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, ParseError> {
        let mut instructions = Vec::new();
        for (idx, line) in source.lines().enumerate() {
            if let Some(instruction) = parse_line(line, idx + 1)? {
                instructions.push(instruction);
            }
        }
        Ok(Self {
            name: name.into(),
            instructions,
            pointer: 0,
        })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn is_finished(&self) -> bool {
        self.pointer >= self.instructions.len()
    }
}

impl ScriptEngine for FlatScript {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(&mut self, interp: &mut Interpreter<'_, '_>) -> Result<StepOutcome, ScriptError> {
        let Some(instruction) = self.instructions.get(self.pointer) else {
            return Ok(StepOutcome::Finished);
        };
        let continuation = interp.execute(
            &instruction.verb,
            &instruction.args,
            instruction.quiet,
            instruction.force,
        )?;
        match continuation {
            Continuation::Retry => Ok(StepOutcome::Yield),
            Continuation::Advance => {
                self.pointer += 1;
                if self.is_finished() {
                    Ok(StepOutcome::Finished)
                } else {
                    Ok(StepOutcome::Advanced)
                }
            }
        }
    }

    fn line(&self) -> Option<usize> {
        self.instructions.get(self.pointer).map(|i| i.line)
    }
}
