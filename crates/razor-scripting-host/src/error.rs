use crate::argument::ArgumentError;
use crate::locator::LocateError;

/// Errors that abort the running script.
///
/// Recoverable problems (an object that is not there, an empty list) are
/// reported to the player and the script carries on; see
/// [`ScriptContext::soft_error`](crate::context::ScriptContext::soft_error).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    /// Wrong number of arguments; the text is the verb's usage line
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),

    #[error("Unknown expression '{0}'")]
    UnknownExpression(String),

    #[error("{verb}: {source}")]
    InvalidArgument {
        verb: &'static str,
        source: ArgumentError,
    },

    /// Semantically invalid input: wrong serial class, unknown enumerated
    /// literal, a search container that does not exist
    #[error("{verb}: {message}")]
    Fatal {
        verb: &'static str,
        message: String,
    },
}

impl ScriptError {
    pub fn fatal(verb: &'static str, message: impl Into<String>) -> Self {
        ScriptError::Fatal {
            verb,
            message: message.into(),
        }
    }

    /// Adapter for `map_err` on argument coercions
    pub fn invalid(verb: &'static str) -> impl FnOnce(ArgumentError) -> Self {
        move |source| ScriptError::InvalidArgument { verb, source }
    }

    /// Adapter for `map_err` on object searches; a bad search container
    /// aborts the script
    pub fn locate(verb: &'static str) -> impl FnOnce(LocateError) -> Self {
        move |err| ScriptError::fatal(verb, err.to_string())
    }

    /// Line shown in the player's feed when the script is aborted
    pub fn feed_text(&self, script: &str) -> String {
        match self {
            ScriptError::Usage(_) => self.to_string(),
            other => format!("Script {} error => {}", script, other),
        }
    }
}
