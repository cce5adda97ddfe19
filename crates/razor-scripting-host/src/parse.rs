//! Argument checks shared by commands and expressions.

use razor_client::{skills, Layer, Serial};

use crate::argument::Argument;
use crate::error::ScriptError;

/// Fail with the verb's usage line unless `min..=max` arguments were given
pub fn arity(
    args: &[Argument],
    min: usize,
    max: usize,
    usage: &'static str,
) -> Result<(), ScriptError> {
    if args.len() < min || args.len() > max {
        return Err(ScriptError::Usage(usage));
    }
    Ok(())
}

/// Hue filter; `any` and `-1` match every hue
pub fn color(verb: &'static str, arg: Option<&Argument>) -> Result<Option<u16>, ScriptError> {
    match arg {
        None => Ok(None),
        Some(arg) if arg.is_keyword("any") || arg.as_str().trim() == "-1" => Ok(None),
        Some(arg) => arg.as_u16().map(Some).map_err(ScriptError::invalid(verb)),
    }
}

pub fn graphic(verb: &'static str, arg: &Argument) -> Result<u16, ScriptError> {
    arg.as_u16().map_err(ScriptError::invalid(verb))
}

pub fn optional_uint(
    verb: &'static str,
    arg: Option<&Argument>,
) -> Result<Option<u32>, ScriptError> {
    arg.map(|arg| arg.as_uint().map_err(ScriptError::invalid(verb)))
        .transpose()
}

pub fn layer(verb: &'static str, arg: &Argument) -> Result<Layer, ScriptError> {
    Layer::from_name(arg.as_str())
        .ok_or_else(|| ScriptError::fatal(verb, format!("unknown layer '{}'", arg)))
}

pub fn skill(verb: &'static str, arg: &Argument) -> Result<u16, ScriptError> {
    skills::skill_id(arg.as_str())
        .ok_or_else(|| ScriptError::fatal(verb, format!("unknown skill '{}'", arg)))
}

/// `Some(id)` for a specific gump, `None` for `any`
pub fn gump_id(verb: &'static str, arg: &Argument) -> Result<Option<u32>, ScriptError> {
    if arg.is_keyword("any") {
        return Ok(None);
    }
    arg.as_uint().map(Some).map_err(ScriptError::invalid(verb))
}

pub fn require_mobile(verb: &'static str, serial: Serial) -> Result<Serial, ScriptError> {
    if serial.is_mobile() {
        Ok(serial)
    } else {
        Err(ScriptError::fatal(verb, format!("{} is not a mobile", serial)))
    }
}

pub fn require_item(verb: &'static str, serial: Serial) -> Result<Serial, ScriptError> {
    if serial.is_item() {
        Ok(serial)
    } else {
        Err(ScriptError::fatal(verb, format!("{} is not an item", serial)))
    }
}

pub fn require_valid(verb: &'static str, serial: Serial) -> Result<Serial, ScriptError> {
    if serial.is_valid() {
        Ok(serial)
    } else {
        Err(ScriptError::fatal(verb, format!("invalid serial {}", serial)))
    }
}
