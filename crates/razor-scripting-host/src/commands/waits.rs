//! Blocking verbs. Each one checks its condition, then falls back to the
//! script's pause gate so the wait ends at the timeout at the latest.

use std::time::Duration;

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::parse;

use super::{CommandTable, Continuation};

pub(super) fn register(table: &mut CommandTable) {
    table.register("pause", pause);
    table.register("waitforgump", wait_for_gump);
    table.register("waitforjournal", wait_for_journal);
    table.register("waitfortarget", wait_for_target);
}

fn timeout(verb: &'static str, arg: &Argument) -> Result<Duration, ScriptError> {
    arg.as_uint()
        .map(|ms| Duration::from_millis(u64::from(ms)))
        .map_err(ScriptError::invalid(verb))
}

fn pause(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "pause (timeout)")?;
    let timeout = timeout("pause", &args[0])?;
    Ok(ctx.wait_until(false, timeout))
}

fn wait_for_gump(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "waitforgump (gump id/'any') (timeout)")?;
    let gump_id = parse::gump_id("waitforgump", &args[0])?;
    let timeout = timeout("waitforgump", &args[1])?;

    let gumps = &ctx.world().gumps;
    let open = match gump_id {
        Some(id) => gumps.has_gump(id),
        None => gumps.any_open(),
    };
    Ok(ctx.wait_until(open, timeout))
}

fn wait_for_journal(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(
        args,
        2,
        3,
        "waitforjournal ('text') (timeout) ['author'/'system']",
    )?;
    let timeout = timeout("waitforjournal", &args[1])?;
    let author = args.get(2).map(Argument::as_str);
    let seen = ctx.world().journal.contains(args[0].as_str(), author);
    Ok(ctx.wait_until(seen, timeout))
}

fn wait_for_target(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "waitfortarget (timeout)")?;
    let timeout = timeout("waitfortarget", &args[0])?;
    let pending = ctx.world().interaction.target_pending;
    Ok(ctx.wait_until(pending, timeout))
}
