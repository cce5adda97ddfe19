use razor_client::{ClientAction, Point3D};

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::locator::{LocateRequest, SearchSource};
use crate::parse;

use super::{CommandTable, Continuation};

pub(super) fn register(table: &mut CommandTable) {
    table.register("target", target);
    table.register("targettype", target_type);
    table.register("targetground", target_ground);
    table.register("targettile", target_tile);
    table.register("canceltarget", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "canceltarget")?;
        ctx.send_action(ClientAction::CancelTarget);
        Ok(Continuation::Advance)
    });
    table.register("cleartargetqueue", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "cleartargetqueue")?;
        ctx.send_action(ClientAction::ClearTargetQueue);
        Ok(Continuation::Advance)
    });
}

/// Forced targeting drops anything already queued
fn clear_queue_if_forced(ctx: &ScriptContext<'_>, force: bool) {
    if force {
        ctx.send_action(ClientAction::ClearTargetQueue);
    }
}

fn target(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "target (serial)")?;
    let serial = parse::require_valid("target", ctx.resolve_serial(&args[0]))?;
    clear_queue_if_forced(ctx, force);
    ctx.send_action(ClientAction::Target { serial });
    Ok(Continuation::Advance)
}

fn locate_and_target(
    ctx: &mut ScriptContext<'_>,
    verb: &'static str,
    source: SearchSource,
    args: &[Argument],
    quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    let request = LocateRequest::new(parse::graphic(verb, &args[0])?)
        .color(parse::color(verb, args.get(1))?)
        .max_range(parse::optional_uint(verb, args.get(2))?)
        .source(source);
    match ctx.locate(&request).map_err(ScriptError::locate(verb))? {
        Some(serial) => {
            clear_queue_if_forced(ctx, force);
            ctx.send_action(ClientAction::Target { serial });
        }
        None => ctx.soft_error(
            quiet,
            format_args!("{}: could not find graphic 0x{:04X}", verb, request.graphic),
        ),
    }
    Ok(Continuation::Advance)
}

fn target_type(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 3, "targettype (graphic) [color] [range]")?;
    locate_and_target(ctx, "targettype", SearchSource::Any, args, quiet, force)
}

fn target_ground(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 3, "targetground (graphic) [color] [range]")?;
    locate_and_target(ctx, "targetground", SearchSource::Ground, args, quiet, force)
}

fn target_tile(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 3, 4, "targettile (x) (y) (z) [graphic]")?;
    let coord = |arg: &Argument| arg.as_int().map_err(ScriptError::invalid("targettile"));
    let position = Point3D::new(coord(&args[0])?, coord(&args[1])?, coord(&args[2])?);
    let graphic = match args.get(3) {
        Some(arg) => parse::graphic("targettile", arg)?,
        None => 0,
    };
    clear_queue_if_forced(ctx, force);
    ctx.send_action(ClientAction::TargetGround { graphic, position });
    Ok(Continuation::Advance)
}
