use razor_client::{ClientAction, Direction};

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::parse;

use super::{CommandTable, Continuation};

pub(super) fn register(table: &mut CommandTable) {
    table.register("walk", |ctx, args, _quiet, _force| {
        parse::arity(args, 1, 1, "walk (direction)")?;
        let direction = direction("walk", &args[0])?;
        ctx.send_action(ClientAction::Walk {
            direction,
            run: false,
        });
        Ok(Continuation::Advance)
    });
    table.register("run", |ctx, args, _quiet, _force| {
        parse::arity(args, 1, 1, "run (direction)")?;
        let direction = direction("run", &args[0])?;
        ctx.send_action(ClientAction::Walk {
            direction,
            run: true,
        });
        Ok(Continuation::Advance)
    });
    table.register("turn", |ctx, args, _quiet, _force| {
        parse::arity(args, 1, 1, "turn (direction)")?;
        let direction = direction("turn", &args[0])?;
        ctx.send_action(ClientAction::Turn { direction });
        Ok(Continuation::Advance)
    });
    table.register("fly", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "fly")?;
        set_flying(ctx, true);
        Ok(Continuation::Advance)
    });
    table.register("land", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "land")?;
        set_flying(ctx, false);
        Ok(Continuation::Advance)
    });
    table.register("resync", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "resync")?;
        ctx.send_action(ClientAction::Resync);
        Ok(Continuation::Advance)
    });
    table.register("ping", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "ping")?;
        ctx.send_action(ClientAction::Ping);
        Ok(Continuation::Advance)
    });
}

fn direction(verb: &'static str, arg: &Argument) -> Result<Direction, ScriptError> {
    Direction::from_name(arg.as_str())
        .ok_or_else(|| ScriptError::fatal(verb, format!("unknown direction '{}'", arg)))
}

/// Flying is a toggle on the wire; only send it when the state differs
fn set_flying(ctx: &ScriptContext<'_>, flying: bool) {
    let currently = ctx.world().player().is_some_and(|p| p.is_flying());
    if currently != flying {
        ctx.send_action(ClientAction::ToggleFlying);
    }
}
