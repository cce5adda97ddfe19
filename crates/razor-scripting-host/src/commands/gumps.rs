use razor_client::ClientAction;

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::parse;

use super::{CommandTable, Continuation};

pub(super) fn register(table: &mut CommandTable) {
    table.register("replygump", reply_gump);
    table.register("closegump", close_gump);
    table.register("contextmenu", context_menu);
    table.register("clearjournal", |ctx, args, _quiet, _force| {
        parse::arity(args, 0, 0, "clearjournal")?;
        ctx.send_action(ClientAction::ClearJournal);
        Ok(Continuation::Advance)
    });
}

fn reply_gump(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "replygump (gump id) (button)")?;
    let gump_id = args[0].as_uint().map_err(ScriptError::invalid("replygump"))?;
    let button = args[1].as_uint().map_err(ScriptError::invalid("replygump"))?;

    match ctx.world().gumps.get(gump_id) {
        Some(gump) => ctx.send_action(ClientAction::GumpResponse {
            serial: gump.serial,
            gump_id,
            button,
        }),
        None => ctx.soft_error(quiet, format_args!("replygump: gump {} is not open", gump_id)),
    }
    Ok(Continuation::Advance)
}

fn close_gump(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "closegump (gump id)")?;
    let gump_id = args[0].as_uint().map_err(ScriptError::invalid("closegump"))?;
    if ctx.world().gumps.has_gump(gump_id) {
        ctx.send_action(ClientAction::CloseGump { gump_id });
    } else {
        ctx.soft_error(quiet, format_args!("closegump: gump {} is not open", gump_id));
    }
    Ok(Continuation::Advance)
}

fn context_menu(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "contextmenu (serial) (option)")?;
    let serial = parse::require_valid("contextmenu", ctx.resolve_serial(&args[0]))?;
    let option = args[1].as_u16().map_err(ScriptError::invalid("contextmenu"))?;
    ctx.send_action(ClientAction::ContextMenu { serial, option });
    Ok(Continuation::Advance)
}
