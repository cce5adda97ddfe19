//! Alias, list and timer verbs over the script store.

use std::time::Duration;

use crate::alias;
use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::parse;
use crate::store::{ListEnd, PopTarget};

use super::{CommandTable, Continuation};

pub(super) fn register(table: &mut CommandTable) {
    table.register("setalias", set_alias);
    table.register("unsetalias", unset_alias);
    table.register("createlist", create_list);
    table.register("removelist", remove_list);
    table.register("pushlist", push_list);
    table.register("poplist", pop_list);
    table.register("clearlist", clear_list);
    table.register("createtimer", create_timer);
    table.register("settimer", set_timer);
    table.register("removetimer", remove_timer);
}

fn set_alias(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "setalias ('name') (serial)")?;
    let name = args[0].as_str();
    if alias::is_dynamic_alias(name) {
        ctx.soft_error(quiet, format_args!("setalias: '{}' is a built-in alias", name));
        return Ok(Continuation::Advance);
    }
    let serial = ctx.resolve_serial(&args[1]);
    ctx.store_mut().set_alias(name, serial);
    Ok(Continuation::Advance)
}

fn unset_alias(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "unsetalias ('name')")?;
    ctx.store_mut().unset_alias(args[0].as_str());
    Ok(Continuation::Advance)
}

fn missing_list(ctx: &ScriptContext<'_>, quiet: bool, verb: &str, name: &str) -> Continuation {
    ctx.soft_error(quiet, format_args!("{}: list '{}' does not exist", verb, name));
    Continuation::Advance
}

fn create_list(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "createlist ('list name')")?;
    ctx.store_mut().create_list(args[0].as_str());
    Ok(Continuation::Advance)
}

fn remove_list(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "removelist ('list name')")?;
    let name = args[0].as_str();
    if !ctx.store_mut().remove_list(name) {
        return Ok(missing_list(ctx, quiet, "removelist", name));
    }
    Ok(Continuation::Advance)
}

fn push_list(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 3, "pushlist ('list name') ('value') ['front'/'back']")?;
    let end = match args.get(2) {
        None => ListEnd::Back,
        Some(arg) if arg.is_keyword("back") => ListEnd::Back,
        Some(arg) if arg.is_keyword("front") => ListEnd::Front,
        Some(arg) => {
            return Err(ScriptError::fatal(
                "pushlist",
                format!("expected 'front' or 'back', got '{}'", arg),
            ))
        }
    };

    let name = args[0].as_str();
    if !ctx.store().list_exists(name) {
        return Ok(missing_list(ctx, quiet, "pushlist", name));
    }
    // Forced pushes keep the list free of duplicates
    ctx.store_mut().push_list(name, args[1].clone(), end, force);
    Ok(Continuation::Advance)
}

fn pop_list(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "poplist ('list name') ('value'/'front'/'back')")?;
    let target = if args[1].is_keyword("front") {
        PopTarget::Front
    } else if args[1].is_keyword("back") {
        PopTarget::Back
    } else {
        PopTarget::Value(args[1].clone())
    };

    let name = args[0].as_str();
    if !ctx.store().list_exists(name) {
        return Ok(missing_list(ctx, quiet, "poplist", name));
    }
    ctx.store_mut().pop_list(name, &target);
    Ok(Continuation::Advance)
}

fn clear_list(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "clearlist ('list name')")?;
    let name = args[0].as_str();
    if !ctx.store_mut().clear_list(name) {
        return Ok(missing_list(ctx, quiet, "clearlist", name));
    }
    Ok(Continuation::Advance)
}

fn create_timer(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "createtimer ('timer name')")?;
    let now = ctx.now();
    ctx.store_mut().create_timer(args[0].as_str(), now);
    Ok(Continuation::Advance)
}

fn set_timer(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "settimer ('timer name') (value)")?;
    let ms = args[1].as_uint().map_err(ScriptError::invalid("settimer"))?;
    let now = ctx.now();
    ctx.store_mut()
        .set_timer(args[0].as_str(), Duration::from_millis(u64::from(ms)), now);
    Ok(Continuation::Advance)
}

fn remove_timer(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "removetimer ('timer name')")?;
    let name = args[0].as_str();
    if !ctx.store_mut().remove_timer(name) {
        ctx.soft_error(quiet, format_args!("removetimer: timer '{}' does not exist", name));
    }
    Ok(Continuation::Advance)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use razor_client::{ClientAction, Serial};

    use crate::argument::Argument;
    use crate::commands::CommandTable;
    use crate::error::ScriptError;
    use crate::store::ScriptStore;
    use crate::testing::{Harness, BACKPACK};

    #[test]
    fn test_setalias_resolves_value() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "setalias chest backpack").unwrap();
        assert_eq!(harness.store.get_alias("chest"), Some(BACKPACK));

        harness.command(&table, "unsetalias chest").unwrap();
        assert_eq!(harness.store.get_alias("chest"), Some(Serial::ZERO));
    }

    #[test]
    fn test_setalias_refuses_builtin_names() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "@setalias self 0x200").unwrap();
        assert_eq!(harness.store.get_alias("self"), None);
        assert!(matches!(
            harness.command(&table, "setalias chest"),
            Err(ScriptError::Usage(_))
        ));
    }

    #[test]
    fn test_list_lifecycle() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "createlist ids").unwrap();
        harness.command(&table, "pushlist ids 1").unwrap();
        harness.command(&table, "pushlist ids 0 front").unwrap();
        harness.command(&table, "pushlist ids 2").unwrap();
        harness.command(&table, "poplist ids back").unwrap();
        assert_eq!(
            harness.store.list("ids"),
            Some(&[Argument::new("0"), Argument::new("1")][..])
        );

        harness.command(&table, "poplist ids 0").unwrap();
        assert_eq!(harness.store.list_len("ids"), Some(1));

        harness.command(&table, "clearlist ids").unwrap();
        assert_eq!(harness.store.list_len("ids"), Some(0));
        harness.command(&table, "removelist ids").unwrap();
        assert!(!harness.store.list_exists("ids"));
        assert!(harness.actions().is_empty());
    }

    #[test]
    fn test_forced_push_skips_duplicates() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "createlist ids").unwrap();
        harness.command(&table, "pushlist ids 7").unwrap();
        harness.command(&table, "pushlist! ids 7").unwrap();
        assert_eq!(harness.store.list_len("ids"), Some(1));
        harness.command(&table, "pushlist ids 7").unwrap();
        assert_eq!(harness.store.list_len("ids"), Some(2));
    }

    #[test]
    fn test_missing_list_is_soft() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "pushlist nope 1").unwrap();
        assert_eq!(
            harness.actions(),
            vec![ClientAction::system_message(
                "Script test error => pushlist: list 'nope' does not exist"
            )]
        );
        assert!(matches!(
            harness.command(&table, "pushlist nope 1 middle"),
            Err(ScriptError::Fatal { verb: "pushlist", .. })
        ));
    }

    #[test]
    fn test_timers() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "createtimer heal").unwrap();
        harness.now += Duration::from_millis(300);
        assert_eq!(
            harness.store.timer_elapsed("heal", harness.now),
            Some(Duration::from_millis(300))
        );

        harness.command(&table, "settimer heal 5000").unwrap();
        assert_eq!(
            harness.store.timer_elapsed("heal", harness.now),
            Some(Duration::from_millis(5000))
        );

        harness.command(&table, "removetimer heal").unwrap();
        assert!(!harness.store.timer_exists("heal"));
        harness.command(&table, "@removetimer heal").unwrap();
        assert!(harness.actions().is_empty());
    }
}
