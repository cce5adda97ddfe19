use crate::argument::Argument;
use crate::context::ExpressionContext;
use crate::error::ScriptError;
use crate::parse;
use crate::value::Value;

use super::ExpressionTable;

pub(super) fn register(table: &mut ExpressionTable) {
    table.register("skill", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "skill ('name')")?;
        let id = parse::skill("skill", &args[0])?;
        let value = ctx.world().status.skill(id).map_or(0.0, |skill| skill.value);
        Ok(Value::Float(value))
    });
    table.register("buffexists", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "buffexists ('name')")?;
        Ok(Value::Bool(ctx.world().status.has_buff(args[0].as_str())))
    });
    table.register("inparty", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "inparty (serial)")?;
        let serial = ctx.resolve_serial(&args[0]);
        Ok(Value::Bool(ctx.world().party.contains(&serial)))
    });
    table.register("ingump", |ctx, args, _quiet| {
        parse::arity(args, 1, 2, "ingump ('text') [gumpid/'any']")?;
        let gump = match args.get(1) {
            Some(arg) => parse::gump_id("ingump", arg)?,
            None => None,
        };
        Ok(Value::Bool(
            ctx.world().gumps.contains_text(args[0].as_str(), gump),
        ))
    });
    table.register("gumpexists", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "gumpexists (gumpid/'any')")?;
        let gumps = &ctx.world().gumps;
        let open = match parse::gump_id("gumpexists", &args[0])? {
            Some(id) => gumps.has_gump(id),
            None => gumps.any_open(),
        };
        Ok(Value::Bool(open))
    });
    table.register("injournal", |ctx, args, _quiet| {
        parse::arity(args, 1, 2, "injournal ('text') ['author'/'system']")?;
        let author = args.get(1).map(Argument::as_str);
        Ok(Value::Bool(
            ctx.world().journal.contains(args[0].as_str(), author),
        ))
    });
    table.register("listexists", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "listexists ('list name')")?;
        Ok(Value::Bool(ctx.store().list_exists(args[0].as_str())))
    });
    table.register("list", |ctx, args, quiet| {
        parse::arity(args, 1, 1, "list ('list name')")?;
        let name = args[0].as_str();
        let len = match ctx.store().list_len(name) {
            Some(len) => len,
            None => {
                missing_list(ctx, quiet, "list", name);
                0
            }
        };
        Ok(Value::Int(i32::try_from(len).unwrap_or(i32::MAX)))
    });
    table.register("inlist", |ctx, args, quiet| {
        parse::arity(args, 2, 2, "inlist ('list name') ('value')")?;
        let name = args[0].as_str();
        if !ctx.store().list_exists(name) {
            missing_list(ctx, quiet, "inlist", name);
            return Ok(Value::Bool(false));
        }
        Ok(Value::Bool(ctx.store().list_contains(name, &args[1])))
    });
    table.register("timer", |ctx, args, quiet| {
        parse::arity(args, 1, 1, "timer ('timer name')")?;
        let name = args[0].as_str();
        let elapsed = match ctx.store().timer_elapsed(name, ctx.now()) {
            Some(elapsed) => elapsed.as_millis(),
            None => {
                ctx.soft_error(quiet, format_args!("timer: timer '{}' does not exist", name));
                0
            }
        };
        Ok(Value::Int(i32::try_from(elapsed).unwrap_or(i32::MAX)))
    });
    table.register("timerexists", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "timerexists ('timer name')")?;
        Ok(Value::Bool(ctx.store().timer_exists(args[0].as_str())))
    });
    table.register("targetexists", target_exists);
}

fn missing_list(ctx: &ExpressionContext<'_, '_>, quiet: bool, verb: &str, name: &str) {
    ctx.soft_error(quiet, format_args!("{}: list '{}' does not exist", verb, name));
}

/// The client does not track which kind of cursor is up, so every kind
/// answers the same
fn target_exists(
    ctx: &mut ExpressionContext<'_, '_>,
    args: &[Argument],
    _quiet: bool,
) -> Result<Value, ScriptError> {
    parse::arity(
        args,
        0,
        1,
        "targetexists ['any'/'beneficial'/'harmful'/'neutral']",
    )?;
    if let Some(kind) = args.first() {
        let known = ["any", "beneficial", "harmful", "neutral"]
            .iter()
            .any(|k| kind.is_keyword(k));
        if !known {
            return Err(ScriptError::fatal(
                "targetexists",
                format!("unknown target kind '{}'", kind),
            ));
        }
    }
    Ok(Value::Bool(ctx.world().interaction.target_pending))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use razor_client::world::SkillValue;
    use razor_client::{skills, GumpInfo, JournalEntry, Serial};

    use crate::argument::Argument;
    use crate::error::ScriptError;
    use crate::expressions::ExpressionTable;
    use crate::store::{ListEnd, ScriptStore};
    use crate::testing::Harness;
    use crate::value::Value;

    #[test]
    fn test_skill_reads_value() {
        let mut harness = Harness::new();
        let table = ExpressionTable::with_defaults();
        let healing = skills::skill_id("healing").unwrap();
        harness.world.status.set_skill(SkillValue {
            id: healing,
            value: 87.5,
            base: 85.0,
            cap: 100.0,
        });
        assert_eq!(
            harness.expression(&table, "skill 'Healing'"),
            Ok(Value::Float(87.5))
        );
        assert_eq!(
            harness.expression(&table, "skill 'Anatomy'"),
            Ok(Value::Float(0.0))
        );
        assert!(matches!(
            harness.expression(&table, "skill 'Basket Weaving'"),
            Err(ScriptError::Fatal { verb: "skill", .. })
        ));
    }

    #[test]
    fn test_gumps_and_journal() {
        let mut harness = Harness::new();
        let table = ExpressionTable::with_defaults();
        harness.world.gumps.open_gump(GumpInfo {
            serial: Serial(0x4000_0010),
            gump_id: 0x1f4,
            lines: vec!["Select a reward".into()],
        });
        harness.world.journal.push(JournalEntry {
            serial: Serial::ZERO,
            name: "System".into(),
            text: "You have been revealed!".into(),
            system: true,
        });

        assert_eq!(harness.expression(&table, "gumpexists 500"), Ok(Value::Bool(true)));
        assert_eq!(harness.expression(&table, "gumpexists 501"), Ok(Value::Bool(false)));
        assert_eq!(harness.expression(&table, "gumpexists any"), Ok(Value::Bool(true)));
        assert_eq!(
            harness.expression(&table, "ingump 'reward' 0x1f4"),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            harness.expression(&table, "injournal 'revealed' 'system'"),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            harness.expression(&table, "injournal 'revealed' 'Bob'"),
            Ok(Value::Bool(false))
        );
    }

    #[test]
    fn test_lists() {
        let mut harness = Harness::new();
        let table = ExpressionTable::with_defaults();
        harness.store.create_list("friends");
        harness
            .store
            .push_list("friends", Argument::new("0x200"), ListEnd::Back, false);

        assert_eq!(
            harness.expression(&table, "listexists friends"),
            Ok(Value::Bool(true))
        );
        assert_eq!(harness.expression(&table, "list friends"), Ok(Value::Int(1)));
        assert_eq!(
            harness.expression(&table, "inlist friends 0x200"),
            Ok(Value::Bool(true))
        );
        assert!(harness.actions().is_empty());

        assert_eq!(harness.expression(&table, "@list enemies"), Ok(Value::Int(0)));
        assert!(harness.actions().is_empty());
        assert_eq!(
            harness.expression(&table, "inlist enemies 0x200"),
            Ok(Value::Bool(false))
        );
        assert_eq!(harness.actions().len(), 1);
    }

    #[test]
    fn test_timer_counts_from_creation() {
        let mut harness = Harness::new();
        let table = ExpressionTable::with_defaults();
        harness.store.create_timer("heal", harness.now);
        harness.now += Duration::from_millis(1500);
        assert_eq!(harness.expression(&table, "timer heal"), Ok(Value::Int(1500)));
        assert_eq!(
            harness.expression(&table, "timerexists heal"),
            Ok(Value::Bool(true))
        );
        assert_eq!(harness.expression(&table, "@timer cure"), Ok(Value::Int(0)));
    }

    #[test]
    fn test_party_buffs_and_target() {
        let mut harness = Harness::new();
        let table = ExpressionTable::with_defaults();
        harness.world.party.insert(Serial(0x200));
        harness.world.status.buffs.insert("protection".into());

        assert_eq!(harness.expression(&table, "inparty 0x200"), Ok(Value::Bool(true)));
        assert_eq!(harness.expression(&table, "inparty self"), Ok(Value::Bool(false)));
        assert_eq!(
            harness.expression(&table, "buffexists 'Protection'"),
            Ok(Value::Bool(true))
        );
        assert_eq!(harness.expression(&table, "targetexists"), Ok(Value::Bool(false)));
        harness.world.interaction.target_pending = true;
        assert_eq!(
            harness.expression(&table, "targetexists harmful"),
            Ok(Value::Bool(true))
        );
        assert!(matches!(
            harness.expression(&table, "targetexists friendly"),
            Err(ScriptError::Fatal { .. })
        ));
    }
}
