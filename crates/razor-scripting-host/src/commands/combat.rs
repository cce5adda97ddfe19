use razor_client::{spells, Ability, ClientAction};

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::parse;

use super::{CommandTable, Continuation};

pub(super) fn register(table: &mut CommandTable) {
    table.register("attack", attack);
    table.register("warmode", war_mode);
    table.register("setability", set_ability);
    table.register("useskill", use_skill);
    table.register("cast", cast);
}

fn attack(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "attack (serial)")?;
    let serial = parse::require_mobile("attack", ctx.resolve_serial(&args[0]))?;
    ctx.send_action(ClientAction::Attack { serial });
    Ok(Continuation::Advance)
}

fn war_mode(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 0, 1, "warmode ['on'/'off']")?;
    let enabled = match args.first() {
        Some(arg) => arg.as_bool().map_err(ScriptError::invalid("warmode"))?,
        None => !ctx.world().player().is_some_and(|p| p.in_war_mode()),
    };
    ctx.send_action(ClientAction::SetWarMode { enabled });
    Ok(Continuation::Advance)
}

fn set_ability(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(
        args,
        1,
        2,
        "setability ('primary'/'secondary'/'stun'/'disarm') ['on'/'off']",
    )?;
    let ability = Ability::from_name(args[0].as_str()).ok_or_else(|| {
        ScriptError::fatal("setability", format!("unknown ability '{}'", args[0]))
    })?;
    let enable = match args.get(1) {
        Some(arg) => arg.as_bool().map_err(ScriptError::invalid("setability"))?,
        None => true,
    };

    // The server request and the local icon update always travel together
    if enable {
        ctx.send_action(ClientAction::UseAbility { ability });
        ctx.send_action(ClientAction::ClientSetAbility { ability });
    } else {
        ctx.send_action(ClientAction::ClearAbility);
        ctx.send_action(ClientAction::ClientClearAbility);
    }
    Ok(Continuation::Advance)
}

fn use_skill(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "useskill ('skill name'/'last')")?;
    let skill = if args[0].is_keyword("last") {
        match ctx.world().interaction.last_skill {
            Some(skill) => skill,
            None => {
                ctx.soft_error(quiet, "useskill: no skill used yet");
                return Ok(Continuation::Advance);
            }
        }
    } else {
        parse::skill("useskill", &args[0])?
    };
    ctx.send_action(ClientAction::UseSkill { skill });
    Ok(Continuation::Advance)
}

fn cast(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 2, "cast ('spell name'/id) [serial]")?;
    let spell = spells::spell_id(args[0].as_str())
        .ok_or_else(|| ScriptError::fatal("cast", format!("unknown spell '{}'", args[0])))?;
    let target = args
        .get(1)
        .map(|arg| parse::require_valid("cast", ctx.resolve_serial(arg)))
        .transpose()?;

    if force {
        ctx.send_action(ClientAction::CancelTarget);
    }
    ctx.send_action(ClientAction::CastSpell { spell, target });
    Ok(Continuation::Advance)
}

#[cfg(test)]
mod tests {
    use razor_client::{Ability, ClientAction, MobileFlags};

    use crate::commands::{CommandTable, Continuation};
    use crate::error::ScriptError;
    use crate::testing::{Harness, PLAYER};

    #[test]
    fn test_setability_off_clears_server_and_client() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert_eq!(
            harness.command(&table, "setability stun off"),
            Ok(Continuation::Advance)
        );
        assert_eq!(
            harness.actions(),
            vec![ClientAction::ClearAbility, ClientAction::ClientClearAbility]
        );
    }

    #[test]
    fn test_setability_on_by_default() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "setability primary").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::UseAbility {
                    ability: Ability::Primary
                },
                ClientAction::ClientSetAbility {
                    ability: Ability::Primary
                },
            ]
        );
    }

    #[test]
    fn test_setability_unknown_literal_is_fatal() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert!(matches!(
            harness.command(&table, "setability whirlwind"),
            Err(ScriptError::Fatal { verb: "setability", .. })
        ));
        assert!(harness.actions().is_empty());
    }

    #[test]
    fn test_attack_rejects_items() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert!(harness.command(&table, "attack backpack").is_err());
        let orc = harness.add_mobile(0x200, 0x11, 1002);
        harness.command(&table, "attack 0x200").unwrap();
        assert_eq!(harness.actions(), vec![ClientAction::Attack { serial: orc }]);
    }

    #[test]
    fn test_warmode_toggles_without_argument() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "warmode").unwrap();
        harness.world.player_mut().unwrap().flags |= MobileFlags::WAR_MODE;
        harness.command(&table, "warmode").unwrap();
        harness.command(&table, "warmode on").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::SetWarMode { enabled: true },
                ClientAction::SetWarMode { enabled: false },
                ClientAction::SetWarMode { enabled: true },
            ]
        );
    }

    #[test]
    fn test_useskill_by_name_and_last() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "@useskill last").unwrap();
        assert!(harness.actions().is_empty());

        harness.command(&table, "useskill 'Spirit Speak'").unwrap();
        harness.world.interaction.last_skill = Some(32);
        harness.command(&table, "useskill last").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::UseSkill { skill: 32 },
                ClientAction::UseSkill { skill: 32 },
            ]
        );
        assert!(harness.command(&table, "useskill juggling").is_err());
    }

    #[test]
    fn test_forced_cast_cancels_cursor_first() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "cast! 'Greater Heal' self").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::CancelTarget,
                ClientAction::CastSpell {
                    spell: 29,
                    target: Some(PLAYER)
                },
            ]
        );
    }

    #[test]
    fn test_cast_unknown_spell_is_fatal() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert!(matches!(
            harness.command(&table, "cast 'Fly'"),
            Err(ScriptError::Fatal { verb: "cast", .. })
        ));
    }
}
