use razor_client::{ClientAction, SpeechKind, SYSTEM_HUE};

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::parse;

use super::{CommandTable, Continuation};

const SPEECH_VERBS: [(&str, SpeechKind, &str); 7] = [
    ("msg", SpeechKind::Regular, "msg ('text') [color]"),
    ("yellmsg", SpeechKind::Yell, "yellmsg ('text') [color]"),
    ("whispermsg", SpeechKind::Whisper, "whispermsg ('text') [color]"),
    ("emotemsg", SpeechKind::Emote, "emotemsg ('text') [color]"),
    ("partymsg", SpeechKind::Party, "partymsg ('text')"),
    ("guildmsg", SpeechKind::Guild, "guildmsg ('text')"),
    ("allymsg", SpeechKind::Alliance, "allymsg ('text')"),
];

pub(super) fn register(table: &mut CommandTable) {
    for (verb, kind, usage) in SPEECH_VERBS {
        // Party, guild and alliance chat have a fixed hue
        let max = match kind {
            SpeechKind::Party | SpeechKind::Guild | SpeechKind::Alliance => 1,
            _ => 2,
        };
        table.register(verb, move |ctx, args, _quiet, _force| {
            parse::arity(args, 1, max, usage)?;
            let hue = hue(verb, args.get(1))?;
            ctx.send_action(ClientAction::Speech {
                kind,
                hue,
                text: args[0].as_string(),
            });
            Ok(Continuation::Advance)
        });
    }
    table.register("headmsg", head_msg);
    table.register("sysmsg", sys_msg);
}

fn hue(verb: &'static str, arg: Option<&Argument>) -> Result<u16, ScriptError> {
    match arg {
        Some(arg) => arg.as_u16().map_err(ScriptError::invalid(verb)),
        None => Ok(SYSTEM_HUE),
    }
}

fn head_msg(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 3, "headmsg ('text') [color] [serial]")?;
    let hue = hue("headmsg", args.get(1))?;
    let serial = match args.get(2) {
        Some(arg) => parse::require_valid("headmsg", ctx.resolve_serial(arg))?,
        None => ctx.world().player_serial(),
    };
    ctx.send_action(ClientAction::OverheadMessage {
        serial,
        hue,
        text: args[0].as_string(),
    });
    Ok(Continuation::Advance)
}

fn sys_msg(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 2, "sysmsg ('text') [color]")?;
    let hue = hue("sysmsg", args.get(1))?;
    ctx.send_action(ClientAction::SystemMessage {
        hue,
        text: args[0].as_string(),
    });
    Ok(Continuation::Advance)
}

#[cfg(test)]
mod tests {
    use razor_client::{ClientAction, SpeechKind, SYSTEM_HUE};

    use crate::commands::CommandTable;
    use crate::error::ScriptError;
    use crate::testing::{Harness, PLAYER};

    #[test]
    fn test_speech_channels() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "msg 'bank'").unwrap();
        harness.command(&table, "yellmsg 'help' 0x22").unwrap();
        harness.command(&table, "partymsg 'heal me'").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::Speech {
                    kind: SpeechKind::Regular,
                    hue: SYSTEM_HUE,
                    text: "bank".into()
                },
                ClientAction::Speech {
                    kind: SpeechKind::Yell,
                    hue: 0x22,
                    text: "help".into()
                },
                ClientAction::Speech {
                    kind: SpeechKind::Party,
                    hue: SYSTEM_HUE,
                    text: "heal me".into()
                },
            ]
        );
    }

    #[test]
    fn test_party_chat_takes_no_hue() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert_eq!(
            harness.command(&table, "partymsg 'x' 0x22"),
            Err(ScriptError::Usage("partymsg ('text')"))
        );
    }

    #[test]
    fn test_headmsg_defaults_to_player() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "headmsg 'ready' 0x44").unwrap();
        harness.command(&table, "sysmsg 'done'").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::OverheadMessage {
                    serial: PLAYER,
                    hue: 0x44,
                    text: "ready".into()
                },
                ClientAction::system_message("done"),
            ]
        );
    }
}
