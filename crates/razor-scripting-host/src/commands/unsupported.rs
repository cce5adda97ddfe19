use super::{CommandTable, Continuation};

/// Verbs scripts may contain that need agents, macros or client UI this
/// host does not drive. They report and move on.
pub const UNSUPPORTED_VERBS: [&str; 24] = [
    "organizer",
    "autoloot",
    "dress",
    "undress",
    "buy",
    "sell",
    "playmacro",
    "snapshot",
    "mapuo",
    "clickscreen",
    "paperdoll",
    "helpbutton",
    "guildbutton",
    "questsbutton",
    "logoutbutton",
    "virtue",
    "promptmsg",
    "waitforprompt",
    "cancelprompt",
    "addfriend",
    "removefriend",
    "feed",
    "useonce",
    "autotargetobject",
];

pub(super) fn register(table: &mut CommandTable) {
    for verb in UNSUPPORTED_VERBS {
        table.register(verb, move |ctx, _args, quiet, _force| {
            ctx.soft_error(quiet, format_args!("{} is not supported", verb));
            Ok(Continuation::Advance)
        });
    }
}
