//! Serial resolution for script arguments.
//!
//! A few alias names always track live state (`self`, `backpack`, the
//! hands, ...). They shadow anything stored under the same name.

use razor_client::{Layer, Serial, World};

use crate::argument::Argument;
use crate::store::ScriptStore;

/// Aliases computed from the world on every lookup
pub const DYNAMIC_ALIASES: [&str; 10] = [
    "self",
    "me",
    "backpack",
    "bank",
    "mount",
    "lefthand",
    "righthand",
    "last",
    "lasttarget",
    "lastobject",
];

/// `Some` when `name` is a dynamic alias; the serial is zero when the
/// object it tracks does not exist
pub fn dynamic_alias(world: &World, name: &str) -> Option<Serial> {
    let player = world.player_serial();
    let worn = |layer| {
        world
            .find_layer(player, layer)
            .map_or(Serial::ZERO, |item| item.serial)
    };
    let serial = match name.to_ascii_lowercase().as_str() {
        "self" | "me" => player,
        "backpack" => worn(Layer::Backpack),
        "bank" => worn(Layer::Bank),
        "mount" => worn(Layer::Mount),
        "lefthand" => worn(Layer::LeftHand),
        "righthand" => worn(Layer::RightHand),
        "last" | "lasttarget" => world.interaction.last_target,
        "lastobject" => world.interaction.last_object,
        _ => return None,
    };
    Some(serial)
}

pub fn is_dynamic_alias(name: &str) -> bool {
    DYNAMIC_ALIASES
        .iter()
        .any(|alias| alias.eq_ignore_ascii_case(name))
}

/// Resolve an alias name, zero when unknown
pub fn resolve_alias(world: &World, store: &dyn ScriptStore, name: &str) -> Serial {
    dynamic_alias(world, name)
        .or_else(|| store.get_alias(name))
        .unwrap_or(Serial::ZERO)
}

/// Literal serial, or an alias name
pub fn resolve_serial(world: &World, store: &dyn ScriptStore, arg: &Argument) -> Serial {
    arg.as_serial_literal()
        .unwrap_or_else(|| resolve_alias(world, store, arg.as_str()))
}
