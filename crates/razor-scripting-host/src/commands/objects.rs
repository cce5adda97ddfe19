use razor_client::{ClientAction, Hand, Layer, Point3D, Serial};

use crate::argument::Argument;
use crate::context::ScriptContext;
use crate::error::ScriptError;
use crate::locator::{LocateRequest, SearchSource};
use crate::parse;

use super::{CommandTable, Continuation};

const BANDAGE: u16 = 0x0E21;

pub(super) fn register(table: &mut CommandTable) {
    table.register("useobject", use_object);
    table.register("usetype", use_type);
    table.register("clickobject", click_object);
    table.register("moveitem", move_item);
    table.register("movetype", move_type);
    table.register("equipitem", equip_item);
    table.register("rename", rename);
    table.register("bandageself", bandage_self);
    table.register("togglehands", toggle_hands);
    table.register("clearhands", clear_hands);
}

fn use_object(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "useobject (serial)")?;
    let serial = parse::require_valid("useobject", ctx.resolve_serial(&args[0]))?;
    if !ctx.world().exists(serial) {
        ctx.soft_error(quiet, format_args!("useobject: {} not found", serial));
        return Ok(Continuation::Advance);
    }
    ctx.send_action(ClientAction::UseObject { serial });
    Ok(Continuation::Advance)
}

fn use_type(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 4, "usetype (graphic) [color] [source] [range]")?;
    let mut request = LocateRequest::new(parse::graphic("usetype", &args[0])?)
        .color(parse::color("usetype", args.get(1))?)
        .max_range(parse::optional_uint("usetype", args.get(3))?);
    if let Some(source) = args.get(2) {
        request = request.source(ctx.search_source(source));
    }

    match ctx.locate(&request).map_err(ScriptError::locate("usetype"))? {
        Some(serial) => ctx.send_action(ClientAction::UseObject { serial }),
        None => ctx.soft_error(
            quiet,
            format_args!("usetype: could not find graphic 0x{:04X}", request.graphic),
        ),
    }
    Ok(Continuation::Advance)
}

fn click_object(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "clickobject (serial)")?;
    let serial = parse::require_valid("clickobject", ctx.resolve_serial(&args[0]))?;
    ctx.send_action(ClientAction::SingleClick { serial });
    Ok(Continuation::Advance)
}

/// Drop target: a container or mobile serial, or the ground keyword
fn destination(
    ctx: &ScriptContext<'_>,
    verb: &'static str,
    arg: &Argument,
) -> Result<Serial, ScriptError> {
    if arg.is_keyword("ground") {
        return Ok(Serial::ZERO);
    }
    parse::require_valid(verb, ctx.resolve_serial(arg))
}

fn position(verb: &'static str, args: &[Argument]) -> Result<Point3D, ScriptError> {
    let coord = |arg: &Argument| arg.as_int().map_err(ScriptError::invalid(verb));
    Ok(Point3D::new(
        coord(&args[0])?,
        coord(&args[1])?,
        coord(&args[2])?,
    ))
}

fn lift_and_drop(
    ctx: &ScriptContext<'_>,
    serial: Serial,
    amount: u32,
    container: Serial,
    position: Option<Point3D>,
) {
    // The ground needs coordinates; default to the player's feet
    let position = match (container.is_zero(), position) {
        (true, None) => ctx.world().player().map(|player| player.position),
        (_, position) => position,
    };
    ctx.send_action(ClientAction::LiftItem { serial, amount });
    ctx.send_action(ClientAction::DropItem {
        serial,
        container,
        position,
    });
}

fn move_item(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    const USAGE: &str = "moveitem (serial) (destination) [(x, y, z)] [amount]";
    parse::arity(args, 2, 6, USAGE)?;
    if args.len() == 4 {
        return Err(ScriptError::Usage(USAGE));
    }

    let serial = parse::require_item("moveitem", ctx.resolve_serial(&args[0]))?;
    let container = destination(ctx, "moveitem", &args[1])?;
    let (position, amount) = match args.len() {
        3 => (None, Some(&args[2])),
        5 => (Some(position("moveitem", &args[2..5])?), None),
        6 => (Some(position("moveitem", &args[2..5])?), Some(&args[5])),
        _ => (None, None),
    };
    let amount = parse::optional_uint("moveitem", amount)?;

    let Some(item) = ctx.world().item(serial) else {
        ctx.soft_error(quiet, format_args!("moveitem: item {} not found", serial));
        return Ok(Continuation::Advance);
    };
    lift_and_drop(ctx, serial, amount.unwrap_or(item.amount), container, position);
    Ok(Continuation::Advance)
}

fn move_type(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    const USAGE: &str =
        "movetype (graphic) (source) (destination) [(x, y, z)] [color] [amount] [range]";
    parse::arity(args, 3, 9, USAGE)?;
    if matches!(args.len(), 4 | 5) {
        return Err(ScriptError::Usage(USAGE));
    }

    let graphic = parse::graphic("movetype", &args[0])?;
    let source = ctx.search_source(&args[1]);
    let container = destination(ctx, "movetype", &args[2])?;
    let position = match args.len() {
        3 => None,
        _ => Some(position("movetype", &args[3..6])?),
    };
    let color = parse::color("movetype", args.get(6))?;
    let amount = parse::optional_uint("movetype", args.get(7))?;
    let range = parse::optional_uint("movetype", args.get(8))?;

    let request = LocateRequest::new(graphic)
        .color(color)
        .source(source)
        .max_range(range);
    let found = ctx
        .locate(&request)
        .map_err(ScriptError::locate("movetype"))?
        .and_then(|serial| ctx.world().item(serial));
    match found {
        Some(item) => {
            lift_and_drop(ctx, item.serial, amount.unwrap_or(item.amount), container, position)
        }
        None => ctx.soft_error(
            quiet,
            format_args!("movetype: could not find graphic 0x{:04X}", graphic),
        ),
    }
    Ok(Continuation::Advance)
}

fn equip_item(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "equipitem (serial) (layer)")?;
    let serial = parse::require_item("equipitem", ctx.resolve_serial(&args[0]))?;
    let layer = parse::layer("equipitem", &args[1])?;

    let player = ctx.world().player_serial();
    if ctx.world().item(serial).is_none() || player.is_zero() {
        ctx.soft_error(quiet, format_args!("equipitem: item {} not found", serial));
        return Ok(Continuation::Advance);
    }
    ctx.send_action(ClientAction::LiftItem { serial, amount: 1 });
    ctx.send_action(ClientAction::EquipItem {
        serial,
        mobile: player,
        layer,
    });
    Ok(Continuation::Advance)
}

fn rename(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 2, 2, "rename (serial) ('name')")?;
    let serial = parse::require_mobile("rename", ctx.resolve_serial(&args[0]))?;
    ctx.send_action(ClientAction::Rename {
        serial,
        name: args[1].as_string(),
    });
    Ok(Continuation::Advance)
}

fn bandage_self(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 0, 0, "bandageself")?;
    let world = ctx.world();
    let Some(backpack) = world.backpack().map(|pack| pack.serial) else {
        ctx.soft_error(quiet, "bandageself: no backpack");
        return Ok(Continuation::Advance);
    };

    let request = LocateRequest::new(BANDAGE).source(SearchSource::Container(backpack));
    match ctx.locate(&request).map_err(ScriptError::locate("bandageself"))? {
        Some(bandage) => ctx.send_action(ClientAction::UseTargetedItem {
            item: bandage,
            target: world.player_serial(),
        }),
        None => ctx.soft_error(quiet, "bandageself: no bandages found"),
    }
    Ok(Continuation::Advance)
}

fn hand(verb: &'static str, arg: &Argument) -> Result<Hand, ScriptError> {
    match arg.as_str().to_ascii_lowercase().as_str() {
        "left" => Ok(Hand::Left),
        "right" => Ok(Hand::Right),
        other => Err(ScriptError::fatal(verb, format!("unknown hand '{}'", other))),
    }
}

fn toggle_hands(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    _quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 1, 1, "togglehands ('left'/'right')")?;
    let hand = hand("togglehands", &args[0])?;
    ctx.send_action(ClientAction::ToggleHand { hand });
    Ok(Continuation::Advance)
}

fn clear_hands(
    ctx: &mut ScriptContext<'_>,
    args: &[Argument],
    quiet: bool,
    _force: bool,
) -> Result<Continuation, ScriptError> {
    parse::arity(args, 0, 1, "clearhands ('left'/'right'/'both')")?;
    let layers: &[Layer] = match args.first() {
        None => &[Layer::LeftHand, Layer::RightHand],
        Some(arg) if arg.is_keyword("both") => &[Layer::LeftHand, Layer::RightHand],
        Some(arg) => match hand("clearhands", arg)? {
            Hand::Left => &[Layer::LeftHand],
            Hand::Right => &[Layer::RightHand],
        },
    };

    let world = ctx.world();
    let Some(backpack) = world.backpack().map(|pack| pack.serial) else {
        ctx.soft_error(quiet, "clearhands: no backpack");
        return Ok(Continuation::Advance);
    };
    let player = world.player_serial();
    for layer in layers {
        if let Some(item) = world.find_layer(player, *layer) {
            lift_and_drop(ctx, item.serial, item.amount, backpack, None);
        }
    }
    Ok(Continuation::Advance)
}

#[cfg(test)]
mod tests {
    use razor_client::{ClientAction, Hand, Item, Layer, Point3D, Serial};

    use crate::commands::{CommandTable, Continuation};
    use crate::error::ScriptError;
    use crate::testing::{Harness, BACKPACK, PLAYER};

    #[test]
    fn test_rename_with_one_argument_sends_nothing() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert_eq!(
            harness.command(&table, "rename 0x100"),
            Err(ScriptError::Usage("rename (serial) ('name')"))
        );
        assert!(harness.actions().is_empty());
    }

    #[test]
    fn test_rename_requires_mobile() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert!(matches!(
            harness.command(&table, "rename backpack 'Bob'"),
            Err(ScriptError::Fatal { verb: "rename", .. })
        ));
        assert_eq!(
            harness.command(&table, "rename self 'Bob'"),
            Ok(Continuation::Advance)
        );
        assert_eq!(
            harness.actions(),
            vec![ClientAction::Rename {
                serial: PLAYER,
                name: "Bob".into()
            }]
        );
    }

    #[test]
    fn test_useobject_missing_object_is_soft() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert_eq!(
            harness.command(&table, "@useobject 0x40000999"),
            Ok(Continuation::Advance)
        );
        assert!(harness.actions().is_empty());

        assert_eq!(
            harness.command(&table, "useobject backpack"),
            Ok(Continuation::Advance)
        );
        assert_eq!(
            harness.actions(),
            vec![ClientAction::UseObject { serial: BACKPACK }]
        );
    }

    #[test]
    fn test_usetype_uses_found_item() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        let potion = harness.add_item(0x4000_0002, 0x0F0C, Some(BACKPACK));
        assert_eq!(
            harness.command(&table, "usetype 0x0F0C any backpack"),
            Ok(Continuation::Advance)
        );
        assert_eq!(harness.actions(), vec![ClientAction::UseObject { serial: potion }]);
    }

    #[test]
    fn test_usetype_missing_container_is_fatal() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert!(matches!(
            harness.command(&table, "usetype 0x0F0C any 0x40000999"),
            Err(ScriptError::Fatal { verb: "usetype", .. })
        ));
    }

    #[test]
    fn test_moveitem_with_amount() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        let gold = harness.add_item(0x4000_0002, 0x0EED, None);
        assert_eq!(
            harness.command(&table, "moveitem 0x40000002 backpack 50"),
            Ok(Continuation::Advance)
        );
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::LiftItem {
                    serial: gold,
                    amount: 50
                },
                ClientAction::DropItem {
                    serial: gold,
                    container: BACKPACK,
                    position: None
                },
            ]
        );
    }

    #[test]
    fn test_moveitem_to_ground_defaults_to_player_tile() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        let gem = harness.add_item(0x4000_0002, 0x0F10, Some(BACKPACK));
        harness.command(&table, "moveitem 0x40000002 ground").unwrap();
        assert_eq!(
            harness.actions()[1],
            ClientAction::DropItem {
                serial: gem,
                container: Serial::ZERO,
                position: Some(Point3D::new(1000, 1000, 0)),
            }
        );
    }

    #[test]
    fn test_moveitem_validates_class() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        assert!(matches!(
            harness.command(&table, "moveitem self backpack"),
            Err(ScriptError::Fatal { verb: "moveitem", .. })
        ));
        assert!(matches!(
            harness.command(&table, "moveitem 0x40000002 backpack 1 2"),
            Err(ScriptError::Usage(_))
        ));
        assert!(harness.actions().is_empty());
    }

    #[test]
    fn test_movetype_with_position_and_amount() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        let ore = harness.add_item(0x4000_0002, 0x19B9, Some(BACKPACK));
        harness
            .command(&table, "movetype 0x19B9 backpack ground 1001 1002 0 any 3")
            .unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::LiftItem {
                    serial: ore,
                    amount: 3
                },
                ClientAction::DropItem {
                    serial: ore,
                    container: Serial::ZERO,
                    position: Some(Point3D::new(1001, 1002, 0)),
                },
            ]
        );
    }

    #[test]
    fn test_equipitem_rejects_unknown_layer() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.add_item(0x4000_0002, 0x13B9, Some(BACKPACK));
        assert!(matches!(
            harness.command(&table, "equipitem 0x40000002 tail"),
            Err(ScriptError::Fatal { verb: "equipitem", .. })
        ));
        harness
            .command(&table, "equipitem 0x40000002 righthand")
            .unwrap();
        assert_eq!(
            harness.actions()[1],
            ClientAction::EquipItem {
                serial: Serial(0x4000_0002),
                mobile: PLAYER,
                layer: Layer::RightHand
            }
        );
    }

    #[test]
    fn test_bandageself() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "bandageself").unwrap();
        assert_eq!(
            harness.actions(),
            vec![ClientAction::system_message(
                "Script test error => bandageself: no bandages found"
            )]
        );

        let bandage = harness.add_item(0x4000_0002, 0x0E21, Some(BACKPACK));
        harness.command(&table, "bandageself").unwrap();
        assert_eq!(
            harness.actions(),
            vec![ClientAction::UseTargetedItem {
                item: bandage,
                target: PLAYER
            }]
        );
    }

    #[test]
    fn test_clearhands_moves_held_items_to_backpack() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        let mut sword = Item::new(Serial(0x4000_0002), "sword", 0x13B9);
        sword.container = Some(PLAYER);
        sword.layer = Some(Layer::RightHand);
        harness.world.add_item(sword);

        harness.command(&table, "clearhands").unwrap();
        assert_eq!(
            harness.actions(),
            vec![
                ClientAction::LiftItem {
                    serial: Serial(0x4000_0002),
                    amount: 1
                },
                ClientAction::DropItem {
                    serial: Serial(0x4000_0002),
                    container: BACKPACK,
                    position: None
                },
            ]
        );
    }

    #[test]
    fn test_togglehands() {
        let mut harness = Harness::new();
        let table = CommandTable::with_defaults();
        harness.command(&table, "togglehands left").unwrap();
        assert_eq!(
            harness.actions(),
            vec![ClientAction::ToggleHand { hand: Hand::Left }]
        );
        assert!(harness.command(&table, "togglehands middle").is_err());
    }
}
