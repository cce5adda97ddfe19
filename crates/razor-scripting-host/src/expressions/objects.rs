//! Object queries and the locating expressions that bind `found`.

use razor_client::{Item, Layer, Mobile, Point3D, Serial};

use crate::argument::Argument;
use crate::context::ExpressionContext;
use crate::error::ScriptError;
use crate::locator::{self, LocateRequest, SearchSource};
use crate::parse;
use crate::value::Value;

use super::{subject, subject_mobile, ExpressionTable};

#[derive(Clone, Copy)]
enum Object<'a> {
    Mobile(&'a Mobile),
    Item(&'a Item),
}

impl Object<'_> {
    fn serial(self) -> Serial {
        match self {
            Object::Mobile(mobile) => mobile.serial,
            Object::Item(item) => item.serial,
        }
    }

    fn graphic(self) -> u16 {
        match self {
            Object::Mobile(mobile) => mobile.body,
            Object::Item(item) => item.graphic,
        }
    }

    fn hue(self) -> u16 {
        match self {
            Object::Mobile(mobile) => mobile.hue,
            Object::Item(item) => item.hue,
        }
    }
}

fn subject_object<'a>(
    ctx: &ExpressionContext<'_, 'a>,
    args: &[Argument],
    quiet: bool,
    verb: &str,
) -> Option<Object<'a>> {
    let serial = subject(ctx, args);
    let world = ctx.world();
    let object = world
        .mobile(serial)
        .map(Object::Mobile)
        .or_else(|| world.item(serial).map(Object::Item));
    if object.is_none() {
        ctx.soft_error(quiet, format_args!("{}: object {} not found", verb, serial));
    }
    object
}

pub(super) fn register(table: &mut ExpressionTable) {
    table.register("serial", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "serial ('alias')")?;
        Ok(Value::UInt(ctx.resolve_serial(&args[0]).value()))
    });
    table.register("graphic", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "graphic [serial]")?;
        let graphic = subject_object(ctx, args, quiet, "graphic").map_or(0, Object::graphic);
        Ok(Value::UInt(u32::from(graphic)))
    });
    table.register("color", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "color [serial]")?;
        let hue = subject_object(ctx, args, quiet, "color").map_or(0, Object::hue);
        Ok(Value::UInt(u32::from(hue)))
    });
    table.register("amount", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "amount [serial]")?;
        let amount = match subject_object(ctx, args, quiet, "amount") {
            Some(Object::Item(item)) => item.amount,
            Some(Object::Mobile(_)) => 1,
            None => 0,
        };
        Ok(Value::UInt(amount))
    });
    table.register("name", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "name [serial]")?;
        let name = match subject_object(ctx, args, quiet, "name") {
            Some(Object::Item(item)) => item.name.clone(),
            Some(Object::Mobile(mobile)) => mobile.name.clone(),
            None => String::new(),
        };
        Ok(Value::Str(name))
    });
    coordinate(table, "x", "x [serial]", |p| p.x);
    coordinate(table, "y", "y [serial]", |p| p.y);
    coordinate(table, "z", "z [serial]", |p| p.z);
    table.register("direction", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "direction [serial]")?;
        let direction = subject_mobile(ctx, args, quiet, "direction")
            .map_or("", |mobile| mobile.direction.as_str());
        Ok(Value::Str(direction.to_string()))
    });
    table.register("mounted", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "mounted [serial]")?;
        let world = ctx.world();
        let mounted = subject_mobile(ctx, args, quiet, "mounted")
            .is_some_and(|mobile| world.find_layer(mobile.serial, Layer::Mount).is_some());
        Ok(Value::Bool(mounted))
    });
    table.register("findalias", |ctx, args, _quiet| {
        parse::arity(args, 1, 1, "findalias ('alias name')")?;
        Ok(Value::Bool(!ctx.resolve_alias(args[0].as_str()).is_zero()))
    });
    table.register("contents", |ctx, args, quiet| {
        parse::arity(args, 1, 1, "contents (serial)")?;
        let world = ctx.world();
        let count = subject_object(ctx, args, quiet, "contents")
            .map_or(0, |object| world.contents(object.serial()).len());
        Ok(Value::UInt(u32::try_from(count).unwrap_or(u32::MAX)))
    });
    table.register("findobject", find_object);
    table.register("findtype", find_type);
    table.register("findlayer", find_layer);
    table.register("distance", |ctx, args, quiet| {
        parse::arity(args, 0, 1, "distance [serial]")?;
        let serial = subject(ctx, args);
        let distance = match ctx.world().distance_to(serial) {
            Some(distance) => distance,
            None => {
                ctx.soft_error(quiet, format_args!("distance: object {} not found", serial));
                0
            }
        };
        Ok(Value::Int(i32::try_from(distance).unwrap_or(i32::MAX)))
    });
    table.register("inrange", |ctx, args, quiet| {
        parse::arity(args, 2, 2, "inrange (serial) (range)")?;
        let range = args[1].as_uint().map_err(ScriptError::invalid("inrange"))?;
        let serial = ctx.resolve_serial(&args[0]);
        let in_range = match ctx.world().distance_to(serial) {
            Some(distance) => distance <= range,
            None => {
                ctx.soft_error(quiet, format_args!("inrange: object {} not found", serial));
                false
            }
        };
        Ok(Value::Bool(in_range))
    });
    table.register("counttype", count_type);
}

fn coordinate(
    table: &mut ExpressionTable,
    axis: &'static str,
    usage: &'static str,
    read: fn(Point3D) -> i32,
) {
    table.register(axis, move |ctx, args, quiet| {
        parse::arity(args, 0, 1, usage)?;
        let serial = subject(ctx, args);
        let value = match ctx.world().world_position(serial) {
            Some(position) => read(position),
            None => {
                ctx.soft_error(quiet, format_args!("{}: object {} not found", axis, serial));
                0
            }
        };
        Ok(Value::Int(value))
    });
}

fn optional_source(ctx: &ExpressionContext<'_, '_>, arg: Option<&Argument>) -> SearchSource {
    arg.map_or(SearchSource::Any, |arg| ctx.search_source(arg))
}

fn find_object(
    ctx: &mut ExpressionContext<'_, '_>,
    args: &[Argument],
    quiet: bool,
) -> Result<Value, ScriptError> {
    parse::arity(
        args,
        1,
        5,
        "findobject (serial) [color] [source] [amount] [range]",
    )?;
    let color = parse::color("findobject", args.get(1))?;
    let source = optional_source(ctx, args.get(2));
    let min_amount = parse::optional_uint("findobject", args.get(3))?;
    let max_range = parse::optional_uint("findobject", args.get(4))?;

    let serial = ctx.resolve_serial(&args[0]);
    let world = ctx.world();
    let in_range = |serial| match max_range {
        None => true,
        Some(range) => world.distance_to(serial).is_some_and(|d| d <= range),
    };
    let matched = if let Some(mobile) = world.mobile(serial) {
        color.map_or(true, |hue| mobile.hue == hue)
            && !matches!(source, SearchSource::Container(_))
            && in_range(serial)
    } else if let Some(item) = world.item(serial) {
        let in_source = match source {
            SearchSource::Container(container) => locator::is_inside(world, item, container),
            SearchSource::Ground => item.on_ground(),
            SearchSource::World | SearchSource::Any => true,
        };
        color.map_or(true, |hue| item.hue == hue)
            && min_amount.map_or(true, |min| item.amount >= min)
            && in_source
            && in_range(serial)
    } else {
        false
    };

    if matched {
        ctx.bind_found(serial);
    } else {
        ctx.soft_error(quiet, format_args!("findobject: could not find {}", serial));
    }
    Ok(Value::Bool(matched))
}

fn find_type(
    ctx: &mut ExpressionContext<'_, '_>,
    args: &[Argument],
    quiet: bool,
) -> Result<Value, ScriptError> {
    parse::arity(
        args,
        1,
        5,
        "findtype (graphic) [color] [source] [amount] [range]",
    )?;
    let graphic = parse::graphic("findtype", &args[0])?;
    let request = LocateRequest::new(graphic)
        .color(parse::color("findtype", args.get(1))?)
        .source(optional_source(ctx, args.get(2)))
        .min_amount(parse::optional_uint("findtype", args.get(3))?)
        .max_range(parse::optional_uint("findtype", args.get(4))?);

    match ctx.locate(&request).map_err(ScriptError::locate("findtype"))? {
        Some(serial) => {
            ctx.bind_found(serial);
            Ok(Value::Bool(true))
        }
        None => {
            ctx.soft_error(
                quiet,
                format_args!("findtype: could not find graphic 0x{:04X}", graphic),
            );
            Ok(Value::Bool(false))
        }
    }
}

fn find_layer(
    ctx: &mut ExpressionContext<'_, '_>,
    args: &[Argument],
    quiet: bool,
) -> Result<Value, ScriptError> {
    parse::arity(args, 2, 2, "findlayer (serial) (layer)")?;
    let layer = parse::layer("findlayer", &args[1])?;
    let serial = ctx.resolve_serial(&args[0]);
    match ctx.world().find_layer(serial, layer) {
        Some(item) => {
            ctx.bind_found(item.serial);
            Ok(Value::Bool(true))
        }
        None => {
            ctx.soft_error(
                quiet,
                format_args!("findlayer: nothing on layer '{}' of {}", args[1], serial),
            );
            Ok(Value::Bool(false))
        }
    }
}

fn count_type(
    ctx: &mut ExpressionContext<'_, '_>,
    args: &[Argument],
    quiet: bool,
) -> Result<Value, ScriptError> {
    parse::arity(args, 1, 3, "counttype (graphic) [color] [source]")?;
    let graphic = parse::graphic("counttype", &args[0])?;
    let color = parse::color("counttype", args.get(1))?;
    let source = match args.get(2) {
        Some(arg) => ctx.search_source(arg),
        None => match ctx.world().backpack() {
            Some(pack) => SearchSource::Container(pack.serial),
            None => {
                ctx.soft_error(quiet, "counttype: no backpack");
                return Ok(Value::UInt(0));
            }
        },
    };
    let request = LocateRequest::new(graphic).color(color).source(source);
    let total = locator::count(ctx.world(), &request).map_err(ScriptError::locate("counttype"))?;
    Ok(Value::UInt(total))
}
