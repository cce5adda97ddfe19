use razor_client::world::PlayerStatus;
use razor_client::{Mobile, Notoriety};

use crate::parse;
use crate::value::Value;

use super::{subject_mobile, ExpressionTable};

pub(super) fn register(table: &mut ExpressionTable) {
    mobile_int(table, "hits", "hits [serial]", |m| m.hits);
    mobile_int(table, "maxhits", "maxhits [serial]", |m| m.hits_max);
    mobile_int(table, "diffhits", "diffhits [serial]", |m| {
        m.hits_max.saturating_sub(m.hits)
    });
    mobile_int(table, "stam", "stam [serial]", |m| m.stam);
    mobile_int(table, "maxstam", "maxstam [serial]", |m| m.stam_max);
    mobile_int(table, "mana", "mana [serial]", |m| m.mana);
    mobile_int(table, "maxmana", "maxmana [serial]", |m| m.mana_max);

    mobile_flag(table, "dead", "dead [serial]", Mobile::is_ghost);
    mobile_flag(table, "flying", "flying [serial]", Mobile::is_flying);
    mobile_flag(table, "paralyzed", "paralyzed [serial]", Mobile::is_paralyzed);
    mobile_flag(table, "poisoned", "poisoned [serial]", Mobile::is_poisoned);
    mobile_flag(table, "yellowhits", "yellowhits [serial]", Mobile::has_yellow_hits);
    mobile_flag(table, "hidden", "hidden [serial]", Mobile::is_hidden);
    mobile_flag(table, "war", "war [serial]", Mobile::in_war_mode);

    notoriety(table, "innocent", "innocent [serial]", Notoriety::Innocent);
    notoriety(table, "friend", "friend [serial]", Notoriety::Friend);
    notoriety(table, "gray", "gray [serial]", Notoriety::Gray);
    notoriety(table, "criminal", "criminal [serial]", Notoriety::Criminal);
    notoriety(table, "enemy", "enemy [serial]", Notoriety::Enemy);
    notoriety(table, "murderer", "murderer [serial]", Notoriety::Murderer);
    notoriety(table, "invulnerable", "invulnerable [serial]", Notoriety::Invulnerable);

    status(table, "str", |s| Value::Int(s.strength));
    status(table, "dex", |s| Value::Int(s.dexterity));
    status(table, "int", |s| Value::Int(s.intelligence));
    status(table, "physical", |s| Value::Int(s.physical_resist));
    status(table, "fire", |s| Value::Int(s.fire_resist));
    status(table, "cold", |s| Value::Int(s.cold_resist));
    status(table, "poison", |s| Value::Int(s.poison_resist));
    status(table, "energy", |s| Value::Int(s.energy_resist));
    status(table, "followers", |s| Value::Int(s.followers));
    status(table, "maxfollowers", |s| Value::Int(s.followers_max));
    status(table, "gold", |s| Value::UInt(s.gold));
    status(table, "luck", |s| Value::Int(s.luck));
    status(table, "tithingpoints", |s| Value::UInt(s.tithing_points));
    status(table, "weight", |s| Value::Int(s.weight));
    status(table, "maxweight", |s| Value::Int(s.max_weight));
    status(table, "diffweight", |s| {
        Value::Int(s.max_weight.saturating_sub(s.weight))
    });
}

fn mobile_int(
    table: &mut ExpressionTable,
    name: &'static str,
    usage: &'static str,
    read: fn(&Mobile) -> i32,
) {
    table.register(name, move |ctx, args, quiet| {
        parse::arity(args, 0, 1, usage)?;
        let value = subject_mobile(ctx, args, quiet, name).map_or(0, read);
        Ok(Value::Int(value))
    });
}

fn mobile_flag(
    table: &mut ExpressionTable,
    name: &'static str,
    usage: &'static str,
    read: fn(&Mobile) -> bool,
) {
    table.register(name, move |ctx, args, quiet| {
        parse::arity(args, 0, 1, usage)?;
        let value = subject_mobile(ctx, args, quiet, name).is_some_and(read);
        Ok(Value::Bool(value))
    });
}

fn notoriety(
    table: &mut ExpressionTable,
    name: &'static str,
    usage: &'static str,
    wanted: Notoriety,
) {
    table.register(name, move |ctx, args, quiet| {
        parse::arity(args, 0, 1, usage)?;
        let value = subject_mobile(ctx, args, quiet, name)
            .is_some_and(|mobile| mobile.notoriety() == Some(wanted));
        Ok(Value::Bool(value))
    });
}

/// Private status only exists for the player, so these take no argument
fn status(table: &mut ExpressionTable, name: &'static str, read: fn(&PlayerStatus) -> Value) {
    table.register(name, move |ctx, args, _quiet| {
        if !args.is_empty() {
            return Err(crate::error::ScriptError::Usage(name));
        }
        Ok(read(&ctx.world().status))
    });
}
