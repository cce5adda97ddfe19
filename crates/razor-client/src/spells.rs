/// Spell book contents as (id, name). Ids are the ones the cast request
/// carries; each school starts at its own base.
pub const SPELLS: &[(u16, &str)] = &[
    // Magery
    (1, "Clumsy"),
    (2, "Create Food"),
    (3, "Feeblemind"),
    (4, "Heal"),
    (5, "Magic Arrow"),
    (6, "Night Sight"),
    (7, "Reactive Armor"),
    (8, "Weaken"),
    (9, "Agility"),
    (10, "Cunning"),
    (11, "Cure"),
    (12, "Harm"),
    (13, "Magic Trap"),
    (14, "Magic Untrap"),
    (15, "Protection"),
    (16, "Strength"),
    (17, "Bless"),
    (18, "Fireball"),
    (19, "Magic Lock"),
    (20, "Poison"),
    (21, "Telekinesis"),
    (22, "Teleport"),
    (23, "Unlock"),
    (24, "Wall of Stone"),
    (25, "Arch Cure"),
    (26, "Arch Protection"),
    (27, "Curse"),
    (28, "Fire Field"),
    (29, "Greater Heal"),
    (30, "Lightning"),
    (31, "Mana Drain"),
    (32, "Recall"),
    (33, "Blade Spirits"),
    (34, "Dispel Field"),
    (35, "Incognito"),
    (36, "Magic Reflection"),
    (37, "Mind Blast"),
    (38, "Paralyze"),
    (39, "Poison Field"),
    (40, "Summon Creature"),
    (41, "Dispel"),
    (42, "Energy Bolt"),
    (43, "Explosion"),
    (44, "Invisibility"),
    (45, "Mark"),
    (46, "Mass Curse"),
    (47, "Paralyze Field"),
    (48, "Reveal"),
    (49, "Chain Lightning"),
    (50, "Energy Field"),
    (51, "Flamestrike"),
    (52, "Gate Travel"),
    (53, "Mana Vampire"),
    (54, "Mass Dispel"),
    (55, "Meteor Swarm"),
    (56, "Polymorph"),
    (57, "Earthquake"),
    (58, "Energy Vortex"),
    (59, "Resurrection"),
    (60, "Air Elemental"),
    (61, "Summon Daemon"),
    (62, "Earth Elemental"),
    (63, "Fire Elemental"),
    (64, "Water Elemental"),
    // Necromancy
    (101, "Animate Dead"),
    (102, "Blood Oath"),
    (103, "Corpse Skin"),
    (104, "Curse Weapon"),
    (105, "Evil Omen"),
    (106, "Horrific Beast"),
    (107, "Lich Form"),
    (108, "Mind Rot"),
    (109, "Pain Spike"),
    (110, "Poison Strike"),
    (111, "Strangle"),
    (112, "Summon Familiar"),
    (113, "Vampiric Embrace"),
    (114, "Vengeful Spirit"),
    (115, "Wither"),
    (116, "Wraith Form"),
    (117, "Exorcism"),
    // Chivalry
    (201, "Cleanse by Fire"),
    (202, "Close Wounds"),
    (203, "Consecrate Weapon"),
    (204, "Dispel Evil"),
    (205, "Divine Fury"),
    (206, "Enemy of One"),
    (207, "Holy Light"),
    (208, "Noble Sacrifice"),
    (209, "Remove Curse"),
    (210, "Sacred Journey"),
    // Bushido
    (401, "Honorable Execution"),
    (402, "Confidence"),
    (403, "Evasion"),
    (404, "Counter Attack"),
    (405, "Lightning Strike"),
    (406, "Momentum Strike"),
    // Ninjitsu
    (501, "Focus Attack"),
    (502, "Death Strike"),
    (503, "Animal Form"),
    (504, "Ki Attack"),
    (505, "Surprise Attack"),
    (506, "Backstab"),
    (507, "Shadowjump"),
    (508, "Mirror Image"),
];

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Look up a spell by name (ignoring case and spacing) or by numeric id
pub fn spell_id(name: &str) -> Option<u16> {
    if let Ok(id) = name.trim().parse::<u16>() {
        return SPELLS.iter().any(|(known, _)| *known == id).then_some(id);
    }
    let wanted = normalize(name);
    SPELLS
        .iter()
        .find(|(_, candidate)| normalize(candidate) == wanted)
        .map(|(id, _)| *id)
}

pub fn spell_name(id: u16) -> Option<&'static str> {
    SPELLS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
}
