/// Skill names indexed by skill id
pub const SKILL_NAMES: [&str; 58] = [
    "Alchemy",
    "Anatomy",
    "Animal Lore",
    "Item Identification",
    "Arms Lore",
    "Parrying",
    "Begging",
    "Blacksmithy",
    "Bowcraft/Fletching",
    "Peacemaking",
    "Camping",
    "Carpentry",
    "Cartography",
    "Cooking",
    "Detecting Hidden",
    "Discordance",
    "Evaluating Intelligence",
    "Healing",
    "Fishing",
    "Forensic Evaluation",
    "Herding",
    "Hiding",
    "Provocation",
    "Inscription",
    "Lockpicking",
    "Magery",
    "Resisting Spells",
    "Tactics",
    "Snooping",
    "Musicianship",
    "Poisoning",
    "Archery",
    "Spirit Speak",
    "Stealing",
    "Tailoring",
    "Animal Taming",
    "Taste Identification",
    "Tinkering",
    "Tracking",
    "Veterinary",
    "Swordsmanship",
    "Mace Fighting",
    "Fencing",
    "Wrestling",
    "Lumberjacking",
    "Mining",
    "Meditation",
    "Stealth",
    "Remove Trap",
    "Necromancy",
    "Focus",
    "Chivalry",
    "Bushido",
    "Ninjitsu",
    "Spellweaving",
    "Mysticism",
    "Imbuing",
    "Throwing",
];

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Look up a skill id by name, ignoring case, spaces and punctuation
pub fn skill_id(name: &str) -> Option<u16> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    // Either half of "Bowcraft/Fletching" is accepted on its own
    if wanted == "bowcraft" || wanted == "fletching" {
        return Some(8);
    }
    SKILL_NAMES
        .iter()
        .position(|candidate| normalize(candidate) == wanted)
        .map(|idx| idx as u16)
}

pub fn skill_name(id: u16) -> Option<&'static str> {
    SKILL_NAMES.get(id as usize).copied()
}
