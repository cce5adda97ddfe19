use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One skill as shown in the skills gump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillValue {
    pub id: u16,
    pub value: f64,
    #[serde(default)]
    pub base: f64,
    #[serde(default)]
    pub cap: f64,
}

/// Private status the server only sends for the logged-in character
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStatus {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,

    pub physical_resist: i32,
    pub fire_resist: i32,
    pub cold_resist: i32,
    pub poison_resist: i32,
    pub energy_resist: i32,

    pub gold: u32,
    pub weight: i32,
    pub max_weight: i32,
    pub luck: i32,
    pub tithing_points: u32,
    pub followers: i32,
    pub followers_max: i32,

    pub skills: Vec<SkillValue>,
    /// Active buff icons, by lowercase name
    pub buffs: BTreeSet<String>,
}

impl PlayerStatus {
    pub fn skill(&self, id: u16) -> Option<&SkillValue> {
        self.skills.iter().find(|skill| skill.id == id)
    }

    pub fn set_skill(&mut self, value: SkillValue) {
        match self.skills.iter_mut().find(|skill| skill.id == value.id) {
            Some(existing) => *existing = value,
            None => self.skills.push(value),
        }
    }

    pub fn has_buff(&self, name: &str) -> bool {
        self.buffs.contains(&name.to_ascii_lowercase())
    }
}
