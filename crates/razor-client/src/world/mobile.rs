use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::serial::Serial;

/// A tile coordinate in the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub z: i32,
}

impl Point3D {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Tile distance as the server measures it (the larger axis delta)
    pub fn distance_to(&self, other: &Point3D) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }
}

/// Facing, in the order the client encodes it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    North = 0,
    Northeast = 1,
    East = 2,
    Southeast = 3,
    South = 4,
    Southwest = 5,
    West = 6,
    Northwest = 7,
}

impl Direction {
    /// Parse a direction name, including the screen-relative aliases
    /// (`up`, `right`, `down`, `left`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "north" => Some(Direction::North),
            "northeast" | "right" => Some(Direction::Northeast),
            "east" => Some(Direction::East),
            "southeast" | "down" => Some(Direction::Southeast),
            "south" => Some(Direction::South),
            "southwest" | "left" => Some(Direction::Southwest),
            "west" => Some(Direction::West),
            "northwest" | "up" => Some(Direction::Northwest),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::Northeast => "northeast",
            Direction::East => "east",
            Direction::Southeast => "southeast",
            Direction::South => "south",
            Direction::Southwest => "southwest",
            Direction::West => "west",
            Direction::Northwest => "northwest",
        }
    }
}

/// Alignment classification the server attaches to every mobile.
///
/// The discriminants are the wire codes and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notoriety {
    Innocent = 0x1,
    Friend = 0x2,
    Gray = 0x3,
    Criminal = 0x4,
    Enemy = 0x5,
    Murderer = 0x6,
    Invulnerable = 0x7,
}

impl Notoriety {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x1 => Some(Notoriety::Innocent),
            0x2 => Some(Notoriety::Friend),
            0x3 => Some(Notoriety::Gray),
            0x4 => Some(Notoriety::Criminal),
            0x5 => Some(Notoriety::Enemy),
            0x6 => Some(Notoriety::Murderer),
            0x7 => Some(Notoriety::Invulnerable),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

bitflags! {
    /// Status bits carried on mobile updates
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MobileFlags: u8 {
        const PARALYZED = 1 << 0;
        const FEMALE = 1 << 1;
        const POISONED = 1 << 2;
        const YELLOW_HITS = 1 << 3;
        const FLYING = 1 << 4;
        const WAR_MODE = 1 << 6;
        const HIDDEN = 1 << 7;
    }
}

// Ghost bodies (human, elf and gargoyle, both sexes)
const GHOST_BODIES: [u16; 6] = [0x192, 0x193, 0x25F, 0x260, 0x2B6, 0x2B7];

/// A mobile as last reported by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mobile {
    pub serial: Serial,
    #[serde(default)]
    pub name: String,
    pub body: u16,
    #[serde(default)]
    pub hue: u16,
    #[serde(default)]
    pub position: Point3D,
    #[serde(default)]
    pub direction: Direction,
    /// Raw notoriety code, see [`Notoriety`]
    #[serde(default)]
    pub notoriety: u8,
    #[serde(default)]
    pub hits: i32,
    #[serde(default)]
    pub hits_max: i32,
    #[serde(default)]
    pub stam: i32,
    #[serde(default)]
    pub stam_max: i32,
    #[serde(default)]
    pub mana: i32,
    #[serde(default)]
    pub mana_max: i32,
    #[serde(default)]
    pub flags: MobileFlags,
}

impl Mobile {
    pub fn new(serial: Serial, name: impl Into<String>, body: u16) -> Self {
        Self {
            serial,
            name: name.into(),
            body,
            hue: 0,
            position: Point3D::default(),
            direction: Direction::default(),
            notoriety: Notoriety::Innocent.code(),
            hits: 0,
            hits_max: 0,
            stam: 0,
            stam_max: 0,
            mana: 0,
            mana_max: 0,
            flags: MobileFlags::empty(),
        }
    }

    pub fn notoriety(&self) -> Option<Notoriety> {
        Notoriety::from_code(self.notoriety)
    }

    pub fn is_ghost(&self) -> bool {
        GHOST_BODIES.contains(&self.body)
    }

    pub fn is_poisoned(&self) -> bool {
        self.flags.contains(MobileFlags::POISONED)
    }

    pub fn is_paralyzed(&self) -> bool {
        self.flags.contains(MobileFlags::PARALYZED)
    }

    pub fn is_flying(&self) -> bool {
        self.flags.contains(MobileFlags::FLYING)
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(MobileFlags::HIDDEN)
    }

    pub fn in_war_mode(&self) -> bool {
        self.flags.contains(MobileFlags::WAR_MODE)
    }

    pub fn has_yellow_hits(&self) -> bool {
        self.flags.contains(MobileFlags::YELLOW_HITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notoriety_codes_round_trip() {
        for code in 0x1..=0x7u8 {
            let notoriety = Notoriety::from_code(code).expect("defined code");
            assert_eq!(notoriety.code(), code);
        }
        assert_eq!(Notoriety::from_code(0), None);
        assert_eq!(Notoriety::from_code(0x8), None);
    }

    #[test]
    fn test_distance_uses_larger_axis() {
        let a = Point3D::new(100, 100, 0);
        let b = Point3D::new(103, 95, 20);
        assert_eq!(a.distance_to(&b), 5);
    }

    #[test]
    fn test_direction_aliases() {
        assert_eq!(Direction::from_name("Up"), Some(Direction::Northwest));
        assert_eq!(Direction::from_name("south"), Some(Direction::South));
        assert_eq!(Direction::from_name("sideways"), None);
    }

    #[test]
    fn test_ghost_body() {
        let mut mobile = Mobile::new(Serial(1), "Someone", 0x190);
        assert!(!mobile.is_ghost());
        mobile.body = 0x192;
        assert!(mobile.is_ghost());
    }
}
