use serde::{Deserialize, Serialize};

use super::{
    GumpInfo, InteractionState, Item, JournalEntry, Mobile, PlayerStatus, World,
    DEFAULT_SENSOR_RANGE,
};
use crate::serial::Serial;

/// Serializable form of a [`World`], used to seed offline runs and tests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSnapshot {
    pub player: Option<Mobile>,
    pub status: PlayerStatus,
    pub mobiles: Vec<Mobile>,
    pub items: Vec<Item>,
    pub gumps: Vec<GumpInfo>,
    pub journal: Vec<JournalEntry>,
    pub interaction: InteractionState,
    pub party: Vec<Serial>,
    pub sensor_range: Option<u32>,
}

impl WorldSnapshot {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn into_world(self) -> World {
        let mut world = World::new();
        if let Some(player) = self.player {
            world.set_player(player);
        }
        world.status = self.status;
        for mobile in self.mobiles {
            world.add_mobile(mobile);
        }
        for item in self.items {
            world.add_item(item);
        }
        for gump in self.gumps {
            world.gumps.open_gump(gump);
        }
        for entry in self.journal {
            world.journal.push(entry);
        }
        world.interaction = self.interaction;
        world.party = self.party.into_iter().collect();
        world.sensor_range = self.sensor_range.unwrap_or(DEFAULT_SENSOR_RANGE);
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Layer;

    const SAMPLE: &str = r#"
sensor_range = 12

[player]
serial = 256
name = "Tester"
body = 400
hits = 80
hits_max = 100
position = { x = 1000, y = 1000 }

[status]
strength = 90
gold = 1500

[[items]]
serial = 0x40000001
name = "Backpack"
graphic = 0x0E75
container = 256
layer = "backpack"
is_container = true

[[items]]
serial = 0x40000002
name = "Bandage"
graphic = 3617
amount = 25
container = 0x40000001

[[gumps]]
serial = 0x40000001
gump_id = 0x1234
lines = ["Choose a reward"]

[[journal]]
name = "Guard"
text = "Halt!"
"#;

    #[test]
    fn test_snapshot_into_world() {
        let world = WorldSnapshot::from_toml_str(SAMPLE)
            .expect("sample parses")
            .into_world();

        assert_eq!(world.player_serial(), Serial(256));
        assert_eq!(world.player().map(|p| p.hits), Some(80));
        assert_eq!(world.status.strength, 90);
        assert_eq!(world.sensor_range, 12);

        let pack = world.backpack().expect("backpack present");
        assert_eq!(pack.layer, Some(Layer::Backpack));
        let contents = world.contents(pack.serial);
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].amount, 25);

        assert!(world.gumps.has_gump(0x1234));
        assert!(world.journal.contains("halt", Some("guard")));
    }
}
