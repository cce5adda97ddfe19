//! Live view of the game session.
//!
//! The network side is the only writer; scripts read. [`SharedWorld`] makes
//! that contract explicit: writers go through [`SharedWorld::update`], and a
//! script firing holds a single read guard for its whole pass so every
//! instruction in one firing sees the same state.

mod gump;
mod interaction;
mod item;
mod journal;
mod mobile;
mod player;
mod snapshot;

pub use gump::{GumpInfo, GumpState};
pub use interaction::InteractionState;
pub use item::{Item, Layer};
pub use journal::{Journal, JournalEntry};
pub use mobile::{Direction, Mobile, MobileFlags, Notoriety, Point3D};
pub use player::{PlayerStatus, SkillValue};
pub use snapshot::WorldSnapshot;

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::actions::ClientAction;
use crate::serial::Serial;

/// Default radius the server keeps us updated on
pub const DEFAULT_SENSOR_RANGE: u32 = 18;

/// Everything the client knows about the current session
#[derive(Debug, Clone)]
pub struct World {
    player_serial: Serial,
    pub status: PlayerStatus,
    mobiles: HashMap<Serial, Mobile>,
    items: HashMap<Serial, Item>,
    /// Container (or wearer) -> child items
    contents: HashMap<Serial, Vec<Serial>>,
    pub gumps: GumpState,
    pub journal: Journal,
    pub interaction: InteractionState,
    pub party: BTreeSet<Serial>,
    pub sensor_range: u32,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            player_serial: Serial::ZERO,
            status: PlayerStatus::default(),
            mobiles: HashMap::new(),
            items: HashMap::new(),
            contents: HashMap::new(),
            gumps: GumpState::default(),
            journal: Journal::default(),
            interaction: InteractionState::default(),
            party: BTreeSet::new(),
            sensor_range: DEFAULT_SENSOR_RANGE,
        }
    }

    // ===== Player =====

    /// Register the logged-in character; it is tracked like any other mobile
    pub fn set_player(&mut self, mobile: Mobile) {
        self.player_serial = mobile.serial;
        self.add_mobile(mobile);
    }

    pub fn player_serial(&self) -> Serial {
        self.player_serial
    }

    pub fn player(&self) -> Option<&Mobile> {
        self.mobiles.get(&self.player_serial)
    }

    pub fn player_mut(&mut self) -> Option<&mut Mobile> {
        self.mobiles.get_mut(&self.player_serial)
    }

    // ===== Mobiles =====

    pub fn add_mobile(&mut self, mobile: Mobile) {
        self.mobiles.insert(mobile.serial, mobile);
    }

    pub fn remove_mobile(&mut self, serial: Serial) -> Option<Mobile> {
        let removed = self.mobiles.remove(&serial);
        // Equipment goes with the wearer
        for child in self.contents.remove(&serial).unwrap_or_default() {
            self.remove_item(child);
        }
        removed
    }

    pub fn mobile(&self, serial: Serial) -> Option<&Mobile> {
        if serial.is_zero() {
            return None;
        }
        self.mobiles.get(&serial)
    }

    pub fn mobile_mut(&mut self, serial: Serial) -> Option<&mut Mobile> {
        self.mobiles.get_mut(&serial)
    }

    pub fn mobiles(&self) -> impl Iterator<Item = &Mobile> {
        self.mobiles.values()
    }

    /// Mobiles within `range` tiles of the player
    pub fn mobiles_in_range(&self, range: u32) -> impl Iterator<Item = &Mobile> {
        let origin = self.player().map(|p| p.position);
        self.mobiles.values().filter(move |m| match origin {
            Some(origin) => origin.distance_to(&m.position) <= range,
            None => false,
        })
    }

    // ===== Items =====

    pub fn add_item(&mut self, item: Item) {
        let serial = item.serial;
        let old_parent = self.items.get(&serial).and_then(|previous| previous.container);
        if let Some(old_parent) = old_parent {
            self.detach(old_parent, serial);
        }
        if let Some(parent) = item.container {
            self.contents.entry(parent).or_default().push(serial);
        }
        self.items.insert(serial, item);
    }

    pub fn remove_item(&mut self, serial: Serial) -> Option<Item> {
        let removed = self.items.remove(&serial)?;
        if let Some(parent) = removed.container {
            self.detach(parent, serial);
        }
        for child in self.contents.remove(&serial).unwrap_or_default() {
            self.remove_item(child);
        }
        Some(removed)
    }

    /// Move an item into a new container, or onto the ground
    pub fn move_item(&mut self, serial: Serial, container: Option<Serial>, position: Point3D) {
        let Some(old_parent) = self.items.get(&serial).map(|item| item.container) else {
            return;
        };
        if let Some(old_parent) = old_parent {
            self.detach(old_parent, serial);
        }
        if let Some(parent) = container {
            self.contents.entry(parent).or_default().push(serial);
        }
        if let Some(item) = self.items.get_mut(&serial) {
            item.container = container;
            item.position = position;
        }
    }

    fn detach(&mut self, parent: Serial, child: Serial) {
        if let Some(children) = self.contents.get_mut(&parent) {
            children.retain(|&id| id != child);
        }
    }

    pub fn item(&self, serial: Serial) -> Option<&Item> {
        if serial.is_zero() {
            return None;
        }
        self.items.get(&serial)
    }

    pub fn item_mut(&mut self, serial: Serial) -> Option<&mut Item> {
        self.items.get_mut(&serial)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Direct children of a container or the equipment of a mobile
    pub fn contents(&self, container: Serial) -> Vec<&Item> {
        self.contents
            .get(&container)
            .map(|ids| ids.iter().filter_map(|id| self.items.get(id)).collect())
            .unwrap_or_default()
    }

    /// Item worn on `layer` by `mobile`
    pub fn find_layer(&self, mobile: Serial, layer: Layer) -> Option<&Item> {
        self.contents(mobile)
            .into_iter()
            .find(|item| item.layer == Some(layer))
    }

    pub fn backpack(&self) -> Option<&Item> {
        self.find_layer(self.player_serial, Layer::Backpack)
    }

    pub fn bank(&self) -> Option<&Item> {
        self.find_layer(self.player_serial, Layer::Bank)
    }

    /// True when the item sits (at any depth) inside a bank box
    pub fn is_in_bank(&self, item: &Item) -> bool {
        let mut parent = item.container;
        // Bounded walk so a malformed parent cycle cannot hang a firing
        for _ in 0..64 {
            let Some(serial) = parent else {
                return false;
            };
            match self.items.get(&serial) {
                Some(container) if container.is_bank_box() => return true,
                Some(container) => parent = container.container,
                None => return false,
            }
        }
        false
    }

    /// World position of an object; contained items report their outermost
    /// parent's position
    pub fn world_position(&self, serial: Serial) -> Option<Point3D> {
        let mut current = serial;
        for _ in 0..64 {
            if let Some(mobile) = self.mobiles.get(&current) {
                return Some(mobile.position);
            }
            let item = self.items.get(&current)?;
            match item.container {
                Some(parent) => current = parent,
                None => return Some(item.position),
            }
        }
        None
    }

    /// Tile distance from the player to an object
    pub fn distance_to(&self, serial: Serial) -> Option<u32> {
        let origin = self.player()?.position;
        let target = self.world_position(serial)?;
        Some(origin.distance_to(&target))
    }

    /// Any live object, mobile or item
    pub fn exists(&self, serial: Serial) -> bool {
        self.mobile(serial).is_some() || self.item(serial).is_some()
    }

    // ===== Client-side bookkeeping =====

    /// Apply the part of an action the client tracks locally when it sends
    /// the request (last target, last object, closed gumps, ...)
    pub fn apply_local(&mut self, action: &ClientAction) {
        match action {
            ClientAction::UseObject { serial } => self.interaction.last_object = *serial,
            ClientAction::Target { serial } => {
                self.interaction.last_target = *serial;
                self.interaction.target_pending = false;
            }
            ClientAction::TargetGround { .. } | ClientAction::CancelTarget => {
                self.interaction.target_pending = false;
            }
            ClientAction::UseSkill { skill } => self.interaction.last_skill = Some(*skill),
            ClientAction::CastSpell { spell, .. } => self.interaction.last_spell = Some(*spell),
            ClientAction::GumpResponse { gump_id, .. } | ClientAction::CloseGump { gump_id } => {
                self.gumps.close_gump(*gump_id);
            }
            ClientAction::ClearJournal => self.journal.clear(),
            _ => {}
        }
    }
}

/// World view shared between the network writer and the script firing
#[derive(Debug, Clone, Default)]
pub struct SharedWorld {
    inner: Arc<RwLock<World>>,
}

impl SharedWorld {
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// Read access for one firing.
    ///
    /// World state is plain data, so a poisoned lock is recovered rather
    /// than propagated.
    pub fn read(&self) -> RwLockReadGuard<'_, World> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writer-side mutation
    pub fn update<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
