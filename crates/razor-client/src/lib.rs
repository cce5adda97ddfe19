//! Client-side state for razor: the world view scripts read, the actions
//! they emit, and the configuration shared by every front end.
pub mod actions;
pub mod config;
pub mod serial;
pub mod skills;
pub mod spells;
pub mod world;

pub use actions::{Ability, ClientAction, Hand, SpeechKind, SYSTEM_HUE};
pub use serial::{Serial, SerialParseError};
pub use world::{
    Direction, GumpInfo, Item, JournalEntry, Layer, Mobile, MobileFlags, Notoriety, Point3D,
    SharedWorld, World, WorldSnapshot,
};
