use crate::serial::Serial;
use crate::world::{Direction, Layer, Point3D};

/// Combat special moves a script can arm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Primary,
    Secondary,
    Stun,
    Disarm,
}

impl Ability {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "primary" => Some(Ability::Primary),
            "secondary" => Some(Ability::Secondary),
            "stun" => Some(Ability::Stun),
            "disarm" => Some(Ability::Disarm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    pub fn layer(self) -> Layer {
        match self {
            Hand::Left => Layer::LeftHand,
            Hand::Right => Layer::RightHand,
        }
    }
}

/// Channel a spoken line goes out on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechKind {
    Regular,
    Yell,
    Whisper,
    Emote,
    Party,
    Guild,
    Alliance,
}

/// Requests scripts hand to the client.
///
/// Most variants become a packet to the server; the `Client*` variants and
/// the message variants only update what the player sees locally.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientAction {
    /// Double-click an object
    UseObject { serial: Serial },
    /// Single-click an object (requests its name label)
    SingleClick { serial: Serial },
    LiftItem { serial: Serial, amount: u32 },
    /// Drop the held item into a container, or onto the ground when
    /// `container` is zero
    DropItem {
        serial: Serial,
        container: Serial,
        position: Option<Point3D>,
    },
    EquipItem {
        serial: Serial,
        mobile: Serial,
        layer: Layer,
    },
    Rename { serial: Serial, name: String },
    Attack { serial: Serial },
    SetWarMode { enabled: bool },
    UseSkill { skill: u16 },
    /// Cast a spell; `target` is queued for the cursor the cast opens
    CastSpell { spell: u16, target: Option<Serial> },
    /// Use an item directly on a target without waiting for a cursor
    UseTargetedItem { item: Serial, target: Serial },
    UseAbility { ability: Ability },
    ClearAbility,
    /// Local ability icon update
    ClientSetAbility { ability: Ability },
    /// Local ability icon reset
    ClientClearAbility,
    /// Unequip or re-equip whatever belongs in this hand
    ToggleHand { hand: Hand },

    Target { serial: Serial },
    TargetGround {
        graphic: u16,
        position: Point3D,
    },
    CancelTarget,
    ClearTargetQueue,

    GumpResponse {
        serial: Serial,
        gump_id: u32,
        button: u32,
    },
    CloseGump { gump_id: u32 },
    ContextMenu { serial: Serial, option: u16 },

    Speech {
        kind: SpeechKind,
        hue: u16,
        text: String,
    },
    /// Text drawn over a mobile or item, local only
    OverheadMessage {
        serial: Serial,
        hue: u16,
        text: String,
    },
    /// Line in the player's system feed, local only
    SystemMessage { hue: u16, text: String },

    Walk { direction: Direction, run: bool },
    Turn { direction: Direction },
    ToggleFlying,
    ClearJournal,
    Resync,
    Ping,
}

impl ClientAction {
    pub fn system_message(text: impl Into<String>) -> Self {
        ClientAction::SystemMessage {
            hue: SYSTEM_HUE,
            text: text.into(),
        }
    }

    /// True when the action produces outbound traffic
    pub fn is_network(&self) -> bool {
        !matches!(
            self,
            ClientAction::ClientSetAbility { .. }
                | ClientAction::ClientClearAbility
                | ClientAction::OverheadMessage { .. }
                | ClientAction::SystemMessage { .. }
                | ClientAction::ClearJournal
        )
    }
}

/// Default hue for feed messages
pub const SYSTEM_HUE: u16 = 0x03B2;
