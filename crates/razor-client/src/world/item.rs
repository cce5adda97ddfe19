use serde::{Deserialize, Serialize};

use super::mobile::Point3D;
use crate::serial::Serial;

/// Equipment slot an item occupies on a mobile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    RightHand = 0x01,
    LeftHand = 0x02,
    Shoes = 0x03,
    Pants = 0x04,
    Shirt = 0x05,
    Helm = 0x06,
    Gloves = 0x07,
    Ring = 0x08,
    Talisman = 0x09,
    Neck = 0x0A,
    Hair = 0x0B,
    Waist = 0x0C,
    InnerTorso = 0x0D,
    Bracelet = 0x0E,
    FacialHair = 0x10,
    MiddleTorso = 0x11,
    Earrings = 0x12,
    Arms = 0x13,
    Cloak = 0x14,
    Backpack = 0x15,
    OuterTorso = 0x16,
    OuterLegs = 0x17,
    InnerLegs = 0x18,
    Mount = 0x19,
    Bank = 0x1D,
}

impl Layer {
    /// Resolve the names scripts use for layers
    pub fn from_name(name: &str) -> Option<Self> {
        let layer = match name.to_ascii_lowercase().as_str() {
            "righthand" | "onehanded" => Layer::RightHand,
            "lefthand" | "twohanded" => Layer::LeftHand,
            "shoes" => Layer::Shoes,
            "pants" => Layer::Pants,
            "shirt" => Layer::Shirt,
            "helm" | "head" => Layer::Helm,
            "gloves" => Layer::Gloves,
            "ring" => Layer::Ring,
            "talisman" => Layer::Talisman,
            "neck" => Layer::Neck,
            "hair" => Layer::Hair,
            "waist" => Layer::Waist,
            "innertorso" => Layer::InnerTorso,
            "bracelet" => Layer::Bracelet,
            "facialhair" => Layer::FacialHair,
            "middletorso" => Layer::MiddleTorso,
            "earrings" => Layer::Earrings,
            "arms" => Layer::Arms,
            "cloak" => Layer::Cloak,
            "backpack" => Layer::Backpack,
            "outertorso" => Layer::OuterTorso,
            "outerlegs" => Layer::OuterLegs,
            "innerlegs" => Layer::InnerLegs,
            "mount" => Layer::Mount,
            "bank" => Layer::Bank,
            _ => return None,
        };
        Some(layer)
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// An item as last reported by the server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub serial: Serial,
    #[serde(default)]
    pub name: String,
    pub graphic: u16,
    #[serde(default)]
    pub hue: u16,
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Parent container or wearer; `None` means the item lies on the ground
    #[serde(default)]
    pub container: Option<Serial>,
    /// Position on the ground, or inside the parent container's gump
    #[serde(default)]
    pub position: Point3D,
    #[serde(default)]
    pub layer: Option<Layer>,
    #[serde(default)]
    pub is_container: bool,
}

fn default_amount() -> u32 {
    1
}

impl Item {
    pub fn new(serial: Serial, name: impl Into<String>, graphic: u16) -> Self {
        Self {
            serial,
            name: name.into(),
            graphic,
            hue: 0,
            amount: 1,
            container: None,
            position: Point3D::default(),
            layer: None,
            is_container: false,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.container.is_none()
    }

    pub fn is_bank_box(&self) -> bool {
        self.layer == Some(Layer::Bank)
    }
}
