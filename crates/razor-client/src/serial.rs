use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier the server assigns to every mobile and item.
///
/// The value space is split into three disjoint classes: zero (absent),
/// the mobile range and the item range. A serial is only ever a lookup key
/// into the world view; it carries no ownership.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Serial(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid serial")]
pub struct SerialParseError(pub String);

impl Serial {
    pub const ZERO: Serial = Serial(0);

    const MOBILE_MAX: u32 = 0x3FFF_FFFF;
    const ITEM_MIN: u32 = 0x4000_0000;
    const ITEM_MAX: u32 = 0x7FFF_FFFF;

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_mobile(self) -> bool {
        self.0 > 0 && self.0 <= Self::MOBILE_MAX
    }

    pub fn is_item(self) -> bool {
        (Self::ITEM_MIN..=Self::ITEM_MAX).contains(&self.0)
    }

    /// True for anything inside the mobile or item range
    pub fn is_valid(self) -> bool {
        self.is_mobile() || self.is_item()
    }
}

impl From<u32> for Serial {
    fn from(value: u32) -> Self {
        Serial(value)
    }
}

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl FromStr for Serial {
    type Err = SerialParseError;

    /// Accepts `0x`-prefixed hexadecimal or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => trimmed.parse::<u32>(),
        };
        parsed
            .map(Serial)
            .map_err(|_| SerialParseError(s.to_string()))
    }
}
