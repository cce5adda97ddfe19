use serde::{Deserialize, Serialize};

use crate::serial::Serial;

/// What the player last did, as tracked by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionState {
    /// A server target cursor is up and waiting for a response
    pub target_pending: bool,
    pub last_target: Serial,
    pub last_object: Serial,
    pub last_skill: Option<u16>,
    pub last_spell: Option<u16>,
}
