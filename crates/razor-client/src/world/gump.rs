use serde::{Deserialize, Serialize};

use crate::serial::Serial;

/// A server gump currently shown to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GumpInfo {
    pub serial: Serial,
    pub gump_id: u32,
    /// Text lines of the gump layout
    #[serde(default)]
    pub lines: Vec<String>,
}

/// Open server gumps, most recent last
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GumpState {
    #[serde(default)]
    pub open: Vec<GumpInfo>,
}

impl GumpState {
    pub fn open_gump(&mut self, gump: GumpInfo) {
        self.open.retain(|g| g.gump_id != gump.gump_id);
        self.open.push(gump);
    }

    pub fn close_gump(&mut self, gump_id: u32) -> bool {
        let before = self.open.len();
        self.open.retain(|g| g.gump_id != gump_id);
        self.open.len() != before
    }

    pub fn get(&self, gump_id: u32) -> Option<&GumpInfo> {
        self.open.iter().find(|g| g.gump_id == gump_id)
    }

    pub fn has_gump(&self, gump_id: u32) -> bool {
        self.get(gump_id).is_some()
    }

    pub fn any_open(&self) -> bool {
        !self.open.is_empty()
    }

    /// The gump the server sent last
    pub fn last(&self) -> Option<&GumpInfo> {
        self.open.last()
    }

    /// Case-insensitive substring search, in one gump or in any of them
    pub fn contains_text(&self, text: &str, gump_id: Option<u32>) -> bool {
        let needle = text.to_lowercase();
        self.open
            .iter()
            .filter(|g| gump_id.map_or(true, |id| g.gump_id == id))
            .any(|g| g.lines.iter().any(|l| l.to_lowercase().contains(&needle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gump(id: u32, lines: &[&str]) -> GumpInfo {
        GumpInfo {
            serial: Serial(0x1000),
            gump_id: id,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_reopen_replaces() {
        let mut gumps = GumpState::default();
        gumps.open_gump(gump(7, &["first"]));
        gumps.open_gump(gump(7, &["second"]));
        assert_eq!(gumps.open.len(), 1);
        assert!(gumps.contains_text("SECOND", Some(7)));
        assert!(!gumps.contains_text("first", None));
    }

    #[test]
    fn test_close() {
        let mut gumps = GumpState::default();
        gumps.open_gump(gump(7, &[]));
        assert!(gumps.close_gump(7));
        assert!(!gumps.close_gump(7));
        assert!(!gumps.any_open());
    }
}
