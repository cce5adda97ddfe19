use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::serial::Serial;

const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default)]
    pub serial: Serial,
    #[serde(default)]
    pub name: String,
    pub text: String,
    /// Server system message rather than speech
    #[serde(default)]
    pub system: bool,
}

/// Bounded log of speech and system text received this session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    capacity: usize,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Journal {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: JournalEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// Case-insensitive substring search.
    ///
    /// `author` narrows the search to one speaker; the name `system`
    /// selects server system messages.
    pub fn contains(&self, text: &str, author: Option<&str>) -> bool {
        let needle = text.to_lowercase();
        self.entries.iter().any(|entry| {
            let author_matches = match author {
                None => true,
                Some(a) if a.eq_ignore_ascii_case("system") => entry.system,
                Some(a) => entry.name.eq_ignore_ascii_case(a),
            };
            author_matches && entry.text.to_lowercase().contains(&needle)
        })
    }
}
