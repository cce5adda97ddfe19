//! Named state that outlives a single script: aliases, lists and timers.
//!
//! Names are case-insensitive. Timers take the current time explicitly so
//! a firing sees one consistent clock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use razor_client::Serial;

use crate::argument::Argument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEnd {
    Front,
    Back,
}

/// What `poplist` removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopTarget {
    Front,
    Back,
    /// Every element equal to the value
    Value(Argument),
}

/// Storage behind the alias, list and timer verbs
pub trait ScriptStore: Send {
    fn get_alias(&self, name: &str) -> Option<Serial>;
    fn set_alias(&mut self, name: &str, serial: Serial);
    /// Unsetting binds the alias to zero, so it stays known but resolves
    /// to nothing
    fn unset_alias(&mut self, name: &str) {
        self.set_alias(name, Serial::ZERO);
    }

    fn create_list(&mut self, name: &str);
    fn remove_list(&mut self, name: &str) -> bool;
    fn list_exists(&self, name: &str) -> bool;
    /// Returns false when the list does not exist or `unique` rejected a
    /// duplicate
    fn push_list(&mut self, name: &str, value: Argument, end: ListEnd, unique: bool) -> bool;
    fn pop_list(&mut self, name: &str, target: &PopTarget) -> Option<Argument>;
    fn clear_list(&mut self, name: &str) -> bool;
    fn list_len(&self, name: &str) -> Option<usize>;
    fn list_contains(&self, name: &str, value: &Argument) -> bool;

    fn create_timer(&mut self, name: &str, now: Instant);
    fn set_timer(&mut self, name: &str, elapsed: Duration, now: Instant);
    fn remove_timer(&mut self, name: &str) -> bool;
    fn timer_elapsed(&self, name: &str, now: Instant) -> Option<Duration>;
    fn timer_exists(&self, name: &str) -> bool;
}

#[derive(Debug, Clone)]
struct Timer {
    started: Instant,
    offset: Duration,
}

impl Timer {
    fn elapsed(&self, now: Instant) -> Duration {
        self.offset + now.saturating_duration_since(self.started)
    }
}

/// In-memory store used by the runner
#[derive(Debug, Default)]
pub struct MemoryStore {
    aliases: HashMap<String, Serial>,
    lists: HashMap<String, Vec<Argument>>,
    timers: HashMap<String, Timer>,
}

fn key(name: &str) -> String {
    name.to_ascii_lowercase()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self, name: &str) -> Option<&[Argument]> {
        self.lists.get(&key(name)).map(Vec::as_slice)
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }
}

impl ScriptStore for MemoryStore {
    fn get_alias(&self, name: &str) -> Option<Serial> {
        self.aliases.get(&key(name)).copied()
    }

    fn set_alias(&mut self, name: &str, serial: Serial) {
        self.aliases.insert(key(name), serial);
    }

    fn create_list(&mut self, name: &str) {
        self.lists.entry(key(name)).or_default();
    }

    fn remove_list(&mut self, name: &str) -> bool {
        self.lists.remove(&key(name)).is_some()
    }

    fn list_exists(&self, name: &str) -> bool {
        self.lists.contains_key(&key(name))
    }

    fn push_list(&mut self, name: &str, value: Argument, end: ListEnd, unique: bool) -> bool {
        let Some(list) = self.lists.get_mut(&key(name)) else {
            return false;
        };
        if unique && list.contains(&value) {
            return false;
        }
        match end {
            ListEnd::Front => list.insert(0, value),
            ListEnd::Back => list.push(value),
        }
        true
    }

    fn pop_list(&mut self, name: &str, target: &PopTarget) -> Option<Argument> {
        let list = self.lists.get_mut(&key(name))?;
        match target {
            PopTarget::Front if !list.is_empty() => Some(list.remove(0)),
            PopTarget::Back => list.pop(),
            PopTarget::Value(value) => {
                let before = list.len();
                list.retain(|entry| entry != value);
                (list.len() != before).then(|| value.clone())
            }
            PopTarget::Front => None,
        }
    }

    fn clear_list(&mut self, name: &str) -> bool {
        match self.lists.get_mut(&key(name)) {
            Some(list) => {
                list.clear();
                true
            }
            None => false,
        }
    }

    fn list_len(&self, name: &str) -> Option<usize> {
        self.lists.get(&key(name)).map(Vec::len)
    }

    fn list_contains(&self, name: &str, value: &Argument) -> bool {
        self.lists
            .get(&key(name))
            .is_some_and(|list| list.contains(value))
    }

    fn create_timer(&mut self, name: &str, now: Instant) {
        self.set_timer(name, Duration::ZERO, now);
    }

    fn set_timer(&mut self, name: &str, elapsed: Duration, now: Instant) {
        self.timers.insert(
            key(name),
            Timer {
                started: now,
                offset: elapsed,
            },
        );
    }

    fn remove_timer(&mut self, name: &str) -> bool {
        self.timers.remove(&key(name)).is_some()
    }

    fn timer_elapsed(&self, name: &str, now: Instant) -> Option<Duration> {
        self.timers.get(&key(name)).map(|timer| timer.elapsed(now))
    }

    fn timer_exists(&self, name: &str) -> bool {
        self.timers.contains_key(&key(name))
    }
}
