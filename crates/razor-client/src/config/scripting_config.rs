use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::paths::ProjectPaths;
use crate::world::DEFAULT_SENSOR_RANGE;

/// Period between script firings in the reference client
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 25;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptingConfig {
    /// Whether scripting is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory containing scripts (default: ~/.local/share/razor/scripts)
    #[serde(default)]
    pub script_dir: Option<PathBuf>,

    /// Milliseconds between scheduler firings (default: 25)
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,

    /// Upper bound on instructions one script advances per firing
    #[serde(default = "default_max_steps")]
    pub max_steps_per_tick: usize,

    /// Radius for world searches, in tiles
    #[serde(default = "default_sensor_range")]
    pub sensor_range: u32,

    /// Fixed RNG seed for reproducible object searches
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_enabled() -> bool {
    true
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_max_steps() -> usize {
    32
}

fn default_sensor_range() -> u32 {
    DEFAULT_SENSOR_RANGE
}

impl Default for ScriptingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            script_dir: None,
            tick_interval_ms: default_tick_interval(),
            max_steps_per_tick: default_max_steps(),
            sensor_range: default_sensor_range(),
            seed: None,
        }
    }
}

impl ScriptingConfig {
    /// Get the script directory path (use provided or default)
    pub fn script_dir(&self) -> PathBuf {
        self.script_dir.clone().unwrap_or_else(|| {
            ProjectPaths::new("razor")
                .map(|p| p.data_dir().join("scripts"))
                .unwrap_or_else(|| PathBuf::from(".scripts"))
        })
    }

    pub fn tick_interval(&self) -> Duration {
        // A zero period would spin the scheduler
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
