pub mod paths;
pub mod razor_config;
pub mod scripting_config;

pub use paths::ProjectPaths;
pub use razor_config::{ConfigLoadError, LoggingConfig, RazorConfig};
pub use scripting_config::{ScriptingConfig, DEFAULT_TICK_INTERVAL_MS};
