use std::env;
use std::path::PathBuf;

/// Per-user directories for config, data and logs.
///
/// Unix-likes follow the XDG base directory variables with the usual
/// fallbacks under `$HOME`; Windows uses `%APPDATA%`.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl ProjectPaths {
    /// Resolve directories for `name`. Returns `None` without a home directory.
    pub fn new(name: &str) -> Option<Self> {
        let home = home_dir()?;

        #[cfg(target_os = "windows")]
        let (config_root, data_root) = {
            let appdata =
                env_path("APPDATA").unwrap_or_else(|| home.join("AppData").join("Roaming"));
            (appdata.clone(), appdata)
        };

        #[cfg(not(target_os = "windows"))]
        let (config_root, data_root) = (
            env_path("XDG_CONFIG_HOME").unwrap_or_else(|| home.join(".config")),
            env_path("XDG_DATA_HOME").unwrap_or_else(|| home.join(".local").join("share")),
        );

        Some(Self {
            config_dir: config_root.join(name),
            data_dir: data_root.join(name),
        })
    }

    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn home_dir() -> Option<PathBuf> {
    env_path("HOME").or_else(|| env_path("USERPROFILE"))
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
