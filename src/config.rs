use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Runtime knobs, read once at startup from `config.json` in the config
/// directory. `READLATER_OFFLINE=1` forces offline mode regardless of the
/// file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub offline: bool,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            offline: false,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn load(dir: &Path) -> Self {
        let mut config: Config = fs::read_to_string(dir.join("config.json"))
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        if env::var_os("READLATER_OFFLINE").is_some() {
            config.offline = true;
        }
        config
    }
}

/// `~/.config/readlater`, created on first run.
pub fn config_dir() -> Result<PathBuf> {
    let home = env::var("HOME")?;
    let dir: PathBuf = (home + "/.config/readlater").into();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
