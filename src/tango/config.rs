use crate::daily::DEFAULT_DAILY_LIMIT;
use crate::error::{Result, TangoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RECENT_LIMIT: usize = 30;
const DEFAULT_MAX_IMPORT_BYTES: u64 = 5 * 1024 * 1024;

/// Keys accepted by `get`/`set`, in display order.
pub const CONFIG_KEYS: [&str; 3] = ["daily-limit", "recent-limit", "max-import-bytes"];

/// Configuration for tango, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TangoConfig {
    /// How many words a daily selection holds
    #[serde(default = "default_daily_limit")]
    pub daily_limit: usize,

    /// How many words the "recent" view shows
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// Import files larger than this are refused
    #[serde(default = "default_max_import_bytes")]
    pub max_import_bytes: u64,
}

fn default_daily_limit() -> usize {
    DEFAULT_DAILY_LIMIT
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_max_import_bytes() -> u64 {
    DEFAULT_MAX_IMPORT_BYTES
}

impl Default for TangoConfig {
    fn default() -> Self {
        Self {
            daily_limit: DEFAULT_DAILY_LIMIT,
            recent_limit: DEFAULT_RECENT_LIMIT,
            max_import_bytes: DEFAULT_MAX_IMPORT_BYTES,
        }
    }
}

impl TangoConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TangoError::Io)?;
        let config: TangoConfig =
            serde_json::from_str(&content).map_err(TangoError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TangoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TangoError::Serialization)?;
        fs::write(config_path, content).map_err(TangoError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "daily-limit" => Some(self.daily_limit.to_string()),
            "recent-limit" => Some(self.recent_limit.to_string()),
            "max-import-bytes" => Some(self.max_import_bytes.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "daily-limit" => self.daily_limit = parse_positive(key, value)?,
            "recent-limit" => self.recent_limit = parse_positive(key, value)?,
            "max-import-bytes" => self.max_import_bytes = parse_positive(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}

fn parse_positive<T>(key: &str, value: &str) -> std::result::Result<T, String>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.trim().parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(format!("{} must be a positive number, got '{}'", key, value)),
    }
}
