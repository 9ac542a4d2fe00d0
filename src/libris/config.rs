use crate::error::{LibrisError, Result};
use crate::store::DEFAULT_BLOB_KEY;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LAST_ADDED: usize = 3;
const DEFAULT_RANDOM_PICKS: usize = 3;

/// Configuration for libris, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LibrisConfig {
    /// Name of the blob holding the collection
    #[serde(default = "default_blob_name")]
    pub blob_name: String,

    /// How many books the "last added" view shows
    #[serde(default = "default_last_added")]
    pub last_added_count: usize,

    /// How many books `random` picks when no count is given
    #[serde(default = "default_random_picks")]
    pub random_picks: usize,
}

fn default_blob_name() -> String {
    DEFAULT_BLOB_KEY.to_string()
}

fn default_last_added() -> usize {
    DEFAULT_LAST_ADDED
}

fn default_random_picks() -> usize {
    DEFAULT_RANDOM_PICKS
}

impl Default for LibrisConfig {
    fn default() -> Self {
        Self {
            blob_name: default_blob_name(),
            last_added_count: DEFAULT_LAST_ADDED,
            random_picks: DEFAULT_RANDOM_PICKS,
        }
    }
}

impl LibrisConfig {
    pub const KEYS: [&'static str; 3] = ["blob-name", "last-added", "random-picks"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(LibrisError::Io)?;
        let config: LibrisConfig =
            serde_json::from_str(&content).map_err(LibrisError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(LibrisError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(LibrisError::Serialization)?;
        fs::write(config_path, content).map_err(LibrisError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "blob-name" => Ok(self.blob_name.clone()),
            "last-added" => Ok(self.last_added_count.to_string()),
            "random-picks" => Ok(self.random_picks.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "blob-name" => {
                let name = value.trim();
                if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
                    return Err(LibrisError::Api(format!("Invalid blob name: '{}'", value)));
                }
                self.blob_name = name.to_string();
            }
            "last-added" => self.last_added_count = parse_count(key, value)?,
            "random-picks" => self.random_picks = parse_count(key, value)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| LibrisError::Api(format!("{} must be a whole number, got '{}'", key, value)))
}

fn unknown_key(key: &str) -> LibrisError {
    LibrisError::Api(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        LibrisConfig::KEYS.join(", ")
    ))
}
