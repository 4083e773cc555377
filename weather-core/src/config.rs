use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// A named place: its coordinates and where its forecast snapshots live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceConfig {
    /// `"latitude,longitude"`, e.g. `"48.8566,2.3522"`.
    pub location: String,

    pub forecast_file: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime_file: Option<PathBuf>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Place used when a command is not given one.
    pub default_place: Option<String>,

    /// Example TOML:
    /// [places.paris]
    /// location = "48.8566,2.3522"
    /// forecast_file = "/data/paris-forecast.json"
    #[serde(default)]
    pub places: HashMap<String, PlaceConfig>,
}

fn place_key(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Config {
    /// Name of the default place, as stored.
    pub fn default_place_name(&self) -> Result<&str> {
        self.default_place.as_deref().ok_or_else(|| {
            anyhow!(
                "No default place configured.\n\
                 Hint: run `forecast-brief configure <place>` (e.g. `forecast-brief configure paris`) first."
            )
        })
    }

    pub fn has_place(&self, name: &str) -> bool {
        self.places.contains_key(&place_key(name))
    }

    pub fn place(&self, name: &str) -> Result<&PlaceConfig> {
        self.places.get(&place_key(name)).ok_or_else(|| {
            anyhow!(
                "Unknown place '{name}'.\n\
                 Hint: run `forecast-brief configure {name}` to add it."
            )
        })
    }

    /// Set the default place; it must already be configured.
    pub fn set_default_place(&mut self, name: &str) -> Result<()> {
        let key = place_key(name);
        if !self.places.contains_key(&key) {
            return Err(anyhow!(
                "Cannot make '{name}' the default: it is not configured.\n\
                 Hint: run `forecast-brief configure {name}` first."
            ));
        }

        self.default_place = Some(key);
        Ok(())
    }

    /// Add or replace a place. The first place added becomes the default.
    pub fn upsert_place(&mut self, name: &str, place: PlaceConfig) {
        let key = place_key(name);
        self.places.insert(key.clone(), place);

        if self.default_place.is_none() {
            self.default_place = Some(key);
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-brief", "forecast-brief")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
