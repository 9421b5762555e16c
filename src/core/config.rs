//! Tracker configuration with documented defaults
//!
//! Everything that the game rules leave as a house-rule dial lives here.
//! Values load from an optional TOML file; any missing key falls back to
//! the default below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TrackerError};
use crate::equipment::{EquipmentCatalog, GearSlot};

/// Configuration for the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Ammo pips every trooper carries at most
    ///
    /// The stock rules give every trooper 3 Ammo; supply packs hold their
    /// extra ammo on a separate counter, so this never grows per trooper.
    pub max_ammo: u32,

    /// Directory where the roster and mission records are written
    pub data_dir: PathBuf,

    /// Gear a freshly recruited trooper is issued
    pub starter_gear: Vec<String>,

    /// Threat level used when a mission is started without one
    pub default_threat_level: u8,

    /// Optional TOML file replacing the built-in equipment catalog
    pub catalog_path: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_ammo: 3,
            data_dir: PathBuf::from(".danger-close"),
            starter_gear: vec!["assault_rifle".into(), "medium_armor".into()],
            default_threat_level: 2,
            catalog_path: None,
        }
    }
}

impl TrackerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate().map_err(TrackerError::Config)?;
        Ok(config)
    }

    /// Load a config file, or the defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_ammo == 0 {
            return Err("max_ammo must be at least 1".into());
        }

        if !(1..=4).contains(&self.default_threat_level) {
            return Err(format!(
                "default_threat_level ({}) must be between 1 and 4",
                self.default_threat_level
            ));
        }

        Ok(())
    }

    /// Check that the starter gear exists and fits the three exclusive slots
    pub fn validate_gear(&self, catalog: &EquipmentCatalog) -> std::result::Result<(), String> {
        let mut taken: Vec<GearSlot> = Vec::new();
        for id in &self.starter_gear {
            let item = catalog
                .get(id)
                .ok_or_else(|| format!("starter gear '{}' is not in the catalog", id))?;
            let slot = GearSlot::of(item.slot_type);
            if taken.contains(&slot) {
                return Err(format!("starter gear holds two {} items", slot.name()));
            }
            taken.push(slot);
        }
        Ok(())
    }
}
