//! Persistence for the roster and mission records
//!
//! Records are JSON blobs in a key-value store. Loading never fails on a
//! missing key: an absent roster is empty and an absent mission is the
//! default state. Loaded records go through the same repair pass as the
//! rest of the core, so older saves come back in the current shape.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::config::TrackerConfig;
use crate::core::error::Result;
use crate::equipment::EquipmentCatalog;
use crate::mission::MissionState;
use crate::roster::Roster;
use crate::trooper::TrooperRecord;

pub const ROSTER_KEY: &str = "dangerCloseRoster";
pub const MISSION_KEY: &str = "dangerCloseMissionState";

/// Durable string storage by key
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Write then rename so a crash never leaves half a record behind
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path(key))?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_roster(
    store: &impl KeyValueStore,
    catalog: Arc<EquipmentCatalog>,
    config: &TrackerConfig,
) -> Result<Roster> {
    let records: Vec<TrooperRecord> = match store.get(ROSTER_KEY)? {
        Some(json) => serde_json::from_str(&json)?,
        None => Vec::new(),
    };
    tracing::debug!("Loaded {} troopers", records.len());
    Ok(Roster::from_records(records, catalog, config))
}

pub fn save_roster(store: &mut impl KeyValueStore, roster: &Roster) -> Result<()> {
    let json = serde_json::to_string_pretty(roster.list())?;
    store.set(ROSTER_KEY, &json)
}

pub fn load_mission(store: &impl KeyValueStore) -> Result<MissionState> {
    match store.get(MISSION_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(MissionState::default()),
    }
}

pub fn save_mission(store: &mut impl KeyValueStore, mission: &MissionState) -> Result<()> {
    let json = serde_json::to_string_pretty(mission)?;
    store.set(MISSION_KEY, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::GearSlot;

    fn catalog() -> Arc<EquipmentCatalog> {
        Arc::new(EquipmentCatalog::standard())
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let roster = load_roster(&store, catalog(), &TrackerConfig::default()).unwrap();
        assert!(roster.is_empty());
        assert_eq!(load_mission(&store).unwrap(), MissionState::default());
    }

    #[test]
    fn test_roster_survives_reload() {
        let config = TrackerConfig::default();
        let mut store = MemoryStore::new();
        let mut roster = Roster::new(catalog(), &config);
        let id = roster.create();
        roster.swap_gear(&id, GearSlot::Special, Some("supply_pack")).unwrap();
        roster.set_counter(&id, "pack_ammo", 4).unwrap();
        roster.update_field(&id, "name", "Hicks").unwrap();
        save_roster(&mut store, &roster).unwrap();

        let reloaded = load_roster(&store, catalog(), &config).unwrap();
        assert_eq!(reloaded.list(), roster.list());
    }

    #[test]
    fn test_legacy_roster_repaired_on_load() {
        let mut store = MemoryStore::new();
        store
            .set(
                ROSTER_KEY,
                r#"[{"id":"trooper-1","name":"Old","status":"OK","gear":"Assault Rifle, medium_armor, drone_gear","gritCurrent":2,"ammoCurrent":3,"notes":""}]"#,
            )
            .unwrap();
        let roster = load_roster(&store, catalog(), &TrackerConfig::default()).unwrap();
        let trooper = &roster.list()[0];
        assert_eq!(trooper.grit_max, 1);
        assert_eq!(trooper.grit_current, 1);
        assert!(trooper.is_active);
        assert_eq!(trooper.counter("drone"), Some(1));
        assert_eq!(trooper.counter("armor_absorbed"), Some(1));
    }

    #[test]
    fn test_mission_survives_reload() {
        let mut store = MemoryStore::new();
        let mut mission = MissionState::new();
        mission.start(4);
        mission.adjust_momentum(2);
        save_mission(&mut store, &mission).unwrap();
        assert_eq!(load_mission(&store).unwrap(), mission);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("danger-close-{}", uuid::Uuid::new_v4()));
        let mut store = FileStore::new(&dir);
        assert_eq!(store.get("missing").unwrap(), None);
        store.set("key", "{\"a\":1}").unwrap();
        assert_eq!(store.get("key").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(dir.join("key.json").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
