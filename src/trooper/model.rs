//! Trooper data model
//!
//! A trooper carries two pip tracks (grit, ammo), an ordered set of gear and
//! one counter per counter-bearing item it has equipped. Records written by
//! older versions are accepted and brought up to the current shape on load.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::TrackerError;
use crate::core::types::{normalize_item_id, ItemId, TrooperId};

/// Injury status, set directly by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "OK")]
    Ok,
    Grazed,
    Wounded,
    #[serde(rename = "Bleeding Out")]
    BleedingOut,
    Dead,
    Inactive,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Ok,
        Status::Grazed,
        Status::Wounded,
        Status::BleedingOut,
        Status::Dead,
        Status::Inactive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Grazed => "Grazed",
            Self::Wounded => "Wounded",
            Self::BleedingOut => "Bleeding Out",
            Self::Dead => "Dead",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| c.is_alphanumeric()).collect();
        match key.to_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "grazed" => Ok(Self::Grazed),
            "wounded" => Ok(Self::Wounded),
            "bleedingout" => Ok(Self::BleedingOut),
            "dead" => Ok(Self::Dead),
            "inactive" | "inactiverecovering" => Ok(Self::Inactive),
            _ => Err(TrackerError::invalid_value("status", s)),
        }
    }
}

/// How a position reads for the trooper holding it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionTone {
    Good,
    Neutral,
    Bad,
}

/// Offensive position on the battlefield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OffensivePosition {
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
    Flanking,
    Engaged,
    Limited,
}

impl OffensivePosition {
    pub const CHOICES: [OffensivePosition; 3] = [Self::Flanking, Self::Engaged, Self::Limited];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotApplicable => "N/A",
            Self::Flanking => "Flanking",
            Self::Engaged => "Engaged",
            Self::Limited => "Limited",
        }
    }

    /// Roll modifier shown on the position chip
    pub fn modifier(&self) -> &'static str {
        match self {
            Self::Flanking => "+1d6 when Firing",
            Self::Limited => "-1d6 when Firing",
            Self::Engaged | Self::NotApplicable => "",
        }
    }

    pub fn tone(&self) -> PositionTone {
        match self {
            Self::Flanking => PositionTone::Good,
            Self::Limited => PositionTone::Bad,
            Self::Engaged | Self::NotApplicable => PositionTone::Neutral,
        }
    }
}

impl fmt::Display for OffensivePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OffensivePosition {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "n/a" | "na" | "none" => Ok(Self::NotApplicable),
            "flanking" => Ok(Self::Flanking),
            "engaged" => Ok(Self::Engaged),
            "limited" => Ok(Self::Limited),
            _ => Err(TrackerError::invalid_value("offensivePosition", s)),
        }
    }
}

/// Defensive position on the battlefield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefensivePosition {
    #[default]
    #[serde(rename = "N/A")]
    NotApplicable,
    Fortified,
    #[serde(rename = "In Cover")]
    InCover,
    Flanked,
}

impl DefensivePosition {
    pub const CHOICES: [DefensivePosition; 3] = [Self::Fortified, Self::InCover, Self::Flanked];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotApplicable => "N/A",
            Self::Fortified => "Fortified",
            Self::InCover => "In Cover",
            Self::Flanked => "Flanked",
        }
    }

    /// Injury range shown on the position chip
    pub fn modifier(&self) -> &'static str {
        match self {
            Self::Fortified => "Injury on 1",
            Self::InCover => "Injury on 1-2",
            Self::Flanked => "Injury on 1-3",
            Self::NotApplicable => "",
        }
    }

    pub fn tone(&self) -> PositionTone {
        match self {
            Self::Fortified => PositionTone::Good,
            Self::Flanked => PositionTone::Bad,
            Self::InCover | Self::NotApplicable => PositionTone::Neutral,
        }
    }
}

impl fmt::Display for DefensivePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DefensivePosition {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        match key.to_lowercase().as_str() {
            "n/a" | "na" | "none" => Ok(Self::NotApplicable),
            "fortified" => Ok(Self::Fortified),
            "incover" => Ok(Self::InCover),
            "flanked" => Ok(Self::Flanked),
            _ => Err(TrackerError::invalid_value("defensivePosition", s)),
        }
    }
}

/// Equipped item ids: a set that remembers insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<ItemId>", from = "GearRecord")]
pub struct Gear(Vec<ItemId>);

/// Gear as found in a stored record: a list, or the old comma-joined text
#[derive(Deserialize)]
#[serde(untagged)]
enum GearRecord {
    List(Vec<String>),
    Joined(String),
}

impl From<GearRecord> for Gear {
    fn from(record: GearRecord) -> Self {
        match record {
            GearRecord::List(ids) => ids.iter().map(String::as_str).collect(),
            GearRecord::Joined(text) => Gear::parse(&text),
        }
    }
}

impl From<Gear> for Vec<ItemId> {
    fn from(gear: Gear) -> Self {
        gear.0
    }
}

impl<'a> FromIterator<&'a str> for Gear {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut gear = Gear::default();
        for raw in iter {
            if let Some(id) = normalize_item_id(raw) {
                gear.insert(id);
            }
        }
        gear
    }
}

impl Gear {
    /// Parse a comma-joined gear list
    pub fn parse(text: &str) -> Self {
        text.split(',').collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|g| g == id)
    }

    /// Add an item; returns false if it was already present
    pub fn insert(&mut self, id: ItemId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    /// Remove an item; returns false if it was not present
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|g| g != id);
        self.0.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Gear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// One unit in the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trooper {
    pub id: TrooperId,
    pub name: String,
    pub status: Status,
    pub grit_current: u32,
    pub grit_max: u32,
    pub ammo_current: u32,
    pub gear: Gear,
    /// Counter id -> current pips, one entry per counter of equipped gear
    pub counters: BTreeMap<String, u32>,
    pub offensive_position: OffensivePosition,
    pub defensive_position: DefensivePosition,
    pub notes: String,
    pub is_active: bool,
}

impl Trooper {
    /// A fresh recruit; counters are not initialized yet
    pub fn recruit(gear: Gear, max_ammo: u32) -> Self {
        Self {
            id: TrooperId::new(),
            name: "New Trooper".to_string(),
            status: Status::Ok,
            grit_current: 1,
            grit_max: 1,
            ammo_current: max_ammo,
            gear,
            counters: BTreeMap::new(),
            offensive_position: OffensivePosition::NotApplicable,
            defensive_position: DefensivePosition::NotApplicable,
            notes: String::new(),
            is_active: true,
        }
    }

    /// Current pips of a counter, if the trooper has it
    pub fn counter(&self, counter_id: &str) -> Option<u32> {
        self.counters.get(counter_id).copied()
    }

    /// Clamp every pip track into its bounds
    pub(crate) fn clamp_resources(&mut self, max_ammo: u32) {
        self.grit_max = self.grit_max.max(1);
        self.grit_current = self.grit_current.min(self.grit_max);
        self.ammo_current = self.ammo_current.min(max_ammo);
    }
}

/// Stored shape of a trooper; every field optional so old records load
///
/// Turn it into a [`Trooper`] with [`TrooperRecord::into_trooper`], which
/// needs the ammo maximum for records that never stored their ammo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrooperRecord {
    id: Option<TrooperId>,
    name: Option<String>,
    status: Option<Status>,
    grit_current: Option<serde_json::Value>,
    grit_max: Option<serde_json::Value>,
    ammo_current: Option<serde_json::Value>,
    gear: Option<Gear>,
    counters: Option<BTreeMap<String, u32>>,
    offensive_position: Option<OffensivePosition>,
    defensive_position: Option<DefensivePosition>,
    notes: Option<String>,
    is_active: Option<bool>,
    /// Anything else, including `<counter>_current` fields of old records
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

/// Read a pip count stored as a number or as numeric text
fn as_count(value: &serde_json::Value) -> Option<u32> {
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() {
        Some(n.max(0.0).min(u32::MAX as f64) as u32)
    } else {
        None
    }
}

const LEGACY_COUNTER_SUFFIX: &str = "_current";

impl TrooperRecord {
    /// Build the trooper; a record without an ammo track starts full
    pub fn into_trooper(self, max_ammo: u32) -> Trooper {
        let grit_max = self.grit_max.as_ref().and_then(as_count).unwrap_or(1).max(1);
        let grit_current = self
            .grit_current
            .as_ref()
            .and_then(as_count)
            .unwrap_or(grit_max)
            .min(grit_max);
        let ammo_current = self
            .ammo_current
            .as_ref()
            .and_then(as_count)
            .unwrap_or(max_ammo)
            .min(max_ammo);

        let mut counters = self.counters.unwrap_or_default();
        for (key, value) in &self.extra {
            if let Some(counter_id) = key.strip_suffix(LEGACY_COUNTER_SUFFIX) {
                if let Some(pips) = as_count(value) {
                    counters.entry(counter_id.to_string()).or_insert(pips);
                }
            }
        }

        Trooper {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_else(|| "New Trooper".to_string()),
            status: self.status.unwrap_or_default(),
            grit_current,
            grit_max,
            ammo_current,
            gear: self.gear.unwrap_or_default(),
            counters,
            offensive_position: self.offensive_position.unwrap_or_default(),
            defensive_position: self.defensive_position.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for status in Status::ALL {
            assert_eq!(status.label().parse::<Status>().unwrap(), status);
        }
        assert_eq!("Inactive/Recovering".parse::<Status>().unwrap(), Status::Inactive);
        assert!("Sleepy".parse::<Status>().is_err());
    }

    #[test]
    fn test_position_serde_names() {
        let json = serde_json::to_string(&DefensivePosition::InCover).unwrap();
        assert_eq!(json, "\"In Cover\"");
        let json = serde_json::to_string(&OffensivePosition::NotApplicable).unwrap();
        assert_eq!(json, "\"N/A\"");
        assert_eq!("in cover".parse::<DefensivePosition>().unwrap(), DefensivePosition::InCover);
    }

    #[test]
    fn test_position_metadata() {
        assert_eq!(OffensivePosition::Flanking.modifier(), "+1d6 when Firing");
        assert_eq!(OffensivePosition::Limited.tone(), PositionTone::Bad);
        assert_eq!(DefensivePosition::Flanked.modifier(), "Injury on 1-3");
        assert_eq!(DefensivePosition::Fortified.tone(), PositionTone::Good);
    }

    #[test]
    fn test_gear_parse_normalizes() {
        let gear = Gear::parse(" Assault_Rifle, medium_armor,, assault_rifle ");
        assert_eq!(gear.len(), 2);
        assert!(gear.contains("assault_rifle"));
        assert_eq!(gear.to_string(), "assault_rifle, medium_armor");
    }

    #[test]
    fn test_gear_insert_remove() {
        let mut gear = Gear::default();
        assert!(gear.insert("lmg".into()));
        assert!(!gear.insert("lmg".into()));
        assert!(gear.remove("lmg"));
        assert!(!gear.remove("lmg"));
        assert!(gear.is_empty());
    }

    #[test]
    fn test_legacy_record_repaired() {
        let json = r#"{
            "id": "trooper-1700000000000",
            "name": "Vasquez",
            "status": "Bleeding Out",
            "gear": "rocket_launcher, medium_armor",
            "gritCurrent": 4,
            "ammoCurrent": "2",
            "rocket_current": 0,
            "offensivePosition": "Flanking"
        }"#;
        let record: TrooperRecord = serde_json::from_str(json).unwrap();
        let trooper = record.into_trooper(3);
        assert_eq!(trooper.id.as_str(), "trooper-1700000000000");
        assert_eq!(trooper.status, Status::BleedingOut);
        assert_eq!(trooper.grit_max, 1);
        assert_eq!(trooper.grit_current, 1);
        assert_eq!(trooper.ammo_current, 2);
        assert!(trooper.is_active);
        assert_eq!(trooper.counter("rocket"), Some(0));
        assert_eq!(trooper.defensive_position, DefensivePosition::NotApplicable);
        assert!(trooper.gear.contains("rocket_launcher"));
    }

    #[test]
    fn test_missing_ammo_filled_from_max() {
        let json = r#"{"id":"trooper-1","name":"Old","gear":"assault_rifle"}"#;
        let record: TrooperRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.clone().into_trooper(5).ammo_current, 5);
        assert_eq!(record.into_trooper(2).ammo_current, 2);
    }

    #[test]
    fn test_current_record_round_trips() {
        let mut trooper = Trooper::recruit(Gear::parse("carbine, supply_pack"), 3);
        trooper.counters.insert("pack_ammo".into(), 4);
        trooper.grit_max = 3;
        trooper.grit_current = 2;
        trooper.is_active = false;
        trooper.defensive_position = DefensivePosition::InCover;

        let json = serde_json::to_string(&trooper).unwrap();
        assert!(json.contains("\"gritCurrent\":2"));
        assert!(json.contains("\"gear\":[\"carbine\",\"supply_pack\"]"));
        let record: TrooperRecord = serde_json::from_str(&json).unwrap();
        let back = record.into_trooper(3);
        assert_eq!(back, trooper);
    }
}
