//! Equipment catalog - every item a trooper can carry
//!
//! Items are keyed by a stable id. An item may declare counters: small pip
//! tracks (rocket charges, pack ammo) that exist on a trooper only while the
//! item is equipped.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TrackerError};
use crate::core::types::ItemId;
use crate::equipment::GearSlot;

/// Slot category an item occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotType {
    BasicArmor,
    BasicWeapon,
    SpecialWeapon,
    SpecialEquipment,
}

impl Default for SlotType {
    fn default() -> Self {
        SlotType::SpecialEquipment
    }
}

/// A pip track granted by an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDef {
    pub name: String,
    pub max: u32,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub cost: u32,
    #[serde(rename = "type", default)]
    pub slot_type: SlotType,
    /// Counter id -> definition
    #[serde(default)]
    pub counters: BTreeMap<String, CounterDef>,
}

impl EquipmentItem {
    fn new(id: &str, name: &str, cost: u32, slot_type: SlotType, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            cost,
            slot_type,
            counters: BTreeMap::new(),
        }
    }

    fn with_counter(
        mut self,
        id: &str,
        name: &str,
        max: u32,
        icon: &str,
        color: Option<&str>,
    ) -> Self {
        self.counters.insert(
            id.to_string(),
            CounterDef {
                name: name.to_string(),
                max,
                icon: icon.to_string(),
                color: color.map(str::to_string),
            },
        );
        self
    }

    pub fn has_counters(&self) -> bool {
        !self.counters.is_empty()
    }
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    items: Vec<EquipmentItem>,
}

/// Immutable lookup table of equipment items
#[derive(Debug, Clone, Default)]
pub struct EquipmentCatalog {
    /// Items in catalog order
    items: Vec<EquipmentItem>,
    /// Item id -> index into `items`
    by_id: AHashMap<ItemId, usize>,
    /// Counter id -> owning item index
    by_counter: AHashMap<String, usize>,
}

impl EquipmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock equipment list
    pub fn standard() -> Self {
        use SlotType::*;

        let items = vec![
            // Armor
            EquipmentItem::new(
                "light_armor",
                "Light Armor",
                0,
                BasicArmor,
                "Roll twice when Moving, pick the best result",
            ),
            EquipmentItem::new(
                "medium_armor",
                "Medium Armor",
                0,
                BasicArmor,
                "Ignore first Injury taken during Mission.",
            )
            .with_counter("armor_absorbed", "Armor", 1, "shield", None),
            EquipmentItem::new(
                "heavy_armor",
                "Heavy Armor",
                0,
                BasicArmor,
                "Reduces Injury range by 1.",
            ),
            // Weapons
            EquipmentItem::new(
                "assault_rifle",
                "Assault Rifle",
                0,
                BasicWeapon,
                "1-in-6 chance of not consuming Ammo when enhancing an attack.",
            ),
            EquipmentItem::new(
                "carbine",
                "Carbine",
                0,
                BasicWeapon,
                "+1d6 to Offense Roll when Engaged in Tight battlefields.",
            ),
            EquipmentItem::new(
                "marksman_rifle",
                "Marksman Rifle",
                0,
                BasicWeapon,
                "+1d6 to Offense Roll when Limited in Transitional or Open battlefields.",
            ),
            // Special weapons
            EquipmentItem::new(
                "lmg",
                "LMG",
                1,
                SpecialWeapon,
                "Passive: An additional +1d6 for the Defense Roll of a Trooper receiving Covering Fire",
            ),
            EquipmentItem::new(
                "sniper_rifle",
                "Sniper Rifle",
                0,
                SpecialWeapon,
                "Passive: +1d6 to the Offense Roll when Fortified. An additional +1d6 when Fortified and didn't Move in the previous Exchange.",
            ),
            EquipmentItem::new(
                "grenade_launcher",
                "Grenade Launcher",
                1,
                SpecialWeapon,
                "Active: Launch a grenade against a Hard Target (counts as a Hit), or at another Trooper's target, granting them the benefit of Flanking in the next Offense Roll. Multiple grenades can be fired in one attack - each costing 1 Ammo.",
            ),
            EquipmentItem::new(
                "hmg",
                "HMG",
                2,
                SpecialWeapon,
                "Passive: +1d6 on Offensive Roll when Fortified. Active: Provide Covering Fire for up to 3 Troopers this round. Costs 1 Ammo regardless of number of Troopers covered.",
            ),
            EquipmentItem::new(
                "rocket_launcher",
                "Rocket Launcher",
                1,
                SpecialWeapon,
                "Active: Add +3d6 to Offensive Roll - or deal direct damage to a Hard Target, counting as 2 Hits. Trooper is in Exposed position after use. Single use.",
            )
            .with_counter("rocket", "R. Launcher", 1, "diamond", None),
            EquipmentItem::new(
                "melee_weapon",
                "Melee Weapon",
                0,
                SpecialWeapon,
                "Passive: When a Trooper Moves Up to a Flanking position, they can choose to move to a Flanked position instead of rolling. Doing so adds +3d6 to the Offense Roll. This already includes a bonus for Flanking",
            ),
            EquipmentItem::new(
                "plasma_rifle",
                "Plasma Rifle",
                3,
                SpecialWeapon,
                "Active: Roll 1d6 on use. See table. Does not require Ammo.",
            ),
            // Special equipment
            EquipmentItem::new(
                "supply_pack",
                "Supply Pack",
                1,
                SpecialEquipment,
                "Holds 6 extra Ammo, which can be redistributed after combat.",
            )
            .with_counter("pack_ammo", "Pack Ammo", 6, "circle", Some("navy")),
            EquipmentItem::new(
                "commanders_kit",
                "Commander's Kit",
                1,
                SpecialEquipment,
                "Whenever Enemy Tactics are triggered, roll 1d6. On a 1-3, the Tactic is nullified as the Commander adapts the squad's response in time",
            ),
            EquipmentItem::new(
                "demo_charges",
                "Demolition Charges",
                0,
                SpecialEquipment,
                "Placing charges can be done once a Sector is cleared, or during an Engagement. If done during an Engagement, Momentum must be 1 or greater. The Trooper must commit 2 Exchanges to placing the charges: 1 to move towards a suitable point to place them (acts as Moving Up), 1 to set the charges.",
            ),
            EquipmentItem::new(
                "drone_gear",
                "Drone Gear",
                0,
                SpecialEquipment,
                "Once per mission, add +1 to the next Advance Roll.",
            )
            .with_counter("drone", "Drone", 1, "drone", Some("orange")),
            EquipmentItem::new(
                "jump_pack",
                "Jump Pack",
                2,
                SpecialEquipment,
                "Once per Engagement, the Trooper can use their Move to instantly shift to a Offensive/Defensive position of choice.",
            )
            .with_counter("jump", "Jump", 1, "rocket", None),
            EquipmentItem::new(
                "medic_gear",
                "Medic Gear",
                1,
                SpecialEquipment,
                "Allows the user to patch up Wounded Troopers back to Grazed when out of combat. It costs 1 Ammo to restore a Trooper to Grazed, the 'ammo' representing the medical supplies brought by the Trooper.",
            ),
            EquipmentItem::new(
                "radio_gear",
                "Radio Gear",
                1,
                SpecialEquipment,
                "Call in an artillery strike on the current Sector, once per Mission. Hits in 1d2 Exchanges from now. When it hits, gain +2 Momentum instantly, with all ground-based Hard Targets being destroyed. All Troopers must make a Defense Roll as if Flanked; gaining 1d3 Injury on failure.",
            )
            .with_counter("strike", "Art. Strike", 1, "arrow-big-down-dash", Some("red")),
        ];

        let mut catalog = Self::new();
        for item in items {
            let added = catalog.add(item);
            debug_assert!(added.is_ok(), "stock catalog entry rejected: {:?}", added);
            if let Err(err) = added {
                tracing::error!("Stock catalog entry rejected: {}", err);
            }
        }
        catalog
    }

    /// Add an item, rejecting duplicate item ids, duplicate counter ids and
    /// counters with a zero max
    pub fn add(&mut self, item: EquipmentItem) -> Result<()> {
        if self.by_id.contains_key(&item.id) {
            return Err(TrackerError::Config(format!("duplicate item id '{}'", item.id)));
        }
        for (counter_id, def) in &item.counters {
            if def.max == 0 {
                return Err(TrackerError::Config(format!(
                    "counter '{}' on '{}' must have max >= 1",
                    counter_id, item.id
                )));
            }
            if self.by_counter.contains_key(counter_id) {
                return Err(TrackerError::Config(format!(
                    "counter id '{}' is declared by more than one item",
                    counter_id
                )));
            }
        }

        let idx = self.items.len();
        self.by_id.insert(item.id.clone(), idx);
        for counter_id in item.counters.keys() {
            self.by_counter.insert(counter_id.clone(), idx);
        }
        self.items.push(item);
        Ok(())
    }

    /// Look up an item by id
    pub fn get(&self, id: &str) -> Option<&EquipmentItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Look up a counter definition together with the item that grants it
    pub fn counter(&self, counter_id: &str) -> Option<(&EquipmentItem, &CounterDef)> {
        let item = &self.items[*self.by_counter.get(counter_id)?];
        item.counters.get(counter_id).map(|def| (item, def))
    }

    /// Items that fit a gear slot, in catalog order
    pub fn items_for(&self, slot: GearSlot) -> impl Iterator<Item = &EquipmentItem> {
        self.items.iter().filter(move |item| slot.accepts(item.slot_type))
    }

    /// All items in catalog order
    pub fn all(&self) -> &[EquipmentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from TOML text (`[[items]]` tables)
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlCatalog = toml::from_str(content)?;
        let mut catalog = Self::new();
        for item in data.items {
            catalog.add(item)?;
        }
        tracing::debug!("Loaded {} equipment items from TOML", catalog.len());
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_complete() {
        let catalog = EquipmentCatalog::standard();
        assert_eq!(catalog.len(), 20);
        assert!(catalog.contains("rocket_launcher"));
        assert!(catalog.contains("demo_charges"));
    }

    #[test]
    fn test_stock_counters_resolve_to_owner() {
        let catalog = EquipmentCatalog::standard();
        let mut seen = 0;
        for item in catalog.all() {
            for (counter_id, def) in &item.counters {
                assert!(def.max >= 1, "{} has a zero-max counter", item.id);
                let (owner, _) = catalog.counter(counter_id).unwrap();
                assert_eq!(owner.id, item.id);
                seen += 1;
            }
        }
        assert_eq!(seen, 6);
    }

    #[test]
    fn test_rocket_launcher_counter() {
        let catalog = EquipmentCatalog::standard();
        let item = catalog.get("rocket_launcher").unwrap();
        assert_eq!(item.slot_type, SlotType::SpecialWeapon);
        assert_eq!(item.cost, 1);
        assert_eq!(item.counters["rocket"].max, 1);
    }

    #[test]
    fn test_counter_lookup_returns_owner() {
        let catalog = EquipmentCatalog::standard();
        let (item, def) = catalog.counter("pack_ammo").unwrap();
        assert_eq!(item.id, "supply_pack");
        assert_eq!(def.max, 6);
        assert_eq!(def.color.as_deref(), Some("navy"));
        assert!(catalog.counter("nonexistent").is_none());
    }

    #[test]
    fn test_demo_charges_defaults() {
        let catalog = EquipmentCatalog::standard();
        let item = catalog.get("demo_charges").unwrap();
        assert_eq!(item.slot_type, SlotType::SpecialEquipment);
        assert_eq!(item.cost, 0);
        assert!(!item.has_counters());
    }

    #[test]
    fn test_items_for_special_slot_spans_two_types() {
        let catalog = EquipmentCatalog::standard();
        let special: Vec<_> = catalog.items_for(GearSlot::Special).map(|i| i.id.as_str()).collect();
        assert!(special.contains(&"lmg"));
        assert!(special.contains(&"medic_gear"));
        assert!(!special.contains(&"carbine"));

        let armor: Vec<_> = catalog.items_for(GearSlot::Armor).map(|i| i.id.as_str()).collect();
        assert_eq!(armor, vec!["light_armor", "medium_armor", "heavy_armor"]);
    }

    #[test]
    fn test_parse_toml_catalog() {
        let toml = r#"
[[items]]
id = "flamer"
name = "Flamer"
description = "Burns things."
cost = 2
type = "special_weapon"

[items.counters.fuel]
name = "Fuel"
max = 3
icon = "flame"
color = "orange"

[[items]]
id = "helmet"
name = "Helmet"
description = "Keeps your head on."
type = "basic_armor"
"#;
        let catalog = EquipmentCatalog::parse_toml(toml).unwrap();
        assert_eq!(catalog.len(), 2);
        let flamer = catalog.get("flamer").unwrap();
        assert_eq!(flamer.counters["fuel"].max, 3);
        assert_eq!(catalog.get("helmet").unwrap().cost, 0);
    }

    #[test]
    fn test_parse_toml_rejects_zero_max_counter() {
        let toml = r#"
[[items]]
id = "dud"
name = "Dud"
description = ""
[items.counters.nothing]
name = "Nothing"
max = 0
icon = "x"
"#;
        let err = EquipmentCatalog::parse_toml(toml).unwrap_err();
        assert!(matches!(err, TrackerError::Config(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut catalog = EquipmentCatalog::standard();
        let dup = catalog.get("lmg").unwrap().clone();
        assert!(catalog.add(dup).is_err());
    }
}
