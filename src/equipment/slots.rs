//! Gear slots - armor, primary weapon and one special item
//!
//! A trooper holds at most one item per slot. Special weapons and special
//! equipment compete for the same slot.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{Result, TrackerError};
use crate::core::types::{normalize_item_id, ItemId};
use crate::equipment::{EquipmentCatalog, EquipmentItem, SlotType};
use crate::trooper::{initialize_counters, remove_counter_fields, Trooper};

/// One of the three exclusive gear slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GearSlot {
    Armor,
    Weapon,
    Special,
}

impl GearSlot {
    pub const ALL: [GearSlot; 3] = [GearSlot::Armor, GearSlot::Weapon, GearSlot::Special];

    /// The slot an item type lands in
    pub fn of(slot_type: SlotType) -> Self {
        match slot_type {
            SlotType::BasicArmor => Self::Armor,
            SlotType::BasicWeapon => Self::Weapon,
            SlotType::SpecialWeapon | SlotType::SpecialEquipment => Self::Special,
        }
    }

    pub fn slot_types(&self) -> &'static [SlotType] {
        match self {
            Self::Armor => &[SlotType::BasicArmor],
            Self::Weapon => &[SlotType::BasicWeapon],
            Self::Special => &[SlotType::SpecialWeapon, SlotType::SpecialEquipment],
        }
    }

    pub fn accepts(&self, slot_type: SlotType) -> bool {
        self.slot_types().contains(&slot_type)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Armor => "armor",
            Self::Weapon => "weapon",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for GearSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GearSlot {
    type Err = TrackerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        match key.strip_prefix("gear_").unwrap_or(&key) {
            "armor" => Ok(Self::Armor),
            "weapon" => Ok(Self::Weapon),
            "special" => Ok(Self::Special),
            _ => Err(TrackerError::invalid_value("slot", s)),
        }
    }
}

/// What a swap changed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SwapOutcome {
    pub removed: Option<ItemId>,
    pub equipped: Option<ItemId>,
}

impl SwapOutcome {
    pub fn is_noop(&self) -> bool {
        self.removed.is_none() && self.equipped.is_none()
    }
}

/// The equipped item whose type is in `slot_types`
///
/// Should two equipped items share a slot (a damaged record), the first in
/// gear order wins.
pub fn equipped_item_in<'a>(
    trooper: &Trooper,
    catalog: &'a EquipmentCatalog,
    slot_types: &[SlotType],
) -> Option<&'a EquipmentItem> {
    trooper
        .gear
        .iter()
        .filter_map(|id| catalog.get(id))
        .find(|item| slot_types.contains(&item.slot_type))
}

/// The item occupying a gear slot
pub fn equipped_in<'a>(
    trooper: &Trooper,
    catalog: &'a EquipmentCatalog,
    slot: GearSlot,
) -> Option<&'a EquipmentItem> {
    equipped_item_in(trooper, catalog, slot.slot_types())
}

/// Replace whatever occupies `slot` with `new_item`, or clear it when `None`
///
/// The new item is checked before anything changes, so a rejected swap
/// leaves the trooper untouched. Selecting the item already in the slot is
/// a no-op and keeps its counters.
pub fn swap(
    trooper: &mut Trooper,
    catalog: &EquipmentCatalog,
    slot: GearSlot,
    new_item: Option<&str>,
) -> Result<SwapOutcome> {
    let new_id = new_item.and_then(normalize_item_id);

    if let Some(id) = &new_id {
        let item = catalog
            .get(id)
            .ok_or_else(|| TrackerError::UnknownItem(id.clone()))?;
        if !slot.accepts(item.slot_type) {
            return Err(TrackerError::invalid_value(slot.name(), id));
        }
    }

    let occupant = equipped_in(trooper, catalog, slot).map(|item| item.id.clone());
    if occupant.is_some() && occupant == new_id {
        return Ok(SwapOutcome::default());
    }

    if let Some(old) = &occupant {
        trooper.gear.remove(old);
        remove_counter_fields(trooper, catalog, old);
    }
    if let Some(id) = &new_id {
        trooper.gear.insert(id.clone());
    }
    initialize_counters(trooper, catalog);

    tracing::debug!(
        "{}: {} slot {:?} -> {:?}",
        trooper.id,
        slot,
        occupant,
        new_id
    );

    Ok(SwapOutcome {
        removed: occupant,
        equipped: new_id,
    })
}

/// Remove exactly one item and its counters, whatever slot it sits in
///
/// Returns false if the item was not equipped.
pub fn remove_item(trooper: &mut Trooper, catalog: &EquipmentCatalog, item_id: &str) -> bool {
    let Some(id) = normalize_item_id(item_id) else {
        return false;
    };
    if !trooper.gear.remove(&id) {
        return false;
    }
    remove_counter_fields(trooper, catalog, &id);
    tracing::debug!("{}: removed {}", trooper.id, id);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trooper::Gear;

    fn trooper_with(gear: &str) -> (Trooper, EquipmentCatalog) {
        let catalog = EquipmentCatalog::standard();
        let mut trooper = Trooper::recruit(Gear::parse(gear), 3);
        initialize_counters(&mut trooper, &catalog);
        (trooper, catalog)
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("gear_special".parse::<GearSlot>().unwrap(), GearSlot::Special);
        assert_eq!("Armor".parse::<GearSlot>().unwrap(), GearSlot::Armor);
        assert!("boots".parse::<GearSlot>().is_err());
    }

    #[test]
    fn test_equipped_in_finds_occupant() {
        let (trooper, catalog) = trooper_with("assault_rifle, medium_armor, jump_pack");
        assert_eq!(equipped_in(&trooper, &catalog, GearSlot::Armor).unwrap().id, "medium_armor");
        assert_eq!(equipped_in(&trooper, &catalog, GearSlot::Special).unwrap().id, "jump_pack");
    }

    #[test]
    fn test_first_occupant_wins_on_damaged_record() {
        let (trooper, catalog) = trooper_with("lmg, medic_gear");
        assert_eq!(equipped_in(&trooper, &catalog, GearSlot::Special).unwrap().id, "lmg");
    }

    #[test]
    fn test_swap_replaces_and_cleans_counters() {
        let (mut trooper, catalog) = trooper_with("assault_rifle, medium_armor");
        trooper.counters.insert("armor_absorbed".into(), 0);

        let outcome = swap(&mut trooper, &catalog, GearSlot::Armor, Some("heavy_armor")).unwrap();
        assert_eq!(outcome.removed.as_deref(), Some("medium_armor"));
        assert_eq!(outcome.equipped.as_deref(), Some("heavy_armor"));
        assert!(!trooper.gear.contains("medium_armor"));
        assert_eq!(trooper.counter("armor_absorbed"), None);

        swap(&mut trooper, &catalog, GearSlot::Armor, Some("medium_armor")).unwrap();
        assert_eq!(trooper.counter("armor_absorbed"), Some(1));
    }

    #[test]
    fn test_swap_to_empty_clears_slot() {
        let (mut trooper, catalog) = trooper_with("assault_rifle, medium_armor");
        let outcome = swap(&mut trooper, &catalog, GearSlot::Armor, Some("")).unwrap();
        assert_eq!(outcome.equipped, None);
        assert!(equipped_in(&trooper, &catalog, GearSlot::Armor).is_none());
        assert!(trooper.gear.contains("assault_rifle"));
    }

    #[test]
    fn test_swap_same_item_is_noop() {
        let (mut trooper, catalog) = trooper_with("rocket_launcher");
        trooper.counters.insert("rocket".into(), 0);
        let outcome =
            swap(&mut trooper, &catalog, GearSlot::Special, Some("rocket_launcher")).unwrap();
        assert!(outcome.is_noop());
        assert!(trooper.gear.contains("rocket_launcher"));
        assert_eq!(trooper.counter("rocket"), Some(0));
    }

    #[test]
    fn test_swap_rejects_wrong_slot_and_unknown() {
        let (mut trooper, catalog) = trooper_with("assault_rifle, medium_armor");
        let before = trooper.clone();
        assert!(matches!(
            swap(&mut trooper, &catalog, GearSlot::Armor, Some("carbine")),
            Err(TrackerError::InvalidValue { .. })
        ));
        assert!(matches!(
            swap(&mut trooper, &catalog, GearSlot::Weapon, Some("laser_sword")),
            Err(TrackerError::UnknownItem(_))
        ));
        assert_eq!(trooper, before);
    }

    #[test]
    fn test_special_slot_shared_by_weapons_and_equipment() {
        let (mut trooper, catalog) = trooper_with("supply_pack");
        swap(&mut trooper, &catalog, GearSlot::Special, Some("hmg")).unwrap();
        assert!(!trooper.gear.contains("supply_pack"));
        assert_eq!(trooper.counter("pack_ammo"), None);
        assert!(trooper.gear.contains("hmg"));
    }

    #[test]
    fn test_remove_item_leaves_other_slots() {
        let (mut trooper, catalog) = trooper_with("assault_rifle, medium_armor, radio_gear");
        assert!(remove_item(&mut trooper, &catalog, "radio_gear"));
        assert_eq!(trooper.counter("strike"), None);
        assert_eq!(trooper.counter("armor_absorbed"), Some(1));
        assert_eq!(trooper.gear.len(), 2);
        assert!(!remove_item(&mut trooper, &catalog, "radio_gear"));
    }
}
