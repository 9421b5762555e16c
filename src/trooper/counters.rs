//! Pip tracks: grit, ammo and per-item counters
//!
//! All three share one click rule. Clicking the pip that equals the current
//! value knocks it down by one; clicking any other pip sets the value there.

use crate::core::error::{Result, TrackerError};
use crate::equipment::EquipmentCatalog;
use crate::trooper::Trooper;

/// Resolve a pip click against a bar of `max` pips
pub fn toggle_set(current: u32, requested: u32, max: u32) -> u32 {
    if requested == current {
        requested.saturating_sub(1)
    } else {
        requested.min(max)
    }
}

/// Give every counter of the trooper's equipped gear a value, starting at max
///
/// Existing values are left alone, so this is safe to run after any gear
/// change and on every load.
pub fn initialize_counters(trooper: &mut Trooper, catalog: &EquipmentCatalog) {
    for item_id in trooper.gear.iter() {
        let Some(item) = catalog.get(item_id) else {
            continue;
        };
        for (counter_id, def) in &item.counters {
            trooper
                .counters
                .entry(counter_id.clone())
                .or_insert(def.max);
        }
    }
}

/// Drop the counters an item grants
pub fn remove_counter_fields(trooper: &mut Trooper, catalog: &EquipmentCatalog, item_id: &str) {
    let Some(item) = catalog.get(item_id) else {
        return;
    };
    for counter_id in item.counters.keys() {
        if trooper.counters.remove(counter_id).is_some() {
            tracing::debug!("{}: dropped counter {}", trooper.id, counter_id);
        }
    }
}

/// Drop counters whose item is no longer equipped and clamp the rest
pub(crate) fn prune_counters(trooper: &mut Trooper, catalog: &EquipmentCatalog) {
    let gear = &trooper.gear;
    trooper.counters.retain(|counter_id, value| match catalog.counter(counter_id) {
        Some((item, def)) if gear.contains(&item.id) => {
            *value = (*value).min(def.max);
            true
        }
        _ => false,
    });
}

pub fn set_grit(trooper: &mut Trooper, requested: u32) {
    trooper.grit_current = toggle_set(trooper.grit_current, requested, trooper.grit_max);
}

pub fn set_ammo(trooper: &mut Trooper, requested: u32, max_ammo: u32) {
    trooper.ammo_current = toggle_set(trooper.ammo_current, requested, max_ammo);
}

/// Apply a pip click to one of the trooper's item counters
///
/// Fails with `InvalidField` when the trooper has no such counter, e.g. a
/// click on a bar rendered before its item was unequipped.
pub fn set_counter(
    trooper: &mut Trooper,
    catalog: &EquipmentCatalog,
    counter_id: &str,
    requested: u32,
) -> Result<u32> {
    let max = catalog
        .counter(counter_id)
        .map(|(_, def)| def.max)
        .ok_or_else(|| TrackerError::InvalidField(counter_id.to_string()))?;
    let current = trooper
        .counters
        .get_mut(counter_id)
        .ok_or_else(|| TrackerError::InvalidField(counter_id.to_string()))?;
    *current = toggle_set(*current, requested, max);
    tracing::debug!("{}: counter {} -> {}", trooper.id, counter_id, *current);
    Ok(*current)
}
