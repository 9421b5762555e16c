//! Roster - the ordered list of troopers
//!
//! Insertion order is list order. Every operation that names a trooper
//! fails with `TrooperNotFound` when the id is unknown and leaves the roster
//! untouched.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::config::TrackerConfig;
use crate::core::error::{Result, TrackerError};
use crate::core::types::TrooperId;
use crate::equipment::{self, EquipmentCatalog, GearSlot, SwapOutcome};
use crate::mission::{can_set_flanking, can_set_fortified, MissionState, PositionCheck};
use crate::roster::TrooperUpdate;
use crate::trooper::counters::{self, prune_counters};
use crate::trooper::{DefensivePosition, Gear, OffensivePosition, Trooper, TrooperRecord};

/// The squad, deployed and in reserve
#[derive(Debug, Clone)]
pub struct Roster {
    troopers: Vec<Trooper>,
    catalog: Arc<EquipmentCatalog>,
    max_ammo: u32,
    starter_gear: Gear,
}

impl Roster {
    /// An empty roster
    pub fn new(catalog: Arc<EquipmentCatalog>, config: &TrackerConfig) -> Self {
        Self {
            troopers: Vec::new(),
            catalog,
            max_ammo: config.max_ammo,
            starter_gear: config.starter_gear.iter().map(String::as_str).collect(),
        }
    }

    /// Build a roster from stored troopers, repairing each record
    ///
    /// Counters of equipped gear are filled in, counters of gear no longer
    /// carried are dropped, pip tracks are clamped, and a repeated id gets a
    /// fresh one so ids stay unique.
    pub fn from_troopers(
        troopers: Vec<Trooper>,
        catalog: Arc<EquipmentCatalog>,
        config: &TrackerConfig,
    ) -> Self {
        let mut roster = Self::new(catalog, config);
        let mut seen = HashSet::new();

        for mut trooper in troopers {
            if !seen.insert(trooper.id.clone()) {
                let fresh = TrooperId::new();
                tracing::warn!("Duplicate trooper id {} reassigned to {}", trooper.id, fresh);
                trooper.id = fresh;
                seen.insert(trooper.id.clone());
            }
            roster.repair(&mut trooper);
            roster.troopers.push(trooper);
        }

        roster
    }

    /// Build a roster from stored records, see [`Roster::from_troopers`]
    pub fn from_records(
        records: Vec<TrooperRecord>,
        catalog: Arc<EquipmentCatalog>,
        config: &TrackerConfig,
    ) -> Self {
        let troopers = records
            .into_iter()
            .map(|record| record.into_trooper(config.max_ammo))
            .collect();
        Self::from_troopers(troopers, catalog, config)
    }

    fn repair(&self, trooper: &mut Trooper) {
        trooper.clamp_resources(self.max_ammo);
        prune_counters(trooper, &self.catalog);
        counters::initialize_counters(trooper, &self.catalog);
    }

    pub fn catalog(&self) -> &EquipmentCatalog {
        &self.catalog
    }

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    // === QUERIES ===

    /// Every trooper in list order
    pub fn list(&self) -> &[Trooper] {
        &self.troopers
    }

    /// Troopers deployed to the active mission
    pub fn list_active(&self) -> impl Iterator<Item = &Trooper> {
        self.troopers.iter().filter(|t| t.is_active)
    }

    /// Troopers held in reserve
    pub fn list_reserve(&self) -> impl Iterator<Item = &Trooper> {
        self.troopers.iter().filter(|t| !t.is_active)
    }

    pub fn get(&self, id: &TrooperId) -> Option<&Trooper> {
        self.troopers.iter().find(|t| &t.id == id)
    }

    pub fn len(&self) -> usize {
        self.troopers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.troopers.is_empty()
    }

    fn get_mut(&mut self, id: &TrooperId) -> Result<&mut Trooper> {
        self.troopers
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| TrackerError::TrooperNotFound(id.clone()))
    }

    fn others<'a>(&'a self, id: &'a TrooperId) -> impl Iterator<Item = &'a Trooper> {
        self.troopers.iter().filter(move |t| &t.id != id)
    }

    // === REPOSITORY ===

    /// Recruit a trooper with starter gear and full pip tracks
    pub fn create(&mut self) -> TrooperId {
        let mut trooper = Trooper::recruit(self.starter_gear.clone(), self.max_ammo);
        counters::initialize_counters(&mut trooper, &self.catalog);
        let id = trooper.id.clone();
        tracing::info!("Recruited {}", id);
        self.troopers.push(trooper);
        id
    }

    pub fn update(&mut self, id: &TrooperId, update: TrooperUpdate) -> Result<()> {
        let max_ammo = self.max_ammo;
        let trooper = self.get_mut(id)?;
        tracing::debug!("{}: {:?}", id, update);
        update.apply(trooper, max_ammo);
        Ok(())
    }

    /// Update from a field name and raw input text
    pub fn update_field(&mut self, id: &TrooperId, field: &str, value: &str) -> Result<()> {
        self.get_mut(id)?;
        let update = TrooperUpdate::parse(field, value)?;
        self.update(id, update)
    }

    pub fn delete(&mut self, id: &TrooperId) -> Result<Trooper> {
        let idx = self
            .troopers
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TrackerError::TrooperNotFound(id.clone()))?;
        tracing::info!("Removed {}", id);
        Ok(self.troopers.remove(idx))
    }

    pub fn set_active(&mut self, id: &TrooperId, active: bool) -> Result<()> {
        self.update(id, TrooperUpdate::Active(active))
    }

    /// Flip between deployed and reserve; returns the new state
    pub fn toggle_deployment(&mut self, id: &TrooperId) -> Result<bool> {
        let trooper = self.get_mut(id)?;
        trooper.is_active = !trooper.is_active;
        Ok(trooper.is_active)
    }

    // === PIP TRACKS ===

    pub fn set_grit(&mut self, id: &TrooperId, requested: u32) -> Result<u32> {
        let trooper = self.get_mut(id)?;
        counters::set_grit(trooper, requested);
        Ok(trooper.grit_current)
    }

    pub fn set_ammo(&mut self, id: &TrooperId, requested: u32) -> Result<u32> {
        let max_ammo = self.max_ammo;
        let trooper = self.get_mut(id)?;
        counters::set_ammo(trooper, requested, max_ammo);
        Ok(trooper.ammo_current)
    }

    pub fn set_counter(&mut self, id: &TrooperId, counter_id: &str, requested: u32) -> Result<u32> {
        let catalog = Arc::clone(&self.catalog);
        let trooper = self.get_mut(id)?;
        counters::set_counter(trooper, &catalog, counter_id, requested)
    }

    // === GEAR ===

    /// Put `item` in `slot`, or empty the slot when `item` is `None`
    pub fn swap_gear(
        &mut self,
        id: &TrooperId,
        slot: GearSlot,
        item: Option<&str>,
    ) -> Result<SwapOutcome> {
        let catalog = Arc::clone(&self.catalog);
        let trooper = self.get_mut(id)?;
        equipment::swap(trooper, &catalog, slot, item)
    }

    /// Take one item off; returns false if it was not equipped
    pub fn remove_gear(&mut self, id: &TrooperId, item: &str) -> Result<bool> {
        let catalog = Arc::clone(&self.catalog);
        let trooper = self.get_mut(id)?;
        Ok(equipment::remove_item(trooper, &catalog, item))
    }

    // === POSITIONS ===

    /// Capacity check for Fortified, not counting `exclude`
    pub fn can_set_fortified(
        &self,
        mission: &MissionState,
        exclude: Option<&TrooperId>,
    ) -> PositionCheck {
        match exclude {
            Some(id) => can_set_fortified(self.others(id), mission.cover()),
            None => can_set_fortified(&self.troopers, mission.cover()),
        }
    }

    /// Capacity check for Flanking, not counting `exclude`
    pub fn can_set_flanking(
        &self,
        mission: &MissionState,
        exclude: Option<&TrooperId>,
    ) -> PositionCheck {
        match exclude {
            Some(id) => can_set_flanking(self.others(id), mission.space()),
            None => can_set_flanking(&self.troopers, mission.space()),
        }
    }

    /// Click on an offensive position chip
    ///
    /// Clicking the held position clears it; any other position is taken,
    /// provided Flanking still has room in the current space.
    pub fn toggle_offensive_position(
        &mut self,
        id: &TrooperId,
        position: OffensivePosition,
        mission: &MissionState,
    ) -> Result<OffensivePosition> {
        let current = self
            .get(id)
            .ok_or_else(|| TrackerError::TrooperNotFound(id.clone()))?
            .offensive_position;

        let next = if current == position {
            OffensivePosition::NotApplicable
        } else {
            position
        };

        if next == OffensivePosition::Flanking {
            let check = self.can_set_flanking(mission, Some(id));
            if !check.valid {
                tracing::warn!("{}: {}", id, check.reason);
                return Err(TrackerError::CapacityExceeded(check.reason));
            }
        }

        self.update(id, TrooperUpdate::OffensivePosition(next))?;
        Ok(next)
    }

    /// Click on a defensive position chip
    ///
    /// Clicking the held position clears it; any other position is taken,
    /// provided Fortified still has room under the current cover.
    pub fn toggle_defensive_position(
        &mut self,
        id: &TrooperId,
        position: DefensivePosition,
        mission: &MissionState,
    ) -> Result<DefensivePosition> {
        let current = self
            .get(id)
            .ok_or_else(|| TrackerError::TrooperNotFound(id.clone()))?
            .defensive_position;

        let next = if current == position {
            DefensivePosition::NotApplicable
        } else {
            position
        };

        if next == DefensivePosition::Fortified {
            let check = self.can_set_fortified(mission, Some(id));
            if !check.valid {
                tracing::warn!("{}: {}", id, check.reason);
                return Err(TrackerError::CapacityExceeded(check.reason));
            }
        }

        self.update(id, TrooperUpdate::DefensivePosition(next))?;
        Ok(next)
    }
}
