//! Session - load state, apply one command, persist
//!
//! The session owns the roster and the mission for the lifetime of one
//! caller interaction. A command that fails changes nothing and writes
//! nothing.

use std::sync::Arc;

use crate::command::report;
use crate::core::config::TrackerConfig;
use crate::core::error::{Result, TrackerError};
use crate::core::types::TrooperId;
use crate::equipment::{EquipmentCatalog, GearSlot};
use crate::mission::MissionState;
use crate::roster::{Roster, TrooperUpdate};
use crate::store::{self, KeyValueStore};
use crate::trooper::{DefensivePosition, OffensivePosition};

/// Every mutation a caller can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Roster
    Recruit,
    Dismiss { id: TrooperId },
    Update { id: TrooperId, field: String, value: String },
    SetGrit { id: TrooperId, value: u32 },
    SetAmmo { id: TrooperId, value: u32 },
    SetCounter { id: TrooperId, counter: String, value: u32 },
    Equip { id: TrooperId, slot: GearSlot, item: Option<String> },
    Unequip { id: TrooperId, item: String },
    ToggleDeployment { id: TrooperId },
    OffensivePosition { id: TrooperId, position: OffensivePosition },
    DefensivePosition { id: TrooperId, position: DefensivePosition },
    // Mission
    StartMission { threat_level: Option<u8> },
    EndMission,
    SetThreatLevel(u8),
    SetMomentum(i32),
    AdjustMomentum(i32),
    SetCover(i64),
    SetSpace(i64),
    SetExchange(i64),
    NextExchange,
    PreviousExchange,
    ResetExchange,
    ToggleHeader,
}

impl Command {
    fn touches_roster(&self) -> bool {
        matches!(
            self,
            Self::Recruit
                | Self::Dismiss { .. }
                | Self::Update { .. }
                | Self::SetGrit { .. }
                | Self::SetAmmo { .. }
                | Self::SetCounter { .. }
                | Self::Equip { .. }
                | Self::Unequip { .. }
                | Self::ToggleDeployment { .. }
                | Self::OffensivePosition { .. }
                | Self::DefensivePosition { .. }
        )
    }
}

/// Loaded state plus the store it came from
pub struct Session<S: KeyValueStore> {
    store: S,
    config: TrackerConfig,
    roster: Roster,
    mission: MissionState,
}

/// The catalog named by the config, or the stock one
pub fn load_catalog(config: &TrackerConfig) -> Result<EquipmentCatalog> {
    let catalog = match &config.catalog_path {
        Some(path) => EquipmentCatalog::load_from_toml(path)?,
        None => EquipmentCatalog::standard(),
    };
    config.validate_gear(&catalog).map_err(TrackerError::Config)?;
    Ok(catalog)
}

impl<S: KeyValueStore> Session<S> {
    pub fn open(store: S, config: TrackerConfig) -> Result<Self> {
        config.validate().map_err(TrackerError::Config)?;
        let catalog = Arc::new(load_catalog(&config)?);
        let roster = store::load_roster(&store, catalog, &config)?;
        let mission = store::load_mission(&store)?;
        Ok(Self {
            store,
            config,
            roster,
            mission,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn mission(&self) -> &MissionState {
        &self.mission
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Apply a command and persist the aggregate it changed
    pub fn apply(&mut self, command: Command) -> Result<String> {
        let touches_roster = command.touches_roster();
        let message = self.execute(command)?;
        if touches_roster {
            store::save_roster(&mut self.store, &self.roster)?;
        } else {
            store::save_mission(&mut self.store, &self.mission)?;
        }
        Ok(message)
    }

    fn execute(&mut self, command: Command) -> Result<String> {
        let roster = &mut self.roster;
        let mission = &mut self.mission;

        let message = match command {
            Command::Recruit => {
                let id = roster.create();
                format!("Recruited {}", id)
            }
            Command::Dismiss { id } => {
                let trooper = roster.delete(&id)?;
                format!("Dismissed {} ({})", trooper.name, id)
            }
            Command::Update { id, field, value } => {
                roster.update_field(&id, &field, &value)?;
                format!("{}: {} = {}", id, field, value)
            }
            Command::SetGrit { id, value } => {
                let grit = roster.set_grit(&id, value)?;
                format!("{}: grit {}", id, grit)
            }
            Command::SetAmmo { id, value } => {
                let ammo = roster.set_ammo(&id, value)?;
                format!("{}: ammo {}", id, ammo)
            }
            Command::SetCounter { id, counter, value } => {
                let pips = roster.set_counter(&id, &counter, value)?;
                format!("{}: {} {}", id, counter, pips)
            }
            Command::Equip { id, slot, item } => {
                let outcome = roster.swap_gear(&id, slot, item.as_deref())?;
                match (outcome.removed, outcome.equipped) {
                    (None, None) => format!("{}: {} slot unchanged", id, slot),
                    (Some(old), None) => format!("{}: unequipped {}", id, old),
                    (None, Some(new)) => format!("{}: equipped {}", id, new),
                    (Some(old), Some(new)) => format!("{}: swapped {} for {}", id, old, new),
                }
            }
            Command::Unequip { id, item } => {
                if roster.remove_gear(&id, &item)? {
                    format!("{}: removed {}", id, item)
                } else {
                    format!("{}: {} was not equipped", id, item)
                }
            }
            Command::ToggleDeployment { id } => {
                if roster.toggle_deployment(&id)? {
                    format!("{}: deployed", id)
                } else {
                    format!("{}: returned to reserve", id)
                }
            }
            Command::OffensivePosition { id, position } => {
                let next = roster.toggle_offensive_position(&id, position, mission)?;
                format!("{}: offensive position {}", id, next)
            }
            Command::DefensivePosition { id, position } => {
                let next = roster.toggle_defensive_position(&id, position, mission)?;
                format!("{}: defensive position {}", id, next)
            }
            Command::StartMission { threat_level } => {
                mission.start(threat_level.unwrap_or(self.config.default_threat_level));
                report::mission_summary(mission)
            }
            Command::EndMission => {
                mission.end();
                "Mission ended".to_string()
            }
            Command::SetThreatLevel(tl) => {
                mission.set_threat_level(tl);
                report::mission_summary(mission)
            }
            Command::SetMomentum(m) => {
                mission.set_momentum(m);
                report::momentum_line(mission)
            }
            Command::AdjustMomentum(delta) => {
                mission.adjust_momentum(delta);
                report::momentum_line(mission)
            }
            Command::SetCover(c) => {
                mission.set_cover(c);
                report::environment_line(mission)
            }
            Command::SetSpace(s) => {
                mission.set_space(s);
                report::environment_line(mission)
            }
            Command::SetExchange(n) => {
                mission.set_exchange_count(n);
                format!("Exchange #{}", mission.exchange_count())
            }
            Command::NextExchange => {
                mission.increment_exchange();
                format!("Exchange #{}", mission.exchange_count())
            }
            Command::PreviousExchange => {
                mission.decrement_exchange();
                format!("Exchange #{}", mission.exchange_count())
            }
            Command::ResetExchange => {
                mission.reset_exchange();
                format!("Exchange #{}", mission.exchange_count())
            }
            Command::ToggleHeader => {
                mission.toggle_header_expanded();
                format!("Header expanded: {}", mission.is_header_expanded())
            }
        };

        Ok(message)
    }

    /// Update with a typed value, bypassing text parsing
    pub fn update(&mut self, id: &TrooperId, update: TrooperUpdate) -> Result<()> {
        self.roster.update(id, update)?;
        store::save_roster(&mut self.store, &self.roster)
    }
}
