//! Plain-text views of the roster and mission

use std::fmt::Write;

use crate::equipment::{equipped_in, EquipmentCatalog, GearSlot};
use crate::mission::{momentum_tone, MissionOutcome, MissionState, MomentumTone};
use crate::trooper::Trooper;

fn pips(current: u32, max: u32) -> String {
    let mut bar = String::new();
    for i in 1..=max {
        bar.push(if i <= current { '#' } else { '.' });
    }
    bar
}

/// One trooper with slots, pip tracks and counters
pub fn trooper_detail(trooper: &Trooper, catalog: &EquipmentCatalog, max_ammo: u32) -> String {
    let mut out = String::new();
    let deployed = if trooper.is_active { "deployed" } else { "reserve" };
    let _ = writeln!(out, "{} [{}] {} ({})", trooper.name, trooper.status, trooper.id, deployed);
    let _ = writeln!(
        out,
        "  grit {} {}/{}   ammo {} {}/{}",
        pips(trooper.grit_current, trooper.grit_max),
        trooper.grit_current,
        trooper.grit_max,
        pips(trooper.ammo_current, max_ammo),
        trooper.ammo_current,
        max_ammo
    );

    for slot in GearSlot::ALL {
        let item = equipped_in(trooper, catalog, slot)
            .map(|item| item.name.as_str())
            .unwrap_or("-");
        let _ = writeln!(out, "  {:<8} {}", slot.name(), item);
    }

    for (counter_id, value) in &trooper.counters {
        if let Some((_, def)) = catalog.counter(counter_id) {
            let _ = writeln!(
                out,
                "  {:<12} {} {}/{}",
                def.name,
                pips(*value, def.max),
                value,
                def.max
            );
        }
    }

    let _ = writeln!(
        out,
        "  offense {}   defense {}",
        trooper.offensive_position, trooper.defensive_position
    );
    if !trooper.notes.is_empty() {
        let _ = writeln!(out, "  notes: {}", trooper.notes);
    }
    out
}

pub fn momentum_line(mission: &MissionState) -> String {
    let tone = match momentum_tone(mission.momentum()) {
        MomentumTone::Danger => " (danger)",
        MomentumTone::Success => " (pressing)",
        MomentumTone::Neutral => "",
    };
    let outcome = match mission.outcome() {
        MissionOutcome::Won => " - MISSION WON",
        MissionOutcome::ForcedRetreat => " - FORCED RETREAT",
        MissionOutcome::Ongoing => "",
    };
    format!(
        "Momentum {:+} / +{}{}{}",
        mission.momentum(),
        mission.victory_threshold(),
        tone,
        outcome
    )
}

pub fn environment_line(mission: &MissionState) -> String {
    let cover = mission.cover();
    let space = mission.space();
    format!(
        "Cover {} (fortified {})  Space {} (flanking {})",
        cover.name(),
        cover.fortified_capacity(),
        space.name(),
        space.flanking_capacity()
    )
}

/// The engagement header
pub fn mission_summary(mission: &MissionState) -> String {
    let mut out = String::new();
    if !mission.is_active() {
        out.push_str("No active mission\n");
    }
    let _ = writeln!(
        out,
        "TL{} {}  Exchange #{}  C{}/S{}",
        mission.threat_level(),
        mission.difficulty_name(),
        mission.exchange_count(),
        mission.cover().level(),
        mission.space().level()
    );
    let _ = writeln!(out, "{}", momentum_line(mission));
    let _ = writeln!(
        out,
        "Enemy Tactics {}  Injury: {}",
        mission.enemy_tactics(),
        mission.injury_info()
    );
    if mission.is_header_expanded() {
        let _ = writeln!(out, "{}", environment_line(mission));
    }
    out
}

/// The catalog grouped by slot
pub fn catalog_listing(catalog: &EquipmentCatalog) -> String {
    let mut out = String::new();
    for slot in GearSlot::ALL {
        let _ = writeln!(out, "[{}]", slot.name());
        for item in catalog.items_for(slot) {
            let _ = write!(out, "  {:<18} {:<20} cost {}", item.id, item.name, item.cost);
            for (counter_id, def) in &item.counters {
                let _ = write!(out, "  {}:{}", counter_id, def.max);
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trooper::{initialize_counters, Gear};

    #[test]
    fn test_trooper_detail_lists_slots_and_counters() {
        let catalog = EquipmentCatalog::standard();
        let gear = Gear::parse("assault_rifle, medium_armor, supply_pack");
        let mut trooper = Trooper::recruit(gear, 3);
        initialize_counters(&mut trooper, &catalog);
        let text = trooper_detail(&trooper, &catalog, 3);
        assert!(text.contains("Medium Armor"));
        assert!(text.contains("Supply Pack"));
        assert!(text.contains("Pack Ammo    ###### 6/6"));
    }

    #[test]
    fn test_momentum_line_flags_outcome() {
        let mut mission = MissionState::new();
        mission.start(2);
        mission.set_momentum(3);
        assert_eq!(momentum_line(&mission), "Momentum +3 / +3 (pressing) - MISSION WON");
        mission.set_momentum(-3);
        assert!(momentum_line(&mission).ends_with("FORCED RETREAT"));
    }

    #[test]
    fn test_catalog_listing_groups_by_slot() {
        let text = catalog_listing(&EquipmentCatalog::standard());
        let armor_at = text.find("[armor]").unwrap();
        let special_at = text.find("[special]").unwrap();
        assert!(armor_at < special_at);
        assert!(text.contains("rocket:1"));
    }
}
