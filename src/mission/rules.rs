//! Threat level lookups and momentum banding
//!
//! Pure functions of the threat level or momentum. The texts are part of the
//! game rules and must match the printed sheet exactly.

use crate::mission::constants::{MOMENTUM_DANGER_AT, MOMENTUM_SUCCESS_AT};

/// Difficulty label for a threat level
pub fn difficulty_name(threat_level: u8) -> &'static str {
    match threat_level {
        0..=2 => "Routine",
        3 => "Hazardous",
        _ => "Desperate",
    }
}

/// Injury rule for a threat level
pub fn injury_info(threat_level: u8) -> &'static str {
    match threat_level {
        0..=2 => "1 injury",
        3 => "2-in-6 odds of 2 injuries, otherwise 1 injury",
        _ => "3-in-6 odds of 2 injuries, otherwise 1 injury",
    }
}

/// Chance that enemy tactics trigger, e.g. `"2-in-6"`
pub fn enemy_tactics(threat_level: u8) -> String {
    format!("{}-in-6", threat_level)
}

/// How a momentum value reads on the track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumTone {
    Danger,
    Neutral,
    Success,
}

pub fn momentum_tone(momentum: i32) -> MomentumTone {
    if momentum <= MOMENTUM_DANGER_AT {
        MomentumTone::Danger
    } else if momentum >= MOMENTUM_SUCCESS_AT {
        MomentumTone::Success
    } else {
        MomentumTone::Neutral
    }
}
