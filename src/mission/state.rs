//! Mission state machine
//!
//! One mission runs at a time. Momentum moves between -3 and +5; reaching the
//! victory threshold (threat level + 1) wins, bottoming out forces a retreat.
//! Every setter clamps instead of rejecting.

use serde::{Deserialize, Serialize};

use crate::mission::constants::*;
use crate::mission::environment::{Cover, Space};
use crate::mission::rules::{difficulty_name, enemy_tactics, injury_info};

/// Where the mission stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    Ongoing,
    Won,
    ForcedRetreat,
}

/// The engagement tracker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MissionRecord")]
pub struct MissionState {
    is_active: bool,
    threat_level: u8,
    victory_threshold: i32,
    momentum: i32,
    cover: Cover,
    space: Space,
    exchange_count: u32,
    is_header_expanded: bool,
}

impl Default for MissionState {
    fn default() -> Self {
        Self {
            is_active: false,
            threat_level: DEFAULT_THREAT_LEVEL,
            victory_threshold: victory_threshold_for(DEFAULT_THREAT_LEVEL),
            momentum: 0,
            cover: Cover::Normal,
            space: Space::Transitional,
            exchange_count: FIRST_EXCHANGE,
            is_header_expanded: false,
        }
    }
}

fn clamp_threat_level(threat_level: i64) -> u8 {
    threat_level.clamp(THREAT_LEVEL_MIN as i64, THREAT_LEVEL_MAX as i64) as u8
}

fn victory_threshold_for(threat_level: u8) -> i32 {
    threat_level as i32 + 1
}

impl MissionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn threat_level(&self) -> u8 {
        self.threat_level
    }

    pub fn victory_threshold(&self) -> i32 {
        self.victory_threshold
    }

    pub fn momentum(&self) -> i32 {
        self.momentum
    }

    pub fn cover(&self) -> Cover {
        self.cover
    }

    pub fn space(&self) -> Space {
        self.space
    }

    pub fn exchange_count(&self) -> u32 {
        self.exchange_count
    }

    pub fn is_header_expanded(&self) -> bool {
        self.is_header_expanded
    }

    // === TRANSITIONS ===

    /// Begin a mission at the given threat level
    ///
    /// Momentum resets; cover, space, exchange count and the header flag
    /// carry over from the previous engagement.
    pub fn start(&mut self, threat_level: u8) {
        self.is_active = true;
        self.momentum = 0;
        self.set_threat_level(threat_level);
        tracing::info!(
            "Mission started at TL{} ({}), victory at +{}",
            self.threat_level,
            self.difficulty_name(),
            self.victory_threshold
        );
    }

    /// End the mission and return every field to its default
    pub fn end(&mut self) {
        tracing::info!(
            "Mission ended at momentum {} after {} exchanges",
            self.momentum,
            self.exchange_count
        );
        *self = Self::default();
    }

    pub fn set_threat_level(&mut self, threat_level: u8) {
        self.threat_level = clamp_threat_level(threat_level as i64);
        self.victory_threshold = victory_threshold_for(self.threat_level);
    }

    pub fn set_momentum(&mut self, momentum: i32) {
        self.momentum = momentum.clamp(MOMENTUM_MIN, MOMENTUM_MAX);
    }

    /// Shift momentum and return the clamped result
    pub fn adjust_momentum(&mut self, delta: i32) -> i32 {
        self.set_momentum(self.momentum.saturating_add(delta));
        self.momentum
    }

    pub fn set_cover(&mut self, cover: i64) {
        self.cover = Cover::from_level(cover);
    }

    pub fn set_space(&mut self, space: i64) {
        self.space = Space::from_level(space);
    }

    pub fn set_exchange_count(&mut self, count: i64) {
        self.exchange_count = count.clamp(FIRST_EXCHANGE as i64, u32::MAX as i64) as u32;
    }

    pub fn increment_exchange(&mut self) {
        self.set_exchange_count(self.exchange_count as i64 + 1);
    }

    /// Step back one exchange, never below the first
    pub fn decrement_exchange(&mut self) {
        self.set_exchange_count(self.exchange_count as i64 - 1);
    }

    pub fn reset_exchange(&mut self) {
        self.exchange_count = FIRST_EXCHANGE;
    }

    pub fn toggle_header_expanded(&mut self) {
        self.is_header_expanded = !self.is_header_expanded;
    }

    // === PREDICATES ===

    pub fn is_mission_won(&self) -> bool {
        self.momentum >= self.victory_threshold
    }

    pub fn is_forced_retreat(&self) -> bool {
        self.momentum <= FORCED_RETREAT_MOMENTUM
    }

    pub fn outcome(&self) -> MissionOutcome {
        if self.is_mission_won() {
            MissionOutcome::Won
        } else if self.is_forced_retreat() {
            MissionOutcome::ForcedRetreat
        } else {
            MissionOutcome::Ongoing
        }
    }

    pub fn difficulty_name(&self) -> &'static str {
        difficulty_name(self.threat_level)
    }

    pub fn injury_info(&self) -> &'static str {
        injury_info(self.threat_level)
    }

    pub fn enemy_tactics(&self) -> String {
        enemy_tactics(self.threat_level)
    }
}

/// Stored shape of the mission; missing fields fall back to defaults and
/// out-of-range values are clamped
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MissionRecord {
    is_active: Option<bool>,
    threat_level: Option<i64>,
    momentum: Option<i64>,
    cover: Option<Cover>,
    space: Option<Space>,
    exchange_count: Option<i64>,
    is_header_expanded: Option<bool>,
}

impl From<MissionRecord> for MissionState {
    fn from(record: MissionRecord) -> Self {
        let defaults = MissionState::default();
        let threat_level = record
            .threat_level
            .map(clamp_threat_level)
            .unwrap_or(defaults.threat_level);

        let mut state = MissionState {
            is_active: record.is_active.unwrap_or(defaults.is_active),
            threat_level,
            victory_threshold: victory_threshold_for(threat_level),
            cover: record.cover.unwrap_or(defaults.cover),
            space: record.space.unwrap_or(defaults.space),
            is_header_expanded: record.is_header_expanded.unwrap_or(defaults.is_header_expanded),
            ..defaults
        };
        let momentum = record.momentum.unwrap_or(0);
        state.set_momentum(momentum.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
        state.set_exchange_count(record.exchange_count.unwrap_or(FIRST_EXCHANGE as i64));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let state = MissionState::new();
        assert!(!state.is_active());
        assert_eq!(state.threat_level(), 2);
        assert_eq!(state.victory_threshold(), 3);
        assert_eq!(state.cover(), Cover::Normal);
        assert_eq!(state.space(), Space::Transitional);
        assert_eq!(state.exchange_count(), 1);
    }

    #[test]
    fn test_routine_mission_won_exactly_at_threshold() {
        let mut state = MissionState::new();
        state.start(2);
        assert_eq!(state.victory_threshold(), 3);
        assert_eq!(state.difficulty_name(), "Routine");

        for expected in 1..=3 {
            assert!(!state.is_mission_won());
            assert_eq!(state.adjust_momentum(1), expected);
        }
        assert!(state.is_mission_won());
        assert_eq!(state.outcome(), MissionOutcome::Won);
    }

    #[test]
    fn test_forced_retreat_clamps() {
        let mut state = MissionState::new();
        state.start(3);
        state.set_momentum(-2);
        assert!(!state.is_forced_retreat());
        assert_eq!(state.adjust_momentum(-1), -3);
        assert!(state.is_forced_retreat());
        assert_eq!(state.adjust_momentum(-5), -3);
        assert_eq!(state.outcome(), MissionOutcome::ForcedRetreat);
    }

    #[test]
    fn test_momentum_upper_clamp() {
        let mut state = MissionState::new();
        state.set_momentum(12);
        assert_eq!(state.momentum(), 5);
    }

    #[test]
    fn test_start_preserves_environment() {
        let mut state = MissionState::new();
        state.set_cover(2);
        state.set_space(0);
        state.increment_exchange();
        state.set_momentum(4);
        state.start(4);
        assert!(state.is_active());
        assert_eq!(state.momentum(), 0);
        assert_eq!(state.victory_threshold(), 5);
        assert_eq!(state.cover(), Cover::Dense);
        assert_eq!(state.space(), Space::Tight);
        assert_eq!(state.exchange_count(), 2);
    }

    #[test]
    fn test_start_clamps_threat_level() {
        let mut state = MissionState::new();
        state.start(9);
        assert_eq!(state.threat_level(), 4);
        assert_eq!(state.difficulty_name(), "Desperate");
        state.set_threat_level(0);
        assert_eq!(state.threat_level(), 1);
        assert_eq!(state.victory_threshold(), 2);
    }

    #[test]
    fn test_end_resets_everything() {
        let mut state = MissionState::new();
        state.start(3);
        state.set_cover(0);
        state.set_exchange_count(6);
        state.toggle_header_expanded();
        state.end();
        assert_eq!(state, MissionState::default());
    }

    #[test]
    fn test_exchange_floor() {
        let mut state = MissionState::new();
        state.decrement_exchange();
        assert_eq!(state.exchange_count(), 1);
        state.set_exchange_count(-4);
        assert_eq!(state.exchange_count(), 1);
        state.increment_exchange();
        state.increment_exchange();
        assert_eq!(state.exchange_count(), 3);
        state.reset_exchange();
        assert_eq!(state.exchange_count(), 1);
    }

    #[test]
    fn test_environment_clamps() {
        let mut state = MissionState::new();
        state.set_cover(-1);
        state.set_space(5);
        assert_eq!(state.cover(), Cover::Exposed);
        assert_eq!(state.space(), Space::Open);
    }

    #[test]
    fn test_partial_record_merges_defaults() {
        let state: MissionState =
            serde_json::from_str(r#"{"isActive":true,"threatLevel":3,"momentum":1}"#).unwrap();
        assert!(state.is_active());
        assert_eq!(state.victory_threshold(), 4);
        assert_eq!(state.cover(), Cover::Normal);
        assert_eq!(state.exchange_count(), 1);
    }

    #[test]
    fn test_record_round_trip() {
        let mut state = MissionState::new();
        state.start(3);
        state.set_momentum(-1);
        state.set_cover(2);
        state.set_exchange_count(4);
        state.toggle_header_expanded();

        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"victoryThreshold\":4"));
        let back: MissionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    proptest! {
        #[test]
        fn momentum_always_in_bounds(deltas in proptest::collection::vec(-10i32..10, 0..30)) {
            let mut state = MissionState::new();
            state.start(2);
            for delta in deltas {
                let m = state.adjust_momentum(delta);
                prop_assert!((MOMENTUM_MIN..=MOMENTUM_MAX).contains(&m));
            }
        }
    }
}
