//! Mission tracking: momentum, threat level and the engagement environment

pub mod capacity;
pub mod constants;
pub mod environment;
pub mod rules;
pub mod state;

pub use capacity::{can_set_flanking, can_set_fortified, PositionCheck};
pub use environment::{Capacity, Cover, Space};
pub use rules::{difficulty_name, enemy_tactics, injury_info, momentum_tone, MomentumTone};
pub use state::{MissionOutcome, MissionState};
