//! Troopers and their pip tracks

pub mod counters;
pub mod model;

pub use counters::{
    initialize_counters, remove_counter_fields, set_ammo, set_counter, set_grit, toggle_set,
};
pub use model::{
    DefensivePosition, Gear, OffensivePosition, PositionTone, Status, Trooper, TrooperRecord,
};
