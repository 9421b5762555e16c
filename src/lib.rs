//! Danger Close - roster and engagement tracker
//!
//! Troopers, their gear and consumable counters, and the mission header
//! (threat level, momentum, environment, exchanges) for the Danger Close
//! skirmish game.

pub mod command;
pub mod core;
pub mod equipment;
pub mod mission;
pub mod roster;
pub mod store;
pub mod trooper;
