//! Caller-facing command pipeline
//!
//! Command -> Session::apply -> Roster / MissionState -> KeyValueStore

pub mod report;
pub mod session;

pub use session::{load_catalog, Command, Session};
