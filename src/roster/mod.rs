//! Roster repository and field updates

pub mod repository;
pub mod update;

pub use repository::Roster;
pub use update::TrooperUpdate;
