//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog key of an equipment item (e.g. `rocket_launcher`)
pub type ItemId = String;

/// Unique identifier for troopers
///
/// Stored as a string so records written by older versions
/// (`trooper-<timestamp>`) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrooperId(pub String);

impl TrooperId {
    pub fn new() -> Self {
        Self(format!("trooper-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TrooperId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrooperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrooperId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TrooperId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Normalize a raw gear key the way hand-typed gear lists were entered
pub fn normalize_item_id(raw: &str) -> Option<ItemId> {
    let id = raw.trim().to_lowercase();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
