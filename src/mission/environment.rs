//! Engagement environment ratings
//!
//! Cover limits how many troopers can be Fortified, Space limits how many
//! can be Flanking. Both are stored as integers 0..=2.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mission::constants::LIMITED_POSITION_SLOTS;

/// How many troopers may hold a constrained position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capacity {
    None,
    Limited(usize),
    Unlimited,
}

impl Capacity {
    /// Whether one more trooper fits when `occupied` already hold the position
    pub fn admits(&self, occupied: usize) -> bool {
        match self {
            Self::None => false,
            Self::Limited(max) => occupied < *max,
            Self::Unlimited => true,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "0"),
            Self::Limited(max) => write!(f, "{}", max),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

fn clamp_level(level: i64) -> u8 {
    level.clamp(0, 2) as u8
}

/// Cover rating of the engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", from = "i64")]
pub enum Cover {
    Exposed,
    #[default]
    Normal,
    Dense,
}

impl Cover {
    pub const ALL: [Cover; 3] = [Cover::Exposed, Cover::Normal, Cover::Dense];

    /// Rating for a level, clamped into 0..=2
    pub fn from_level(level: i64) -> Self {
        match clamp_level(level) {
            0 => Self::Exposed,
            1 => Self::Normal,
            _ => Self::Dense,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Exposed => "Exposed",
            Self::Normal => "Normal",
            Self::Dense => "Dense",
        }
    }

    /// Fortified positions this cover offers
    pub fn fortified_capacity(&self) -> Capacity {
        match self {
            Self::Exposed => Capacity::None,
            Self::Normal => Capacity::Limited(LIMITED_POSITION_SLOTS),
            Self::Dense => Capacity::Unlimited,
        }
    }
}

impl From<i64> for Cover {
    fn from(level: i64) -> Self {
        Self::from_level(level)
    }
}

impl From<Cover> for u8 {
    fn from(cover: Cover) -> Self {
        cover.level()
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Space rating of the engagement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", from = "i64")]
pub enum Space {
    Tight,
    #[default]
    Transitional,
    Open,
}

impl Space {
    pub const ALL: [Space; 3] = [Space::Tight, Space::Transitional, Space::Open];

    /// Rating for a level, clamped into 0..=2
    pub fn from_level(level: i64) -> Self {
        match clamp_level(level) {
            0 => Self::Tight,
            1 => Self::Transitional,
            _ => Self::Open,
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Tight => "Tight",
            Self::Transitional => "Transitional",
            Self::Open => "Open",
        }
    }

    /// Flanking positions this space offers
    pub fn flanking_capacity(&self) -> Capacity {
        match self {
            Self::Tight => Capacity::None,
            Self::Transitional => Capacity::Limited(LIMITED_POSITION_SLOTS),
            Self::Open => Capacity::Unlimited,
        }
    }
}

impl From<i64> for Space {
    fn from(level: i64) -> Self {
        Self::from_level(level)
    }
}

impl From<Space> for u8 {
    fn from(space: Space) -> Self {
        space.level()
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_clamp() {
        assert_eq!(Cover::from_level(-4), Cover::Exposed);
        assert_eq!(Cover::from_level(9), Cover::Dense);
        assert_eq!(Space::from_level(1), Space::Transitional);
    }

    #[test]
    fn test_capacities() {
        assert_eq!(Cover::Exposed.fortified_capacity(), Capacity::None);
        assert_eq!(Cover::Normal.fortified_capacity(), Capacity::Limited(2));
        assert_eq!(Space::Open.flanking_capacity(), Capacity::Unlimited);
    }

    #[test]
    fn test_capacity_admits() {
        assert!(!Capacity::None.admits(0));
        assert!(Capacity::Limited(2).admits(1));
        assert!(!Capacity::Limited(2).admits(2));
        assert!(Capacity::Unlimited.admits(1000));
    }

    #[test]
    fn test_serialized_as_integer() {
        assert_eq!(serde_json::to_string(&Cover::Dense).unwrap(), "2");
        let space: Space = serde_json::from_str("0").unwrap();
        assert_eq!(space, Space::Tight);
        let cover: Cover = serde_json::from_str("7").unwrap();
        assert_eq!(cover, Cover::Dense);
    }
}
