//! Position capacity checks
//!
//! Advisory only: the roster does not stop a trooper from exceeding the
//! limit, callers consult these checks before changing a position.

use crate::mission::environment::{Capacity, Cover, Space};
use crate::trooper::{DefensivePosition, OffensivePosition, Trooper};

/// Verdict of a capacity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionCheck {
    pub valid: bool,
    pub reason: String,
}

impl PositionCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: String::new(),
        }
    }

    fn denied(reason: String) -> Self {
        Self {
            valid: false,
            reason,
        }
    }
}

/// Deployed troopers currently Fortified
pub fn fortified_count<'a>(troopers: impl IntoIterator<Item = &'a Trooper>) -> usize {
    troopers
        .into_iter()
        .filter(|t| t.is_active && t.defensive_position == DefensivePosition::Fortified)
        .count()
}

/// Deployed troopers currently Flanking
pub fn flanking_count<'a>(troopers: impl IntoIterator<Item = &'a Trooper>) -> usize {
    troopers
        .into_iter()
        .filter(|t| t.is_active && t.offensive_position == OffensivePosition::Flanking)
        .count()
}

/// Can one more trooper become Fortified under this cover?
///
/// Pass the roster without the trooper being changed.
pub fn can_set_fortified<'a>(
    troopers: impl IntoIterator<Item = &'a Trooper>,
    cover: Cover,
) -> PositionCheck {
    let capacity = cover.fortified_capacity();
    match capacity {
        Capacity::None => PositionCheck::denied(format!(
            "Cannot fortify in {} cover. No fortified positions available.",
            cover.name()
        )),
        Capacity::Unlimited => PositionCheck::ok(),
        Capacity::Limited(max) => {
            if capacity.admits(fortified_count(troopers)) {
                PositionCheck::ok()
            } else {
                PositionCheck::denied(format!(
                    "Cannot fortify more troopers. Current cover allows max {} fortified positions.",
                    max
                ))
            }
        }
    }
}

/// Can one more trooper start Flanking in this space?
///
/// Pass the roster without the trooper being changed.
pub fn can_set_flanking<'a>(
    troopers: impl IntoIterator<Item = &'a Trooper>,
    space: Space,
) -> PositionCheck {
    let capacity = space.flanking_capacity();
    match capacity {
        Capacity::None => PositionCheck::denied(format!(
            "Cannot flank in {} space. No flanking positions available.",
            space.name()
        )),
        Capacity::Unlimited => PositionCheck::ok(),
        Capacity::Limited(max) => {
            if capacity.admits(flanking_count(troopers)) {
                PositionCheck::ok()
            } else {
                PositionCheck::denied(format!(
                    "Cannot flank more troopers. Current space allows max {} flanking positions.",
                    max
                ))
            }
        }
    }
}
