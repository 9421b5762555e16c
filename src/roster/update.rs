//! Field updates to a trooper
//!
//! The UI edits one field at a time and hands over the raw input text;
//! `TrooperUpdate::parse` turns that into a typed update.

use crate::core::error::{Result, TrackerError};
use crate::trooper::{DefensivePosition, OffensivePosition, Status, Trooper};

/// A single-field change to a trooper
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrooperUpdate {
    Name(String),
    Status(Status),
    GritMax(u32),
    GritCurrent(u32),
    AmmoCurrent(u32),
    OffensivePosition(OffensivePosition),
    DefensivePosition(DefensivePosition),
    Notes(String),
    Active(bool),
}

fn parse_count(field: &str, value: &str) -> Result<u32> {
    let n: f64 = value
        .trim()
        .parse()
        .map_err(|_| TrackerError::invalid_value(field, value))?;
    if !n.is_finite() {
        return Err(TrackerError::invalid_value(field, value));
    }
    Ok(n.max(0.0) as u32)
}

fn parse_flag(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(TrackerError::invalid_value(field, value)),
    }
}

impl TrooperUpdate {
    /// Parse a field name and raw input text
    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let update = match field {
            "name" => Self::Name(value.to_string()),
            "status" => Self::Status(value.parse()?),
            "gritMax" => Self::GritMax(parse_count(field, value)?),
            "gritCurrent" => Self::GritCurrent(parse_count(field, value)?),
            "ammoCurrent" => Self::AmmoCurrent(parse_count(field, value)?),
            "offensivePosition" => Self::OffensivePosition(value.parse()?),
            "defensivePosition" => Self::DefensivePosition(value.parse()?),
            "notes" => Self::Notes(value.to_string()),
            "isActive" => Self::Active(parse_flag(field, value)?),
            _ => return Err(TrackerError::InvalidField(field.to_string())),
        };
        Ok(update)
    }

    /// Apply to a trooper, clamping pip tracks into their bounds
    pub(crate) fn apply(self, trooper: &mut Trooper, max_ammo: u32) {
        match self {
            Self::Name(name) => trooper.name = name,
            Self::Status(status) => trooper.status = status,
            Self::GritMax(max) => {
                trooper.grit_max = max.max(1);
                trooper.grit_current = trooper.grit_current.min(trooper.grit_max);
            }
            Self::GritCurrent(grit) => trooper.grit_current = grit.min(trooper.grit_max),
            Self::AmmoCurrent(ammo) => trooper.ammo_current = ammo.min(max_ammo),
            Self::OffensivePosition(pos) => trooper.offensive_position = pos,
            Self::DefensivePosition(pos) => trooper.defensive_position = pos,
            Self::Notes(notes) => trooper.notes = notes,
            Self::Active(active) => trooper.is_active = active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trooper::Gear;

    #[test]
    fn test_parse_fields() {
        assert_eq!(TrooperUpdate::parse("gritMax", "3").unwrap(), TrooperUpdate::GritMax(3));
        assert_eq!(TrooperUpdate::parse("gritMax", "2.0").unwrap(), TrooperUpdate::GritMax(2));
        assert_eq!(
            TrooperUpdate::parse("status", "Bleeding Out").unwrap(),
            TrooperUpdate::Status(Status::BleedingOut)
        );
        assert_eq!(TrooperUpdate::parse("isActive", "no").unwrap(), TrooperUpdate::Active(false));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            TrooperUpdate::parse("shoeSize", "9"),
            Err(TrackerError::InvalidField(_))
        ));
        assert!(matches!(
            TrooperUpdate::parse("gritMax", "lots"),
            Err(TrackerError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_grit_max_pulls_current_down() {
        let mut trooper = Trooper::recruit(Gear::default(), 3);
        TrooperUpdate::GritMax(3).apply(&mut trooper, 3);
        TrooperUpdate::GritCurrent(3).apply(&mut trooper, 3);
        assert_eq!(trooper.grit_current, 3);

        TrooperUpdate::GritMax(1).apply(&mut trooper, 3);
        assert_eq!(trooper.grit_max, 1);
        assert_eq!(trooper.grit_current, 1);

        TrooperUpdate::GritMax(0).apply(&mut trooper, 3);
        assert_eq!(trooper.grit_max, 1);
    }

    #[test]
    fn test_ammo_clamped() {
        let mut trooper = Trooper::recruit(Gear::default(), 3);
        TrooperUpdate::AmmoCurrent(9).apply(&mut trooper, 3);
        assert_eq!(trooper.ammo_current, 3);
    }
}
