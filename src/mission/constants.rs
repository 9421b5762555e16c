//! Mission rule constants - the numbers printed on the engagement sheet

// Momentum track
pub const MOMENTUM_MIN: i32 = -3;
pub const MOMENTUM_MAX: i32 = 5;
pub const FORCED_RETREAT_MOMENTUM: i32 = -3;

// Momentum tone bands (display)
pub const MOMENTUM_DANGER_AT: i32 = -2;
pub const MOMENTUM_SUCCESS_AT: i32 = 3;

// Threat level dial
pub const THREAT_LEVEL_MIN: u8 = 1;
pub const THREAT_LEVEL_MAX: u8 = 4;
pub const DEFAULT_THREAT_LEVEL: u8 = 2;

// Exchanges are numbered from 1
pub const FIRST_EXCHANGE: u32 = 1;

// Fortified/Flanking slots at the middle environment rating
pub const LIMITED_POSITION_SLOTS: usize = 2;
