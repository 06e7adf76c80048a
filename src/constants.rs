//! Constants for the Boltwood II / SkyAlert one-line data file
//!
//! Column positions, timestamp layout and the numeric codes the sensor
//! writes into its flag and condition columns.

use std::ops::Range;

// =============================================================================
// Line Geometry
// =============================================================================

/// Shortest line that still covers every column through the alert flag
pub const MIN_RECORD_LEN: usize = 104;

/// Local date column, `YYYY-MM-DD`
pub const DATE_RANGE: Range<usize> = 0..10;

/// Local time column, `HH:MM:SS.ss` on a 24 hour clock
pub const TIME_RANGE: Range<usize> = 11..22;

// =============================================================================
// Timestamp Layout
// =============================================================================

/// chrono format applied to the joined date and time columns
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Shape the joined timestamp must have before chrono sees it.
/// `d` stands for any ASCII digit, every other byte must match literally.
pub const TIMESTAMP_SHAPE: &[u8; 22] = b"dddd-dd-dd dd:dd:dd.dd";

// =============================================================================
// Flag and Condition Codes
// =============================================================================

/// Rain and wet flag values (columns R and W)
pub mod wet_flags {
    /// Dry
    pub const DRY: i32 = 0;

    /// Rain or wetness seen within the last minute
    pub const LAST_MINUTE: i32 = 1;

    /// Raining or wet right now
    pub const NOW: i32 = 2;
}

/// Numerals shared by the cloud, wind, rain and darkness condition columns.
/// Each axis names the three middle levels differently.
pub mod condition_codes {
    pub const UNKNOWN: i32 = 0;
    pub const LEVEL_1: i32 = 1;
    pub const LEVEL_2: i32 = 2;
    pub const LEVEL_3: i32 = 3;
    pub const DISABLED: i32 = 4;
}

/// Alert column values
pub mod alert_codes {
    pub const NO_ALERT: i32 = 0;
    pub const ALERT: i32 = 1;
}

/// Roof close column values
pub mod roof_codes {
    pub const NOT_REQUESTED: i32 = 0;
    pub const CLOSE_REQUESTED: i32 = 1;
}

/// Human readable meaning of a rain or wet flag
pub fn wet_flag_description(flag: i32) -> &'static str {
    match flag {
        wet_flags::DRY => "dry",
        wet_flags::LAST_MINUTE => "within the last minute",
        wet_flags::NOW => "now",
        _ => "unrecognized",
    }
}
