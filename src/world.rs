//! World calendar
//!
//! The in-game calendar the save metadata refers to. Save slots record a day
//! number and a 0-based month index; the save/load screen asks this module
//! for the month's display name.

/// Number of months in the Emberwood year.
pub const MONTHS_PER_YEAR: usize = 12;

const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Frostwane",
    "Thawmarch",
    "Seedfall",
    "Rainveil",
    "Brightsun",
    "Highsummer",
    "Emberturn",
    "Harvestide",
    "Goldleaf",
    "Mistmoor",
    "Dimming",
    "Deepwinter",
];

/// Calendar lookups for the game world.
pub struct Calendar;

impl Calendar {
    /// Display name for a 0-based month index.
    ///
    /// Save slots are written by this game, so an out-of-range index means a
    /// corrupted profile slipped past the loader; fail fast.
    pub fn month_name(&self, month: u32) -> &'static str {
        MONTH_NAMES
            .get(month as usize)
            .copied()
            .unwrap_or_else(|| panic!("month index {} out of range", month))
    }
}
