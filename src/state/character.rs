//! Characters and save slots
//!
//! A character groups the save slots found in one directory under the saves
//! root. Slots hold the metadata the save/load screen displays plus the JPEG
//! screenshot embedded in the slot file. Everything here is plain data; disk
//! I/O lives in the manager.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Identifying header shared by every save of one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub player_name: String,
    pub player_level: u32,
    pub player_class: String,
}

/// A point on the in-game calendar clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameTime {
    /// Day of the month, 1-based.
    pub day: u32,
    /// Month index, 0-based (see `world::Calendar`).
    pub month: u32,
    /// Hour of day, 0.0..24.0; fractional part is minutes.
    pub hour: f32,
}

/// Save metadata shown on the load screen.
#[derive(Debug, Clone)]
pub struct SlotProfile {
    pub description: String,
    pub player_level: u32,
    pub cell_name: String,
    pub in_game: GameTime,
    /// JPEG-encoded screenshot taken when the save was written.
    pub screenshot: Vec<u8>,
}

/// One save on disk.
#[derive(Debug, Clone)]
pub struct Slot {
    pub path: PathBuf,
    /// Real-world time the save was written.
    pub timestamp: DateTime<Local>,
    pub profile: SlotProfile,
}

/// A character and its saves, newest first.
#[derive(Debug, Clone)]
pub struct Character {
    signature: Signature,
    folder: PathBuf,
    slots: Vec<Slot>,
}

impl Character {
    pub fn new(signature: Signature, folder: PathBuf, slots: Vec<Slot>) -> Self {
        Character { signature, folder, slots }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[allow(dead_code)] // Reserved for save-management UI (delete/export)
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Final component of the character's save directory.
    pub fn folder_name(&self) -> &str {
        self.folder
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
    }

    /// Slots in display order (newest first). Iteration order is the
    /// contract the save/load screen's index resolution relies on.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    pub fn has_slots(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Resolves a 0-based list position against the slot sequence by linear
    /// scan, mirroring the order `slots()` yields.
    pub fn slot_at(&self, pos: usize) -> Option<&Slot> {
        self.slots().enumerate().find(|(i, _)| *i == pos).map(|(_, s)| s)
    }
}
