//! State manager
//!
//! Owns the character/slot collection scanned from the saves root and the
//! running session, and executes save/load requests coming from the UI.
//! Slot files are JSON, one file per save, grouped in one directory per
//! character. The screenshot travels inside the slot file as base64 so a
//! save is always a single self-contained file.

use super::character::{Character, GameTime, Signature, Slot, SlotProfile};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current slot file version.
pub const SLOT_FILE_VERSION: u32 = 1;

/// Overall game state as far as the UI is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session running; the main menu is the only sensible screen.
    NoGame,
    /// A character is loaded and playing.
    Running,
}

/// The running play session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Folder name of the character this session saves into.
    pub character: String,
    pub player: Signature,
    pub cell_name: String,
    pub clock: GameTime,
}

/// Errors from save/load and the disk scan.
#[derive(Debug)]
pub enum StateError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    UnsupportedVersion(u32),
    BadTimestamp(chrono::ParseError),
    BadScreenshot(base64::DecodeError),
    NoSession,
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::Io(e) => write!(f, "IO error: {}", e),
            StateError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StateError::UnsupportedVersion(v) => write!(f, "Unsupported slot file version: {}", v),
            StateError::BadTimestamp(e) => write!(f, "Bad slot timestamp: {}", e),
            StateError::BadScreenshot(e) => write!(f, "Bad slot screenshot data: {}", e),
            StateError::NoSession => write!(f, "No running session to save"),
        }
    }
}

impl std::error::Error for StateError {}

impl From<std::io::Error> for StateError {
    fn from(err: std::io::Error) -> Self {
        StateError::Io(err)
    }
}

impl From<serde_json::Error> for StateError {
    fn from(err: serde_json::Error) -> Self {
        StateError::Serialization(err)
    }
}

impl From<chrono::ParseError> for StateError {
    fn from(err: chrono::ParseError) -> Self {
        StateError::BadTimestamp(err)
    }
}

impl From<base64::DecodeError> for StateError {
    fn from(err: base64::DecodeError) -> Self {
        StateError::BadScreenshot(err)
    }
}

/// On-disk slot file layout.
#[derive(Debug, Serialize, Deserialize)]
struct SlotFile {
    version: u32,
    /// RFC 3339 wall-clock time the save was written.
    timestamp: String,
    description: String,
    player_name: String,
    player_level: u32,
    player_class: String,
    cell_name: String,
    day: u32,
    month: u32,
    hour: f32,
    /// Base64 JPEG.
    screenshot: String,
}

pub struct StateManager {
    saves_root: PathBuf,
    characters: Vec<Character>,
    session: Option<Session>,
}

impl StateManager {
    /// Creates a manager rooted at `saves_root`, creating the directory if
    /// needed and scanning it for existing characters.
    pub fn new(saves_root: impl AsRef<Path>) -> Result<Self, StateError> {
        let saves_root = saves_root.as_ref().to_path_buf();
        if !saves_root.exists() {
            fs::create_dir_all(&saves_root)?;
        }

        let mut mgr = StateManager {
            saves_root,
            characters: Vec::new(),
            session: None,
        };
        mgr.scan()?;
        Ok(mgr)
    }

    /// Characters in stable folder-name order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub fn character_by_folder(&self, folder_name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.folder_name() == folder_name)
    }

    /// The character bound to the running session, if any.
    pub fn current_character(&self) -> Option<&Character> {
        let session = self.session.as_ref()?;
        self.character_by_folder(&session.character)
    }

    pub fn state(&self) -> SessionState {
        if self.session.is_some() {
            SessionState::Running
        } else {
            SessionState::NoGame
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Starts a fresh session for `player` in `cell_name`.
    pub fn start_session(&mut self, player: Signature, cell_name: String, clock: GameTime) {
        let character = sanitize_folder_name(&player.player_name);
        log::info!("starting session for {} ({})", player.player_name, character);
        self.session = Some(Session {
            character,
            player,
            cell_name,
            clock,
        });
    }

    /// Ends the running session, returning the game to `NoGame`.
    pub fn end_session(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!("ending session for {}", session.player.player_name);
        }
    }

    /// Writes a save for the running session.
    ///
    /// `slot` names an existing slot file to overwrite; `None` creates a new
    /// one. An empty `description` falls back to a wall-clock timestamp.
    pub fn save_game(
        &mut self,
        description: &str,
        slot: Option<&Path>,
        screenshot_jpeg: &[u8],
    ) -> Result<(), StateError> {
        let session = self.session.as_ref().ok_or(StateError::NoSession)?;

        let folder = self.saves_root.join(&session.character);
        if !folder.exists() {
            fs::create_dir_all(&folder)?;
        }

        let now = Local::now();
        let description = if description.trim().is_empty() {
            now.format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            description.to_string()
        };

        let path = match slot {
            Some(existing) => existing.to_path_buf(),
            None => new_slot_path(&folder, now),
        };

        let file = SlotFile {
            version: SLOT_FILE_VERSION,
            timestamp: now.to_rfc3339(),
            description,
            player_name: session.player.player_name.clone(),
            player_level: session.player.player_level,
            player_class: session.player.player_class.clone(),
            cell_name: session.cell_name.clone(),
            day: session.clock.day,
            month: session.clock.month,
            hour: session.clock.hour,
            screenshot: BASE64.encode(screenshot_jpeg),
        };

        fs::write(&path, serde_json::to_string_pretty(&file)?)?;
        log::info!("saved game to {}", path.display());

        let character = session.character.clone();
        self.rescan_character(&character)?;
        Ok(())
    }

    /// Loads the slot at `slot_path` and installs it as the running session.
    pub fn load_game(&mut self, character_folder: &str, slot_path: &Path) -> Result<(), StateError> {
        let slot = read_slot_file(slot_path)?;

        log::info!(
            "loading {} from {}",
            slot.file.description,
            slot_path.display()
        );

        self.session = Some(Session {
            character: character_folder.to_string(),
            player: Signature {
                player_name: slot.file.player_name,
                player_level: slot.file.player_level,
                player_class: slot.file.player_class,
            },
            cell_name: slot.file.cell_name,
            clock: GameTime {
                day: slot.file.day,
                month: slot.file.month,
                hour: slot.file.hour,
            },
        });
        Ok(())
    }

    /// Rebuilds the character list from the saves root.
    pub fn scan(&mut self) -> Result<(), StateError> {
        let mut characters = Vec::new();

        for entry in fs::read_dir(&self.saves_root)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                characters.push(scan_character_folder(&path)?);
            }
        }

        sort_characters(&mut characters);
        self.characters = characters;
        Ok(())
    }

    /// Re-reads a single character folder after a save touched it.
    fn rescan_character(&mut self, folder_name: &str) -> Result<(), StateError> {
        let folder = self.saves_root.join(folder_name);
        let character = scan_character_folder(&folder)?;
        self.characters.retain(|c| c.folder_name() != folder_name);
        self.characters.push(character);
        sort_characters(&mut self.characters);
        Ok(())
    }

    /// Test-only constructor with a prebuilt character list.
    #[cfg(test)]
    pub(crate) fn for_tests(
        saves_root: PathBuf,
        characters: Vec<Character>,
        session: Option<Session>,
    ) -> Self {
        StateManager {
            saves_root,
            characters,
            session,
        }
    }
}

fn sort_characters(characters: &mut [Character]) {
    characters.sort_by(|a, b| {
        a.folder_name()
            .to_lowercase()
            .cmp(&b.folder_name().to_lowercase())
    });
}

/// Builds a `Character` from one save directory. Unreadable slot files are
/// logged and skipped so one corrupt save cannot hide the rest.
fn scan_character_folder(folder: &Path) -> Result<Character, StateError> {
    let mut slots = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_slot_file(&path) {
            Ok(read) => slots.push(read.into_slot(path)),
            Err(e) => {
                log::warn!("skipping unreadable slot file {}: {}", path.display(), e);
            }
        }
    }

    // Newest first; display order on the load screen.
    slots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let signature = match slots.first() {
        Some(newest) => Signature {
            player_name: newest.player_name.clone(),
            player_level: newest.profile.player_level,
            player_class: newest.player_class.clone(),
        },
        None => Signature {
            player_name: folder
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string(),
            player_level: 1,
            player_class: String::new(),
        },
    };

    let slots = slots.into_iter().map(ScannedSlot::into_character_slot).collect();
    Ok(Character::new(signature, folder.to_path_buf(), slots))
}

/// Slot plus the per-character header fields the profile does not keep.
struct ScannedSlot {
    path: PathBuf,
    timestamp: DateTime<Local>,
    player_name: String,
    player_class: String,
    profile: SlotProfile,
}

impl ScannedSlot {
    fn into_character_slot(self) -> Slot {
        Slot {
            path: self.path,
            timestamp: self.timestamp,
            profile: self.profile,
        }
    }
}

struct ReadSlot {
    file: SlotFile,
    timestamp: DateTime<Local>,
    screenshot: Vec<u8>,
}

impl ReadSlot {
    fn into_slot(self, path: PathBuf) -> ScannedSlot {
        ScannedSlot {
            path,
            timestamp: self.timestamp,
            player_name: self.file.player_name,
            player_class: self.file.player_class,
            profile: SlotProfile {
                description: self.file.description,
                player_level: self.file.player_level,
                cell_name: self.file.cell_name,
                in_game: GameTime {
                    day: self.file.day,
                    month: self.file.month,
                    hour: self.file.hour,
                },
                screenshot: self.screenshot,
            },
        }
    }
}

fn read_slot_file(path: &Path) -> Result<ReadSlot, StateError> {
    let json = fs::read_to_string(path)?;
    let file: SlotFile = serde_json::from_str(&json)?;

    if file.version > SLOT_FILE_VERSION {
        return Err(StateError::UnsupportedVersion(file.version));
    }

    let timestamp = DateTime::parse_from_rfc3339(&file.timestamp)?.with_timezone(&Local);
    let screenshot = BASE64.decode(&file.screenshot)?;

    Ok(ReadSlot {
        file,
        timestamp,
        screenshot,
    })
}

/// Picks a fresh slot file name; bumps a counter on collision so two saves
/// in the same second do not overwrite each other.
fn new_slot_path(folder: &Path, now: DateTime<Local>) -> PathBuf {
    let base = now.format("save-%Y%m%d-%H%M%S").to_string();
    let mut candidate = folder.join(format!("{}.json", base));
    let mut n = 1;
    while candidate.exists() {
        candidate = folder.join(format!("{}-{}.json", base, n));
        n += 1;
    }
    candidate
}

/// Lowercases the player name into a directory-safe folder name.
fn sanitize_folder_name(player_name: &str) -> String {
    let cleaned: String = player_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let trimmed = cleaned.trim_matches('-');
    if trimmed.is_empty() {
        "player".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "emberwood-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        root
    }

    fn test_session() -> (Signature, String, GameTime) {
        (
            Signature {
                player_name: "Mira".to_string(),
                player_level: 7,
                player_class: "Warden".to_string(),
            },
            "Emberwood Gate".to_string(),
            GameTime { day: 12, month: 4, hour: 16.5 },
        )
    }

    #[test]
    fn test_save_then_scan_round_trip() {
        let root = temp_root("roundtrip");
        let mut mgr = StateManager::new(&root).unwrap();
        let (player, cell, clock) = test_session();
        mgr.start_session(player, cell, clock);

        mgr.save_game("before the gate", None, b"\xff\xd8fake-jpeg").unwrap();

        let character = mgr.current_character().expect("character after save");
        assert_eq!(character.folder_name(), "mira");
        assert_eq!(character.signature().player_name, "Mira");
        assert_eq!(character.signature().player_level, 7);

        let slot = character.slot_at(0).unwrap();
        assert_eq!(slot.profile.description, "before the gate");
        assert_eq!(slot.profile.cell_name, "Emberwood Gate");
        assert_eq!(slot.profile.in_game.day, 12);
        assert_eq!(slot.profile.in_game.month, 4);
        assert_eq!(slot.profile.screenshot, b"\xff\xd8fake-jpeg");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_empty_description_defaults_to_timestamp() {
        let root = temp_root("defaultdesc");
        let mut mgr = StateManager::new(&root).unwrap();
        let (player, cell, clock) = test_session();
        mgr.start_session(player, cell, clock);

        mgr.save_game("   ", None, b"jpg").unwrap();

        let slot_desc = &mgr
            .current_character()
            .unwrap()
            .slot_at(0)
            .unwrap()
            .profile
            .description;
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(slot_desc.len(), 19);
        assert_eq!(&slot_desc[4..5], "-");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_overwrite_existing_slot_keeps_one_file() {
        let root = temp_root("overwrite");
        let mut mgr = StateManager::new(&root).unwrap();
        let (player, cell, clock) = test_session();
        mgr.start_session(player, cell, clock);

        mgr.save_game("first", None, b"jpg").unwrap();
        let path = mgr.current_character().unwrap().slot_at(0).unwrap().path.clone();

        mgr.save_game("second", Some(&path), b"jpg").unwrap();

        let character = mgr.current_character().unwrap();
        assert_eq!(character.slots().count(), 1);
        assert_eq!(character.slot_at(0).unwrap().profile.description, "second");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_unreadable_slot_files_are_skipped() {
        let root = temp_root("corrupt");
        let folder = root.join("mira");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("broken.json"), "{ not json").unwrap();

        let mgr = StateManager::new(&root).unwrap();
        let character = mgr.character_by_folder("mira").unwrap();
        assert!(!character.has_slots());

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_newer_slot_file_version_is_rejected() {
        let root = temp_root("version");
        let folder = root.join("mira");
        fs::create_dir_all(&folder).unwrap();
        let json = format!(
            r#"{{"version": {}, "timestamp": "2026-08-26T10:00:00+00:00",
                 "description": "future", "player_name": "Mira",
                 "player_level": 1, "player_class": "Warden",
                 "cell_name": "Gate", "day": 1, "month": 0, "hour": 0.0,
                 "screenshot": ""}}"#,
            SLOT_FILE_VERSION + 1
        );
        let path = folder.join("future.json");
        fs::write(&path, json).unwrap();

        match read_slot_file(&path) {
            Err(StateError::UnsupportedVersion(v)) => assert_eq!(v, SLOT_FILE_VERSION + 1),
            other => panic!("expected version error, got {:?}", other.map(|_| ())),
        }

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_load_game_installs_session() {
        let root = temp_root("load");
        let mut mgr = StateManager::new(&root).unwrap();
        let (player, cell, clock) = test_session();
        mgr.start_session(player, cell, clock);
        mgr.save_game("checkpoint", None, b"jpg").unwrap();
        let path = mgr.current_character().unwrap().slot_at(0).unwrap().path.clone();

        mgr.end_session();
        assert_eq!(mgr.state(), SessionState::NoGame);

        mgr.load_game("mira", &path).unwrap();
        assert_eq!(mgr.state(), SessionState::Running);
        let session = mgr.session().unwrap();
        assert_eq!(session.player.player_name, "Mira");
        assert_eq!(session.cell_name, "Emberwood Gate");
        assert_eq!(session.clock.day, 12);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_characters_sorted_by_folder_name() {
        let root = temp_root("sort");
        for name in ["zed", "Anna", "mira"] {
            fs::create_dir_all(root.join(name)).unwrap();
        }

        let mgr = StateManager::new(&root).unwrap();
        let names: Vec<_> = mgr.characters().map(|c| c.folder_name().to_string()).collect();
        assert_eq!(names, vec!["Anna", "mira", "zed"]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_sanitize_folder_name() {
        assert_eq!(sanitize_folder_name("Mira of the Vale"), "mira-of-the-vale");
        assert_eq!(sanitize_folder_name("!!!"), "player");
    }
}
