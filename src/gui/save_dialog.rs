//! Save/Load Screen
//!
//! Modal dialog for picking a character, browsing that character's saves,
//! and dispatching the actual save or load to the state manager. The dialog
//! only holds transient selection state; characters and slots stay owned by
//! the manager and are re-resolved by key on every use, so a rescan can
//! never leave this screen pointing at freed data.
//!
//! List positions are resolved to characters/slots by a 0-based linear scan
//! in the collaborator's iteration order. That mirrors how the lists were
//! populated; a failed lookup is a population/selection bug, not a runtime
//! condition, and panics.

use super::screenshot::ScreenshotCache;
use super::widgets::{ListBox, TextInput, WidgetStyle};
use crate::l10n::Localization;
use crate::modes::{UiMode, WindowManager};
use crate::settings::Settings;
use crate::state::{Character, SessionState, Signature, Slot, StateError, StateManager};
use crate::text::{draw_text, draw_text_lines, text_width};
use crate::world::Calendar;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

const DIALOG_WIDTH: u32 = 520;
const DIALOG_HEIGHT: u32 = 300;
const LIST_WIDTH: u32 = 230;
const THUMBNAIL_WIDTH: u32 = 240;
const THUMBNAIL_HEIGHT: u32 = 120;
const SAVE_NAME_MAX_LEN: usize = 28;

/// The two operating modes of the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Saving,
    Loading,
}

/// What the thumbnail slot should do on the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingThumbnail {
    /// No selection change since last frame.
    Keep,
    /// Selection cleared; hide the thumbnail.
    Clear,
    /// New selection; decode and show these JPEG bytes.
    Show(Vec<u8>),
}

pub struct SaveGameDialog {
    mode: DialogMode,
    /// Folder name of the character the slot list shows. A key, not a
    /// reference: re-resolved against the state manager on every use.
    current_character: Option<String>,
    character_list: ListBox,
    slot_list: ListBox,
    name_edit: TextInput,
    info_text: String,
    pending: PendingThumbnail,
    name_edit_visible: bool,
    character_select_visible: bool,
    spacer_visible: bool,
    style: WidgetStyle,
}

impl SaveGameDialog {
    pub fn new() -> Self {
        SaveGameDialog {
            mode: DialogMode::Saving,
            current_character: None,
            character_list: ListBox::new(),
            slot_list: ListBox::new(),
            name_edit: TextInput::new(SAVE_NAME_MAX_LEN),
            info_text: String::new(),
            pending: PendingThumbnail::Keep,
            name_edit_visible: true,
            character_select_visible: false,
            spacer_visible: false,
            style: WidgetStyle::default(),
        }
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    /// Opens the dialog: resets the name input and rebuilds both lists.
    ///
    /// With no characters on disk the lists stay empty and nothing is
    /// preselected. Otherwise the active character wins; failing that, in
    /// load mode, the character whose folder name matches the configured
    /// save directory (case-insensitive) is preselected.
    pub fn open(&mut self, mgr: &StateManager, settings: &Settings) {
        self.name_edit.clear();
        self.character_list.clear();
        self.slot_list.clear();
        self.clear_slot_display();
        self.current_character = None;

        if mgr.characters().next().is_none() {
            return;
        }

        self.current_character = mgr.current_character().map(|c| c.folder_name().to_string());
        let directory = settings.saves.character.to_lowercase();

        for character in mgr.characters() {
            if !character.has_slots() {
                continue;
            }

            self.character_list.push_item(character_label(character.signature()));

            let folder = character.folder_name();
            let is_current = self.current_character.as_deref() == Some(folder);
            let directory_match = self.current_character.is_none()
                && self.mode == DialogMode::Loading
                && directory == folder.to_lowercase();

            if is_current || directory_match {
                self.current_character = Some(folder.to_string());
                self.character_list
                    .set_selected(Some(self.character_list.len() - 1));
            }
        }

        self.fill_slot_list(mgr);
    }

    /// Switches between saving and loading.
    ///
    /// Save mode shows the name input and hides the character selector and
    /// its spacer; load mode does the inverse. Entering save mode re-reads
    /// the current character from the state manager.
    pub fn set_mode(&mut self, mode: DialogMode, mgr: &StateManager) {
        self.mode = mode;
        let loading = mode == DialogMode::Loading;
        self.name_edit_visible = !loading;
        self.character_select_visible = loading;
        self.spacer_visible = loading;

        if !loading {
            self.current_character = mgr.current_character().map(|c| c.folder_name().to_string());
        }
    }

    /// Executes the pending save or load and closes the dialog.
    ///
    /// Saving always goes through (an unresolved slot means a new save);
    /// loading is a no-op unless both a character and a slot are resolved.
    /// If the state manager is left without a running game, the UI falls
    /// back to the main menu.
    pub fn confirm(
        &mut self,
        mgr: &mut StateManager,
        windows: &mut WindowManager,
        capture: &[u8],
    ) -> Result<(), StateError> {
        let slot_path = self.resolve_selected_slot(mgr).map(|s| s.path.clone());

        let result = match self.mode {
            DialogMode::Saving => mgr.save_game(self.name_edit.text(), slot_path.as_deref(), capture),
            DialogMode::Loading => match (self.current_character.clone(), slot_path) {
                (Some(folder), Some(path)) => mgr.load_game(&folder, &path),
                _ => Ok(()),
            },
        };

        windows.pop_mode();
        if mgr.state() == SessionState::NoGame {
            windows.push_mode(UiMode::MainMenu);
        }

        result
    }

    /// Closes the dialog without side effects.
    pub fn cancel(&mut self, windows: &mut WindowManager) {
        windows.pop_mode();
    }

    /// Makes the character at `pos` (in enumeration order) current and
    /// refreshes the slot list. A missing character is an invariant
    /// violation: the list was populated from the same enumeration.
    pub fn select_character(&mut self, pos: usize, mgr: &StateManager) {
        let character = nth_character(mgr, pos)
            .unwrap_or_else(|| panic!("no character at list position {}", pos));
        self.current_character = Some(character.folder_name().to_string());
        self.fill_slot_list(mgr);
    }

    /// Rebuilds the slot list from the current character and clears the
    /// slot display state.
    pub fn fill_slot_list(&mut self, mgr: &StateManager) {
        self.slot_list.clear();

        if let Some(folder) = &self.current_character {
            if let Some(character) = mgr.character_by_folder(folder) {
                for slot in character.slots() {
                    self.slot_list.push_item(slot.profile.description.clone());
                }
            }
        }

        self.clear_slot_display();
    }

    /// Changes the slot selection. `None` blanks the info text and
    /// thumbnail; `Some(pos)` resolves the slot, formats its summary, and
    /// queues its screenshot for display.
    pub fn select_slot(
        &mut self,
        pos: Option<usize>,
        mgr: &StateManager,
        world: &Calendar,
        l10n: &Localization,
    ) {
        self.slot_list.set_selected(pos);

        let Some(pos) = pos else {
            self.clear_slot_display();
            return;
        };

        let folder = self
            .current_character
            .as_ref()
            .expect("slot selected with no current character");
        let character = mgr
            .character_by_folder(folder)
            .expect("current character missing from state manager");
        let slot = character
            .slot_at(pos)
            .unwrap_or_else(|| panic!("no slot at list position {}", pos));

        self.info_text = build_slot_info(slot, world, l10n);
        self.pending = PendingThumbnail::Show(slot.profile.screenshot.clone());
    }

    /// Moves the slot selection one row down.
    pub fn slot_next(&mut self, mgr: &StateManager, world: &Calendar, l10n: &Localization) {
        if let Some(pos) = self.slot_list.next_position() {
            self.select_slot(Some(pos), mgr, world, l10n);
        }
    }

    /// Moves the slot selection one row up.
    pub fn slot_previous(&mut self, mgr: &StateManager, world: &Calendar, l10n: &Localization) {
        if let Some(pos) = self.slot_list.previous_position() {
            self.select_slot(Some(pos), mgr, world, l10n);
        }
    }

    /// Cycles the character selector (load mode only).
    pub fn character_next(&mut self, mgr: &StateManager) {
        if !self.character_select_visible {
            return;
        }
        if let Some(pos) = self.character_list.next_position() {
            self.character_list.set_selected(Some(pos));
            self.select_character(pos, mgr);
        }
    }

    /// Cycles the character selector backwards (load mode only).
    pub fn character_previous(&mut self, mgr: &StateManager) {
        if !self.character_select_visible {
            return;
        }
        if let Some(pos) = self.character_list.previous_position() {
            self.character_list.set_selected(Some(pos));
            self.select_character(pos, mgr);
        }
    }

    /// Routes typed text to the save-name input (save mode only).
    pub fn input_char(&mut self, c: char) {
        if self.name_edit_visible {
            self.name_edit.push_char(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.name_edit_visible {
            self.name_edit.backspace();
        }
    }

    /// Hands the queued thumbnail change to the caller (the frame loop
    /// applies it to the texture cache).
    pub fn take_pending_thumbnail(&mut self) -> PendingThumbnail {
        std::mem::replace(&mut self.pending, PendingThumbnail::Keep)
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn info_text(&self) -> &str {
        &self.info_text
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn save_name(&self) -> &str {
        self.name_edit.text()
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn current_character_folder(&self) -> Option<&str> {
        self.current_character.as_deref()
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn is_name_edit_visible(&self) -> bool {
        self.name_edit_visible
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn is_character_select_visible(&self) -> bool {
        self.character_select_visible
    }

    #[allow(dead_code)] // Inspection hook for tests and future callers
    pub fn is_spacer_visible(&self) -> bool {
        self.spacer_visible
    }

    #[cfg(test)]
    fn character_list_items(&self) -> Vec<&str> {
        (0..self.character_list.len())
            .filter_map(|i| self.character_list.item(i))
            .collect()
    }

    #[cfg(test)]
    fn slot_list_len(&self) -> usize {
        self.slot_list.len()
    }

    #[cfg(test)]
    fn character_list_selected(&self) -> Option<usize> {
        self.character_list.selected()
    }

    fn clear_slot_display(&mut self) {
        self.info_text.clear();
        self.pending = PendingThumbnail::Clear;
    }

    fn resolve_selected_slot<'m>(&self, mgr: &'m StateManager) -> Option<&'m Slot> {
        let folder = self.current_character.as_ref()?;
        let character = mgr.character_by_folder(folder)?;
        let pos = self.slot_list.selected()?;
        character.slot_at(pos)
    }

    /// Renders the dialog centered on the canvas.
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        cache: &ScreenshotCache<'_>,
        l10n: &Localization,
    ) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, 170));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let (screen_w, screen_h) = canvas.logical_size();
        let x = ((screen_w.saturating_sub(DIALOG_WIDTH)) / 2) as i32;
        let y = ((screen_h.saturating_sub(DIALOG_HEIGHT)) / 2) as i32;
        let frame = Rect::new(x, y, DIALOG_WIDTH, DIALOG_HEIGHT);

        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(frame)?;
        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(frame)?;

        let title = match self.mode {
            DialogMode::Saving => l10n.text("dialog_title_save"),
            DialogMode::Loading => l10n.text("dialog_title_load"),
        };
        let title_x = x + ((DIALOG_WIDTH - text_width(title, 3)) / 2) as i32;
        draw_text(canvas, title, title_x, y + 12, self.style.selected_text_color, 3)?;

        let content_y = y + 46;

        // Character selector strip (load mode).
        if self.character_select_visible {
            let label = self
                .character_list
                .selected()
                .and_then(|i| self.character_list.item(i))
                .unwrap_or("");
            draw_text(
                canvas,
                &format!("( {} )", label),
                x + 12,
                content_y,
                self.style.text_color,
                2,
            )?;
        }

        // Slot list on the left.
        let list_area = Rect::new(x + 12, content_y + 24, LIST_WIDTH, 170);
        self.slot_list.render(canvas, list_area, &self.style, true)?;

        // Name input (save mode) or the spacer row (load mode).
        if self.name_edit_visible {
            draw_text(
                canvas,
                l10n.text("save_name_prompt"),
                x + 12,
                content_y + 204,
                self.style.text_color,
                2,
            )?;
            let input_area = Rect::new(x + 86, content_y + 196, LIST_WIDTH - 74, 26);
            self.name_edit.render(canvas, input_area, &self.style, true)?;
        }

        // Thumbnail and slot summary on the right.
        let thumb_area = Rect::new(
            x + 12 + LIST_WIDTH as i32 + 12,
            content_y + 24,
            THUMBNAIL_WIDTH,
            THUMBNAIL_HEIGHT,
        );
        canvas.set_draw_color(Color::RGB(10, 10, 14));
        canvas.fill_rect(thumb_area)?;
        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(thumb_area)?;
        cache.render(canvas, thumb_area)?;

        draw_text_lines(
            canvas,
            &self.info_text,
            thumb_area.x(),
            thumb_area.y() + thumb_area.height() as i32 + 10,
            self.style.text_color,
            1,
        )?;

        Ok(())
    }
}

impl Default for SaveGameDialog {
    fn default() -> Self {
        Self::new()
    }
}

/// "Name (Level L Class)" — the character list label.
fn character_label(signature: &Signature) -> String {
    format!(
        "{} (Level {} {})",
        signature.player_name, signature.player_level, signature.player_class
    )
}

/// Resolves a list position against the full character enumeration.
fn nth_character(mgr: &StateManager, pos: usize) -> Option<&Character> {
    mgr.characters()
        .enumerate()
        .find(|(i, _)| *i == pos)
        .map(|(_, c)| c)
}

/// Converts a 24h in-game hour to the 12h clock: 12 and later are PM,
/// 13..=23 become 1..=11, and hour 0 reads as 12.
fn clock_12h(game_hour: f32) -> (u32, bool) {
    let mut hour = game_hour as i32;
    let pm = hour >= 12;
    if hour >= 13 {
        hour -= 12;
    }
    if hour == 0 {
        hour = 12;
    }
    (hour as u32, pm)
}

/// Human-readable slot summary: real-world timestamp, level, location, and
/// the in-game calendar date with a 12-hour clock.
fn build_slot_info(slot: &Slot, world: &Calendar, l10n: &Localization) -> String {
    let mut text = String::new();
    text.push_str(&slot.timestamp.format("%a %b %e %H:%M:%S %Y").to_string());
    text.push('\n');
    text.push_str(&format!(
        "{} {}\n",
        l10n.text("level"),
        slot.profile.player_level
    ));
    text.push_str(&slot.profile.cell_name);
    text.push('\n');

    let (hour, pm) = clock_12h(slot.profile.in_game.hour);
    let meridiem = l10n.text(if pm { "meridiem_pm" } else { "meridiem_am" });
    text.push_str(&format!(
        "{} {} {} {}",
        slot.profile.in_game.day,
        world.month_name(slot.profile.in_game.month),
        hour,
        meridiem
    ));

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GameTime, Session, SlotProfile};
    use chrono::TimeZone;
    use std::fs;
    use std::path::PathBuf;

    fn temp_root(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "emberwood-dialog-test-{}-{}",
            tag,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).unwrap();
        root
    }

    fn signature(name: &str, level: u32, class: &str) -> Signature {
        Signature {
            player_name: name.to_string(),
            player_level: level,
            player_class: class.to_string(),
        }
    }

    fn slot(folder: &str, desc: &str, hour: f32, secs: i64) -> crate::state::Slot {
        crate::state::Slot {
            path: PathBuf::from(format!("/saves/{}/{}.json", folder, desc)),
            timestamp: chrono::Local.timestamp_opt(secs, 0).unwrap(),
            profile: SlotProfile {
                description: desc.to_string(),
                player_level: 7,
                cell_name: "Emberwood Gate".to_string(),
                in_game: GameTime { day: 16, month: 6, hour },
                screenshot: vec![1, 2, 3],
            },
        }
    }

    fn character(folder: &str, name: &str, slots: Vec<crate::state::Slot>) -> Character {
        Character::new(
            signature(name, 7, "Warden"),
            PathBuf::from(format!("/saves/{}", folder)),
            slots,
        )
    }

    fn session_for(folder: &str, name: &str) -> Session {
        Session {
            character: folder.to_string(),
            player: signature(name, 7, "Warden"),
            cell_name: "Emberwood Gate".to_string(),
            clock: GameTime { day: 16, month: 6, hour: 9.0 },
        }
    }

    fn manager(tag: &str, characters: Vec<Character>, session: Option<Session>) -> StateManager {
        StateManager::for_tests(temp_root(tag), characters, session)
    }

    #[test]
    fn test_open_with_no_characters_leaves_lists_empty() {
        let mgr = manager("empty", vec![], None);
        let mut dialog = SaveGameDialog::new();
        dialog.open(&mgr, &Settings::default());
        assert!(dialog.character_list_items().is_empty());
        assert_eq!(dialog.slot_list_len(), 0);
        assert_eq!(dialog.current_character_folder(), None);
    }

    #[test]
    fn test_open_selects_active_character() {
        let mgr = manager(
            "active",
            vec![
                character("anna", "Anna", vec![slot("anna", "camp", 9.0, 100)]),
                character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)]),
            ],
            Some(session_for("mira", "Mira")),
        );
        let mut dialog = SaveGameDialog::new();
        dialog.open(&mgr, &Settings::default());

        assert_eq!(dialog.current_character_folder(), Some("mira"));
        assert_eq!(dialog.character_list_selected(), Some(1));
        assert_eq!(dialog.slot_list_len(), 1);
    }

    #[test]
    fn test_open_load_mode_falls_back_to_configured_directory() {
        let mgr = manager(
            "fallback",
            vec![
                character("anna", "Anna", vec![slot("anna", "camp", 9.0, 100)]),
                character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)]),
            ],
            None,
        );
        let mut settings = Settings::default();
        settings.saves.character = "MIRA".to_string();

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &settings);
        assert_eq!(dialog.current_character_folder(), Some("mira"));
        assert_eq!(dialog.character_list_selected(), Some(1));
    }

    #[test]
    fn test_directory_fallback_does_not_apply_in_save_mode() {
        let mgr = manager(
            "nofallback",
            vec![character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)])],
            None,
        );
        let mut settings = Settings::default();
        settings.saves.character = "mira".to_string();

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Saving, &mgr);
        dialog.open(&mgr, &settings);
        assert_eq!(dialog.current_character_folder(), None);
    }

    #[test]
    fn test_characters_without_slots_are_not_listed() {
        let mgr = manager(
            "zeroslots",
            vec![
                character("anna", "Anna", vec![]),
                character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)]),
            ],
            None,
        );
        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &Settings::default());

        assert_eq!(dialog.character_list_items(), vec!["Mira (Level 7 Warden)"]);
    }

    #[test]
    fn test_set_mode_toggles_visibility() {
        let mgr = manager("visibility", vec![], None);
        let mut dialog = SaveGameDialog::new();

        dialog.set_mode(DialogMode::Loading, &mgr);
        assert!(!dialog.is_name_edit_visible());
        assert!(dialog.is_character_select_visible());
        assert!(dialog.is_spacer_visible());

        dialog.set_mode(DialogMode::Saving, &mgr);
        assert!(dialog.is_name_edit_visible());
        assert!(!dialog.is_character_select_visible());
        assert!(!dialog.is_spacer_visible());
    }

    #[test]
    fn test_entering_save_mode_reresolves_current_character() {
        let mgr = manager(
            "reresolve",
            vec![
                character("anna", "Anna", vec![slot("anna", "camp", 9.0, 100)]),
                character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)]),
            ],
            Some(session_for("mira", "Mira")),
        );
        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &Settings::default());
        dialog.select_character(0, &mgr);
        assert_eq!(dialog.current_character_folder(), Some("anna"));

        dialog.set_mode(DialogMode::Saving, &mgr);
        assert_eq!(dialog.current_character_folder(), Some("mira"));
    }

    #[test]
    fn test_select_character_by_enumeration_position() {
        let mgr = manager(
            "enumorder",
            vec![
                character("anna", "Anna", vec![slot("anna", "camp", 9.0, 100)]),
                character("mira", "Mira", vec![
                    slot("mira", "gate", 9.0, 200),
                    slot("mira", "bridge", 9.0, 100),
                ]),
            ],
            None,
        );
        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &Settings::default());

        dialog.select_character(1, &mgr);
        assert_eq!(dialog.current_character_folder(), Some("mira"));
        assert_eq!(dialog.slot_list_len(), 2);
    }

    #[test]
    #[should_panic(expected = "no character at list position")]
    fn test_select_character_out_of_range_panics() {
        let mgr = manager("panic", vec![], None);
        let mut dialog = SaveGameDialog::new();
        dialog.select_character(3, &mgr);
    }

    #[test]
    fn test_select_slot_builds_summary() {
        let mgr = manager(
            "summary",
            vec![character("mira", "Mira", vec![slot("mira", "gate", 16.5, 100)])],
            Some(session_for("mira", "Mira")),
        );
        let world = Calendar;
        let l10n = Localization::new();
        let mut dialog = SaveGameDialog::new();
        dialog.open(&mgr, &Settings::default());

        dialog.select_slot(Some(0), &mgr, &world, &l10n);

        let info = dialog.info_text();
        assert!(info.contains("Level 7"), "info was: {}", info);
        assert!(info.contains("Emberwood Gate"), "info was: {}", info);
        assert!(info.contains("16 Emberturn 4 PM"), "info was: {}", info);
        assert_eq!(
            dialog.take_pending_thumbnail(),
            PendingThumbnail::Show(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_clearing_selection_blanks_summary_and_thumbnail() {
        let mgr = manager(
            "clearsel",
            vec![character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)])],
            Some(session_for("mira", "Mira")),
        );
        let world = Calendar;
        let l10n = Localization::new();
        let mut dialog = SaveGameDialog::new();
        dialog.open(&mgr, &Settings::default());
        dialog.select_slot(Some(0), &mgr, &world, &l10n);
        let _ = dialog.take_pending_thumbnail();

        dialog.select_slot(None, &mgr, &world, &l10n);
        assert_eq!(dialog.info_text(), "");
        assert_eq!(dialog.take_pending_thumbnail(), PendingThumbnail::Clear);
    }

    #[test]
    fn test_clock_12h_boundaries() {
        assert_eq!(clock_12h(0.0), (12, false));
        assert_eq!(clock_12h(0.9), (12, false));
        assert_eq!(clock_12h(1.0), (1, false));
        assert_eq!(clock_12h(11.9), (11, false));
        assert_eq!(clock_12h(12.0), (12, true));
        assert_eq!(clock_12h(13.0), (1, true));
        assert_eq!(clock_12h(23.9), (11, true));
    }

    #[test]
    fn test_midnight_reads_twelve_with_am_marker() {
        let mgr = manager(
            "midnight",
            vec![character("mira", "Mira", vec![slot("mira", "gate", 0.0, 100)])],
            Some(session_for("mira", "Mira")),
        );
        let world = Calendar;
        let l10n = Localization::new();
        let mut dialog = SaveGameDialog::new();
        dialog.open(&mgr, &Settings::default());

        dialog.select_slot(Some(0), &mgr, &world, &l10n);
        assert!(
            dialog.info_text().ends_with("12 AM"),
            "info was: {}",
            dialog.info_text()
        );
    }

    #[test]
    fn test_confirm_save_writes_named_slot() {
        let root = temp_root("confirmsave");
        let mut mgr = StateManager::new(&root).unwrap();
        mgr.start_session(
            signature("Mira", 7, "Warden"),
            "Emberwood Gate".to_string(),
            GameTime { day: 16, month: 6, hour: 9.0 },
        );

        let mut windows = WindowManager::new();
        windows.push_mode(UiMode::SaveDialog);

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Saving, &mgr);
        dialog.open(&mgr, &Settings::default());
        for c in "before the gate".chars() {
            dialog.input_char(c);
        }

        dialog.confirm(&mut mgr, &mut windows, b"jpegbytes").unwrap();

        let slot = mgr.current_character().unwrap().slot_at(0).unwrap();
        assert_eq!(slot.profile.description, "before the gate");
        // Still running, so no main-menu transition.
        assert_eq!(windows.current(), UiMode::Playing);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_confirm_save_overwrites_selected_slot() {
        let root = temp_root("confirmoverwrite");
        let mut mgr = StateManager::new(&root).unwrap();
        mgr.start_session(
            signature("Mira", 7, "Warden"),
            "Emberwood Gate".to_string(),
            GameTime { day: 16, month: 6, hour: 9.0 },
        );
        mgr.save_game("original", None, b"jpg").unwrap();

        let world = Calendar;
        let l10n = Localization::new();
        let mut windows = WindowManager::new();
        windows.push_mode(UiMode::SaveDialog);

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Saving, &mgr);
        dialog.open(&mgr, &Settings::default());
        dialog.select_slot(Some(0), &mgr, &world, &l10n);
        for c in "replaced".chars() {
            dialog.input_char(c);
        }

        dialog.confirm(&mut mgr, &mut windows, b"jpg").unwrap();

        let character = mgr.current_character().unwrap();
        assert_eq!(character.slots().count(), 1);
        assert_eq!(character.slot_at(0).unwrap().profile.description, "replaced");

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_confirm_load_without_selection_is_noop_and_returns_to_menu() {
        let mgr_chars = vec![character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)])];
        let mut mgr = manager("loadnoop", mgr_chars, None);

        let mut windows = WindowManager::new();
        windows.push_mode(UiMode::SaveDialog);

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &Settings::default());
        // Character preselection failed (no session, no directory setting),
        // so nothing can be resolved.
        assert_eq!(dialog.current_character_folder(), None);

        dialog.confirm(&mut mgr, &mut windows, b"").unwrap();

        assert_eq!(mgr.state(), SessionState::NoGame);
        assert_eq!(windows.current(), UiMode::MainMenu);
    }

    #[test]
    fn test_confirm_load_installs_selected_slot() {
        let root = temp_root("confirmload");
        let mut mgr = StateManager::new(&root).unwrap();
        mgr.start_session(
            signature("Mira", 7, "Warden"),
            "Emberwood Gate".to_string(),
            GameTime { day: 16, month: 6, hour: 9.0 },
        );
        mgr.save_game("checkpoint", None, b"jpg").unwrap();
        mgr.end_session();

        let world = Calendar;
        let l10n = Localization::new();
        let mut settings = Settings::default();
        settings.saves.character = "mira".to_string();

        let mut windows = WindowManager::new();
        windows.push_mode(UiMode::SaveDialog);

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &settings);
        dialog.select_slot(Some(0), &mgr, &world, &l10n);

        dialog.confirm(&mut mgr, &mut windows, b"").unwrap();

        assert_eq!(mgr.state(), SessionState::Running);
        assert_eq!(mgr.session().unwrap().cell_name, "Emberwood Gate");
        assert_eq!(windows.current(), UiMode::Playing);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn test_cancel_closes_without_side_effects() {
        let mgr = manager(
            "cancel",
            vec![character("mira", "Mira", vec![slot("mira", "gate", 9.0, 100)])],
            None,
        );
        let mut windows = WindowManager::new();
        windows.push_mode(UiMode::SaveDialog);

        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.open(&mgr, &Settings::default());
        dialog.cancel(&mut windows);

        assert_eq!(windows.current(), UiMode::Playing);
        assert_eq!(mgr.state(), SessionState::NoGame);
    }

    #[test]
    fn test_typed_text_is_ignored_in_load_mode() {
        let mgr = manager("typing", vec![], None);
        let mut dialog = SaveGameDialog::new();
        dialog.set_mode(DialogMode::Loading, &mgr);
        dialog.input_char('x');
        assert_eq!(dialog.save_name(), "");

        dialog.set_mode(DialogMode::Saving, &mgr);
        dialog.input_char('x');
        assert_eq!(dialog.save_name(), "x");
    }
}
