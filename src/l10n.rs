//! UI string table
//!
//! Small key/value store for user-facing strings. The save/load screen pulls
//! its labels and the AM/PM clock markers from here so they can be swapped
//! without touching layout code. Missing keys fall back to the key itself,
//! which keeps a bad lookup visible on screen instead of panicking.

use std::collections::HashMap;

pub struct Localization {
    strings: HashMap<&'static str, String>,
}

impl Localization {
    pub fn new() -> Self {
        let mut strings = HashMap::new();
        strings.insert("meridiem_am", "AM".to_string());
        strings.insert("meridiem_pm", "PM".to_string());
        strings.insert("level", "Level".to_string());
        strings.insert("dialog_title_save", "SAVE GAME".to_string());
        strings.insert("dialog_title_load", "LOAD GAME".to_string());
        strings.insert("button_ok", "OK".to_string());
        strings.insert("button_cancel", "CANCEL".to_string());
        strings.insert("save_name_prompt", "NAME:".to_string());
        Localization { strings }
    }

    /// Looks up a string by key, falling back to the key when absent.
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        match self.strings.get(key) {
            Some(s) => s.as_str(),
            None => key,
        }
    }

    /// Overrides a string (used by tests and future language packs).
    #[allow(dead_code)]
    pub fn set(&mut self, key: &'static str, value: String) {
        self.strings.insert(key, value);
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new()
    }
}
