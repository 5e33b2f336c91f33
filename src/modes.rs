//! UI mode management
//!
//! The game shell runs exactly one UI mode at a time; overlays (menus, the
//! save/load screen) are pushed on top of gameplay and popped when closed.
//! An empty stack means plain gameplay.

/// The mutually exclusive top-level UI modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Playing,
    MainMenu,
    SaveDialog,
}

/// Stack of pushed UI modes.
///
/// Components that decide a screen change (for example the save/load screen
/// returning to the main menu after the session ends) push a mode here; the
/// event loop in `main` dispatches input by `current()`.
pub struct WindowManager {
    mode_stack: Vec<UiMode>,
}

impl WindowManager {
    pub fn new() -> Self {
        WindowManager { mode_stack: Vec::new() }
    }

    /// The active mode; `Playing` when nothing is pushed.
    pub fn current(&self) -> UiMode {
        self.mode_stack.last().copied().unwrap_or(UiMode::Playing)
    }

    pub fn push_mode(&mut self, mode: UiMode) {
        self.mode_stack.push(mode);
    }

    /// Pops the top mode; no-op on an empty stack.
    pub fn pop_mode(&mut self) {
        self.mode_stack.pop();
    }

    /// Drops every pushed mode, returning to gameplay.
    pub fn clear(&mut self) {
        self.mode_stack.clear();
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
