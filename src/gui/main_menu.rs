//! Main Menu Component
//!
//! Typed wrapper around the base overlay menu. The entry set depends on
//! whether a session is running: without one there is nothing to resume,
//! save, or quit to menu.

use super::menu::OverlayMenu;
use crate::state::SessionState;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Actions the main menu can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuAction {
    Resume,
    NewGame,
    SaveGame,
    LoadGame,
    QuitToMenu,
    Quit,
}

impl MainMenuAction {
    fn label(&self) -> &'static str {
        match self {
            MainMenuAction::Resume => "RESUME",
            MainMenuAction::NewGame => "NEW GAME",
            MainMenuAction::SaveGame => "SAVE GAME",
            MainMenuAction::LoadGame => "LOAD GAME",
            MainMenuAction::QuitToMenu => "QUIT TO MENU",
            MainMenuAction::Quit => "QUIT",
        }
    }
}

pub struct MainMenu {
    actions: Vec<MainMenuAction>,
    menu: OverlayMenu,
}

impl MainMenu {
    /// Builds the menu for the current game state.
    pub fn for_state(state: SessionState) -> Self {
        let actions = match state {
            SessionState::Running => vec![
                MainMenuAction::Resume,
                MainMenuAction::SaveGame,
                MainMenuAction::LoadGame,
                MainMenuAction::QuitToMenu,
                MainMenuAction::Quit,
            ],
            SessionState::NoGame => vec![
                MainMenuAction::NewGame,
                MainMenuAction::LoadGame,
                MainMenuAction::Quit,
            ],
        };

        let entries = actions.iter().map(|a| a.label().to_string()).collect();
        MainMenu {
            actions,
            menu: OverlayMenu::new("EMBERWOOD".to_string(), entries),
        }
    }

    pub fn navigate_up(&mut self) {
        self.menu.select_previous();
    }

    pub fn navigate_down(&mut self) {
        self.menu.select_next();
    }

    pub fn selected_action(&self) -> MainMenuAction {
        self.actions[self.menu.selected_index()]
    }

    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        self.menu.render(canvas)
    }
}
