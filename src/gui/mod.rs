//! Screen-Space GUI System
//!
//! UI elements rendered at fixed screen positions with SDL2 primitives and
//! the bitmap font; no image assets. The save/load screen is the main
//! tenant here, together with the overlay menus it transitions to and from.
//!
//! # Components
//!
//! - [`SaveGameDialog`] - modal save/load screen (characters, slots,
//!   metadata summary, screenshot thumbnail)
//! - [`MainMenu`] - typed main menu built on [`OverlayMenu`]
//! - [`ScreenshotCache`] - single-slot texture cache for save thumbnails
//! - widgets: [`ListBox`], [`TextInput`]

pub mod main_menu;
pub mod menu;
pub mod save_dialog;
pub mod screenshot;
pub mod widgets;

pub use main_menu::{MainMenu, MainMenuAction};
pub use menu::OverlayMenu;
pub use save_dialog::{DialogMode, PendingThumbnail, SaveGameDialog};
pub use screenshot::{capture_jpeg, ScreenshotCache};
pub use widgets::{ListBox, TextInput, WidgetStyle};
