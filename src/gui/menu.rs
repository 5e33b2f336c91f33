//! Base overlay menu
//!
//! Reusable centered overlay menu for full-screen choices (main menu and
//! friends). Handles wrap-around keyboard navigation and procedural
//! rendering; callers map the selected index to a typed action.

use crate::text::{draw_text, text_width};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Menu box appearance.
#[derive(Debug, Clone)]
pub struct MenuStyle {
    pub width: u32,
    pub row_height: u32,
    pub background_color: Color,
    pub border_color: Color,
    pub overlay_alpha: u8,
    pub title_color: Color,
    pub entry_color: Color,
    pub selected_entry_color: Color,
    pub highlight_color: Color,
}

impl Default for MenuStyle {
    fn default() -> Self {
        MenuStyle {
            width: 420,
            row_height: 44,
            background_color: Color::RGB(28, 28, 38),
            border_color: Color::RGB(100, 100, 120),
            overlay_alpha: 170,
            title_color: Color::RGB(225, 220, 200),
            entry_color: Color::RGB(160, 160, 170),
            selected_entry_color: Color::RGB(255, 255, 255),
            highlight_color: Color::RGB(90, 70, 50),
        }
    }
}

/// A titled overlay menu with wrap-around selection.
pub struct OverlayMenu {
    title: String,
    entries: Vec<String>,
    selected: usize,
    style: MenuStyle,
}

impl OverlayMenu {
    pub fn new(title: String, entries: Vec<String>) -> Self {
        OverlayMenu {
            title,
            entries,
            selected: 0,
            style: MenuStyle::default(),
        }
    }

    /// Move selection up, wrapping to the bottom.
    pub fn select_previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.entries.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move selection down, wrapping to the top.
    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.entries.len();
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Renders the darkened overlay and the centered menu box.
    pub fn render(&self, canvas: &mut Canvas<Window>) -> Result<(), String> {
        canvas.set_blend_mode(sdl2::render::BlendMode::Blend);
        canvas.set_draw_color(Color::RGBA(0, 0, 0, self.style.overlay_alpha));
        canvas.fill_rect(None)?;
        canvas.set_blend_mode(sdl2::render::BlendMode::None);

        let height = 70 + self.entries.len() as u32 * self.style.row_height + 20;
        let (screen_w, screen_h) = canvas.logical_size();
        let x = ((screen_w - self.style.width) / 2) as i32;
        let y = ((screen_h.saturating_sub(height)) / 2) as i32;
        let frame = Rect::new(x, y, self.style.width, height);

        canvas.set_draw_color(self.style.background_color);
        canvas.fill_rect(frame)?;
        canvas.set_draw_color(self.style.border_color);
        canvas.draw_rect(frame)?;

        let title_x = x + ((self.style.width - text_width(&self.title, 3)) / 2) as i32;
        draw_text(canvas, &self.title, title_x, y + 20, self.style.title_color, 3)?;

        for (i, entry) in self.entries.iter().enumerate() {
            let row_y = y + 70 + (i as u32 * self.style.row_height) as i32;
            let is_selected = i == self.selected;

            if is_selected {
                canvas.set_draw_color(self.style.highlight_color);
                canvas.fill_rect(Rect::new(x + 12, row_y - 4, self.style.width - 24, 26))?;
            }

            let color = if is_selected {
                self.style.selected_entry_color
            } else {
                self.style.entry_color
            };
            draw_text(canvas, entry, x + 50, row_y, color, 2)?;
        }

        Ok(())
    }
}
