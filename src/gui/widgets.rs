//! Dialog widgets
//!
//! Retained-state list box and text input used by the save/load screen.
//! Rendering is procedural (SDL2 primitives plus the bitmap font), in line
//! with the rest of the screen-space GUI.

use crate::text::{draw_text, CHAR_ADVANCE};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

/// Shared widget colors.
#[derive(Debug, Clone)]
pub struct WidgetStyle {
    pub background_color: Color,
    pub border_color: Color,
    pub focused_border_color: Color,
    pub text_color: Color,
    pub selected_text_color: Color,
    pub highlight_color: Color,
}

impl Default for WidgetStyle {
    fn default() -> Self {
        WidgetStyle {
            background_color: Color::RGB(24, 24, 32),
            border_color: Color::RGB(90, 90, 110),
            focused_border_color: Color::RGB(170, 170, 200),
            text_color: Color::RGB(170, 170, 180),
            selected_text_color: Color::RGB(255, 255, 255),
            highlight_color: Color::RGB(70, 90, 130),
        }
    }
}

/// Row height used by `ListBox::render` (text scale 2 plus padding).
const LIST_ROW_HEIGHT: u32 = 20;
const LIST_PADDING: i32 = 6;

/// A vertical list with at most one selected row.
///
/// Selection is optional: a freshly filled list has no selection, matching
/// the save list's "nothing picked yet" state.
pub struct ListBox {
    items: Vec<String>,
    selected: Option<usize>,
}

impl ListBox {
    pub fn new() -> Self {
        ListBox {
            items: Vec::new(),
            selected: None,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
    }

    pub fn push_item(&mut self, label: String) {
        self.items.push(label);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)] // Symmetry with len(); used by tests
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|s| s.as_str())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Sets the selection; out-of-range positions clear it.
    pub fn set_selected(&mut self, pos: Option<usize>) {
        self.selected = match pos {
            Some(i) if i < self.items.len() => Some(i),
            _ => None,
        };
    }

    /// Position one step down from the current selection (clamped), or the
    /// first row when nothing is selected. `None` on an empty list.
    pub fn next_position(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(match self.selected {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        })
    }

    /// Position one step up (clamped), or the first row when nothing is
    /// selected. `None` on an empty list.
    pub fn previous_position(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(match self.selected {
            Some(i) => i.saturating_sub(1),
            None => 0,
        })
    }

    /// Renders the list into `area`, scrolling so the selection stays visible.
    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        area: Rect,
        style: &WidgetStyle,
        focused: bool,
    ) -> Result<(), String> {
        canvas.set_draw_color(style.background_color);
        canvas.fill_rect(area)?;
        canvas.set_draw_color(if focused {
            style.focused_border_color
        } else {
            style.border_color
        });
        canvas.draw_rect(area)?;

        let visible_rows = ((area.height() as i32 - 2 * LIST_PADDING) / LIST_ROW_HEIGHT as i32)
            .max(1) as usize;
        let first = match self.selected {
            Some(i) if i >= visible_rows => i + 1 - visible_rows,
            _ => 0,
        };

        for (row, index) in (first..self.items.len()).take(visible_rows).enumerate() {
            let row_y = area.y() + LIST_PADDING + row as i32 * LIST_ROW_HEIGHT as i32;

            let is_selected = self.selected == Some(index);
            if is_selected {
                canvas.set_draw_color(style.highlight_color);
                canvas.fill_rect(Rect::new(
                    area.x() + 2,
                    row_y - 2,
                    area.width() - 4,
                    LIST_ROW_HEIGHT - 2,
                ))?;
            }

            let color = if is_selected {
                style.selected_text_color
            } else {
                style.text_color
            };
            draw_text(
                canvas,
                &self.items[index],
                area.x() + LIST_PADDING,
                row_y,
                color,
                2,
            )?;
        }

        Ok(())
    }
}

impl Default for ListBox {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-line text input with a trailing caret.
pub struct TextInput {
    value: String,
    max_len: usize,
}

impl TextInput {
    pub fn new(max_len: usize) -> Self {
        TextInput {
            value: String::new(),
            max_len,
        }
    }

    pub fn text(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn push_char(&mut self, c: char) {
        if self.value.chars().count() < self.max_len && !c.is_control() {
            self.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn render(
        &self,
        canvas: &mut Canvas<Window>,
        area: Rect,
        style: &WidgetStyle,
        focused: bool,
    ) -> Result<(), String> {
        canvas.set_draw_color(style.background_color);
        canvas.fill_rect(area)?;
        canvas.set_draw_color(if focused {
            style.focused_border_color
        } else {
            style.border_color
        });
        canvas.draw_rect(area)?;

        let text_y = area.y() + (area.height() as i32 - 14) / 2;
        draw_text(
            canvas,
            &self.value,
            area.x() + LIST_PADDING,
            text_y,
            style.selected_text_color,
            2,
        )?;

        if focused {
            let caret_x =
                area.x() + LIST_PADDING + (self.value.chars().count() as u32 * CHAR_ADVANCE * 2) as i32;
            draw_text(canvas, "_", caret_x, text_y, style.selected_text_color, 2)?;
        }

        Ok(())
    }
}
