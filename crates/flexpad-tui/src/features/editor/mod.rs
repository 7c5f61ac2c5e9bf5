//! Editor feature slice: the text area.
//!
//! - `text_buffer.rs`: line storage, cursor and editing commands
//! - `layout.rs`: soft wrapping and cursor-to-screen mapping
//! - `render.rs`: draws the visible rows and places the terminal cursor

mod layout;
mod render;
mod text_buffer;

pub use layout::{VisualLayout, VisualRow, wrap_ranges};
pub use render::render_editor;
pub use text_buffer::{CursorMove, TextBuffer};

/// Size of the text area inside its border, in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

/// Editor state: the buffer plus the scroll position of the text area.
#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub buffer: TextBuffer,
    /// First visible visual row.
    pub scroll_row: usize,
    /// First visible column when wrapping is off.
    pub scroll_col: usize,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            scroll_row: 0,
            scroll_col: 0,
        }
    }

    /// Replaces the content wholesale and resets scrolling.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.scroll_row = 0;
        self.scroll_col = 0;
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Adjusts scrolling so the cursor stays inside the viewport.
    pub fn scroll_to_cursor(&mut self, viewport: Viewport, wrap: bool) {
        if viewport.width == 0 || viewport.height == 0 {
            return;
        }

        let layout = VisualLayout::build(&self.buffer, viewport.width, wrap);
        let row = layout.cursor_row;
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + viewport.height {
            self.scroll_row = row + 1 - viewport.height;
        }
        let max_scroll = layout.rows.len().saturating_sub(viewport.height);
        self.scroll_row = self.scroll_row.min(max_scroll);

        if wrap {
            self.scroll_col = 0;
            return;
        }
        let col = layout.cursor_col;
        if col < self.scroll_col {
            self.scroll_col = col;
        } else if col >= self.scroll_col + viewport.width {
            self.scroll_col = col + 1 - viewport.width;
        }
    }
}
