//! Text area rendering.

use flexpad_core::config::FontWeight;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::{EditorState, VisualLayout};
use crate::common::{char_width, sanitize_for_display};
use crate::theme::Theme;

/// Draws the text area and, when `show_cursor` is set, places the cursor.
pub fn render_editor(
    frame: &mut Frame,
    area: Rect,
    editor: &EditorState,
    theme: &Theme,
    font_weight: FontWeight,
    wrap: bool,
    show_cursor: bool,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border).bg(theme.background))
        .style(theme.base());

    let inner = block.inner(area);
    if inner.width == 0 || inner.height == 0 {
        frame.render_widget(block, area);
        return;
    }

    let width = inner.width as usize;
    let height = inner.height as usize;
    let layout = VisualLayout::build(&editor.buffer, width, wrap);
    let lines_src = editor.buffer.lines();

    let visible: Vec<Line<'static>> = layout
        .rows
        .iter()
        .skip(editor.scroll_row)
        .take(height)
        .map(|row| {
            let line = &lines_src[row.line];
            let chars: Vec<char> = line.chars().collect();
            let slice: String = chars[row.range.clone()].iter().collect();
            let text = if wrap {
                sanitize_for_display(&slice).into_owned()
            } else {
                slice_columns(&slice, editor.scroll_col, width)
            };
            Line::from(text)
        })
        .collect();

    let mut text_style = theme.base();
    if font_weight == FontWeight::Bold {
        text_style = text_style.add_modifier(Modifier::BOLD);
    }

    frame.render_widget(Paragraph::new(visible).style(text_style).block(block), area);

    if !show_cursor {
        return;
    }
    let Some(row) = layout.cursor_row.checked_sub(editor.scroll_row) else {
        return;
    };
    let col = if wrap {
        layout.cursor_col
    } else {
        match layout.cursor_col.checked_sub(editor.scroll_col) {
            Some(col) => col,
            None => return,
        }
    };
    if row < height && col < width {
        frame.set_cursor_position((inner.x + col as u16, inner.y + row as u16));
    }
}

/// Returns the part of `text` visible between columns `start` and
/// `start + width`, with tabs expanded.
fn slice_columns(text: &str, start: usize, width: usize) -> String {
    let mut out = String::new();
    let mut col = 0;
    for ch in text.chars() {
        let w = char_width(ch);
        if col >= start && col + w <= start + width {
            if ch == '\t' {
                out.push_str(&" ".repeat(w));
            } else if ch != '\x1b' {
                out.push(ch);
            }
        }
        col += w;
        if col >= start + width {
            break;
        }
    }
    out
}
