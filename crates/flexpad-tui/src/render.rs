//! Pure view functions for the editor window.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame` and never
//! mutate state. Layout, top to bottom:
//!
//! ```text
//! ┌ header: File ^F │ Format ^T │ Dark/Light ^L ─────────── title ┐
//! │ text area (bordered)                                        │
//! └ status line: stats, modified marker, last message           ┘
//! ```

use flexpad_core::config::Appearance;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::common::{display_width, truncate_with_ellipsis};
use crate::features::editor::{Viewport, render_editor};
use crate::features::statusline::render_status_line;
use crate::overlays::{Overlay, OverlayExt};
use crate::state::{AppState, TuiState};
use crate::theme::Theme;

/// Height of the menu row above the text area.
const HEADER_HEIGHT: u16 = 1;

/// Height of the status line below the text area.
const STATUS_HEIGHT: u16 = 1;

/// Border cells around the text area on each axis.
const EDITOR_BORDER: u16 = 2;

/// Text area size for a terminal of `width` x `height` cells.
pub fn editor_viewport(width: u16, height: u16) -> Viewport {
    Viewport {
        width: width.saturating_sub(EDITOR_BORDER) as usize,
        height: height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT + EDITOR_BORDER) as usize,
    }
}

/// Renders the whole window, placing the cursor unless an overlay is open.
pub fn render(app: &AppState, frame: &mut Frame) {
    render_with_cursor(app, frame, app.overlay.is_none());
}

/// Renders the whole window. Modal prompts pass `show_cursor = false` and draw
/// on top.
pub fn render_with_cursor(app: &AppState, frame: &mut Frame, show_cursor: bool) {
    let area = frame.area();
    let tui = &app.tui;
    let theme = tui.theme();

    frame.render_widget(Block::default().style(theme.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(frame, chunks[0], app, &theme);
    render_editor(
        frame,
        chunks[1],
        &tui.editor,
        &theme,
        tui.font_weight,
        tui.wrap,
        show_cursor,
    );
    render_status_line(frame, chunks[2], tui, &theme);

    app.overlay.render(frame, area, &theme);
}

fn render_header(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let tui = &app.tui;
    let file_open = matches!(app.overlay, Some(Overlay::FileMenu(_)));
    let format_open = matches!(app.overlay, Some(Overlay::Format(_)));

    let menu = |label: &str, shortcut: &str, active: bool| {
        let style = if active {
            theme.selected()
        } else {
            theme.base()
        };
        vec![
            Span::styled(format!(" {label} "), style),
            Span::styled(format!("{shortcut} "), theme.muted()),
        ]
    };

    let mut spans = Vec::new();
    spans.extend(menu("File", "^F", file_open));
    spans.extend(menu("Format", "^T", format_open));
    spans.extend(menu(toggle_label(tui), "^L", false));

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let available = (area.width as usize).saturating_sub(used + 1);
    let title = truncate_with_ellipsis(&tui.document.title, available);
    let padding = available.saturating_sub(display_width(&title));
    spans.push(Span::styled(" ".repeat(padding), theme.base()));
    spans.push(Span::styled(title, theme.accent()));
    spans.push(Span::styled(" ", theme.base()));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn toggle_label(tui: &TuiState) -> &'static str {
    match tui.appearance.toggled() {
        Appearance::Dark => "Dark mode",
        Appearance::Light => "Light mode",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_excludes_chrome() {
        assert_eq!(
            editor_viewport(80, 24),
            Viewport {
                width: 78,
                height: 20
            }
        );
        assert_eq!(editor_viewport(1, 2), Viewport::default());
    }
}
