//! Shared drawing helpers for overlays and prompts.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::common::truncate_start_with_ellipsis;
use crate::theme::Theme;

/// Calculates a popup area centered within `area`.
pub fn calculate_overlay_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));

    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Renders the base container for an overlay (clears background, draws border and title).
pub fn render_overlay_container(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    theme: &Theme,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color).bg(theme.background))
        .style(theme.base())
        .title(format!(" {title} "))
        .title_style(
            Style::default()
                .fg(border_color)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(block, area);
}

/// Configuration for an overlay popup.
pub struct OverlayConfig<'a> {
    pub title: &'a str,
    pub border_color: Color,
    pub width: u16,
    pub height: u16,
    pub hints: &'a [InputHint<'a>],
    pub theme: &'a Theme,
}

/// Layout rectangles for an overlay.
pub struct OverlayLayout {
    pub popup: Rect,
    pub body: Rect,
}

/// Renders a standard overlay container and returns its layout.
pub fn render_overlay(frame: &mut Frame, area: Rect, config: &OverlayConfig<'_>) -> OverlayLayout {
    let popup = calculate_overlay_area(area, config.width, config.height);
    render_overlay_container(frame, popup, config.title, config.border_color, config.theme);

    let inner = Rect::new(
        popup.x + 1,
        popup.y + 1,
        popup.width.saturating_sub(2),
        popup.height.saturating_sub(2),
    );

    if !config.hints.is_empty() {
        render_hints(frame, inner, config.hints, config.border_color, config.theme);
    }

    let footer_height = u16::from(!config.hints.is_empty());
    let body = Rect::new(
        inner.x,
        inner.y,
        inner.width,
        inner.height.saturating_sub(footer_height),
    );

    OverlayLayout { popup, body }
}

/// Keyboard hint shown in an overlay footer.
pub struct InputHint<'a> {
    pub key: &'a str,
    pub action: &'a str,
}

impl<'a> InputHint<'a> {
    pub fn new(key: &'a str, action: &'a str) -> Self {
        Self { key, action }
    }
}

/// Configuration for a prompt input line (path entry, filter).
pub struct InputLine<'a> {
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub prompt: &'a str,
    pub theme: &'a Theme,
}

/// Renders a prompt-style input line: "> <text>█".
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &InputLine<'_>) {
    let theme = input.theme;
    let is_placeholder = input.value.is_empty() && input.placeholder.is_some();
    let max_text_width = area.width.saturating_sub(input.prompt.len() as u16 + 1) as usize;

    let display_text = if is_placeholder {
        truncate_start_with_ellipsis(input.placeholder.unwrap_or(""), max_text_width)
    } else {
        truncate_start_with_ellipsis(input.value, max_text_width)
    };

    let cursor = Span::styled("█", Style::default().fg(theme.accent).bg(theme.background));
    let mut spans = vec![Span::styled(input.prompt, theme.accent())];
    if is_placeholder {
        spans.push(cursor);
        spans.push(Span::styled(display_text, theme.muted()));
    } else {
        spans.push(Span::styled(display_text, theme.base()));
        spans.push(cursor);
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.base()), area);
}

/// Renders a line of keyboard hints at the bottom of the overlay.
pub fn render_hints(
    frame: &mut Frame,
    area: Rect,
    hints: &[InputHint],
    highlight_color: Color,
    theme: &Theme,
) {
    let hints_y = area.y + area.height.saturating_sub(1);
    let hints_area = Rect::new(area.x, hints_y, area.width, 1);

    let mut spans = Vec::new();
    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.muted()));
        }
        spans.push(Span::styled(
            hint.key,
            Style::default().fg(highlight_color).bg(theme.background),
        ));
        spans.push(Span::styled(format!(" {}", hint.action), theme.muted()));
    }

    let para = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(para, hints_area);
}

/// Renders a horizontal separator `y_offset` rows into `area`.
pub fn render_separator(frame: &mut Frame, area: Rect, y_offset: u16, theme: &Theme) {
    if y_offset >= area.height {
        return;
    }
    let separator = "─".repeat(area.width as usize);
    let separator_area = Rect::new(area.x, area.y + y_offset, area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(separator, theme.muted()))),
        separator_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_area_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(calculate_overlay_area(area, 40, 10), Rect::new(20, 7, 40, 10));

        let tiny = Rect::new(0, 0, 20, 6);
        let popup = calculate_overlay_area(tiny, 40, 10);
        assert_eq!((popup.width, popup.height), (16, 4));
    }
}
