//! Yes/no prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{DialogStep, ModalDialog};
use crate::overlays::render_utils::{InputHint, OverlayConfig, render_overlay};
use crate::theme::Theme;

/// Yes/No question. Escape answers "no".
#[derive(Debug, Clone)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub yes_selected: bool,
}

impl ConfirmDialog {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            yes_selected: true,
        }
    }
}

impl ModalDialog for ConfirmDialog {
    type Output = bool;

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('y' | 'Y') if !ctrl => DialogStep::Done(true),
            KeyCode::Char('n' | 'N') if !ctrl => DialogStep::Done(false),
            KeyCode::Esc => DialogStep::Done(false),
            KeyCode::Char('c') if ctrl => DialogStep::Done(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.yes_selected = !self.yes_selected;
                DialogStep::Continue
            }
            KeyCode::Enter => DialogStep::Done(self.yes_selected),
            _ => DialogStep::Continue,
        }
    }

    fn dismissed(&self) -> bool {
        false
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let hints = [
            InputHint::new("y/n", "answer"),
            InputHint::new("←→", "switch"),
            InputHint::new("Esc", "no"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: &self.title,
                border_color: theme.warning,
                width: 56,
                height: 8,
                hints: &hints,
                theme,
            },
        );

        let body = layout.body;
        let message_area = Rect::new(
            body.x + 1,
            body.y,
            body.width.saturating_sub(2),
            body.height.saturating_sub(1),
        );
        frame.render_widget(
            Paragraph::new(self.message.as_str())
                .style(theme.base())
                .wrap(Wrap { trim: true }),
            message_area,
        );

        let button = |label: &'static str, selected: bool| {
            if selected {
                Span::styled(format!("[ {label} ]"), theme.selected())
            } else {
                Span::styled(format!("  {label}  "), theme.muted())
            }
        };
        let buttons = Line::from(vec![
            button("Yes", self.yes_selected),
            Span::styled("   ", theme.base()),
            button("No", !self.yes_selected),
        ]);
        let buttons_area = Rect::new(body.x, body.y + body.height.saturating_sub(1), body.width, 1);
        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            buttons_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn letter_answers() {
        let mut dialog = ConfirmDialog::new("Quit", "Do you want to quit?");
        assert_eq!(dialog.handle_key(key(KeyCode::Char('y'))), DialogStep::Done(true));
        assert_eq!(dialog.handle_key(key(KeyCode::Char('N'))), DialogStep::Done(false));
    }

    #[test]
    fn escape_means_no() {
        let mut dialog = ConfirmDialog::new("Quit", "Do you want to quit?");
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), DialogStep::Done(false));
        assert!(!dialog.dismissed());
    }

    #[test]
    fn arrows_then_enter() {
        let mut dialog = ConfirmDialog::new("New File", "Start over?");
        assert_eq!(dialog.handle_key(key(KeyCode::Right)), DialogStep::Continue);
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Done(false));

        let mut dialog = ConfirmDialog::new("New File", "Start over?");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Done(true));
    }
}
