//! Format picker: font weight and word wrap.
//!
//! Changes are staged in the overlay and applied together on Enter, so Esc
//! leaves the text area exactly as it was.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flexpad_core::config::FontWeight;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::OverlayUpdate;
use crate::mutations::StateMutation;
use crate::state::TuiState;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatField {
    FontWeight,
    Wrap,
}

#[derive(Debug, Clone)]
pub struct FormatState {
    pub font_weight: FontWeight,
    pub wrap: bool,
    pub focused: FormatField,
}

impl FormatState {
    pub fn open(tui: &TuiState) -> Self {
        Self {
            font_weight: tui.font_weight,
            wrap: tui.wrap,
            focused: FormatField::FontWeight,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => OverlayUpdate::close(),
            KeyCode::Char('c' | 't') if ctrl => OverlayUpdate::close(),
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => {
                self.focused = match self.focused {
                    FormatField::FontWeight => FormatField::Wrap,
                    FormatField::Wrap => FormatField::FontWeight,
                };
                OverlayUpdate::stay()
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.cycle();
                OverlayUpdate::stay()
            }
            KeyCode::Enter => OverlayUpdate::close().with_mutations(vec![
                StateMutation::SetFontWeight(self.font_weight),
                StateMutation::SetWrap(self.wrap),
                StateMutation::SetStatus(format!(
                    "Format: {}, wrap {}",
                    self.font_weight.display_name(),
                    if self.wrap { "on" } else { "off" }
                )),
            ]),
            _ => OverlayUpdate::stay(),
        }
    }

    fn cycle(&mut self) {
        match self.focused {
            FormatField::FontWeight => {
                let all = FontWeight::all();
                let idx = all.iter().position(|w| *w == self.font_weight).unwrap_or(0);
                self.font_weight = all[(idx + 1) % all.len()];
            }
            FormatField::Wrap => self.wrap = !self.wrap,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        use super::render_utils::{InputHint, OverlayConfig, render_overlay};

        let hints = [
            InputHint::new("↑↓", "field"),
            InputHint::new("←→", "change"),
            InputHint::new("Enter", "apply"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Format",
                border_color: theme.accent,
                width: 48,
                height: 6,
                hints: &hints,
                theme,
            },
        );

        let row = |field: FormatField, label: &str, value: &str| {
            let focused = self.focused == field;
            let value_style = if focused {
                theme.selected()
            } else {
                theme.base()
            };
            let mut label_style = theme.muted();
            if focused {
                label_style = label_style.add_modifier(Modifier::BOLD);
            }
            Line::from(vec![
                Span::styled(format!(" {label:<14}"), label_style),
                Span::styled(format!("◀ {value} ▶"), value_style),
            ])
        };

        let lines = vec![
            row(
                FormatField::FontWeight,
                "Font weight",
                self.font_weight.display_name(),
            ),
            row(FormatField::Wrap, "Word wrap", if self.wrap { "On" } else { "Off" }),
        ];
        frame.render_widget(Paragraph::new(lines).style(theme.base()), layout.body);
    }
}

#[cfg(test)]
mod tests {
    use flexpad_core::config::Config;

    use super::*;
    use crate::events::DocumentSnapshot;
    use crate::overlays::OverlayTransition;

    fn tui() -> TuiState {
        let snapshot = DocumentSnapshot {
            title: "FlexPad - Text Editor".to_string(),
            stats: flexpad_core::DocumentStats::default(),
            dirty: false,
            content: None,
        };
        TuiState::new(&Config::default(), "", snapshot)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn apply_emits_both_settings() {
        let tui = tui();
        let mut format = FormatState::open(&tui);
        format.handle_key(key(KeyCode::Right));
        format.handle_key(key(KeyCode::Down));
        format.handle_key(key(KeyCode::Char(' ')));

        let update = format.handle_key(key(KeyCode::Enter));
        assert_eq!(update.transition, OverlayTransition::Close);
        assert_eq!(
            update.mutations[..2],
            [
                StateMutation::SetFontWeight(FontWeight::Bold),
                StateMutation::SetWrap(!tui.wrap),
            ]
        );
    }

    #[test]
    fn escape_discards_staged_changes() {
        let tui = tui();
        let mut format = FormatState::open(&tui);
        format.handle_key(key(KeyCode::Right));
        let update = format.handle_key(key(KeyCode::Esc));
        assert_eq!(update.transition, OverlayTransition::Close);
        assert!(update.mutations.is_empty());
    }
}
