//! File menu overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::theme::Theme;

/// Entries of the File menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMenuItem {
    New,
    Open,
    Save,
    Exit,
}

impl FileMenuItem {
    pub const ALL: [FileMenuItem; 4] = [
        FileMenuItem::New,
        FileMenuItem::Open,
        FileMenuItem::Save,
        FileMenuItem::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FileMenuItem::New => "New",
            FileMenuItem::Open => "Open…",
            FileMenuItem::Save => "Save",
            FileMenuItem::Exit => "Exit",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            FileMenuItem::New => "Ctrl+N",
            FileMenuItem::Open => "Ctrl+O",
            FileMenuItem::Save => "Ctrl+S",
            FileMenuItem::Exit => "Ctrl+Q",
        }
    }

    fn mnemonic(self) -> char {
        match self {
            FileMenuItem::New => 'n',
            FileMenuItem::Open => 'o',
            FileMenuItem::Save => 's',
            FileMenuItem::Exit => 'x',
        }
    }

    /// Exit goes through the quit confirmation like every other close path.
    pub fn effect(self) -> UiEffect {
        match self {
            FileMenuItem::New => UiEffect::NewDocument,
            FileMenuItem::Open => UiEffect::Open,
            FileMenuItem::Save => UiEffect::Save,
            FileMenuItem::Exit => UiEffect::Close,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FileMenuState {
    pub selected: usize,
}

impl FileMenuState {
    pub fn selected_item(&self) -> FileMenuItem {
        FileMenuItem::ALL[self.selected.min(FileMenuItem::ALL.len() - 1)]
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc | KeyCode::F(1) => OverlayUpdate::close(),
            KeyCode::Char('c' | 'f') if ctrl => OverlayUpdate::close(),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                OverlayUpdate::stay()
            }
            KeyCode::Down => {
                if self.selected + 1 < FileMenuItem::ALL.len() {
                    self.selected += 1;
                }
                OverlayUpdate::stay()
            }
            KeyCode::Enter => choose(self.selected_item()),
            KeyCode::Char(c) if !ctrl => {
                let c = c.to_ascii_lowercase();
                match FileMenuItem::ALL.iter().find(|item| item.mnemonic() == c) {
                    Some(&item) => choose(item),
                    None => OverlayUpdate::stay(),
                }
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        use super::render_utils::{InputHint, OverlayConfig, render_overlay};

        let hints = [
            InputHint::new("↑↓", "navigate"),
            InputHint::new("Enter", "select"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "File",
                border_color: theme.accent,
                width: 40,
                height: FileMenuItem::ALL.len() as u16 + 3,
                hints: &hints,
                theme,
            },
        );

        let label_width = layout.body.width.saturating_sub(2) as usize;
        let items: Vec<ListItem> = FileMenuItem::ALL
            .iter()
            .map(|item| {
                let shortcut_width = label_width.saturating_sub(item.label().chars().count());
                ListItem::new(Line::from(vec![
                    Span::styled(item.label(), theme.base()),
                    Span::styled(
                        format!("{:>shortcut_width$}", item.shortcut()),
                        theme.muted(),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .style(theme.base())
            .highlight_style(theme.selected())
            .highlight_symbol("▶ ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));
        frame.render_stateful_widget(list, layout.body, &mut list_state);
    }
}

fn choose(item: FileMenuItem) -> OverlayUpdate {
    OverlayUpdate::close().with_ui_effects(vec![item.effect()])
}
