//! Footer status line: document stats, modified marker, last message.

use std::path::Path;

use flexpad_core::DocumentOutcome;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::state::TuiState;
use crate::theme::Theme;

/// Transient message shown on the right of the status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub message: Option<String>,
}

impl StatusLine {
    pub fn set(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Updates the message from a document outcome.
    ///
    /// Abandoned prompts leave the current message alone.
    pub fn on_outcome(&mut self, outcome: &DocumentOutcome) {
        match outcome {
            DocumentOutcome::Saved { path, .. } => self.set(format!("Saved {}", file_name(path))),
            DocumentOutcome::Autosaved(path) => {
                self.set(format!("Autosaved {}", file_name(path)));
            }
            DocumentOutcome::Opened(path) => self.set(format!("Opened {}", file_name(path))),
            DocumentOutcome::Cleared => self.set("New document"),
            DocumentOutcome::Failed => self.set("File operation failed (see log)"),
            DocumentOutcome::Quit
            | DocumentOutcome::Declined
            | DocumentOutcome::Canceled
            | DocumentOutcome::Idle => {}
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

pub fn render_status_line(frame: &mut Frame, area: Rect, tui: &TuiState, theme: &Theme) {
    let mut left = vec![Span::styled(format!(" {}", tui.document.stats), theme.base())];
    if tui.document.dirty {
        left.push(Span::styled(
            "  ● modified",
            Style::default().fg(theme.warning).bg(theme.background),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(left)).style(theme.base()), area);

    if let Some(message) = &tui.status.message {
        let max = (area.width as usize).saturating_sub(2) / 2;
        let text = format!("{} ", truncate_with_ellipsis(message, max));
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(text, theme.muted())))
                .alignment(Alignment::Right),
            area,
        );
    }
}
