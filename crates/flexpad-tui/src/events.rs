//! UI event types consumed by the reducer.

use crossterm::event::Event;
use flexpad_core::{DocumentOutcome, DocumentStats, Session};

/// Events fed to `update::update`.
#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,
    /// Current terminal size, sent before other events each loop iteration.
    Frame { width: u16, height: u16 },
    /// Raw terminal input.
    Terminal(Event),
    /// The autosave deadline has passed.
    AutosaveDue,
    /// A document operation finished (or the session changed after an edit).
    Document {
        outcome: DocumentOutcome,
        snapshot: DocumentSnapshot,
    },
}

/// What the view needs to know about the session after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    pub title: String,
    pub stats: DocumentStats,
    pub dirty: bool,
    /// Full content, present only when the editor must be reloaded.
    pub content: Option<String>,
}

impl DocumentSnapshot {
    pub fn of(session: &Session, outcome: &DocumentOutcome) -> Self {
        Self {
            title: session.title().to_string(),
            stats: session.stats(),
            dirty: session.is_dirty(),
            content: outcome
                .replaces_content()
                .then(|| session.content().to_string()),
        }
    }
}
