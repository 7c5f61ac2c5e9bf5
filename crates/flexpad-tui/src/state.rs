//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── editor: EditorState     (buffer, scroll)
//! │   ├── document: DocumentView  (title, stats, dirty; mirrors the session)
//! │   ├── appearance / font_weight / wrap
//! │   └── status: StatusLine
//! └── overlay: Option<Overlay>    (File menu, Format)
//! ```
//!
//! The document session itself lives in the runtime's `DocumentController`,
//! not here. The view only keeps the mirror it needs to render.

use flexpad_core::DocumentStats;
use flexpad_core::config::{Appearance, Config, FontWeight};

use crate::events::DocumentSnapshot;
use crate::features::editor::{EditorState, Viewport};
use crate::features::statusline::StatusLine;
use crate::overlays::Overlay;
use crate::theme::Theme;

/// Combined application state.
///
/// Split so overlay handlers can take `&mut Overlay` and `&TuiState` at once.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config, content: &str, snapshot: DocumentSnapshot) -> Self {
        Self {
            tui: TuiState::new(config, content, snapshot),
            overlay: None,
        }
    }
}

/// View-side copy of the session fields the UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub title: String,
    pub stats: DocumentStats,
    pub dirty: bool,
}

/// Non-overlay UI state.
pub struct TuiState {
    pub should_quit: bool,
    pub editor: EditorState,
    pub document: DocumentView,
    pub appearance: Appearance,
    pub font_weight: FontWeight,
    pub wrap: bool,
    pub status: StatusLine,
    /// Text area size, updated from `Frame` events.
    pub viewport: Viewport,
}

impl TuiState {
    pub fn new(config: &Config, content: &str, snapshot: DocumentSnapshot) -> Self {
        Self {
            should_quit: false,
            editor: EditorState::new(content),
            document: DocumentView {
                title: snapshot.title,
                stats: snapshot.stats,
                dirty: snapshot.dirty,
            },
            appearance: config.appearance,
            font_weight: config.font_weight,
            wrap: config.wrap,
            status: StatusLine::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::for_appearance(self.appearance)
    }

    /// Mirrors a session snapshot, reloading the editor when content changed.
    pub fn apply_snapshot(&mut self, snapshot: DocumentSnapshot) {
        self.document.title = snapshot.title;
        self.document.stats = snapshot.stats;
        self.document.dirty = snapshot.dirty;
        if let Some(content) = snapshot.content {
            self.editor.set_text(&content);
        }
    }
}
