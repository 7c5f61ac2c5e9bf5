//! Non-blocking overlays: the File menu and the Format picker.
//!
//! Overlays take over keyboard input while open but never block the event
//! loop. Blocking prompts (confirmations, file choosers) live in `dialogs`.
//!
//! - `file_menu.rs`: New / Open / Save / Exit
//! - `format.rs`: font weight and word wrap
//! - `render_utils.rs`: shared popup rendering

pub mod file_menu;
pub mod format;
pub mod render_utils;

use crossterm::event::KeyEvent;
pub use file_menu::{FileMenuItem, FileMenuState};
pub use format::FormatState;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::state::TuiState;
use crate::theme::Theme;

/// Requests to open a new overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    FileMenu,
    Format,
}

/// Transition returned by overlay key handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    FileMenu(FileMenuState),
    Format(FormatState),
}

impl Overlay {
    /// Builds the overlay for `request` from current UI state.
    pub fn open(request: OverlayRequest, tui: &TuiState) -> Self {
        match request {
            OverlayRequest::FileMenu => Overlay::FileMenu(FileMenuState::default()),
            OverlayRequest::Format => Overlay::Format(FormatState::open(tui)),
        }
    }

    pub fn request(&self) -> OverlayRequest {
        match self {
            Overlay::FileMenu(_) => OverlayRequest::FileMenu,
            Overlay::Format(_) => OverlayRequest::Format,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self {
            Overlay::FileMenu(m) => m.render(frame, area, theme),
            Overlay::Format(f) => f.render(frame, area, theme),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::FileMenu(m) => m.handle_key(key),
            Overlay::Format(f) => f.handle_key(key),
        }
    }
}

/// Extension trait for `Option<Overlay>`.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Opens `request`, or keeps the existing overlay if it is already open.
    ///
    /// A different open overlay is replaced.
    fn open_or_focus(&mut self, request: OverlayRequest, tui: &TuiState);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(overlay) = self {
            overlay.render(frame, area, theme);
        }
    }

    fn open_or_focus(&mut self, request: OverlayRequest, tui: &TuiState) {
        if self.as_ref().is_some_and(|o| o.request() == request) {
            return;
        }
        *self = Some(Overlay::open(request, tui));
    }
}
