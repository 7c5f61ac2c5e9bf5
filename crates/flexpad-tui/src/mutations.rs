//! State mutations returned by overlays and applied by the reducer.

use flexpad_core::config::FontWeight;

use crate::state::TuiState;

/// A change to non-overlay UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    SetFontWeight(FontWeight),
    SetWrap(bool),
    ToggleAppearance,
    SetStatus(String),
}

impl StateMutation {
    pub fn apply(self, tui: &mut TuiState) {
        match self {
            StateMutation::SetFontWeight(weight) => tui.font_weight = weight,
            StateMutation::SetWrap(wrap) => tui.wrap = wrap,
            StateMutation::ToggleAppearance => tui.appearance = tui.appearance.toggled(),
            StateMutation::SetStatus(message) => tui.status.set(message),
        }
    }
}
