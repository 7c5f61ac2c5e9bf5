//! Blocking prompts: yes/no confirmation and the open/save file choosers.
//!
//! A dialog is a small state machine. The runtime drives it in a nested loop
//! (`runtime::modal`) until it returns `DialogStep::Done`, drawing the editor
//! underneath on every iteration.

pub mod confirm;
pub mod open_file;
pub mod save_as;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use confirm::ConfirmDialog;
pub use open_file::{OpenFileDialog, discover_files};
pub use save_as::SaveAsDialog;

use crate::theme::Theme;

/// Result of feeding a key to a dialog.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogStep<T> {
    Continue,
    Done(T),
}

/// A modal prompt with a typed answer.
pub trait ModalDialog {
    type Output;

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Self::Output>;

    /// Pasted text; ignored unless the dialog has a text field.
    fn handle_paste(&mut self, _text: &str) {}

    /// Answer used when the dialog cannot be shown or is torn down.
    fn dismissed(&self) -> Self::Output;
}
