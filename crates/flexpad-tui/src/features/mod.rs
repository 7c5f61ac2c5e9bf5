//! Feature slices for the TUI (state/update/render per slice).

pub mod editor;
pub mod statusline;
