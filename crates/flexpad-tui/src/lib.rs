//! Full-screen terminal front end for FlexPad.

pub mod common;
pub mod dialogs;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::env;
use std::io::{IsTerminal, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use flexpad_core::config::Config;
use flexpad_core::session::WELCOME_TEXT;
use flexpad_core::{DocumentController, LocalStorage};
pub use runtime::EditorRuntime;

/// Runs the editor until the user confirms quitting.
///
/// `file` is opened before the first frame; if it cannot be read the editor
/// starts with the default content and the failure shows in the status line.
///
/// # Errors
/// Returns an error if stdout is not a terminal or the terminal cannot be set
/// up.
pub fn run_editor(config: &Config, file: Option<&Path>) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("FlexPad needs an interactive terminal.");
    }

    let initial = if config.welcome_text { WELCOME_TEXT } else { "" };
    let mut controller =
        DocumentController::new(LocalStorage, initial, config.autosave_delay());
    let startup = file.map(|path| controller.open(path));

    let root = env::current_dir().context("Failed to read the working directory")?;
    let mut runtime = EditorRuntime::new(config, controller, root)?;
    if let Some(outcome) = startup {
        runtime.state.tui.status.on_outcome(&outcome);
    }
    runtime.run()
}
