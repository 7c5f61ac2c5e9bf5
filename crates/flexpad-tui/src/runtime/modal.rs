//! Blocking prompts for the document controller.
//!
//! Each prompt runs a nested event loop on the UI thread, like a native
//! message box: the editor is drawn underneath but receives no input until the
//! prompt is answered.

use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use flexpad_core::{Dialogs, FileFilter};
use tracing::warn;

use super::IDLE_POLL_DURATION;
use crate::dialogs::{ConfirmDialog, DialogStep, ModalDialog, OpenFileDialog, SaveAsDialog};
use crate::render;
use crate::state::AppState;
use crate::terminal::EditorTerminal;

/// `Dialogs` backed by the terminal.
pub struct ModalDialogs<'a> {
    terminal: &'a mut EditorTerminal,
    view: &'a AppState,
    root: &'a Path,
}

impl<'a> ModalDialogs<'a> {
    pub fn new(terminal: &'a mut EditorTerminal, view: &'a AppState, root: &'a Path) -> Self {
        Self {
            terminal,
            view,
            root,
        }
    }

    /// Runs `dialog` to completion. A prompt that cannot be drawn or read
    /// counts as dismissed.
    fn run<D: ModalDialog>(&mut self, mut dialog: D) -> D::Output {
        match self.drive(&mut dialog) {
            Ok(output) => output,
            Err(err) => {
                warn!("Prompt failed, treating it as dismissed: {err:#}");
                dialog.dismissed()
            }
        }
    }

    fn drive<D: ModalDialog>(&mut self, dialog: &mut D) -> Result<D::Output> {
        let view = self.view;
        let theme = view.tui.theme();

        loop {
            self.terminal.draw(|frame| {
                let area = frame.area();
                render::render_with_cursor(view, frame, false);
                dialog.render(frame, area, &theme);
            })?;

            if !event::poll(IDLE_POLL_DURATION)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let DialogStep::Done(output) = dialog.handle_key(key) {
                        return Ok(output);
                    }
                }
                Event::Paste(text) => dialog.handle_paste(&text),
                _ => {}
            }
        }
    }
}

impl Dialogs for ModalDialogs<'_> {
    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool {
        self.run(ConfirmDialog::new(title, message))
    }

    fn choose_open_path(&mut self, filter: &FileFilter) -> Option<PathBuf> {
        let dialog = OpenFileDialog::open(self.root, *filter);
        self.run(dialog)
    }

    fn choose_save_path(&mut self, default_ext: &str, filters: &[FileFilter]) -> Option<PathBuf> {
        let dialog = SaveAsDialog::new(self.root, default_ext, filters);
        self.run(dialog)
    }
}
