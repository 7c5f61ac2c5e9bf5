//! Save chooser: a path input resolved against the working directory.

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flexpad_core::FileFilter;
use flexpad_core::document::{names_file, with_default_extension};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{DialogStep, ModalDialog};
use crate::overlays::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay,
};
use crate::theme::Theme;

#[derive(Debug)]
pub struct SaveAsDialog {
    root: PathBuf,
    default_ext: String,
    filters: Vec<FileFilter>,
    filter_idx: usize,
    input: String,
    error: Option<String>,
    /// Existing file awaiting a replace confirmation.
    replace: Option<PathBuf>,
}

impl SaveAsDialog {
    pub fn new(root: &Path, default_ext: &str, filters: &[FileFilter]) -> Self {
        let filters = if filters.is_empty() {
            vec![FileFilter::ALL]
        } else {
            filters.to_vec()
        };
        Self {
            root: root.to_path_buf(),
            default_ext: default_ext.to_string(),
            filters,
            filter_idx: 0,
            input: String::new(),
            error: None,
            replace: None,
        }
    }

    pub fn filter(&self) -> FileFilter {
        self.filters[self.filter_idx]
    }

    /// Destination for the current input.
    ///
    /// The default extension is added when the name has none, unless the
    /// "All files" filter is selected.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        let path = self.typed_path()?;
        if self.filter() == FileFilter::ALL {
            Some(path)
        } else {
            Some(with_default_extension(path, &self.default_ext))
        }
    }

    /// Input joined onto the working directory, without extension handling.
    fn typed_path(&self) -> Option<PathBuf> {
        let typed = self.input.trim();
        if typed.is_empty() {
            return None;
        }
        let path = Path::new(typed);
        Some(if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        })
    }

    fn submit(&mut self) -> DialogStep<Option<PathBuf>> {
        let Some(typed) = self.typed_path() else {
            self.error = Some("File name cannot be empty".to_string());
            return DialogStep::Continue;
        };
        if !names_file(&typed) || typed.is_dir() {
            self.error = Some("That is a directory".to_string());
            return DialogStep::Continue;
        }
        let Some(path) = self.resolved_path() else {
            return DialogStep::Continue;
        };
        if path.is_dir() {
            self.error = Some("That is a directory".to_string());
            DialogStep::Continue
        } else if path.is_file() {
            self.replace = Some(path);
            DialogStep::Continue
        } else {
            DialogStep::Done(Some(path))
        }
    }

    /// Answers the replace question. Anything but Enter or `y` returns to
    /// editing the name.
    fn confirm_replace(path: PathBuf, key: KeyEvent) -> DialogStep<Option<PathBuf>> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y' | 'Y') => DialogStep::Done(Some(path)),
            _ => DialogStep::Continue,
        }
    }
}

impl ModalDialog for SaveAsDialog {
    type Output = Option<PathBuf>;

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Option<PathBuf>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if let Some(path) = self.replace.take() {
            return Self::confirm_replace(path, key);
        }

        if !matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            self.error = None;
        }

        match key.code {
            KeyCode::Esc => DialogStep::Done(None),
            KeyCode::Char('c') if ctrl => DialogStep::Done(None),
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.filter_idx = (self.filter_idx + 1) % self.filters.len();
                DialogStep::Continue
            }
            KeyCode::Backspace => {
                self.input.pop();
                DialogStep::Continue
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                DialogStep::Continue
            }
            _ => DialogStep::Continue,
        }
    }

    fn handle_paste(&mut self, text: &str) {
        self.input.push_str(text.lines().next().unwrap_or(""));
    }

    fn dismissed(&self) -> Option<PathBuf> {
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let hints = [
            InputHint::new("Tab", "file type"),
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Save As",
                border_color: theme.accent,
                width: 64,
                height: 7,
                hints: &hints,
                theme,
            },
        );

        let body = layout.body;
        let placeholder = format!("file name (default {})", self.default_ext);
        render_input_line(
            frame,
            Rect::new(body.x, body.y, body.width, 1),
            &InputLine {
                value: &self.input,
                placeholder: Some(&placeholder),
                prompt: "> ",
                theme,
            },
        );

        let filter = self.filter();
        let warning = Style::default().fg(theme.warning).bg(theme.background);
        let mut info = vec![
            Span::styled(" Type: ", theme.muted()),
            Span::styled(format!("{} ({})", filter.label, filter.pattern), theme.base()),
        ];
        if let Some(path) = &self.replace {
            let name = path
                .file_name()
                .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy());
            info = vec![Span::styled(
                format!(" Replace {name}? Enter/y to confirm, any other key to edit"),
                warning,
            )];
        } else if let Some(error) = &self.error {
            info.push(Span::styled(format!("  {error}"), warning));
        }
        if body.height > 2 {
            frame.render_widget(
                Paragraph::new(Line::from(info)),
                Rect::new(body.x, body.y + 2, body.width, 1),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use flexpad_core::document::{DEFAULT_EXTENSION, SAVE_FILTERS};
    use tempfile::tempdir;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog() -> SaveAsDialog {
        SaveAsDialog::new(Path::new("/work"), DEFAULT_EXTENSION, SAVE_FILTERS)
    }

    fn type_str(dialog: &mut SaveAsDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn appends_default_extension() {
        let mut dialog = dialog();
        type_str(&mut dialog, "notes");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(PathBuf::from("/work/notes.txt")))
        );
    }

    #[test]
    fn keeps_explicit_extension() {
        let mut dialog = dialog();
        type_str(&mut dialog, "/tmp/a.md");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(PathBuf::from("/tmp/a.md")))
        );
    }

    #[test]
    fn all_files_filter_uses_name_as_typed() {
        let mut dialog = dialog();
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.filter(), FileFilter::ALL);
        type_str(&mut dialog, "Makefile");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(PathBuf::from("/work/Makefile")))
        );
    }

    #[test]
    fn empty_name_stays_open() {
        let mut dialog = dialog();
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert!(dialog.error.is_some());
    }

    #[test]
    fn directory_is_rejected() {
        let dir = tempdir().unwrap();
        let mut dialog = SaveAsDialog::new(dir.path(), "", SAVE_FILTERS);
        type_str(&mut dialog, ".");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
    }

    #[test]
    fn trailing_separator_is_rejected() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        let mut dialog = SaveAsDialog::new(dir.path(), DEFAULT_EXTENSION, SAVE_FILTERS);
        type_str(&mut dialog, "docs/");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert_eq!(dialog.error.as_deref(), Some("That is a directory"));
        assert!(!dir.path().join("docs/.txt").exists());

        // Not created yet, still a directory name
        let mut dialog = SaveAsDialog::new(dir.path(), DEFAULT_EXTENSION, SAVE_FILTERS);
        type_str(&mut dialog, "drafts/");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert!(dialog.error.is_some());
    }

    #[test]
    fn existing_file_needs_confirmation() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("keep.txt");
        fs::write(&existing, "precious").unwrap();

        let mut dialog = SaveAsDialog::new(dir.path(), DEFAULT_EXTENSION, SAVE_FILTERS);
        type_str(&mut dialog, "keep");
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
        assert_eq!(dialog.replace.as_deref(), Some(existing.as_path()));
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(existing.clone()))
        );

        let mut dialog = SaveAsDialog::new(dir.path(), DEFAULT_EXTENSION, SAVE_FILTERS);
        type_str(&mut dialog, "keep");
        dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(
            dialog.handle_key(key(KeyCode::Char('y'))),
            DialogStep::Done(Some(existing))
        );
    }

    #[test]
    fn declining_replace_returns_to_editing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "precious").unwrap();

        let mut dialog = SaveAsDialog::new(dir.path(), DEFAULT_EXTENSION, SAVE_FILTERS);
        type_str(&mut dialog, "keep");
        dialog.handle_key(key(KeyCode::Enter));
        assert_eq!(dialog.handle_key(key(KeyCode::Char('n'))), DialogStep::Continue);
        assert!(dialog.replace.is_none());

        type_str(&mut dialog, "2");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(dir.path().join("keep2.txt")))
        );
    }

    #[test]
    fn escape_cancels() {
        let mut dialog = dialog();
        type_str(&mut dialog, "draft");
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), DialogStep::Done(None));
    }
}
