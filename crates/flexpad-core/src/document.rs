//! Document session controller.
//!
//! Decides when the open document is persisted and reconciles autosave with
//! user-initiated save, open, new and close. Every operation runs on the UI
//! thread; prompts block until the user answers.
//!
//! Filesystem failures are logged and swallowed: callers get an outcome, never
//! an error, and the user only ever sees confirmation prompts.

use std::path::{Path, PathBuf, is_separator};
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::session::Session;
use crate::storage::{LocalStorage, Storage};

/// Extension appended by save choosers when the user gives none.
pub const DEFAULT_EXTENSION: &str = ".txt";

/// A file-type filter offered by the choosers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub label: &'static str,
    pub pattern: &'static str,
}

impl FileFilter {
    pub const TEXT: FileFilter = FileFilter {
        label: "Text files",
        pattern: "*.txt",
    };
    pub const ALL: FileFilter = FileFilter {
        label: "All files",
        pattern: "*.*",
    };

    /// Returns true if the file name of `path` matches the filter pattern.
    ///
    /// Only the `*` and `*.ext` forms are understood; `*.*` matches anything.
    pub fn matches(&self, path: &Path) -> bool {
        match self.pattern {
            "*" | "*.*" => true,
            pattern => match pattern.strip_prefix("*.") {
                Some(ext) => path
                    .extension()
                    .is_some_and(|e| e.to_string_lossy().eq_ignore_ascii_case(ext)),
                None => path
                    .file_name()
                    .is_some_and(|name| name.to_string_lossy() == pattern),
            },
        }
    }
}

/// Filters offered by the save chooser.
pub const SAVE_FILTERS: &[FileFilter] = &[FileFilter::TEXT, FileFilter::ALL];

/// Appends `default_ext` (e.g. ".txt") when `path` has no extension.
///
/// Paths without a file name, or ending in a separator, are returned as is.
pub fn with_default_extension(path: PathBuf, default_ext: &str) -> PathBuf {
    if path.extension().is_some() || default_ext.is_empty() || !names_file(&path) {
        return path;
    }
    let mut name = path.into_os_string();
    if !default_ext.starts_with('.') {
        name.push(".");
    }
    name.push(default_ext);
    PathBuf::from(name)
}

/// Whether `path` ends in a file name rather than a directory marker.
pub fn names_file(path: &Path) -> bool {
    path.file_name().is_some() && !path.to_string_lossy().ends_with(is_separator)
}

/// Blocking user prompts.
///
/// Implementations run their own modal loop and return once the user answered.
pub trait Dialogs {
    /// Asks a yes/no question. Dismissing the prompt counts as "no".
    fn ask_yes_no(&mut self, title: &str, message: &str) -> bool;

    /// Asks for an existing file to open. `None` means canceled.
    fn choose_open_path(&mut self, filter: &FileFilter) -> Option<PathBuf>;

    /// Asks for a destination to save to. `None` means canceled.
    fn choose_save_path(&mut self, default_ext: &str, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// What triggered a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTrigger {
    /// The user asked for it (menu or shortcut).
    Manual,
    /// The user accepted the autosave "save now?" prompt.
    AutosavePrompt,
}

/// Result of a controller operation.
///
/// Abandonments (declined prompt, canceled chooser) and swallowed failures are
/// outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Content written to `path`, session bound to it.
    Saved { path: PathBuf, trigger: SaveTrigger },
    /// Timer-driven write to the existing backing path.
    Autosaved(PathBuf),
    /// Content replaced with the file at `path`.
    Opened(PathBuf),
    /// Content cleared for a new document.
    Cleared,
    /// The user confirmed quitting.
    Quit,
    /// A confirmation prompt was declined.
    Declined,
    /// A chooser was canceled.
    Canceled,
    /// A read or write failed; already logged.
    Failed,
    /// Nothing to do (e.g. the autosave deadline has not passed).
    Idle,
}

impl DocumentOutcome {
    /// True when the text widget must be reloaded from the session.
    pub fn replaces_content(&self) -> bool {
        matches!(self, DocumentOutcome::Opened(_) | DocumentOutcome::Cleared)
    }
}

/// Owns the session and coordinates persistence.
#[derive(Debug)]
pub struct DocumentController<S = LocalStorage> {
    session: Session,
    storage: S,
}

impl<S: Storage> DocumentController<S> {
    pub fn new(storage: S, initial: impl Into<String>, autosave_delay: Option<Duration>) -> Self {
        Self {
            session: Session::new(initial, autosave_delay),
            storage,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Records a content change from the text widget.
    ///
    /// Replaces the pending autosave deadline with `now + delay`.
    pub fn on_edit(&mut self, content: impl Into<String>, now: Instant) {
        self.session.record_edit(content.into(), now);
    }

    /// Returns true once the autosave deadline has passed.
    pub fn autosave_due(&self, now: Instant) -> bool {
        self.session.autosave().is_due(now)
    }

    /// Time left until autosave should run, if one is pending.
    pub fn time_until_autosave(&self, now: Instant) -> Option<Duration> {
        self.session.autosave().time_until_due(now)
    }

    /// Runs autosave if its deadline has passed.
    pub fn poll_autosave<D: Dialogs + ?Sized>(
        &mut self,
        now: Instant,
        dialogs: &mut D,
    ) -> DocumentOutcome {
        if self.session.take_autosave_due(now) {
            self.autosave(dialogs)
        } else {
            DocumentOutcome::Idle
        }
    }

    /// Timer callback.
    ///
    /// An unbound document asks before saving; declining skips this cycle and
    /// schedules nothing. A bound document is overwritten with the current
    /// content. Write failures are logged and not retried until the next edit.
    pub fn autosave<D: Dialogs + ?Sized>(&mut self, dialogs: &mut D) -> DocumentOutcome {
        self.session.cancel_autosave();

        let Some(path) = self.session.backing_path().map(Path::to_path_buf) else {
            if dialogs.ask_yes_no("Save File", "File not saved yet. Do you want to save now?") {
                return self.save(SaveTrigger::AutosavePrompt, dialogs);
            }
            info!("Autosave skipped: document has no file yet");
            return DocumentOutcome::Declined;
        };

        match self.storage.write_text(&path, self.session.content()) {
            Ok(()) => {
                info!("Autosaved to {}", path.display());
                self.session.mark_saved(path.clone());
                DocumentOutcome::Autosaved(path)
            }
            Err(err) => {
                error!(path = %path.display(), "Autosave failed: {err}");
                DocumentOutcome::Failed
            }
        }
    }

    /// Writes the full content to the backing path, asking for one if unset.
    pub fn save<D: Dialogs + ?Sized>(
        &mut self,
        trigger: SaveTrigger,
        dialogs: &mut D,
    ) -> DocumentOutcome {
        let path = match self.session.backing_path() {
            Some(path) => path.to_path_buf(),
            None => match dialogs.choose_save_path(DEFAULT_EXTENSION, SAVE_FILTERS) {
                Some(path) => path,
                None => return DocumentOutcome::Canceled,
            },
        };

        match self.storage.write_text(&path, self.session.content()) {
            Ok(()) => {
                info!(?trigger, "Saved to {}", path.display());
                self.session.mark_saved(path.clone());
                DocumentOutcome::Saved { path, trigger }
            }
            Err(err) => {
                error!(path = %path.display(), "Error saving file: {err}");
                DocumentOutcome::Failed
            }
        }
    }

    /// Replaces the content with the file at `path` and binds to it.
    ///
    /// On failure the session is left exactly as it was.
    pub fn open(&mut self, path: &Path) -> DocumentOutcome {
        match self.storage.read_text(path) {
            Ok(content) => {
                info!("Opened {}", path.display());
                self.session.load(path.to_path_buf(), content);
                DocumentOutcome::Opened(path.to_path_buf())
            }
            Err(err) => {
                error!(path = %path.display(), "Error opening file: {err}");
                DocumentOutcome::Failed
            }
        }
    }

    /// Asks for a text file, then opens it.
    pub fn open_with_chooser<D: Dialogs + ?Sized>(&mut self, dialogs: &mut D) -> DocumentOutcome {
        match dialogs.choose_open_path(&FileFilter::TEXT) {
            Some(path) => self.open(&path),
            None => DocumentOutcome::Canceled,
        }
    }

    /// Clears the document after confirmation.
    pub fn new_document<D: Dialogs + ?Sized>(&mut self, dialogs: &mut D) -> DocumentOutcome {
        if !dialogs.ask_yes_no(
            "New File",
            "Are you sure you want to start a new file? Unsaved changes will be lost.",
        ) {
            return DocumentOutcome::Declined;
        }
        self.session.clear();
        info!("Started a new document");
        DocumentOutcome::Cleared
    }

    /// Asks whether to quit. Nothing is saved either way.
    pub fn close<D: Dialogs + ?Sized>(&mut self, dialogs: &mut D) -> DocumentOutcome {
        if dialogs.ask_yes_no("Quit", "Do you want to quit? Unsaved changes will be lost.") {
            if self.session.is_dirty() {
                info!("Quitting with unsaved changes");
            }
            DocumentOutcome::Quit
        } else {
            DocumentOutcome::Declined
        }
    }
}
