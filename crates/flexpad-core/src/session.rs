//! In-memory state of the single open document.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::autosave::AutosaveTimer;

/// Application name used in window titles.
pub const APP_NAME: &str = "FlexPad";

/// Content of a fresh session when the welcome text is enabled.
pub const WELCOME_TEXT: &str = "Welcome to FlexPad!\nStart typing your masterpiece here...";

/// Display-only line and character counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStats {
    pub lines: usize,
    pub characters: usize,
}

impl DocumentStats {
    /// Counts lines and characters of `content`.
    ///
    /// Empty content has zero lines; otherwise every newline starts a line.
    pub fn of(content: &str) -> Self {
        let lines = if content.is_empty() {
            0
        } else {
            content.matches('\n').count() + 1
        };
        Self {
            lines,
            characters: content.chars().count(),
        }
    }
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lines: {}  Characters: {}", self.lines, self.characters)
    }
}

/// Window title for a document bound to `path`.
pub fn title_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    format!("{APP_NAME} - {name}")
}

/// The single open document.
///
/// `backing_path` is `None` until the content has been successfully written
/// to, or read from, a named file.
#[derive(Debug)]
pub struct Session {
    content: String,
    backing_path: Option<PathBuf>,
    dirty: bool,
    autosave: AutosaveTimer,
    title: String,
    stats: DocumentStats,
}

impl Session {
    pub fn new(initial: impl Into<String>, autosave_delay: Option<Duration>) -> Self {
        let content = initial.into();
        let stats = DocumentStats::of(&content);
        Self {
            content,
            backing_path: None,
            dirty: false,
            autosave: AutosaveTimer::new(autosave_delay),
            title: format!("{APP_NAME} - Text Editor"),
            stats,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn backing_path(&self) -> Option<&Path> {
        self.backing_path.as_deref()
    }

    /// True when the content changed since it was last saved, opened or cleared.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn stats(&self) -> DocumentStats {
        self.stats
    }

    pub fn autosave(&self) -> &AutosaveTimer {
        &self.autosave
    }

    /// Records a user edit: new content, dirty, and a fresh autosave deadline.
    pub(crate) fn record_edit(&mut self, content: String, now: Instant) {
        self.content = content;
        self.dirty = true;
        self.autosave.reschedule(now);
        self.stats = DocumentStats::of(&self.content);
    }

    /// Consumes the autosave deadline if it has passed.
    pub(crate) fn take_autosave_due(&mut self, now: Instant) -> bool {
        self.autosave.take_due(now)
    }

    pub(crate) fn cancel_autosave(&mut self) {
        self.autosave.cancel();
    }

    /// Binds the session to `path` after a successful write.
    pub(crate) fn mark_saved(&mut self, path: PathBuf) {
        self.title = title_for(&path);
        self.backing_path = Some(path);
        self.dirty = false;
        self.autosave.cancel();
    }

    /// Replaces the content with a file's text and binds to its path.
    pub(crate) fn load(&mut self, path: PathBuf, content: String) {
        self.content = content;
        self.stats = DocumentStats::of(&self.content);
        self.mark_saved(path);
    }

    /// Resets to an empty, never-saved document.
    pub(crate) fn clear(&mut self) {
        self.content.clear();
        self.stats = DocumentStats::default();
        self.backing_path = None;
        self.dirty = false;
        self.autosave.cancel();
        self.title = format!("{APP_NAME} - New");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_empty_content() {
        assert_eq!(DocumentStats::of(""), DocumentStats::default());
    }

    #[test]
    fn stats_count_lines_and_chars() {
        let stats = DocumentStats::of("Hello\nWorld");
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.characters, 11);

        // Trailing newline opens a new (empty) line.
        assert_eq!(DocumentStats::of("a\n").lines, 2);
        // Characters, not bytes.
        assert_eq!(DocumentStats::of("héllo").characters, 5);
    }

    #[test]
    fn stats_display() {
        assert_eq!(
            DocumentStats::of("Hello\nWorld").to_string(),
            "Lines: 2  Characters: 11"
        );
    }

    #[test]
    fn title_uses_file_name() {
        assert_eq!(title_for(Path::new("/tmp/notes/a.txt")), "FlexPad - a.txt");
    }

    #[test]
    fn new_session_is_unbound_and_clean() {
        let session = Session::new(WELCOME_TEXT, Some(Duration::from_secs(60)));
        assert_eq!(session.backing_path(), None);
        assert!(!session.is_dirty());
        assert!(!session.autosave().is_pending());
        assert_eq!(session.title(), "FlexPad - Text Editor");
        assert_eq!(session.stats().lines, 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::new("text", Some(Duration::from_secs(60)));
        session.record_edit("more text".to_string(), Instant::now());
        session.mark_saved(PathBuf::from("/tmp/a.txt"));
        session.record_edit("edited".to_string(), Instant::now());

        session.clear();
        assert_eq!(session.content(), "");
        assert_eq!(session.backing_path(), None);
        assert!(!session.is_dirty());
        assert!(!session.autosave().is_pending());
        assert_eq!(session.title(), "FlexPad - New");
    }
}
