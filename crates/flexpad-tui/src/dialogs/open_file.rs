//! Open chooser: fuzzy-filtered list of matching files below the working
//! directory, with a typed-path fallback.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::mem;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use flexpad_core::FileFilter;
use ignore::WalkBuilder;
use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::{DialogStep, ModalDialog};
use crate::common::truncate_start_with_ellipsis;
use crate::overlays::render_utils::{
    InputHint, InputLine, OverlayConfig, render_input_line, render_overlay, render_separator,
};
use crate::theme::Theme;

const MAX_VISIBLE_FILES: usize = 12;
const MAX_DEPTH: usize = 8;
const MAX_FILES: usize = 5_000;

/// A matched file with its score and matched byte indices.
#[derive(Debug, Clone)]
pub struct FileMatch {
    pub file_idx: usize,
    pub score: Option<i64>,
    pub match_indices: Vec<usize>,
}

#[derive(Debug)]
pub struct OpenFileDialog {
    root: PathBuf,
    filter: FileFilter,
    files: Vec<PathBuf>,
    filtered: Vec<FileMatch>,
    query: String,
    selected: usize,
    offset: usize,
}

impl OpenFileDialog {
    /// Scans `root` for files matching `filter`.
    pub fn open(root: &Path, filter: FileFilter) -> Self {
        let files = discover_files(root, &filter);
        Self::with_files(root, filter, files)
    }

    pub fn with_files(root: &Path, filter: FileFilter, files: Vec<PathBuf>) -> Self {
        let mut dialog = Self {
            root: root.to_path_buf(),
            filter,
            files,
            filtered: Vec::new(),
            query: String::new(),
            selected: 0,
            offset: 0,
        };
        dialog.apply_filter();
        dialog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Relative path of the highlighted file.
    pub fn selected_file(&self) -> Option<&PathBuf> {
        self.filtered
            .get(self.selected)
            .and_then(|m| self.files.get(m.file_idx))
    }

    fn apply_filter(&mut self) {
        if self.query.is_empty() {
            self.filtered = (0..self.files.len())
                .map(|file_idx| FileMatch {
                    file_idx,
                    score: None,
                    match_indices: Vec::new(),
                })
                .collect();
        } else {
            let mut matcher = Matcher::new(Config::DEFAULT.match_paths());
            let pattern = Pattern::parse(&self.query, CaseMatching::Ignore, Normalization::Smart);

            let mut matched: Vec<FileMatch> = self
                .files
                .iter()
                .enumerate()
                .filter_map(|(file_idx, path)| {
                    let path_str = path.to_string_lossy();
                    let mut buf = Vec::new();
                    let haystack = Utf32Str::new(&path_str, &mut buf);

                    pattern.score(haystack, &mut matcher).map(|score| {
                        let mut char_indices = Vec::new();
                        pattern.indices(haystack, &mut matcher, &mut char_indices);
                        FileMatch {
                            file_idx,
                            score: Some(i64::from(score)),
                            match_indices: char_to_byte_indices(&path_str, &char_indices),
                        }
                    })
                })
                .collect();

            matched.sort_by_key(|m| Reverse(m.score.unwrap_or(i64::MIN)));
            self.filtered = matched;
        }

        self.selected = 0;
        self.offset = 0;
    }

    /// Path typed by the user, resolved against the root.
    fn typed_path(&self) -> Option<PathBuf> {
        let typed = self.query.trim();
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

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
            if self.selected >= self.offset + MAX_VISIBLE_FILES {
                self.offset = self.selected + 1 - MAX_VISIBLE_FILES;
            }
        }
    }
}

impl ModalDialog for OpenFileDialog {
    type Output = Option<PathBuf>;

    fn handle_key(&mut self, key: KeyEvent) -> DialogStep<Option<PathBuf>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => DialogStep::Done(None),
            KeyCode::Char('c') if ctrl => DialogStep::Done(None),
            KeyCode::Enter => {
                // An existing file typed in full wins over the fuzzy match
                if let Some(path) = self.typed_path().filter(|path| path.is_file()) {
                    return DialogStep::Done(Some(path));
                }
                match self.selected_file() {
                    Some(rel) => DialogStep::Done(Some(self.root.join(rel))),
                    // No match: treat the query as a path.
                    None => match self.typed_path() {
                        Some(path) => DialogStep::Done(Some(path)),
                        None => DialogStep::Continue,
                    },
                }
            }
            KeyCode::Up => {
                self.move_up();
                DialogStep::Continue
            }
            KeyCode::Char('p') if ctrl => {
                self.move_up();
                DialogStep::Continue
            }
            KeyCode::Down => {
                self.move_down();
                DialogStep::Continue
            }
            KeyCode::Char('n') if ctrl => {
                self.move_down();
                DialogStep::Continue
            }
            KeyCode::Tab => {
                if let Some(rel) = self.selected_file() {
                    self.query = rel.to_string_lossy().into_owned();
                    self.apply_filter();
                }
                DialogStep::Continue
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.apply_filter();
                }
                DialogStep::Continue
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.apply_filter();
                DialogStep::Continue
            }
            _ => DialogStep::Continue,
        }
    }

    fn handle_paste(&mut self, text: &str) {
        self.query.push_str(text.lines().next().unwrap_or(""));
        self.apply_filter();
    }

    fn dismissed(&self) -> Option<PathBuf> {
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        render_open_dialog(frame, self, area, theme);
    }
}

/// Lists files below `root` that match `filter`, respecting ignore files.
///
/// Paths are relative to `root` and sorted.
pub fn discover_files(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .max_depth(Some(MAX_DEPTH))
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if !filter.matches(entry.path()) {
            continue;
        }
        if let Ok(rel_path) = entry.path().strip_prefix(root)
            && !rel_path.as_os_str().is_empty()
        {
            files.push(rel_path.to_path_buf());
            if files.len() >= MAX_FILES {
                break;
            }
        }
    }

    files.sort();
    files
}

/// Nucleo reports char indices; highlighting works on byte offsets.
fn char_to_byte_indices(text: &str, char_indices: &[u32]) -> Vec<usize> {
    if char_indices.is_empty() {
        return Vec::new();
    }
    let wanted: HashSet<u32> = char_indices.iter().copied().collect();
    text.char_indices()
        .enumerate()
        .filter(|(char_idx, _)| wanted.contains(&(*char_idx as u32)))
        .map(|(_, (byte_idx, _))| byte_idx)
        .collect()
}

fn build_highlighted_line(text: &str, match_indices: &[usize], theme: &Theme) -> Line<'static> {
    let normal = theme.base();
    let highlight = Style::default()
        .fg(theme.accent)
        .bg(theme.background)
        .add_modifier(Modifier::BOLD);

    if match_indices.is_empty() {
        return Line::from(Span::styled(text.to_string(), normal));
    }

    let match_set: HashSet<usize> = match_indices.iter().copied().collect();
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_is_match = false;

    for (byte_idx, ch) in text.char_indices() {
        let is_match = match_set.contains(&byte_idx);
        if is_match != current_is_match && !current.is_empty() {
            let style = if current_is_match { highlight } else { normal };
            spans.push(Span::styled(mem::take(&mut current), style));
        }
        current.push(ch);
        current_is_match = is_match;
    }
    if !current.is_empty() {
        let style = if current_is_match { highlight } else { normal };
        spans.push(Span::styled(current, style));
    }

    Line::from(spans)
}

/// First list row to draw so `selected` is visible in `rows` rows.
fn visible_offset(selected: usize, offset: usize, rows: usize) -> usize {
    if rows == 0 || selected < offset {
        selected
    } else if selected >= offset + rows {
        selected + 1 - rows
    } else {
        offset
    }
}

fn render_open_dialog(frame: &mut Frame, dialog: &OpenFileDialog, area: Rect, theme: &Theme) {
    let visible = dialog.filtered.len().min(MAX_VISIBLE_FILES);
    let height = (visible as u16 + 6).max(8);
    let title = format!(
        "Open - {} ({}) - {}",
        dialog.filter.label,
        dialog.filter.pattern,
        dialog.filtered.len()
    );
    let hints = [
        InputHint::new("↑↓", "nav"),
        InputHint::new("Tab", "complete"),
        InputHint::new("Enter", "open"),
        InputHint::new("Esc", "cancel"),
    ];
    let layout = render_overlay(
        frame,
        area,
        &OverlayConfig {
            title: &title,
            border_color: theme.accent,
            width: 64,
            height,
            hints: &hints,
            theme,
        },
    );

    let body = layout.body;
    render_input_line(
        frame,
        Rect::new(body.x, body.y, body.width, 1),
        &InputLine {
            value: &dialog.query,
            placeholder: Some("type to filter, or a path"),
            prompt: "> ",
            theme,
        },
    );
    render_separator(frame, body, 1, theme);

    let list_area = Rect::new(
        body.x,
        body.y + 2,
        body.width,
        body.height.saturating_sub(3),
    );

    if dialog.filtered.is_empty() {
        let message = if dialog.query.is_empty() {
            format!("No {} files found", dialog.filter.pattern)
        } else {
            "No matches; Enter opens the typed path".to_string()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(message, theme.muted())).alignment(Alignment::Center),
            list_area,
        );
        return;
    }

    let rows = list_area.height as usize;
    let offset = visible_offset(dialog.selected, dialog.offset, rows);
    let max_width = body.width.saturating_sub(3) as usize;
    let items: Vec<ListItem> = dialog
        .filtered
        .iter()
        .skip(offset)
        .take(rows)
        .filter_map(|file_match| {
            dialog.files.get(file_match.file_idx).map(|path| {
                let path_str = path.to_string_lossy();
                let line = if path_str.len() > max_width {
                    // Keep the tail; highlights are dropped for truncated rows.
                    Line::from(Span::styled(
                        truncate_start_with_ellipsis(&path_str, max_width),
                        theme.base(),
                    ))
                } else {
                    build_highlighted_line(&path_str, &file_match.match_indices, theme)
                };
                ListItem::new(line)
            })
        })
        .collect();

    let list = List::new(items)
        .style(theme.base())
        .highlight_style(theme.selected())
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    list_state.select(Some(dialog.selected.saturating_sub(offset)));
    frame.render_stateful_widget(list, list_area, &mut list_state);

    render_separator(frame, body, body.height.saturating_sub(1), theme);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(dialog: &mut OpenFileDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn sample() -> OpenFileDialog {
        OpenFileDialog::with_files(
            Path::new("/work"),
            FileFilter::TEXT,
            vec![
                PathBuf::from("notes/todo.txt"),
                PathBuf::from("readme.txt"),
                PathBuf::from("zeta.txt"),
            ],
        )
    }

    #[test]
    fn discovers_only_matching_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.md"), "b").unwrap();
        fs::write(dir.path().join("notes").join("c.txt"), "c").unwrap();

        let files = discover_files(dir.path(), &FileFilter::TEXT);
        assert_eq!(
            files,
            vec![PathBuf::from("a.txt"), PathBuf::from("notes").join("c.txt")]
        );

        let all = discover_files(dir.path(), &FileFilter::ALL);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn enter_returns_selected_file_under_root() {
        let mut dialog = sample();
        dialog.handle_key(key(KeyCode::Down));
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(PathBuf::from("/work/readme.txt")))
        );
    }

    #[test]
    fn typing_filters_fuzzily() {
        let mut dialog = sample();
        type_str(&mut dialog, "todo");
        assert_eq!(dialog.selected_file(), Some(&PathBuf::from("notes/todo.txt")));
        assert_eq!(dialog.filtered.len(), 1);
    }

    #[test]
    fn no_match_falls_back_to_typed_path() {
        let mut dialog = sample();
        type_str(&mut dialog, "/elsewhere/q.log");
        assert!(dialog.selected_file().is_none());
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(PathBuf::from("/elsewhere/q.log")))
        );
    }

    #[test]
    fn existing_typed_path_beats_fuzzy_match() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let mut dialog = OpenFileDialog::with_files(
            dir.path(),
            FileFilter::TEXT,
            vec![PathBuf::from("notes/a.txt"), PathBuf::from("a.txt.bak.txt")],
        );
        type_str(&mut dialog, "a.txt");
        assert!(dialog.selected_file().is_some());
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(dir.path().join("a.txt")))
        );
    }

    #[test]
    fn selection_stays_inside_short_list() {
        // Scrolled for twelve rows, drawn with four
        assert_eq!(visible_offset(11, 0, 4), 8);
        assert_eq!(visible_offset(3, 0, 4), 0);
        assert_eq!(visible_offset(2, 5, 4), 2);
        assert_eq!(visible_offset(7, 0, 0), 7);
    }

    #[test]
    fn relative_typed_path_resolves_against_root() {
        let mut dialog = OpenFileDialog::with_files(Path::new("/work"), FileFilter::TEXT, vec![]);
        type_str(&mut dialog, "new.txt");
        assert_eq!(
            dialog.handle_key(key(KeyCode::Enter)),
            DialogStep::Done(Some(PathBuf::from("/work/new.txt")))
        );
    }

    #[test]
    fn escape_cancels() {
        let mut dialog = sample();
        assert_eq!(dialog.handle_key(key(KeyCode::Esc)), DialogStep::Done(None));
        assert_eq!(dialog.dismissed(), None);
    }

    #[test]
    fn empty_query_with_no_files_keeps_dialog_open() {
        let mut dialog = OpenFileDialog::with_files(Path::new("/work"), FileFilter::TEXT, vec![]);
        assert_eq!(dialog.handle_key(key(KeyCode::Enter)), DialogStep::Continue);
    }

    #[test]
    fn tab_completes_query_from_selection() {
        let mut dialog = sample();
        type_str(&mut dialog, "zet");
        dialog.handle_key(key(KeyCode::Tab));
        assert_eq!(dialog.query(), "zeta.txt");
    }

    #[test]
    fn paste_uses_first_line() {
        let mut dialog = sample();
        dialog.handle_paste("readme\nignored");
        assert_eq!(dialog.query(), "readme");
    }
}
