//! Multi-line text buffer backing the editor area.
//!
//! Lines are stored without their terminating `\n`; `text()` joins them back,
//! so a buffer round-trips any content exactly.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Forward,
    Back,
    Head,
    End,
    Top,
    Bottom,
}

/// Text buffer with line storage and a (row, col) cursor in char units.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_row: 0,
            cursor_col: 0,
        }
    }
}

impl TextBuffer {
    /// Creates a buffer holding `text`, cursor at the start.
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::default();
        buf.set_text(text);
        buf
    }

    /// Replaces the whole content and moves the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Returns the full content.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns all lines in the buffer.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the current cursor position as (row, col) in char units.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Inserts a string at the cursor, advancing the cursor.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }

        self.ensure_line();
        let row = self.cursor_row;

        if !text.contains('\n') {
            let line = &mut self.lines[row];
            let byte_idx = char_to_byte_index(line, self.cursor_col);
            line.insert_str(byte_idx, text);
            self.cursor_col += text.chars().count();
            return;
        }

        let current_line = self.lines[row].clone();
        let byte_idx = char_to_byte_index(&current_line, self.cursor_col);
        let (prefix, suffix) = current_line.split_at(byte_idx);

        let parts: Vec<&str> = text.split('\n').collect();
        let last = parts.len() - 1;

        let mut new_lines: Vec<String> = Vec::with_capacity(parts.len());
        new_lines.push(format!("{prefix}{}", parts[0]));
        for part in &parts[1..last] {
            new_lines.push((*part).to_string());
        }
        new_lines.push(format!("{}{suffix}", parts[last]));

        self.lines.splice(row..=row, new_lines);
        self.cursor_row = row + last;
        self.cursor_col = parts[last].chars().count();
    }

    /// Inserts pasted text, normalizing CRLF and lone CR line endings.
    pub fn paste(&mut self, text: &str) {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
        self.insert_str(&normalized);
    }

    /// Inserts a single character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Inserts a newline at the cursor.
    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    /// Deletes the character at the cursor (Delete key semantics).
    ///
    /// Returns true if anything was removed.
    pub fn delete_next_char(&mut self) -> bool {
        self.ensure_line();

        let row = self.cursor_row;
        let col = self.cursor_col;
        let line_len = line_char_len(&self.lines[row]);

        if col >= line_len {
            if row + 1 < self.lines.len() {
                let next = self.lines.remove(row + 1);
                self.lines[row].push_str(&next);
                return true;
            }
            return false;
        }

        let line = &mut self.lines[row];
        let start = char_to_byte_index(line, col);
        let end = char_to_byte_index(line, col + 1);
        line.replace_range(start..end, "");
        true
    }

    /// Deletes the character before the cursor (Backspace semantics).
    ///
    /// Returns true if anything was removed.
    pub fn delete_prev_char(&mut self) -> bool {
        self.ensure_line();

        if self.cursor_col > 0 {
            let row = self.cursor_row;
            let col = self.cursor_col - 1;
            let line = &mut self.lines[row];
            let start = char_to_byte_index(line, col);
            let end = char_to_byte_index(line, col + 1);
            line.replace_range(start..end, "");
            self.cursor_col = col;
            return true;
        }

        if self.cursor_row == 0 {
            return false;
        }

        let row = self.cursor_row;
        let prev_len = line_char_len(&self.lines[row - 1]);
        let current = self.lines.remove(row);
        self.lines[row - 1].push_str(&current);
        self.cursor_row -= 1;
        self.cursor_col = prev_len;
        true
    }

    /// Moves the cursor according to a movement command.
    pub fn move_cursor(&mut self, movement: CursorMove) {
        self.ensure_line();
        match movement {
            CursorMove::Up => {
                if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.clamp_col();
                }
            }
            CursorMove::Down => {
                if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.clamp_col();
                }
            }
            CursorMove::Forward => {
                let len = line_char_len(&self.lines[self.cursor_row]);
                if self.cursor_col < len {
                    self.cursor_col += 1;
                } else if self.cursor_row + 1 < self.lines.len() {
                    self.cursor_row += 1;
                    self.cursor_col = 0;
                }
            }
            CursorMove::Back => {
                if self.cursor_col > 0 {
                    self.cursor_col -= 1;
                } else if self.cursor_row > 0 {
                    self.cursor_row -= 1;
                    self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
                }
            }
            CursorMove::Head => {
                self.cursor_col = 0;
            }
            CursorMove::End => {
                self.cursor_col = line_char_len(&self.lines[self.cursor_row]);
            }
            CursorMove::Top => {
                self.cursor_row = 0;
                self.clamp_col();
            }
            CursorMove::Bottom => {
                self.cursor_row = self.lines.len().saturating_sub(1);
                self.clamp_col();
            }
        }
    }

    /// Moves the cursor up by `rows` lines (PageUp).
    pub fn page_up(&mut self, rows: usize) {
        self.ensure_line();
        self.cursor_row = self.cursor_row.saturating_sub(rows.max(1));
        self.clamp_col();
    }

    /// Moves the cursor down by `rows` lines (PageDown).
    pub fn page_down(&mut self, rows: usize) {
        self.ensure_line();
        let last = self.lines.len().saturating_sub(1);
        self.cursor_row = (self.cursor_row + rows.max(1)).min(last);
        self.clamp_col();
    }

    /// Moves the cursor left by one word.
    pub fn move_word_left(&mut self) {
        self.ensure_line();
        let (row, col) = self.word_left_target();
        self.cursor_row = row;
        self.cursor_col = col;
    }

    /// Moves the cursor right by one word.
    pub fn move_word_right(&mut self) {
        self.ensure_line();

        let mut row = self.cursor_row;
        let mut col = self.cursor_col;

        loop {
            let line_len = line_char_len(&self.lines[row]);
            if col < line_len {
                break;
            }
            if row + 1 >= self.lines.len() {
                return;
            }
            row += 1;
            col = 0;
        }

        let chars: Vec<char> = self.lines[row].chars().collect();
        self.cursor_row = row;
        self.cursor_col = scan_right_segment(&chars, col.min(chars.len()));
    }

    /// Deletes the word immediately to the left of the cursor.
    ///
    /// Returns true if anything was removed.
    pub fn delete_word_left(&mut self) -> bool {
        self.ensure_line();
        if self.cursor_row == 0 && self.cursor_col == 0 {
            return false;
        }

        let (start_row, start_col) = self.word_left_target();
        let end_row = self.cursor_row;
        let end_col = self.cursor_col;

        self.delete_range(start_row, start_col, end_row, end_col);
        self.cursor_row = start_row;
        self.cursor_col = start_col;
        true
    }

    /// Applies an editing key.
    ///
    /// Returns true when the content changed; pure cursor motion returns false.
    /// Paging keys are handled by the caller, which knows the viewport height.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if matches!(key.kind, KeyEventKind::Release) {
            return false;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char(ch) if !ctrl && !alt => {
                self.insert_char(ch);
                true
            }
            KeyCode::Tab => {
                self.insert_char('\t');
                true
            }
            KeyCode::Enter => {
                self.insert_newline();
                true
            }
            KeyCode::Backspace if ctrl || alt => self.delete_word_left(),
            KeyCode::Backspace => self.delete_prev_char(),
            KeyCode::Delete => self.delete_next_char(),
            KeyCode::Left if ctrl || alt => {
                self.move_word_left();
                false
            }
            KeyCode::Right if ctrl || alt => {
                self.move_word_right();
                false
            }
            KeyCode::Home if ctrl => {
                self.move_cursor(CursorMove::Top);
                self.move_cursor(CursorMove::Head);
                false
            }
            KeyCode::End if ctrl => {
                self.move_cursor(CursorMove::Bottom);
                self.move_cursor(CursorMove::End);
                false
            }
            code => {
                let movement = match code {
                    KeyCode::Left => CursorMove::Back,
                    KeyCode::Right => CursorMove::Forward,
                    KeyCode::Up => CursorMove::Up,
                    KeyCode::Down => CursorMove::Down,
                    KeyCode::Home => CursorMove::Head,
                    KeyCode::End => CursorMove::End,
                    _ => return false,
                };
                self.move_cursor(movement);
                false
            }
        }
    }

    fn clamp_col(&mut self) {
        let len = line_char_len(&self.lines[self.cursor_row]);
        self.cursor_col = self.cursor_col.min(len);
    }

    fn ensure_line(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
            self.cursor_row = 0;
            self.cursor_col = 0;
            return;
        }

        if self.cursor_row >= self.lines.len() {
            self.cursor_row = self.lines.len() - 1;
        }
        self.clamp_col();
    }

    fn word_left_target(&self) -> (usize, usize) {
        let mut row = self.cursor_row;
        let mut col = self.cursor_col;

        while row > 0 && col == 0 {
            row -= 1;
            col = line_char_len(&self.lines[row]);
        }

        if col == 0 {
            return (row, 0);
        }

        let chars: Vec<char> = self.lines[row].chars().collect();
        (row, scan_left_segment(&chars, col.min(chars.len())))
    }

    fn delete_range(&mut self, start_row: usize, start_col: usize, end_row: usize, end_col: usize) {
        if start_row > end_row || (start_row == end_row && start_col >= end_col) {
            return;
        }

        if start_row == end_row {
            let line = &mut self.lines[start_row];
            let start = char_to_byte_index(line, start_col);
            let end = char_to_byte_index(line, end_col);
            line.replace_range(start..end, "");
            return;
        }

        let start_line = &self.lines[start_row];
        let end_line = &self.lines[end_row];
        let start_byte = char_to_byte_index(start_line, start_col);
        let end_byte = char_to_byte_index(end_line, end_col);
        let merged = format!("{}{}", &start_line[..start_byte], &end_line[end_byte..]);

        self.lines.splice(start_row..=end_row, [merged]);
    }
}

fn line_char_len(line: &str) -> usize {
    line.chars().count()
}

/// Alphanumerics and underscore form words; other symbols are boundaries.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum CharClass {
    Whitespace,
    Word,
    Punct,
}

fn char_class(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_word_char(c) {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

fn scan_left_segment(chars: &[char], mut idx: usize) -> usize {
    if idx == 0 {
        return 0;
    }
    let class = char_class(chars[idx - 1]);
    while idx > 0 && char_class(chars[idx - 1]) == class {
        idx -= 1;
    }
    idx
}

fn scan_right_segment(chars: &[char], mut idx: usize) -> usize {
    if idx >= chars.len() {
        return idx;
    }
    let class = char_class(chars[idx]);
    while idx < chars.len() && char_class(chars[idx]) == class {
        idx += 1;
    }
    idx
}

fn char_to_byte_index(line: &str, col: usize) -> usize {
    if col == 0 {
        return 0;
    }
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn text_round_trips_exactly() {
        for text in ["", "Hello\nWorld", "trailing\n", "\n\n", "tab\there\r\nwin"] {
            assert_eq!(TextBuffer::from_text(text).text(), text);
        }
    }

    #[test]
    fn typing_reports_mutation() {
        let mut buf = TextBuffer::default();
        assert!(buf.input(key(KeyCode::Char('h'))));
        assert!(buf.input(key(KeyCode::Char('i'))));
        assert!(buf.input(key(KeyCode::Enter)));
        assert!(buf.input(key(KeyCode::Tab)));
        assert_eq!(buf.text(), "hi\n\t");
        assert_eq!(buf.cursor(), (1, 1));
    }

    #[test]
    fn motion_is_not_a_mutation() {
        let mut buf = TextBuffer::from_text("abc\ndef");
        assert!(!buf.input(key(KeyCode::Down)));
        assert!(!buf.input(key(KeyCode::End)));
        assert!(!buf.input(ctrl(KeyCode::Left)));
        assert!(!buf.input(ctrl(KeyCode::Char('x'))));
        assert_eq!(buf.text(), "abc\ndef");
    }

    #[test]
    fn backspace_at_start_is_not_a_mutation() {
        let mut buf = TextBuffer::from_text("abc");
        assert!(!buf.input(key(KeyCode::Backspace)));
        buf.move_cursor(CursorMove::Bottom);
        buf.move_cursor(CursorMove::End);
        assert!(!buf.input(key(KeyCode::Delete)));
    }

    #[test]
    fn backspace_joins_lines() {
        let mut buf = TextBuffer::from_text("Hello\nWorld");
        buf.move_cursor(CursorMove::Down);
        assert!(buf.delete_prev_char());
        assert_eq!(buf.text(), "HelloWorld");
        assert_eq!(buf.cursor(), (0, 5));
    }

    #[test]
    fn delete_joins_next_line() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_cursor(CursorMove::End);
        assert!(buf.delete_next_char());
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn multiline_insert_in_middle() {
        let mut buf = TextBuffer::from_text("start end");
        for _ in 0..6 {
            buf.move_cursor(CursorMove::Forward);
        }
        buf.insert_str("one\ntwo\nthree ");
        assert_eq!(buf.text(), "start one\ntwo\nthree end");
        assert_eq!(buf.cursor(), (2, 6));
    }

    #[test]
    fn paste_normalizes_line_endings() {
        let mut buf = TextBuffer::default();
        buf.paste("a\r\nb\rc");
        assert_eq!(buf.text(), "a\nb\nc");
    }

    #[test]
    fn paging_clamps_to_buffer() {
        let mut buf = TextBuffer::from_text("1\n2\n3\n4\n5\nlonger line");
        buf.page_down(3);
        assert_eq!(buf.cursor(), (3, 0));
        buf.page_down(10);
        assert_eq!(buf.cursor().0, 5);
        buf.move_cursor(CursorMove::End);
        buf.page_up(2);
        assert_eq!(buf.cursor(), (3, 1));
        buf.page_up(10);
        assert_eq!(buf.cursor(), (0, 1));
    }

    #[test]
    fn ctrl_home_and_end_jump_to_document_bounds() {
        let mut buf = TextBuffer::from_text("first\nsecond\nlast");
        buf.input(ctrl(KeyCode::End));
        assert_eq!(buf.cursor(), (2, 4));
        buf.input(ctrl(KeyCode::Home));
        assert_eq!(buf.cursor(), (0, 0));
    }

    #[test]
    fn delete_word_left_path_segments() {
        let mut buf = TextBuffer::default();
        buf.insert_str("notes/draft.txt");

        buf.delete_word_left();
        assert_eq!(buf.lines()[0], "notes/draft.");
        buf.delete_word_left();
        assert_eq!(buf.lines()[0], "notes/draft");
        buf.delete_word_left();
        assert_eq!(buf.lines()[0], "notes/");
    }

    #[test]
    fn delete_word_left_with_whitespace() {
        let mut buf = TextBuffer::default();
        buf.insert_str("hello world");

        assert!(buf.input(KeyEvent::new(KeyCode::Backspace, KeyModifiers::ALT)));
        assert_eq!(buf.lines()[0], "hello ");
        buf.delete_word_left();
        assert_eq!(buf.lines()[0], "hello");
        buf.delete_word_left();
        assert_eq!(buf.lines()[0], "");
        assert!(!buf.delete_word_left());
    }

    #[test]
    fn delete_word_left_across_line_break() {
        let mut buf = TextBuffer::from_text("one\n");
        buf.move_cursor(CursorMove::Bottom);
        assert!(buf.delete_word_left());
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn word_motion() {
        let mut buf = TextBuffer::from_text("https://example.com");
        buf.move_word_right();
        assert_eq!(buf.cursor(), (0, 5));
        buf.move_word_right();
        assert_eq!(buf.cursor(), (0, 8));
        buf.move_word_right();
        assert_eq!(buf.cursor(), (0, 15));

        buf.move_word_left();
        assert_eq!(buf.cursor(), (0, 8));
        buf.move_word_left();
        assert_eq!(buf.cursor(), (0, 5));
    }

    #[test]
    fn unicode_cursor_in_chars() {
        let mut buf = TextBuffer::from_text("héllo");
        buf.move_cursor(CursorMove::End);
        assert_eq!(buf.cursor(), (0, 5));
        buf.delete_prev_char();
        buf.move_cursor(CursorMove::Back);
        buf.move_cursor(CursorMove::Back);
        buf.delete_prev_char();
        assert_eq!(buf.text(), "hll");
    }
}
