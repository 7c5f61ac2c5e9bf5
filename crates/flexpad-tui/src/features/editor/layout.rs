//! Visual rows for the text area: soft wrap and cursor mapping.

use std::ops::Range;

use super::TextBuffer;
use crate::common::char_width;

/// One screen row: a char range of a logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow {
    pub line: usize,
    pub range: Range<usize>,
}

/// Visual rows of a buffer plus the cursor's screen position.
#[derive(Debug, Clone)]
pub struct VisualLayout {
    pub rows: Vec<VisualRow>,
    pub cursor_row: usize,
    /// Display column of the cursor within its row.
    pub cursor_col: usize,
}

impl VisualLayout {
    pub fn build(buffer: &TextBuffer, width: usize, wrap: bool) -> Self {
        let (cursor_line, cursor_char) = buffer.cursor();
        let mut rows = Vec::new();
        let mut cursor_row = 0;
        let mut cursor_col = 0;

        for (line_idx, line) in buffer.lines().iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            let ranges = if wrap {
                wrap_ranges(&chars, width)
            } else {
                vec![0..chars.len()]
            };

            if line_idx == cursor_line {
                let seg = ranges
                    .iter()
                    .position(|r| cursor_char < r.end)
                    .unwrap_or(ranges.len() - 1);
                let start = ranges[seg].start;
                cursor_row = rows.len() + seg;
                cursor_col = chars[start..cursor_char.min(chars.len())]
                    .iter()
                    .copied()
                    .map(char_width)
                    .sum();
            }

            rows.extend(ranges.into_iter().map(|range| VisualRow {
                line: line_idx,
                range,
            }));
        }

        Self {
            rows,
            cursor_row,
            cursor_col,
        }
    }
}

/// Splits a line into rows no wider than `width` columns.
///
/// Breaks after the last whitespace that fits; a word longer than the row is
/// broken mid-word. Always returns at least one range.
pub fn wrap_ranges(chars: &[char], width: usize) -> Vec<Range<usize>> {
    if width == 0 || chars.is_empty() {
        return vec![0..chars.len()];
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    let mut col = 0;
    let mut last_break: Option<usize> = None;
    let mut i = 0;

    while i < chars.len() {
        let w = char_width(chars[i]);
        if col + w > width && i > start {
            let end = match last_break {
                Some(b) if b > start => b,
                _ => i,
            };
            ranges.push(start..end);
            start = end;
            col = chars[start..i].iter().copied().map(char_width).sum();
            last_break = None;
            continue;
        }
        col += w;
        if chars[i].is_whitespace() {
            last_break = Some(i + 1);
        }
        i += 1;
    }

    ranges.push(start..chars.len());
    ranges
}
