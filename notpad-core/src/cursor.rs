//! Cursor movement and editing for the plain text area

use crate::doc::Document;

/// Caret position in char units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
    /// Column to aim for when moving vertically through shorter lines
    preferred_col: usize,
}

impl Cursor {
    pub fn new(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            preferred_col: col,
        }
    }

    /// Pull the cursor back inside the document
    pub fn clamp(&mut self, doc: &Document) {
        self.line = self.line.min(doc.line_count().saturating_sub(1));
        self.col = self.col.min(doc.line_len(self.line));
    }

    /// Absolute char index of the cursor
    pub fn char_idx(&self, doc: &Document) -> usize {
        let line = self.line.min(doc.line_count().saturating_sub(1));
        doc.rope.line_to_char(line) + self.col.min(doc.line_len(line))
    }

    /// Place the cursor at an absolute char index
    pub fn set_from_char_idx(&mut self, doc: &Document, idx: usize) {
        let idx = idx.min(doc.rope.len_chars());
        self.line = doc.rope.char_to_line(idx);
        self.col = (idx - doc.rope.line_to_char(self.line)).min(doc.line_len(self.line));
        self.preferred_col = self.col;
    }

    pub fn move_left(&mut self, doc: &Document) {
        self.clamp(doc);
        if self.col > 0 {
            self.col -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.col = doc.line_len(self.line);
        }
        self.preferred_col = self.col;
    }

    pub fn move_right(&mut self, doc: &Document) {
        self.clamp(doc);
        if self.col < doc.line_len(self.line) {
            self.col += 1;
        } else if self.line + 1 < doc.line_count() {
            self.line += 1;
            self.col = 0;
        }
        self.preferred_col = self.col;
    }

    pub fn move_up(&mut self, doc: &Document, count: usize) {
        self.line = self.line.saturating_sub(count);
        self.col = self.preferred_col.min(doc.line_len(self.line));
    }

    pub fn move_down(&mut self, doc: &Document, count: usize) {
        let last = doc.line_count().saturating_sub(1);
        self.line = self.line.saturating_add(count).min(last);
        self.col = self.preferred_col.min(doc.line_len(self.line));
    }

    pub fn line_start(&mut self) {
        self.col = 0;
        self.preferred_col = 0;
    }

    pub fn line_end(&mut self, doc: &Document) {
        self.clamp(doc);
        self.col = doc.line_len(self.line);
        self.preferred_col = self.col;
    }

    pub fn doc_start(&mut self) {
        *self = Self::default();
    }

    pub fn doc_end(&mut self, doc: &Document) {
        let idx = doc.rope.len_chars();
        self.set_from_char_idx(doc, idx);
    }

    /// Insert text at the cursor and move past it
    pub fn insert_str(&mut self, doc: &mut Document, text: &str) {
        let idx = self.char_idx(doc);
        doc.insert(idx, text);
        self.set_from_char_idx(doc, idx + text.chars().count());
    }

    pub fn insert_char(&mut self, doc: &mut Document, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(doc, c.encode_utf8(&mut buf));
    }

    pub fn newline(&mut self, doc: &mut Document) {
        self.insert_char(doc, '\n');
    }

    /// Delete the char before the cursor, joining lines at column 0
    pub fn backspace(&mut self, doc: &mut Document) {
        let idx = self.char_idx(doc);
        if idx == 0 {
            return;
        }

        let mut start = idx - 1;
        if doc.rope.char(start) == '\n' && start > 0 && doc.rope.char(start - 1) == '\r' {
            start -= 1;
        }
        doc.remove(start..idx);
        self.set_from_char_idx(doc, start);
    }

    /// Delete the char under the cursor, joining the next line at end of line
    pub fn delete(&mut self, doc: &mut Document) {
        let idx = self.char_idx(doc);
        let len = doc.rope.len_chars();
        if idx >= len {
            return;
        }

        let mut end = idx + 1;
        if doc.rope.char(idx) == '\r' && end < len && doc.rope.char(end) == '\n' {
            end += 1;
        }
        doc.remove(idx..end);
        self.set_from_char_idx(doc, idx);
    }
}
