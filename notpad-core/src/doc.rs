//! Editor session document with Rope-based text storage

use anyhow::{Context, Result};
use ropey::Rope;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "notpad";

/// The text being edited, and the file it came from (if any)
#[derive(Clone, Debug)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub rope: Rope,
    /// Content as last loaded or saved, used to detect unsaved edits
    pub original: String,
    pub rev: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A blank document with no backing file
    pub fn empty() -> Self {
        Self {
            path: None,
            rope: Rope::new(),
            original: String::new(),
            rev: 1,
        }
    }

    /// Create the file if needed and start an empty document bound to it
    ///
    /// An existing file is not truncated; its content is simply not loaded.
    pub fn create(path: &Path) -> Result<Self> {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;

        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        log::info!("Created {}", abs_path.display());
        Ok(Self {
            path: Some(abs_path),
            ..Self::empty()
        })
    }

    /// Load a document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("Failed to canonicalize path: {}", path.display()))?;

        let content = fs::read_to_string(&abs_path)
            .with_context(|| format!("Failed to read file: {}", abs_path.display()))?;

        log::info!("Opened {} ({} bytes)", abs_path.display(), content.len());
        Ok(Self {
            path: Some(abs_path),
            rope: Rope::from_str(&content),
            original: content,
            rev: 1,
        })
    }

    /// Full text of the buffer
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// True when the buffer holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.rope.chars().all(char::is_whitespace)
    }

    /// True when the buffer differs from what was last loaded or saved
    pub fn is_modified(&self) -> bool {
        self.rope != self.original.as_str()
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of one line without its line ending
    pub fn line(&self, idx: usize) -> String {
        if idx >= self.line_count() {
            return String::new();
        }
        let line = self.rope.line(idx);
        line.slice(..self.line_len(idx)).to_string()
    }

    /// Length of a line in chars, excluding its line ending
    pub fn line_len(&self, idx: usize) -> usize {
        if idx >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(idx);
        let mut len = line.len_chars();
        if len == 0 {
            return 0;
        }

        match line.char(len - 1) {
            '\n' => {
                len -= 1;
                if len > 0 && line.char(len - 1) == '\r' {
                    len -= 1;
                }
            }
            '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => len -= 1,
            _ => {}
        }
        len
    }

    /// Insert text at a char index (clamped to the end of the buffer)
    pub fn insert(&mut self, char_idx: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let idx = char_idx.min(self.rope.len_chars());
        self.rope.insert(idx, text);
        self.rev += 1;
    }

    /// Remove a char range (clamped to the buffer)
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.rope.len_chars();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return;
        }
        self.rope.remove(start..end);
        self.rev += 1;
    }

    /// Replace the whole buffer
    pub fn replace_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.rev += 1;
    }

    /// Record the current buffer as the saved state
    pub fn mark_saved(&mut self) {
        self.original = self.text();
    }

    /// Drop the buffer and the file binding
    ///
    /// The revision keeps counting so renders of the old content are never reused.
    pub fn reset(&mut self) {
        let rev = self.rev + 1;
        *self = Self {
            rev,
            ..Self::empty()
        };
    }

    /// File name of the bound path
    pub fn file_name(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }

    /// Window title, e.g. `notpad - notes.md`
    pub fn title(&self) -> String {
        match self.file_name() {
            Some(name) => format!("{} - {}", APP_NAME, name),
            None => APP_NAME.to_string(),
        }
    }

    /// Short label for the status area
    pub fn status_label(&self) -> &str {
        self.file_name().unwrap_or("No file loaded")
    }
}
