//! Modal dialogs: save choice, line prompts, and yes/no confirmation

use notpad_core::config::home_dir;
use notpad_core::save::{DateStyle, SaveOptions, Separator};
use notpad_core::SaveChoice;
use std::path::PathBuf;

/// Save options list with the separator line settings
#[derive(Debug, Clone)]
pub struct SaveDialog {
    pub selected_index: usize,
    pub add_separator: bool,
    pub date: Option<DateStyle>,
    pub separator_text: String,
    /// Typing goes to the separator text
    pub editing_text: bool,
}

impl Default for SaveDialog {
    fn default() -> Self {
        Self {
            selected_index: 0,
            add_separator: false,
            date: Some(DateStyle::Short),
            separator_text: String::new(),
            editing_text: false,
        }
    }
}

impl SaveDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_separator(&mut self) {
        self.add_separator = !self.add_separator;
    }

    /// Short date, long date, no date
    pub fn cycle_date(&mut self) {
        self.date = match self.date {
            Some(DateStyle::Short) => Some(DateStyle::Long),
            Some(DateStyle::Long) => None,
            None => Some(DateStyle::Short),
        };
    }

    pub fn date_label(&self) -> &'static str {
        match self.date {
            Some(DateStyle::Short) => "YY-MM-DD",
            Some(DateStyle::Long) => "YYYY-Month-DD",
            None => "none",
        }
    }

    pub fn options(&self) -> SaveOptions {
        SaveOptions {
            separator: self.add_separator.then(|| Separator {
                date: self.date,
                text: self.separator_text.clone(),
            }),
        }
    }

    pub fn move_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.selected_index < SaveChoice::ALL.len() - 1 {
            self.selected_index += 1;
        }
    }

    pub fn selected(&self) -> SaveChoice {
        SaveChoice::ALL[self.selected_index.min(SaveChoice::ALL.len() - 1)]
    }
}

/// What a line prompt's answer is used for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    New,
    SaveTarget(SaveChoice, SaveOptions),
    Find,
    ReplaceQuery,
    ReplaceWith { query: String },
    /// Replacement for the current search match only
    ReplaceMatch,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Open => "Open file",
            PromptKind::New => "New file",
            PromptKind::SaveTarget(SaveChoice::Prepend, _) => "Prepend to",
            PromptKind::SaveTarget(SaveChoice::Append, _) => "Append to",
            PromptKind::SaveTarget(..) => "Save as",
            PromptKind::Find => "Find",
            PromptKind::ReplaceQuery => "Replace",
            PromptKind::ReplaceWith { .. } => "Replace all with",
            PromptKind::ReplaceMatch => "Replace match with",
        }
    }
}

/// Single-line text input shown in the status bar
#[derive(Debug, Clone)]
pub struct LinePrompt {
    pub kind: PromptKind,
    pub input: String,
    /// Cursor position in chars
    pub cursor: usize,
}

impl LinePrompt {
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        let input = initial.into();
        let cursor = input.chars().count();
        Self {
            kind,
            input,
            cursor,
        }
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.input.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let at = self.byte_offset(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    /// Input interpreted as a path, `~` expanded to the home directory
    pub fn path(&self) -> PathBuf {
        let trimmed = self.input.trim();
        if let Some(rest) = trimmed.strip_prefix("~/") {
            if let Some(home) = home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(trimmed)
    }
}

/// Work waiting on a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    CloseFile,
    Quit,
    /// Start a new note bound to a file that already exists
    NewFile(PathBuf),
    Save {
        choice: SaveChoice,
        target: PathBuf,
        options: SaveOptions,
    },
}

#[derive(Debug, Clone)]
pub struct Confirm {
    pub title: String,
    pub message: String,
    pub action: PendingAction,
    pub yes_focused: bool,
}

impl Confirm {
    pub fn new(title: impl Into<String>, message: impl Into<String>, action: PendingAction) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action,
            yes_focused: true,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.yes_focused = !self.yes_focused;
    }
}

/// The dialog currently on screen
#[derive(Debug, Clone)]
pub enum Dialog {
    Save(SaveDialog),
    Prompt(LinePrompt),
    Confirm(Confirm),
}
