//! Application state

use crate::dialogs::{Confirm, Dialog, LinePrompt, PendingAction, PromptKind, SaveDialog};
use crate::render::{self, PreviewCache, RenderKey};
use crate::theme::Theme;
use notpad_core::save::{self, SaveOptions, SaveOutcome};
use notpad_core::search::{self, SearchHit};
use notpad_core::{Config, Cursor, Document, SaveChoice, ThemeVariant};
use ratatui::text::Line;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Spaces inserted for the Tab key and shown for tab characters
pub const TAB_WIDTH: usize = 4;

/// Main application state
pub struct App {
    pub config: Config,
    pub theme_variant: ThemeVariant,
    pub theme: Theme,
    pub doc: Document,
    pub cursor: Cursor,
    /// First visible line of the editor
    pub scroll: usize,
    /// First visible display column of the editor
    pub h_scroll: usize,
    pub show_preview: bool,
    pub preview_scroll: usize,
    pub dialog: Option<Dialog>,
    pub search_query: String,
    /// Char range of the last search match
    pub last_hit: Option<(usize, usize)>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    preview_cache: PreviewCache,
    config_path: Option<PathBuf>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, doc: Document) -> Self {
        let theme_variant = config.theme;
        Self {
            theme: Theme::for_variant(theme_variant),
            theme_variant,
            config,
            doc,
            cursor: Cursor::default(),
            scroll: 0,
            h_scroll: 0,
            show_preview: false,
            preview_scroll: 0,
            dialog: None,
            search_query: String::new(),
            last_hit: None,
            status_message: None,
            should_quit: false,
            preview_cache: PreviewCache::new(),
            config_path: Config::config_path(),
        }
    }

    /// Where theme changes are written; `None` keeps them in memory only
    pub fn persist_config_to(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    fn report_error(&mut self, err: anyhow::Error) {
        log::warn!("{:#}", err);
        self.set_status_message(format!("Error: {:#}", err));
    }

    fn reset_view(&mut self) {
        self.cursor = Cursor::default();
        self.scroll = 0;
        self.h_scroll = 0;
        self.preview_scroll = 0;
        self.last_hit = None;
    }

    fn replace_document(&mut self, mut doc: Document) {
        // Revisions keep increasing across documents so cached previews never leak between files
        doc.rev = doc.rev.max(self.doc.rev + 1);
        self.doc = doc;
        self.reset_view();
    }

    /// Initial text of file prompts: the default folder with a trailing separator
    fn prompt_start(&self) -> String {
        let mut dir = self.config.initial_dir().display().to_string();
        if !dir.ends_with(MAIN_SEPARATOR) {
            dir.push(MAIN_SEPARATOR);
        }
        dir
    }

    fn open_prompt(&mut self, kind: PromptKind, initial: String) {
        self.dialog = Some(Dialog::Prompt(LinePrompt::new(kind, initial)));
    }

    // ---- Files -------------------------------------------------------------

    pub fn begin_new_file(&mut self) {
        let start = self.prompt_start();
        self.open_prompt(PromptKind::New, start);
    }

    pub fn begin_open_file(&mut self) {
        let start = self.prompt_start();
        self.open_prompt(PromptKind::Open, start);
    }

    /// Start a new note bound to `path`, asking first if the file exists
    pub fn new_file(&mut self, path: &Path) {
        if path.exists() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            self.dialog = Some(Dialog::Confirm(Confirm::new(
                "New file",
                format!("{} already exists. Replace it?", name),
                PendingAction::NewFile(path.to_path_buf()),
            )));
            return;
        }
        self.create_file(path);
    }

    fn create_file(&mut self, path: &Path) {
        match Document::create(path) {
            Ok(doc) => {
                self.replace_document(doc);
                let message = format!("Created {}", self.doc.status_label());
                self.set_status_message(message);
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Load `path`; on failure the current document is kept
    pub fn open_file(&mut self, path: &Path) {
        match Document::load(path) {
            Ok(doc) => {
                self.replace_document(doc);
                let message = format!("Opened {}", self.doc.status_label());
                self.set_status_message(message);
            }
            Err(e) => self.report_error(e),
        }
    }

    pub fn request_close(&mut self) {
        if self.doc.is_blank() {
            self.close_file();
        } else {
            self.dialog = Some(Dialog::Confirm(Confirm::new(
                "Close file",
                "Close current file? Unsaved changes will be lost.",
                PendingAction::CloseFile,
            )));
        }
    }

    pub fn close_file(&mut self) {
        self.replace_document(Document::empty());
    }

    // ---- Saving ------------------------------------------------------------

    /// Open the save options dialog
    pub fn request_save(&mut self) {
        if save::content_to_save(&self.doc).is_none() {
            self.set_status_message(SaveOutcome::NothingToSave.message());
            return;
        }
        self.dialog = Some(Dialog::Save(SaveDialog::new()));
    }

    /// Act on the option picked in the save dialog
    pub fn choose_save(&mut self, choice: SaveChoice, options: SaveOptions) {
        if choice == SaveChoice::Cancel {
            self.dialog = None;
            return;
        }
        let start = self.prompt_start();
        self.open_prompt(PromptKind::SaveTarget(choice, options), start);
    }

    pub fn submit_save_target(&mut self, choice: SaveChoice, options: SaveOptions, target: PathBuf) {
        self.dialog = None;
        match save::confirmation_prompt(&self.doc, choice, &target) {
            Some(message) => {
                self.dialog = Some(Dialog::Confirm(Confirm::new(
                    "Confirm save",
                    message,
                    PendingAction::Save {
                        choice,
                        target,
                        options,
                    },
                )));
            }
            None => self.perform_save(choice, &options, &target),
        }
    }

    pub fn perform_save(&mut self, choice: SaveChoice, options: &SaveOptions, target: &Path) {
        match save::save(&mut self.doc, choice, target, options) {
            Ok(outcome) => {
                if matches!(outcome, SaveOutcome::Saved { .. }) {
                    self.reset_view();
                }
                self.set_status_message(outcome.message());
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Overwrite the open file, or fall back to the save dialog
    pub fn quick_save(&mut self) {
        match save::quick_save(&mut self.doc) {
            Ok(SaveOutcome::NeedsTarget) => self.request_save(),
            Ok(outcome) => self.set_status_message(outcome.message()),
            Err(e) => self.report_error(e),
        }
    }

    // ---- Theme and preview -------------------------------------------------

    /// Switch theme and remember the choice
    pub fn toggle_theme(&mut self) {
        self.theme_variant = self.theme_variant.toggle();
        self.config.theme = self.theme_variant;
        self.theme = Theme::for_variant(self.theme_variant);
        log::debug!("Theme switched to {}", self.theme_variant);

        if let Some(path) = self.config_path.clone() {
            if let Err(e) = self.config.save_to(&path) {
                self.report_error(e.context("Failed to save theme preference"));
            }
        }
    }

    pub fn toggle_preview(&mut self) {
        if !self.show_preview && self.doc.is_blank() {
            self.set_status_message("Nothing to preview.");
            return;
        }
        self.show_preview = !self.show_preview;
        self.preview_scroll = 0;
    }

    /// Rendered preview of the current document, surrounding blank space dropped
    pub fn preview_lines(&mut self) -> Vec<Line<'static>> {
        let key = RenderKey {
            doc_rev: self.doc.rev,
            theme: self.theme_variant,
        };
        if let Some(lines) = self.preview_cache.get(&key) {
            return lines.clone();
        }

        let lines = render::render_lines(self.doc.text().trim(), &self.theme);
        self.preview_cache.put(key, lines.clone());
        lines
    }

    pub fn scroll_preview(&mut self, delta: isize) {
        let max = self.preview_lines().len().saturating_sub(1);
        self.preview_scroll = self.preview_scroll.saturating_add_signed(delta).min(max);
    }

    // ---- Editing -----------------------------------------------------------

    pub fn insert_char(&mut self, c: char) {
        self.cursor.insert_char(&mut self.doc, c);
        self.last_hit = None;
    }

    pub fn insert_tab(&mut self) {
        self.cursor.insert_str(&mut self.doc, &" ".repeat(TAB_WIDTH));
        self.last_hit = None;
    }

    pub fn newline(&mut self) {
        self.cursor.newline(&mut self.doc);
        self.last_hit = None;
    }

    pub fn backspace(&mut self) {
        self.cursor.backspace(&mut self.doc);
        self.last_hit = None;
    }

    pub fn delete(&mut self) {
        self.cursor.delete(&mut self.doc);
        self.last_hit = None;
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left(&self.doc);
        self.last_hit = None;
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right(&self.doc);
        self.last_hit = None;
    }

    pub fn move_up(&mut self, count: usize) {
        self.cursor.move_up(&self.doc, count);
        self.last_hit = None;
    }

    pub fn move_down(&mut self, count: usize) {
        self.cursor.move_down(&self.doc, count);
        self.last_hit = None;
    }

    pub fn line_start(&mut self) {
        self.cursor.line_start();
        self.last_hit = None;
    }

    pub fn line_end(&mut self) {
        self.cursor.line_end(&self.doc);
        self.last_hit = None;
    }

    pub fn doc_start(&mut self) {
        self.cursor.doc_start();
        self.last_hit = None;
    }

    pub fn doc_end(&mut self) {
        self.cursor.doc_end(&self.doc);
        self.last_hit = None;
    }

    /// Adjust vertical scroll so the cursor line is on screen
    pub fn ensure_cursor_visible(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor.line < self.scroll {
            self.scroll = self.cursor.line;
        } else if self.cursor.line >= self.scroll + viewport_height {
            self.scroll = self.cursor.line + 1 - viewport_height;
        }
    }

    pub fn scroll_editor(&mut self, delta: isize) {
        let max = self.doc.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }

    // ---- Search ------------------------------------------------------------

    pub fn begin_find(&mut self) {
        let query = self.search_query.clone();
        self.open_prompt(PromptKind::Find, query);
    }

    pub fn begin_replace(&mut self) {
        let query = self.search_query.clone();
        self.open_prompt(PromptKind::ReplaceQuery, query);
    }

    /// Set the query and jump to the first match after the cursor
    pub fn search(&mut self, query: &str) {
        self.search_query = query.to_string();
        self.last_hit = None;
        self.find_next();
    }

    pub fn find_next(&mut self) {
        if self.search_query.is_empty() {
            return;
        }
        let from_char = match self.last_hit {
            Some((_, end)) => end,
            None => self.cursor.char_idx(&self.doc),
        };
        let from = self.doc.rope.char_to_byte(from_char.min(self.doc.rope.len_chars()));
        let hit = search::find_next(&self.doc.text(), &self.search_query, from);
        self.jump_to_hit(hit);
    }

    pub fn find_prev(&mut self) {
        if self.search_query.is_empty() {
            return;
        }
        let before_char = match self.last_hit {
            Some((start, _)) => start,
            None => self.cursor.char_idx(&self.doc),
        };
        let before = self.doc.rope.char_to_byte(before_char.min(self.doc.rope.len_chars()));
        let hit = search::find_prev(&self.doc.text(), &self.search_query, before);
        self.jump_to_hit(hit);
    }

    fn jump_to_hit(&mut self, hit: Option<SearchHit>) {
        let Some(hit) = hit else {
            self.set_status_message(format!("No matches for '{}'", self.search_query));
            return;
        };

        let start = self.doc.rope.byte_to_char(hit.start);
        let end = self.doc.rope.byte_to_char(hit.end);
        self.cursor.set_from_char_idx(&self.doc, start);
        self.last_hit = Some((start, end));
        self.set_status_message(if hit.wrapped { "Wrapped" } else { "Found" });
    }

    pub fn replace_all(&mut self, query: &str, replacement: &str) {
        self.search_query = query.to_string();
        let (text, count) = search::replace_all(&self.doc.text(), query, replacement);
        if count > 0 {
            let idx = self.cursor.char_idx(&self.doc);
            self.doc.replace_text(&text);
            self.cursor.set_from_char_idx(&self.doc, idx);
            self.last_hit = None;
        }
        self.set_status_message(format!("Replaced {} occurrence(s)", count));
    }

    /// Ask for a replacement for the current match
    pub fn begin_replace_match(&mut self) {
        if self.last_hit.is_none() {
            self.set_status_message("No current match.");
            return;
        }
        self.open_prompt(PromptKind::ReplaceMatch, String::new());
    }

    /// Replace the current match and move on to the next one
    pub fn replace_current(&mut self, replacement: &str) {
        let Some((start, end)) = self.last_hit else {
            self.set_status_message("No current match.");
            return;
        };
        let matches_query = self
            .doc
            .rope
            .get_slice(start..end)
            .is_some_and(|current| current.to_string().eq_ignore_ascii_case(&self.search_query));
        if !matches_query {
            self.last_hit = None;
            self.set_status_message("No current match.");
            return;
        }

        self.doc.remove(start..end);
        self.doc.insert(start, replacement);
        self.cursor
            .set_from_char_idx(&self.doc, start + replacement.chars().count());
        self.last_hit = None;
        self.find_next();
    }

    // ---- Dialogs -----------------------------------------------------------

    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Apply the text typed into the current prompt
    pub fn submit_prompt(&mut self) {
        let Some(Dialog::Prompt(prompt)) = self.dialog.take() else {
            return;
        };

        let needs_file = matches!(
            prompt.kind,
            PromptKind::Open | PromptKind::New | PromptKind::SaveTarget(..)
        );
        let path = prompt.path();
        if needs_file && (path.as_os_str().is_empty() || path.is_dir()) {
            self.set_status_message("No file selected.");
            return;
        }

        match prompt.kind {
            PromptKind::Open => self.open_file(&path),
            PromptKind::New => self.new_file(&path),
            PromptKind::SaveTarget(choice, options) => {
                self.submit_save_target(choice, options, path)
            }
            PromptKind::Find => self.search(&prompt.input),
            PromptKind::ReplaceQuery => {
                if !prompt.input.is_empty() {
                    self.open_prompt(
                        PromptKind::ReplaceWith {
                            query: prompt.input,
                        },
                        String::new(),
                    );
                }
            }
            PromptKind::ReplaceWith { query } => self.replace_all(&query, &prompt.input),
            PromptKind::ReplaceMatch => self.replace_current(&prompt.input),
        }
    }

    /// Resolve the open confirmation dialog
    pub fn answer_confirm(&mut self, yes: bool) {
        let Some(Dialog::Confirm(confirm)) = self.dialog.take() else {
            return;
        };
        if !yes {
            return;
        }

        match confirm.action {
            PendingAction::CloseFile => self.close_file(),
            PendingAction::Quit => self.quit(),
            PendingAction::NewFile(path) => self.create_file(&path),
            PendingAction::Save {
                choice,
                target,
                options,
            } => self.perform_save(choice, &options, &target),
        }
    }

    /// Quit, asking first if there are unsaved edits
    pub fn request_quit(&mut self) {
        if self.doc.is_modified() && !self.doc.is_blank() {
            self.dialog = Some(Dialog::Confirm(Confirm::new(
                "Quit",
                "Quit notpad? Unsaved changes will be lost.",
                PendingAction::Quit,
            )));
        } else {
            self.quit();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
