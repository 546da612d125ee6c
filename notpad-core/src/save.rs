//! Saving the session: prepend, append, save as new, or overwrite

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

use crate::doc::Document;

/// What the user picked in the save dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Prepend,
    Append,
    SaveNew,
    Cancel,
}

impl SaveChoice {
    pub const ALL: [SaveChoice; 4] = [
        SaveChoice::Prepend,
        SaveChoice::Append,
        SaveChoice::SaveNew,
        SaveChoice::Cancel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SaveChoice::Prepend => "Prepend to existing file",
            SaveChoice::Append => "Append to existing file",
            SaveChoice::SaveNew => "Save as new file",
            SaveChoice::Cancel => "Cancel",
        }
    }

    /// Whether the choice writes into a file that must already exist
    pub fn targets_existing(self) -> bool {
        matches!(self, SaveChoice::Prepend | SaveChoice::Append)
    }
}

/// How a file was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Prepend,
    Append,
    New,
    Overwrite,
}

/// Width of a separator line in columns
pub const SEPARATOR_WIDTH: usize = 80;

/// Longest label that still leaves underscores on both sides
const SEPARATOR_LABEL_MAX: usize = SEPARATOR_WIDTH - 4;

/// Date shown in a separator line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `26-10-15`
    Short,
    /// `2026-October-15`
    Long,
}

impl DateStyle {
    pub fn format(self, date: NaiveDate) -> String {
        match self {
            DateStyle::Short => date.format("%y-%m-%d").to_string(),
            DateStyle::Long => date.format("%Y-%B-%d").to_string(),
        }
    }
}

/// Underscore rule written above and below a saved note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub date: Option<DateStyle>,
    /// Extra text placed after the date
    pub text: String,
}

impl Separator {
    /// Label centred in the rule: date, text, or `date_text`
    pub fn label(&self, today: NaiveDate) -> String {
        let date = self.date.map(|style| style.format(today));
        let text = self.text.trim();
        match (date, text.is_empty()) {
            (Some(date), true) => date,
            (Some(date), false) => format!("{}_{}", date, text),
            (None, _) => text.to_string(),
        }
    }
}

/// Per-save settings chosen in the save dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    pub separator: Option<Separator>,
}

impl SaveOptions {
    /// Wrap `content` in separator lines when one is requested
    pub fn decorate(&self, content: &str, today: NaiveDate) -> String {
        match &self.separator {
            Some(separator) => {
                let line = separator_line(&separator.label(today));
                format!("{line}\n\n{content}\n\n{line}")
            }
            None => content.to_string(),
        }
    }
}

/// An 80 column underscore rule with `label` centred in it
///
/// Labels longer than 76 chars are truncated. Odd padding puts the extra
/// underscore on the right.
pub fn separator_line(label: &str) -> String {
    let label: String = label.chars().take(SEPARATOR_LABEL_MAX).collect();
    let padding = SEPARATOR_WIDTH - label.chars().count();
    let left = padding / 2;
    format!("{}{}{}", "_".repeat(left), label, "_".repeat(padding - left))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { path: PathBuf, mode: SaveMode },
    /// The buffer was empty
    NothingToSave,
    /// Quick save with no file bound; the caller should ask where to save
    NeedsTarget,
    Cancelled,
}

impl SaveOutcome {
    /// Message to show the user
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Saved { mode: SaveMode::Prepend, .. } => {
                "Content prepended successfully.".to_string()
            }
            SaveOutcome::Saved { mode: SaveMode::Append, .. } => {
                "Content appended successfully.".to_string()
            }
            SaveOutcome::Saved { mode: SaveMode::New, .. } => "File saved successfully.".to_string(),
            SaveOutcome::Saved { path, mode: SaveMode::Overwrite } => format!(
                "File saved to {}",
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            ),
            SaveOutcome::NothingToSave => "Nothing to save.".to_string(),
            SaveOutcome::NeedsTarget => "Choose where to save.".to_string(),
            SaveOutcome::Cancelled => "Save cancelled.".to_string(),
        }
    }
}

/// Text that would be written, or `None` when there is nothing to save
pub fn content_to_save(doc: &Document) -> Option<String> {
    let text = doc.text();
    let content = text.trim_end_matches(['\n', '\r']);
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// New content on top, existing below
pub fn prepend(new: &str, existing: &str) -> String {
    format!("{}\n\n{}", new, existing)
}

/// Existing content on top, new below
pub fn append(existing: &str, new: &str) -> String {
    format!("{}\n\n{}", existing, new)
}

fn same_file(doc: &Document, target: &Path) -> bool {
    match (&doc.path, target.canonicalize()) {
        (Some(current), Ok(target)) => *current == target,
        _ => false,
    }
}

/// Question to ask before writing into an existing file, if any
///
/// Prepending always asks. Appending only asks when the target is the open
/// file and nothing has changed, which would duplicate the file.
pub fn confirmation_prompt(doc: &Document, choice: SaveChoice, target: &Path) -> Option<String> {
    let unchanged_self = same_file(doc, target) && !doc.is_modified();
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| target.display().to_string());

    match choice {
        SaveChoice::Prepend if unchanged_self => Some(
            "You are about to prepend a file to itself with no changes. Continue anyway?"
                .to_string(),
        ),
        SaveChoice::Prepend => Some(format!("Prepend to {}?", name)),
        SaveChoice::Append if unchanged_self => Some(
            "You are about to append a file to itself with no changes. Continue anyway?"
                .to_string(),
        ),
        SaveChoice::SaveNew if target.exists() => {
            Some(format!("{} already exists. Replace it?", name))
        }
        _ => None,
    }
}

/// Carry out a save dialog choice against `target`
///
/// On success the session is cleared, ready for the next note. On failure the
/// document is left untouched.
pub fn save(
    doc: &mut Document,
    choice: SaveChoice,
    target: &Path,
    options: &SaveOptions,
) -> Result<SaveOutcome> {
    let mode = match choice {
        SaveChoice::Cancel => return Ok(SaveOutcome::Cancelled),
        SaveChoice::Prepend => SaveMode::Prepend,
        SaveChoice::Append => SaveMode::Append,
        SaveChoice::SaveNew => SaveMode::New,
    };

    let Some(content) = content_to_save(doc) else {
        return Ok(SaveOutcome::NothingToSave);
    };
    let content = options.decorate(&content, Local::now().date_naive());

    let final_content = if choice.targets_existing() {
        let existing = fs::read_to_string(target)
            .with_context(|| format!("Could not read file: {}", target.display()))?;
        match mode {
            SaveMode::Prepend => prepend(&content, &existing),
            _ => append(&existing, &content),
        }
    } else {
        content
    };

    fs::write(target, final_content)
        .with_context(|| format!("Could not save file: {}", target.display()))?;
    log::info!("Saved ({:?}) to {}", mode, target.display());

    doc.reset();
    Ok(SaveOutcome::Saved {
        path: target.to_path_buf(),
        mode,
    })
}

/// Overwrite the open file with the buffer
pub fn quick_save(doc: &mut Document) -> Result<SaveOutcome> {
    let Some(content) = content_to_save(doc) else {
        return Ok(SaveOutcome::NothingToSave);
    };
    let Some(path) = doc.path.clone() else {
        return Ok(SaveOutcome::NeedsTarget);
    };

    fs::write(&path, content)
        .with_context(|| format!("Could not save file: {}", path.display()))?;
    log::info!("Saved {}", path.display());

    doc.mark_saved();
    Ok(SaveOutcome::Saved {
        path,
        mode: SaveMode::Overwrite,
    })
}
