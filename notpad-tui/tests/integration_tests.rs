//! Integration tests for notpad-tui
//!
//! These tests drive the application through its public API:
//! opening and creating files, typing, the save flows, closing,
//! theme persistence, preview and search.

use notpad_core::save::{separator_line, Separator};
use notpad_core::{Config, Document, SaveChoice, SaveOptions, ThemeVariant};
use notpad_tui::app::App;
use notpad_tui::dialogs::{Dialog, PendingAction};
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

/// Helper to create an app with nothing loaded and no config persistence
fn create_test_app() -> App {
    App::new(Config::default(), Document::empty()).persist_config_to(None)
}

/// Helper to create a temp file with known content
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write test content");
    file.flush().expect("Failed to flush");
    file
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        if c == '\n' {
            app.newline();
        } else {
            app.insert_char(c);
        }
    }
}

/// Run the save flow for `choice` against `target`, accepting any confirmation
fn save_via_dialog(app: &mut App, choice: SaveChoice, target: &Path) {
    save_with_options(app, choice, SaveOptions::default(), target);
}

fn save_with_options(app: &mut App, choice: SaveChoice, options: SaveOptions, target: &Path) {
    app.request_save();
    assert!(matches!(app.dialog, Some(Dialog::Save(_))));
    app.choose_save(choice, options.clone());
    app.submit_save_target(choice, options, target.to_path_buf());
    if matches!(app.dialog, Some(Dialog::Confirm(_))) {
        app.answer_confirm(true);
    }
}

#[test]
fn integration_app_initialization() {
    let app = create_test_app();

    assert!(!app.should_quit);
    assert!(!app.show_preview);
    assert!(app.dialog.is_none());
    assert_eq!(app.theme_variant, ThemeVariant::Light);
    assert_eq!(app.doc.title(), "notpad");
}

#[test]
fn integration_open_and_edit() {
    let file = create_test_file("# Notes\nfirst\n");
    let mut app = create_test_app();

    app.open_file(file.path());
    assert_eq!(app.doc.text(), "# Notes\nfirst\n");
    assert!(!app.doc.is_modified());
    assert!(app.status_message.as_deref().unwrap_or("").starts_with("Opened"));

    app.doc_end();
    type_text(&mut app, "second");
    assert!(app.doc.is_modified());
    assert_eq!(app.doc.text(), "# Notes\nfirst\nsecond");
}

#[test]
fn integration_open_missing_file_keeps_document() {
    let dir = tempdir().unwrap();
    let mut app = create_test_app();
    type_text(&mut app, "draft");

    app.open_file(&dir.path().join("missing.md"));
    assert_eq!(app.doc.text(), "draft");
    assert!(app.status_message.as_deref().unwrap_or("").starts_with("Error"));
}

#[test]
fn integration_new_file_is_created() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fresh.md");
    let mut app = create_test_app();

    app.new_file(&path);
    assert!(path.exists());
    assert_eq!(app.doc.title(), "notpad - fresh.md");
    assert!(app.doc.is_blank());
}

#[test]
fn integration_new_file_over_existing_asks_first() {
    let file = create_test_file("years of notes");
    let mut app = create_test_app();
    type_text(&mut app, "draft");

    app.new_file(file.path());
    match &app.dialog {
        Some(Dialog::Confirm(confirm)) => {
            assert_eq!(confirm.action, PendingAction::NewFile(file.path().to_path_buf()));
            assert!(confirm.message.ends_with("already exists. Replace it?"));
        }
        other => panic!("expected confirm dialog, got {:?}", other),
    }

    app.answer_confirm(false);
    assert_eq!(app.doc.text(), "draft");
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "years of notes");
}

#[test]
fn integration_new_file_over_existing_replaces_after_save() {
    let file = create_test_file("old");
    let mut app = create_test_app();

    app.new_file(file.path());
    app.answer_confirm(true);
    assert!(app.doc.is_blank());
    let bound = file.path().canonicalize().unwrap();
    assert_eq!(app.doc.path.as_deref(), Some(bound.as_path()));
    // Untouched until the next save
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "old");

    type_text(&mut app, "new");
    app.quick_save();
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "new");
}

#[test]
fn integration_save_new_then_prepend() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.md");
    let mut app = create_test_app();

    type_text(&mut app, "older entry");
    save_via_dialog(&mut app, SaveChoice::SaveNew, &path);
    assert_eq!(fs::read_to_string(&path).unwrap(), "older entry");
    assert!(app.doc.is_blank());
    assert!(app.doc.path.is_none());

    type_text(&mut app, "newer entry");
    save_via_dialog(&mut app, SaveChoice::Prepend, &path);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "newer entry\n\nolder entry"
    );
    assert!(app.doc.is_blank());
}

#[test]
fn integration_save_new_over_existing_asks_first() {
    let file = create_test_file("years of notes");
    let mut app = create_test_app();
    type_text(&mut app, "x");

    app.request_save();
    app.choose_save(SaveChoice::SaveNew, SaveOptions::default());
    app.submit_save_target(
        SaveChoice::SaveNew,
        SaveOptions::default(),
        file.path().to_path_buf(),
    );
    match &app.dialog {
        Some(Dialog::Confirm(confirm)) => {
            assert!(confirm.message.ends_with("already exists. Replace it?"));
        }
        other => panic!("expected confirm dialog, got {:?}", other),
    }

    app.answer_confirm(false);
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "years of notes");
    assert_eq!(app.doc.text(), "x");

    save_via_dialog(&mut app, SaveChoice::SaveNew, file.path());
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "x");
}

#[test]
fn integration_save_new_with_separator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.md");
    let mut app = create_test_app();
    let options = SaveOptions {
        separator: Some(Separator {
            date: None,
            text: "Monday".to_string(),
        }),
    };

    type_text(&mut app, "entry");
    save_with_options(&mut app, SaveChoice::SaveNew, options, &path);

    let line = separator_line("Monday");
    assert_eq!(line.len(), 80);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("{line}\n\nentry\n\n{line}")
    );
}

#[test]
fn integration_append_to_existing() {
    let file = create_test_file("top");
    let mut app = create_test_app();

    type_text(&mut app, "bottom");
    save_via_dialog(&mut app, SaveChoice::Append, file.path());
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "top\n\nbottom");
}

#[test]
fn integration_cancel_save_choice() {
    let mut app = create_test_app();
    type_text(&mut app, "keep me");

    app.request_save();
    app.choose_save(SaveChoice::Cancel, SaveOptions::default());
    assert!(app.dialog.is_none());
    assert_eq!(app.doc.text(), "keep me");
}

#[test]
fn integration_save_with_nothing_to_save() {
    let mut app = create_test_app();
    type_text(&mut app, "\n\n");

    app.request_save();
    assert!(app.dialog.is_none());
    assert_eq!(app.status_message.as_deref(), Some("Nothing to save."));
}

#[test]
fn integration_quick_save_overwrites_open_file() {
    let file = create_test_file("v1");
    let mut app = create_test_app();
    app.open_file(file.path());

    app.doc_end();
    type_text(&mut app, " v2");
    app.quick_save();
    assert_eq!(fs::read_to_string(file.path()).unwrap(), "v1 v2");
    assert!(!app.doc.is_modified());
}

#[test]
fn integration_quick_save_without_file_opens_dialog() {
    let mut app = create_test_app();
    type_text(&mut app, "unbound");

    app.quick_save();
    assert!(matches!(app.dialog, Some(Dialog::Save(_))));
}

#[test]
fn integration_close_asks_for_confirmation() {
    let mut app = create_test_app();
    type_text(&mut app, "unsaved");

    app.request_close();
    match &app.dialog {
        Some(Dialog::Confirm(confirm)) => {
            assert_eq!(confirm.action, PendingAction::CloseFile);
            assert_eq!(
                confirm.message,
                "Close current file? Unsaved changes will be lost."
            );
        }
        other => panic!("expected confirm dialog, got {:?}", other),
    }

    app.answer_confirm(false);
    assert_eq!(app.doc.text(), "unsaved");

    app.request_close();
    app.answer_confirm(true);
    assert!(app.doc.is_blank());
}

#[test]
fn integration_close_blank_needs_no_confirmation() {
    let mut app = create_test_app();
    app.request_close();
    assert!(app.dialog.is_none());
}

#[test]
fn integration_theme_toggle_persists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("notpad.toml");
    let mut app = App::new(Config::default(), Document::empty())
        .persist_config_to(Some(config_path.clone()));

    app.toggle_theme();
    assert_eq!(app.theme_variant, ThemeVariant::Dark);

    let saved = Config::load_from(&config_path).unwrap();
    assert_eq!(saved.theme, ThemeVariant::Dark);

    app.toggle_theme();
    let saved = Config::load_from(&config_path).unwrap();
    assert_eq!(saved.theme, ThemeVariant::Light);
}

#[test]
fn integration_preview_toggle() {
    let mut app = create_test_app();

    app.toggle_preview();
    assert!(!app.show_preview);
    assert_eq!(app.status_message.as_deref(), Some("Nothing to preview."));

    type_text(&mut app, "# Heading\n- item");
    app.toggle_preview();
    assert!(app.show_preview);
    assert_eq!(app.preview_lines().len(), 2);

    app.toggle_preview();
    assert!(!app.show_preview);
}

#[test]
fn integration_preview_trims_surrounding_whitespace() {
    let mut app = create_test_app();
    type_text(&mut app, "\n\n  # Title\nbody\n\n");

    let lines = app.preview_lines();
    assert_eq!(lines.len(), 2);
    let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(first, "Title");
}

#[test]
fn integration_preview_tracks_edits_and_documents() {
    let file = create_test_file("one line");
    let mut app = create_test_app();
    type_text(&mut app, "a\nb\nc");
    assert_eq!(app.preview_lines().len(), 3);

    app.open_file(file.path());
    assert_eq!(app.preview_lines().len(), 1);

    app.doc_end();
    type_text(&mut app, "\nmore");
    assert_eq!(app.preview_lines().len(), 2);
}

#[test]
fn integration_find_next_and_prev() {
    let mut app = create_test_app();
    type_text(&mut app, "alpha\nbeta ALPHA\ngamma alpha");
    app.doc_start();

    app.search("alpha");
    assert_eq!((app.cursor.line, app.cursor.col), (0, 0));

    app.find_next();
    assert_eq!((app.cursor.line, app.cursor.col), (1, 5));

    app.find_next();
    assert_eq!((app.cursor.line, app.cursor.col), (2, 6));

    app.find_next();
    assert_eq!((app.cursor.line, app.cursor.col), (0, 0));
    assert_eq!(app.status_message.as_deref(), Some("Wrapped"));

    app.find_prev();
    assert_eq!((app.cursor.line, app.cursor.col), (2, 6));
}

#[test]
fn integration_find_without_match() {
    let mut app = create_test_app();
    type_text(&mut app, "nothing here");

    app.search("absent");
    assert_eq!(
        app.status_message.as_deref(),
        Some("No matches for 'absent'")
    );
    assert!(app.last_hit.is_none());
}

#[test]
fn integration_replace_all() {
    let mut app = create_test_app();
    type_text(&mut app, "cat and Cat and dog");

    app.replace_all("cat", "fox");
    assert_eq!(app.doc.text(), "fox and fox and dog");
    assert_eq!(app.status_message.as_deref(), Some("Replaced 2 occurrence(s)"));
}

#[test]
fn integration_quit_confirms_unsaved_work() {
    let mut app = create_test_app();
    app.request_quit();
    assert!(app.should_quit);

    let mut app = create_test_app();
    type_text(&mut app, "pending");
    app.request_quit();
    assert!(!app.should_quit);
    app.answer_confirm(true);
    assert!(app.should_quit);
}

#[test]
fn integration_replace_current_match() {
    let mut app = create_test_app();
    type_text(&mut app, "cat and Cat and cat");
    app.doc_start();

    app.search("cat");
    assert_eq!(app.last_hit, Some((0, 3)));

    app.replace_current("fox");
    assert_eq!(app.doc.text(), "fox and Cat and cat");
    assert_eq!(app.last_hit, Some((8, 11)));
    assert_eq!((app.cursor.line, app.cursor.col), (0, 8));

    app.replace_current("fox");
    assert_eq!(app.doc.text(), "fox and fox and cat");
    assert_eq!(app.last_hit, Some((16, 19)));
}

#[test]
fn integration_replace_current_without_match() {
    let mut app = create_test_app();
    type_text(&mut app, "cat");

    app.begin_replace_match();
    assert!(app.dialog.is_none());
    assert_eq!(app.status_message.as_deref(), Some("No current match."));

    app.replace_current("dog");
    assert_eq!(app.doc.text(), "cat");
}
