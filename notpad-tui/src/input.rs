//! Input handling and keybindings

use crate::app::App;
use crate::dialogs::Dialog;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use notpad_core::SaveChoice;
use ratatui::layout::Rect;

/// Lines moved per mouse wheel notch
const WHEEL_LINES: isize = 3;

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Handle a key event with the editor viewport height for paging
pub fn handle_input(app: &mut App, key: KeyEvent, viewport_height: usize) -> Result<Action> {
    // Clear status message on any keystroke (except pure modifiers)
    if !matches!(key.code, KeyCode::Modifier(_)) {
        app.clear_status_message();
    }

    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return Ok(Action::Quit);
    }

    match app.dialog {
        Some(Dialog::Save(_)) => handle_save_dialog(app, key),
        Some(Dialog::Prompt(_)) => handle_prompt(app, key),
        Some(Dialog::Confirm(_)) => handle_confirm(app, key),
        None => handle_editor(app, key, viewport_height),
    }

    if app.should_quit {
        return Ok(Action::Quit);
    }
    Ok(Action::Continue)
}

fn handle_save_dialog(app: &mut App, key: KeyEvent) {
    let Some(Dialog::Save(dialog)) = app.dialog.as_mut() else {
        return;
    };

    if dialog.editing_text {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => dialog.editing_text = false,
            KeyCode::Backspace => {
                dialog.separator_text.pop();
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                dialog.separator_text.push(c)
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => dialog.move_up(),
        KeyCode::Down | KeyCode::Char('j') => dialog.move_down(),
        KeyCode::Char(' ') | KeyCode::Char('s') => dialog.toggle_separator(),
        KeyCode::Char('d') => dialog.cycle_date(),
        KeyCode::Char('t') | KeyCode::Tab => {
            dialog.add_separator = true;
            dialog.editing_text = true;
        }
        KeyCode::Enter => {
            let choice = dialog.selected();
            let options = dialog.options();
            app.choose_save(choice, options);
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = (c as usize) - ('1' as usize);
            let options = dialog.options();
            app.choose_save(SaveChoice::ALL[idx], options);
        }
        KeyCode::Esc => app.cancel_dialog(),
        _ => {}
    }
}

fn handle_prompt(app: &mut App, key: KeyEvent) {
    let Some(Dialog::Prompt(prompt)) = app.dialog.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Enter => app.submit_prompt(),
        KeyCode::Esc => app.cancel_dialog(),
        KeyCode::Backspace => prompt.backspace(),
        KeyCode::Delete => prompt.delete(),
        KeyCode::Left => prompt.move_left(),
        KeyCode::Right => prompt.move_right(),
        KeyCode::Home => prompt.home(),
        KeyCode::End => prompt.end(),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            prompt.insert(c)
        }
        _ => {}
    }
}

fn handle_confirm(app: &mut App, key: KeyEvent) {
    let Some(Dialog::Confirm(confirm)) = app.dialog.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_confirm(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirm(false),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
            confirm.toggle_focus()
        }
        KeyCode::Enter => {
            let yes = confirm.yes_focused;
            app.answer_confirm(yes);
        }
        _ => {}
    }
}

fn handle_editor(app: &mut App, key: KeyEvent, viewport_height: usize) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let page = viewport_height.max(1);

    match key.code {
        // Commands
        KeyCode::Char('n') if ctrl => app.begin_new_file(),
        KeyCode::Char('o') if ctrl => app.begin_open_file(),
        KeyCode::Char('s') | KeyCode::Char('S') if ctrl && shift => app.request_save(),
        KeyCode::Char('s') if ctrl => app.quick_save(),
        KeyCode::F(2) => app.request_save(),
        KeyCode::Char('w') if ctrl => app.request_close(),
        KeyCode::Char('p') if ctrl => app.toggle_preview(),
        KeyCode::Char('t') if ctrl => app.toggle_theme(),
        KeyCode::Char('f') if ctrl => app.begin_find(),
        KeyCode::Char('r') if ctrl => app.begin_replace(),
        KeyCode::F(3) if shift => app.find_prev(),
        KeyCode::F(3) => app.find_next(),
        KeyCode::F(4) => app.begin_replace_match(),
        KeyCode::Char('q') if ctrl => app.request_quit(),
        KeyCode::Esc => app.clear_status_message(),

        // Preview scrolling
        KeyCode::Up if alt => app.scroll_preview(-1),
        KeyCode::Down if alt => app.scroll_preview(1),
        KeyCode::PageUp if alt => app.scroll_preview(-(page as isize)),
        KeyCode::PageDown if alt => app.scroll_preview(page as isize),

        // Movement
        KeyCode::Left => app.move_left(),
        KeyCode::Right => app.move_right(),
        KeyCode::Up => app.move_up(1),
        KeyCode::Down => app.move_down(1),
        KeyCode::PageUp => app.move_up(page),
        KeyCode::PageDown => app.move_down(page),
        KeyCode::Home if ctrl => app.doc_start(),
        KeyCode::End if ctrl => app.doc_end(),
        KeyCode::Home => app.line_start(),
        KeyCode::End => app.line_end(),

        // Editing
        KeyCode::Enter => app.newline(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Tab => app.insert_tab(),
        KeyCode::Char(c) if !ctrl && !alt => app.insert_char(c),
        _ => {}
    }

    app.ensure_cursor_visible(viewport_height);
}

/// Handle mouse wheel scrolling over the editor or preview pane
pub fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) {
    if app.dialog.is_some() {
        return;
    }

    let delta = match mouse.kind {
        MouseEventKind::ScrollUp => -WHEEL_LINES,
        MouseEventKind::ScrollDown => WHEEL_LINES,
        _ => return,
    };

    let over_preview = app.show_preview && mouse.column >= area.x + area.width / 2;
    if over_preview {
        app.scroll_preview(delta);
    } else {
        app.scroll_editor(delta);
    }
}
