//! notpad TUI - Terminal user interface components
//!
//! This crate contains all ratatui/crossterm integration:
//! - App state and the editing session
//! - Event loop, keybindings and mouse scrolling
//! - Editor pane, markdown preview and status bar
//! - Save, prompt and confirmation dialogs
//! - Theme system

pub mod app;
pub mod dialogs;
pub mod input;
pub mod render;
pub mod terminal;
pub mod theme;
pub mod ui;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyEventKind};
use std::time::Duration;

// Re-export main types
pub use app::App;

/// Run the TUI application
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = terminal::init().context("Failed to initialize terminal")?;

    let result = run_loop(&mut terminal, &mut app);

    // Always restore terminal, even if run_loop fails
    terminal::restore().context("Failed to restore terminal")?;

    result
}

fn run_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<()> {
    loop {
        let size = terminal.size()?;
        // -1 for status bar, -2 for pane borders (top and bottom)
        let viewport_height = size.height.saturating_sub(3) as usize;

        terminal
            .draw(|frame| ui::draw(frame, app))
            .context("Failed to draw frame")?;

        if app.should_quit {
            break;
        }

        if !crossterm::event::poll(Duration::from_millis(100)).context("Failed to poll events")? {
            continue;
        }

        match crossterm::event::read().context("Failed to read event")? {
            // Only handle key press events, ignore release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if input::handle_input(app, key, viewport_height)? == input::Action::Quit {
                    break;
                }
            }
            Event::Mouse(mouse) => {
                let area = ratatui::layout::Rect::new(0, 0, size.width, size.height);
                input::handle_mouse(app, mouse, area);
            }
            _ => {}
        }
    }

    log::debug!("Leaving event loop");
    Ok(())
}
