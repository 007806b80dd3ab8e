//! Event handling for keyboard input using crossterm.

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

use crate::tui::app::{App, Screen};

/// Poll for events and handle them.
/// Returns Ok(true) if the app should quit.
pub fn handle_events(app: &mut App) -> io::Result<bool> {
    if event::poll(Duration::from_millis(100))?
        && let Event::Key(key) = event::read()?
    {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }

        // Handle Ctrl+C globally
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        handle_key(app, key.code);
    }

    Ok(!app.running)
}

pub fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => {
            if app.screen == Screen::Dashboard {
                app.quit();
            } else {
                app.screen = Screen::Dashboard;
            }
        }
        KeyCode::Char('e') => app.export(),
        KeyCode::Char('x') => app.toggle(Screen::Explanation),
        KeyCode::Char('?') | KeyCode::Char('h') => app.toggle(Screen::Help),
        _ => {}
    }
}
