// Keyboard handling for the terminal game.

use std::io::{self, stdout};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};

use crate::game::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Any key that is not a command is a move in `Direction::None`.
    Move(Direction),
    Restart,
    Quit,
}

pub fn action_for(key: &KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Action::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Action::Move(Direction::Right),
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('r') => Action::Restart,
        _ => Action::Move(Direction::None),
    }
}

/// Blocks until the next key press.
pub fn read_action() -> io::Result<Action> {
    loop {
        if let Event::Key(key) = read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(action_for(&key));
            }
        }
    }
}

/// Raw mode with a hidden cursor for as long as it lives.
/// Dropping it, on any exit path, gives the terminal back.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> io::Result<TerminalGuard> {
        enable_raw_mode()?;
        execute!(stdout(), Hide, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
        let _ = disable_raw_mode();
    }
}
