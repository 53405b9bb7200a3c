//! Key mapping from terminal events to board actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor direction on the board (row 0 is the bottom, so `Up` raises the row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key press asks the board UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardAction {
    /// Move the cursor one cell.
    Move(Direction),
    /// Swap the glyph under the cursor with its neighbour in a direction.
    SwapToward(Direction),
    /// Pick the cell under the cursor, or complete a swap with the picked cell.
    Select,
    /// Drop the current selection.
    Cancel,
    Hint,
    Restart,
}

/// Map keyboard input to board actions.
///
/// Arrows / hjkl / wasd move the cursor; with Shift they swap instead.
pub fn handle_key_event(key: KeyEvent) -> Option<BoardAction> {
    let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
    let direction = match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Direction::Down),
        // Terminals report Shift+letter as the uppercase letter.
        KeyCode::Char('H') | KeyCode::Char('A') => return Some(BoardAction::SwapToward(Direction::Left)),
        KeyCode::Char('L') | KeyCode::Char('D') => return Some(BoardAction::SwapToward(Direction::Right)),
        KeyCode::Char('K') | KeyCode::Char('W') => return Some(BoardAction::SwapToward(Direction::Up)),
        KeyCode::Char('J') | KeyCode::Char('S') => return Some(BoardAction::SwapToward(Direction::Down)),
        _ => None,
    };

    if let Some(direction) = direction {
        return Some(if shifted {
            BoardAction::SwapToward(direction)
        } else {
            BoardAction::Move(direction)
        });
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(BoardAction::Select),
        KeyCode::Esc => Some(BoardAction::Cancel),
        KeyCode::Char('?') | KeyCode::Char('t') | KeyCode::Char('T') => Some(BoardAction::Hint),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(BoardAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
