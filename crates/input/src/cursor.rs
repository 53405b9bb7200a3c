//! Board cursor and selection.
//!
//! Turns [`BoardAction`]s into swap requests. The cursor never leaves the
//! board; adjacency of the final request is still checked by the engine.

use crate::map::{BoardAction, Direction};
use crate::types::Position;

/// What the UI should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorOutput {
    /// Only the cursor or selection changed.
    Redraw,
    Swap { a: Position, b: Position },
    Hint,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    rows: usize,
    columns: usize,
    position: Position,
    selected: Option<Position>,
}

impl Cursor {
    /// Cursor at the bottom-left cell of a `rows x columns` board.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            position: Position::new(0, 0),
            selected: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// The neighbour of `from` in `direction`, if it is on the board.
    pub fn neighbour(&self, from: Position, direction: Direction) -> Option<Position> {
        let (row, column) = (from.row, from.column);
        let next = match direction {
            Direction::Left => Position::new(row, column.checked_sub(1)?),
            Direction::Right => Position::new(row, column + 1),
            Direction::Down => Position::new(row.checked_sub(1)?, column),
            Direction::Up => Position::new(row + 1, column),
        };
        (next.row < self.rows && next.column < self.columns).then_some(next)
    }

    pub fn apply(&mut self, action: BoardAction) -> Option<CursorOutput> {
        match action {
            BoardAction::Move(direction) => {
                let next = self.neighbour(self.position, direction)?;
                self.position = next;
                Some(CursorOutput::Redraw)
            }
            BoardAction::SwapToward(direction) => {
                let other = self.neighbour(self.position, direction)?;
                self.selected = None;
                let a = self.position;
                self.position = other;
                Some(CursorOutput::Swap { a, b: other })
            }
            BoardAction::Select => Some(self.select()),
            BoardAction::Cancel => self.selected.take().map(|_| CursorOutput::Redraw),
            BoardAction::Hint => Some(CursorOutput::Hint),
            BoardAction::Restart => {
                self.selected = None;
                Some(CursorOutput::Restart)
            }
        }
    }

    /// First press picks a cell; a second press on a neighbour requests the
    /// swap, on the same cell unpicks it, anywhere else re-picks.
    fn select(&mut self) -> CursorOutput {
        match self.selected {
            Some(picked) if picked == self.position => {
                self.selected = None;
                CursorOutput::Redraw
            }
            Some(picked) if picked.is_adjacent(self.position) => {
                self.selected = None;
                CursorOutput::Swap {
                    a: picked,
                    b: self.position,
                }
            }
            _ => {
                self.selected = Some(self.position);
                CursorOutput::Redraw
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_stays_on_board() {
        let mut cursor = Cursor::new(3, 3);
        assert_eq!(cursor.apply(BoardAction::Move(Direction::Left)), None);
        assert_eq!(cursor.apply(BoardAction::Move(Direction::Down)), None);

        for _ in 0..5 {
            cursor.apply(BoardAction::Move(Direction::Up));
            cursor.apply(BoardAction::Move(Direction::Right));
        }
        assert_eq!(cursor.position(), Position::new(2, 2));
    }

    #[test]
    fn test_select_then_neighbour_requests_swap() {
        let mut cursor = Cursor::new(4, 4);
        cursor.apply(BoardAction::Select);
        assert_eq!(cursor.selected(), Some(Position::new(0, 0)));

        cursor.apply(BoardAction::Move(Direction::Up));
        assert_eq!(
            cursor.apply(BoardAction::Select),
            Some(CursorOutput::Swap {
                a: Position::new(0, 0),
                b: Position::new(1, 0)
            })
        );
        assert_eq!(cursor.selected(), None);
    }

    #[test]
    fn test_select_far_cell_moves_selection() {
        let mut cursor = Cursor::new(4, 4);
        cursor.apply(BoardAction::Select);
        cursor.apply(BoardAction::Move(Direction::Up));
        cursor.apply(BoardAction::Move(Direction::Right));
        assert_eq!(cursor.apply(BoardAction::Select), Some(CursorOutput::Redraw));
        assert_eq!(cursor.selected(), Some(Position::new(1, 1)));

        // Same cell again unpicks.
        cursor.apply(BoardAction::Select);
        assert_eq!(cursor.selected(), None);
    }

    #[test]
    fn test_swap_toward_follows_glyph() {
        let mut cursor = Cursor::new(4, 4);
        assert_eq!(
            cursor.apply(BoardAction::SwapToward(Direction::Right)),
            Some(CursorOutput::Swap {
                a: Position::new(0, 0),
                b: Position::new(0, 1)
            })
        );
        assert_eq!(cursor.position(), Position::new(0, 1));
        assert_eq!(cursor.apply(BoardAction::SwapToward(Direction::Down)), None);
    }

    #[test]
    fn test_cancel_only_when_selected() {
        let mut cursor = Cursor::new(2, 2);
        assert_eq!(cursor.apply(BoardAction::Cancel), None);
        cursor.apply(BoardAction::Select);
        assert_eq!(cursor.apply(BoardAction::Cancel), Some(CursorOutput::Redraw));
        assert_eq!(cursor.selected(), None);
    }
}
