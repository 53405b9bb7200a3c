use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::types::Position;

/// Read-only copy of the grid for renderers and loaders.
///
/// `cells` is row-major with row 0 at the bottom, like the board itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Cell>,
}

impl BoardSnapshot {
    /// Cell at `position`, or `None` when out of bounds or empty.
    pub fn get(&self, position: Position) -> Cell {
        if position.row >= self.rows || position.column >= self.columns {
            return None;
        }
        self.cells[position.row * self.columns + position.column]
    }

    pub fn glyph_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

/// Top row first, one letter per glyph (lowercase = bonus), `.` for empty.
impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for column in 0..self.columns {
                let ch = match self.get(Position::new(row, column)) {
                    Some(glyph) if glyph.clears_row_column() => {
                        glyph.kind.as_char().to_ascii_lowercase()
                    }
                    Some(glyph) => glyph.kind.as_char(),
                    None => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
