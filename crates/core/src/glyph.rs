//! Glyph records.

use serde::{Deserialize, Serialize};

use crate::types::{BonusKind, GlyphKind, Position};

/// Unique identity of a glyph instance. Never reused within one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GlyphId(pub u32);

/// A typed game piece.
///
/// Values handed out by the board are copies; `row` and `column` describe the
/// slot the glyph occupied when the copy was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    pub id: GlyphId,
    pub kind: GlyphKind,
    pub bonus: BonusKind,
    pub row: usize,
    pub column: usize,
}

impl Glyph {
    pub fn position(&self) -> Position {
        Position::new(self.row, self.column)
    }

    pub fn is_same_kind(&self, other: &Glyph) -> bool {
        self.kind == other.kind
    }

    pub fn clears_row_column(&self) -> bool {
        self.bonus == BonusKind::ClearRowColumn
    }
}
