//! Potential-match scan for hints
//!
//! Tries every adjacent swap on a scratch copy of the board, in row-major
//! order (bottom row first) with the right neighbour tried before the upper
//! one. The live board is never touched, so repeated scans without an
//! intervening mutation return identical results.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::error::BoardError;
use crate::glyph::Glyph;
use crate::sets::MatchSet;
use crate::types::Position;

/// A swap that would produce a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialMatch {
    pub from: Position,
    pub to: Position,
    /// Glyphs (as they sit on the live board) that the swap would match.
    pub glyphs: Vec<Glyph>,
}

/// Right and upper neighbours of `position` that lie on the board.
fn forward_neighbours(board: &Board, position: Position) -> ArrayVec<Position, 2> {
    let mut out = ArrayVec::new();
    let right = Position::new(position.row, position.column + 1);
    if board.contains(right) {
        out.push(right);
    }
    let up = Position::new(position.row + 1, position.column);
    if board.contains(up) {
        out.push(up);
    }
    out
}

/// Matches produced by swapping `a` and `b` on `scratch`, which is restored
/// before returning.
fn trial_swap(scratch: &mut Board, a: Position, b: Position) -> Result<MatchSet, BoardError> {
    scratch.swap(a, b)?;
    let found = scratch.matches_at_all([a, b]);
    scratch.undo_swap()?;
    found
}

/// Every swap that would match, in scan order.
pub fn potential_matches(board: &Board) -> Result<Vec<PotentialMatch>, BoardError> {
    scan(board, usize::MAX)
}

/// The first swap in scan order that would match.
pub fn first_potential_match(board: &Board) -> Result<Option<PotentialMatch>, BoardError> {
    Ok(scan(board, 1)?.pop())
}

fn scan(board: &Board, limit: usize) -> Result<Vec<PotentialMatch>, BoardError> {
    let mut scratch = board.clone();
    let mut found = Vec::new();

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let from = Position::new(row, column);
            if board.get(from)?.is_none() {
                continue;
            }

            for to in forward_neighbours(board, from) {
                if board.get(to)?.is_none() {
                    continue;
                }

                let matches = trial_swap(&mut scratch, from, to)?;
                if matches.len() < board.min_match() {
                    continue;
                }

                let glyphs = matches
                    .iter()
                    .filter_map(|glyph| board.find(glyph.id))
                    .collect();
                found.push(PotentialMatch { from, to, glyphs });
                if found.len() >= limit {
                    return Ok(found);
                }
            }
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_horizontal_completion() {
        // Swapping (0,2) with (1,2) lines up three reds on row 0.
        let board = Board::from_layout(&["RRBG", "GBRY", "YGBR"]);
        let hint = first_potential_match(&board).unwrap().unwrap();
        assert_eq!(hint.from, Position::new(0, 2));
        assert_eq!(hint.to, Position::new(1, 2));
        assert_eq!(hint.glyphs.len(), 3);
        // Reported glyphs sit where the live board has them.
        for glyph in &hint.glyphs {
            assert_eq!(board.find(glyph.id), Some(*glyph));
        }
    }

    #[test]
    fn test_no_hint_on_dead_board() {
        let board = Board::from_layout(&["RGB", "YPO", "BRG"]);
        assert!(potential_matches(&board).unwrap().is_empty());
        assert!(first_potential_match(&board).unwrap().is_none());
    }

    #[test]
    fn test_scan_is_idempotent_and_read_only() {
        let board = Board::from_layout(&["RRBGY", "GBRYB", "YGBRG", "BYGBR"]);
        let before = board.snapshot();
        let first = potential_matches(&board).unwrap();
        let second = potential_matches(&board).unwrap();
        assert!(!first.is_empty());
        assert_eq!(first, second);
        assert_eq!(board.snapshot(), before);
        assert!(board.pending_swap().is_none());
    }

    #[test]
    fn test_skips_empty_cells() {
        let board = Board::from_layout(&["RR.R", "GBYG"]);
        assert!(potential_matches(&board).unwrap().is_empty());
    }
}
