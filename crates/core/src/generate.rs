//! Board generation - fill empty cells without creating runs
//!
//! Cells are filled row by row (bottom first), column by column. A candidate
//! kind is rerolled while it would complete a run with the placed neighbours
//! to its left or below it. With three or more palette kinds at least one
//! kind is always admissible, so a bounded number of rerolls falls back to
//! the first admissible kind in palette order.

use log::debug;

use crate::board::Board;
use crate::error::BoardError;
use crate::glyph::Glyph;
use crate::rng::KindSource;
use crate::types::{BonusKind, GameConfig, GlyphKind, Position};

const MAX_REROLLS: usize = 64;

/// Fresh board of `config` dimensions with no pre-existing matches.
pub fn generate<S: KindSource + ?Sized>(
    config: &GameConfig,
    source: &mut S,
) -> Result<Board, BoardError> {
    let mut board = Board::from_config(config);
    fill_without_matches(&mut board, &config.palette, source)?;
    Ok(board)
}

/// Fill every empty cell of `board`, avoiding runs with the left and lower
/// neighbours. Returns the placed glyphs in fill order.
pub fn fill_without_matches<S: KindSource + ?Sized>(
    board: &mut Board,
    palette: &[GlyphKind],
    source: &mut S,
) -> Result<Vec<Glyph>, BoardError> {
    let mut placed = Vec::new();

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let position = Position::new(row, column);
            if board.get(position)?.is_some() {
                continue;
            }

            let kind = pick_kind(board, position, palette, source);
            placed.push(board.place(position, kind, BonusKind::None)?);
        }
    }

    debug!("generated {} glyphs", placed.len());
    Ok(placed)
}

fn pick_kind<S: KindSource + ?Sized>(
    board: &Board,
    position: Position,
    palette: &[GlyphKind],
    source: &mut S,
) -> GlyphKind {
    let mut candidate = source.next_kind(palette);
    for _ in 0..MAX_REROLLS {
        if !completes_run(board, position, candidate) {
            return candidate;
        }
        candidate = source.next_kind(palette);
    }

    palette
        .iter()
        .copied()
        .find(|kind| !completes_run(board, position, *kind))
        .unwrap_or(candidate)
}

/// Whether `kind` at `position` would finish a run with the `min_match - 1`
/// glyphs directly left of it or directly below it.
fn completes_run(board: &Board, position: Position, kind: GlyphKind) -> bool {
    let needed = board.min_match().saturating_sub(1);
    if needed == 0 {
        return true;
    }

    let same = |row: usize, column: usize| {
        matches!(board.get(Position::new(row, column)), Ok(Some(g)) if g.kind == kind)
    };

    let left = position.column >= needed
        && (1..=needed).all(|step| same(position.row, position.column - step));
    let below =
        position.row >= needed && (1..=needed).all(|step| same(position.row - step, position.column));

    left || below
}
