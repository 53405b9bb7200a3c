//! Shared board builders for integration tests.
#![allow(dead_code)]

use tui_match3::core::{Board, SequenceSource};
use tui_match3::engine::Resolver;
use tui_match3::types::{BonusKind, GameConfig, GlyphKind, Position};

pub const SIZE: usize = 6;

/// Two kinds per row and column, alternating: never a run of three.
pub fn background(row: usize, column: usize) -> GlyphKind {
    const KINDS: [GlyphKind; 4] = [
        GlyphKind::Blue,
        GlyphKind::Green,
        GlyphKind::Orange,
        GlyphKind::Purple,
    ];
    KINDS[(row + 2 * column) % 4]
}

pub fn pos(row: usize, column: usize) -> Position {
    Position::new(row, column)
}

/// Full 6x6 board: the background pattern with some cells replaced.
pub fn board_with(overrides: &[(usize, usize, GlyphKind)]) -> Board {
    fill_board(Board::new(SIZE, SIZE), overrides)
}

/// Like [`board_with`] on a board that needs `min_match` in a row.
pub fn board_with_min_match(min_match: usize, overrides: &[(usize, usize, GlyphKind)]) -> Board {
    fill_board(Board::with_min_match(SIZE, SIZE, min_match), overrides)
}

fn fill_board(mut board: Board, overrides: &[(usize, usize, GlyphKind)]) -> Board {
    for row in 0..SIZE {
        for column in 0..SIZE {
            let kind = overrides
                .iter()
                .find(|(r, c, _)| *r == row && *c == column)
                .map(|(_, _, kind)| *kind)
                .unwrap_or_else(|| background(row, column));
            board
                .place(pos(row, column), kind, BonusKind::None)
                .unwrap();
        }
    }
    board
}

/// Resolver over `board_with(overrides)`; refills alternate red and yellow.
pub fn resolver_with(overrides: &[(usize, usize, GlyphKind)]) -> Resolver<SequenceSource> {
    resolver_on(board_with(overrides), GameConfig::with_size(SIZE, SIZE))
}

pub fn resolver_on(board: Board, config: GameConfig) -> Resolver<SequenceSource> {
    let source = SequenceSource::new(vec![GlyphKind::Red, GlyphKind::Yellow]);
    Resolver::with_board(config, board, source).unwrap()
}

/// Row 0 = R R B R with reds above (0,2): swapping (0,2) and (0,3) lines up
/// a horizontal and a vertical run of three that share a corner.
pub const CORNER: [(usize, usize, GlyphKind); 5] = [
    (0, 0, GlyphKind::Red),
    (0, 1, GlyphKind::Red),
    (0, 3, GlyphKind::Red),
    (1, 2, GlyphKind::Red),
    (2, 2, GlyphKind::Red),
];

/// Row 0 = R R B R: swapping (0,2) and (0,3) clears three reds in one pass.
pub fn single_pass() -> Resolver<SequenceSource> {
    resolver_with(&[
        (0, 0, GlyphKind::Red),
        (0, 1, GlyphKind::Red),
        (0, 3, GlyphKind::Red),
    ])
}

/// Row 0 = R R Y R Y with a yellow above (0,2): swapping (0,3) with (0,2)
/// clears the reds, the yellow falls in and completes a second run.
pub fn two_pass() -> Resolver<SequenceSource> {
    resolver_with(&[
        (0, 0, GlyphKind::Red),
        (0, 1, GlyphKind::Red),
        (0, 2, GlyphKind::Yellow),
        (0, 3, GlyphKind::Red),
        (0, 4, GlyphKind::Yellow),
        (1, 2, GlyphKind::Yellow),
    ])
}

/// Row 0 = R R G R with a red above (0,2): swapping (1,2) with (0,2) lines
/// up four reds.
pub fn four_in_a_row() -> Resolver<SequenceSource> {
    resolver_with(&[
        (0, 0, GlyphKind::Red),
        (0, 1, GlyphKind::Red),
        (0, 2, GlyphKind::Green),
        (0, 3, GlyphKind::Red),
        (1, 2, GlyphKind::Red),
    ])
}

/// Kind letters of one row, `.` for empty.
pub fn row_letters(board: &Board, row: usize) -> String {
    (0..board.columns())
        .map(|column| match board.get(pos(row, column)).unwrap() {
            Some(glyph) => glyph.kind.as_char(),
            None => '.',
        })
        .collect()
}
