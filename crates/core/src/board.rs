//! Board module - owns the glyph grid
//!
//! The board is a `rows x columns` grid where each cell is empty or holds one
//! glyph record. Cells are stored in a flat row-major vector (`row * columns + column`)
//! and row 0 is the bottom of the board.
//!
//! The board is the only owner of glyph records. Every query returns copies,
//! and every mutation keeps each glyph's `row`/`column` equal to its slot.

use log::trace;

use crate::error::BoardError;
use crate::glyph::{Glyph, GlyphId};
use crate::sets::{AlteredSet, MatchSet};
use crate::snapshot::BoardSnapshot;
use crate::types::{BonusKind, GameConfig, GlyphKind, Position, MIN_MATCH};

/// Cell on the board (None = empty)
pub type Cell = Option<Glyph>;

/// The two positions of the most recent swap, kept for a single undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwap {
    pub first: Position,
    pub second: Position,
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: usize,
    columns: usize,
    min_match: usize,
    /// Flat array of cells, row-major order (row * columns + column)
    cells: Vec<Cell>,
    pending_swap: Option<PendingSwap>,
    next_id: u32,
}

impl Board {
    /// Create a new empty board using the default minimum match.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self::with_min_match(rows, columns, MIN_MATCH)
    }

    pub fn with_min_match(rows: usize, columns: usize, min_match: usize) -> Self {
        Self {
            rows,
            columns,
            min_match,
            cells: vec![None; rows * columns],
            pending_swap: None,
            next_id: 0,
        }
    }

    /// Create an empty board sized and tuned by `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::with_min_match(config.rows, config.columns, config.min_match)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn min_match(&self) -> usize {
        self.min_match
    }

    pub fn contains(&self, position: Position) -> bool {
        position.row < self.rows && position.column < self.columns
    }

    /// Calculate flat index, reporting out-of-bounds positions
    #[inline(always)]
    fn index(&self, position: Position) -> Result<usize, BoardError> {
        if !self.contains(position) {
            return Err(BoardError::OutOfBounds {
                position,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(position.row * self.columns + position.column)
    }

    fn check_column(&self, column: usize) -> Result<(), BoardError> {
        self.index(Position::new(0, column)).map(|_| ())
    }

    /// Unchecked read for positions already known to be in bounds.
    #[inline(always)]
    fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row * self.columns + column]
    }

    /// Get the cell at `position`
    pub fn get(&self, position: Position) -> Result<Cell, BoardError> {
        self.index(position).map(|idx| self.cells[idx])
    }

    /// Find a placed glyph by identity
    pub fn find(&self, id: GlyphId) -> Option<Glyph> {
        self.glyphs().find(|g| g.id == id)
    }

    /// Iterate over every placed glyph in row-major order (bottom row first)
    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.cells.iter().filter_map(|cell| *cell)
    }

    pub fn glyph_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    pub fn pending_swap(&self) -> Option<PendingSwap> {
        self.pending_swap
    }

    /// Place a fresh glyph of `kind` in an empty cell.
    ///
    /// This is the primitive shared by initial generation, refills and any
    /// external level loader.
    pub fn place(
        &mut self,
        position: Position,
        kind: GlyphKind,
        bonus: BonusKind,
    ) -> Result<Glyph, BoardError> {
        let idx = self.index(position)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::Occupied(position));
        }

        let glyph = Glyph {
            id: GlyphId(self.next_id),
            kind,
            bonus,
            row: position.row,
            column: position.column,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.cells[idx] = Some(glyph);
        Ok(glyph)
    }

    /// Exchange the glyphs at `a` and `b` and remember the pair for one undo.
    ///
    /// Adjacency is not checked here; the engine validates swap requests.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<(), BoardError> {
        let ia = self.index(a)?;
        let ib = self.index(b)?;
        if self.cells[ia].is_none() {
            return Err(BoardError::EmptyCell(a));
        }
        if self.cells[ib].is_none() {
            return Err(BoardError::EmptyCell(b));
        }

        self.cells.swap(ia, ib);
        self.sync_slot(ia, a);
        self.sync_slot(ib, b);

        self.pending_swap = Some(PendingSwap {
            first: a,
            second: b,
        });
        trace!("swapped {} <-> {}", a, b);
        Ok(())
    }

    /// Revert the most recent swap. Single-shot: a second call fails.
    pub fn undo_swap(&mut self) -> Result<(), BoardError> {
        let pending = self.pending_swap.take().ok_or(BoardError::NoPendingUndo)?;
        self.swap(pending.first, pending.second)?;
        self.pending_swap = None;
        Ok(())
    }

    fn sync_slot(&mut self, idx: usize, position: Position) {
        if let Some(glyph) = self.cells[idx].as_mut() {
            glyph.row = position.row;
            glyph.column = position.column;
        }
    }

    /// Clear the cell the glyph occupies (by its own row/column).
    ///
    /// Returns whatever was in the cell; clearing an empty cell is a no-op.
    pub fn remove(&mut self, glyph: &Glyph) -> Result<Cell, BoardError> {
        let idx = self.index(glyph.position())?;
        Ok(self.cells[idx].take())
    }

    /// Contiguous same-kind run through `glyph` along its row.
    ///
    /// Runs shorter than the minimum match are discarded entirely.
    fn horizontal_run(&self, glyph: &Glyph) -> Vec<Glyph> {
        let mut run = vec![*glyph];

        for column in (0..glyph.column).rev() {
            match self.cell(glyph.row, column) {
                Some(other) if other.is_same_kind(glyph) => run.push(other),
                _ => break,
            }
        }
        for column in glyph.column + 1..self.columns {
            match self.cell(glyph.row, column) {
                Some(other) if other.is_same_kind(glyph) => run.push(other),
                _ => break,
            }
        }

        if run.len() < self.min_match {
            run.clear();
        }
        run
    }

    /// Contiguous same-kind run through `glyph` along its column.
    fn vertical_run(&self, glyph: &Glyph) -> Vec<Glyph> {
        let mut run = vec![*glyph];

        for row in (0..glyph.row).rev() {
            match self.cell(row, glyph.column) {
                Some(other) if other.is_same_kind(glyph) => run.push(other),
                _ => break,
            }
        }
        for row in glyph.row + 1..self.rows {
            match self.cell(row, glyph.column) {
                Some(other) if other.is_same_kind(glyph) => run.push(other),
                _ => break,
            }
        }

        if run.len() < self.min_match {
            run.clear();
        }
        run
    }

    /// A qualifying run that includes a row/column-clear glyph.
    fn triggers_clear(&self, run: &[Glyph]) -> bool {
        run.len() >= self.min_match && run.iter().any(Glyph::clears_row_column)
    }

    fn entire_row(&self, row: usize) -> Vec<Glyph> {
        (0..self.columns)
            .filter_map(|column| self.cell(row, column))
            .collect()
    }

    fn entire_column(&self, column: usize) -> Vec<Glyph> {
        (0..self.rows)
            .filter_map(|row| self.cell(row, column))
            .collect()
    }

    /// Matches through the glyph at `position`.
    ///
    /// Each axis contributes its run if the run reaches the minimum match. A
    /// qualifying run holding a row/column-clear glyph is replaced by the whole
    /// row (horizontal) or column (vertical), and the bonus is recorded. An
    /// empty cell has no matches.
    pub fn matches_at(&self, position: Position) -> Result<MatchSet, BoardError> {
        let mut matches = MatchSet::new();
        let Some(glyph) = self.get(position)? else {
            return Ok(matches);
        };

        let mut horizontal = self.horizontal_run(&glyph);
        if self.triggers_clear(&horizontal) {
            horizontal = self.entire_row(glyph.row);
            matches.add_bonus(BonusKind::ClearRowColumn);
        }
        matches.extend(horizontal);

        let mut vertical = self.vertical_run(&glyph);
        if self.triggers_clear(&vertical) {
            vertical = self.entire_column(glyph.column);
            matches.add_bonus(BonusKind::ClearRowColumn);
        }
        matches.extend(vertical);

        Ok(matches)
    }

    /// Union of [`Board::matches_at`] over several glyphs.
    ///
    /// Bonus flags are not aggregated here; query single glyphs when the
    /// bonus matters.
    pub fn matches_at_all<I>(&self, positions: I) -> Result<MatchSet, BoardError>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut matches = MatchSet::new();
        for position in positions {
            let found = self.matches_at(position)?;
            matches.extend(found.glyphs().iter().copied());
        }
        Ok(matches)
    }

    /// Let glyphs in `columns` fall into the empty cells below them.
    ///
    /// Scanning bottom-up, each empty cell takes the nearest glyph above it.
    /// Afterwards every empty cell of a collapsed column sits above all of its
    /// glyphs.
    pub fn collapse<I>(&mut self, columns: I) -> Result<AlteredSet, BoardError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut altered = AlteredSet::new();

        for column in columns {
            self.check_column(column)?;

            for row in 0..self.rows.saturating_sub(1) {
                if self.cell(row, column).is_some() {
                    continue;
                }

                let Some(source_row) =
                    (row + 1..self.rows).find(|&r| self.cell(r, column).is_some())
                else {
                    // Nothing left above this cell.
                    break;
                };

                let dest_idx = row * self.columns + column;
                let source_idx = source_row * self.columns + column;
                self.cells.swap(dest_idx, source_idx);
                self.sync_slot(dest_idx, Position::new(row, column));

                if let Some(glyph) = self.cells[dest_idx] {
                    altered.record(glyph, Position::new(source_row, column));
                }
            }
        }

        Ok(altered)
    }

    /// Empty positions in `column`, ascending by row.
    pub fn empty_cells_in_column(&self, column: usize) -> Result<Vec<Position>, BoardError> {
        self.check_column(column)?;
        Ok((0..self.rows)
            .filter(|&row| self.cell(row, column).is_none())
            .map(|row| Position::new(row, column))
            .collect())
    }

    /// Whether any row or column currently holds a run of at least the
    /// minimum match (bonus expansion ignored).
    pub fn has_matches(&self) -> bool {
        for row in 0..self.rows {
            if self.has_run((0..self.columns).map(|column| self.cell(row, column))) {
                return true;
            }
        }
        for column in 0..self.columns {
            if self.has_run((0..self.rows).map(|row| self.cell(row, column))) {
                return true;
            }
        }
        false
    }

    fn has_run<I: Iterator<Item = Cell>>(&self, line: I) -> bool {
        let mut current: Option<GlyphKind> = None;
        let mut length = 0;
        for cell in line {
            match cell {
                Some(glyph) if Some(glyph.kind) == current => length += 1,
                Some(glyph) => {
                    current = Some(glyph.kind);
                    length = 1;
                }
                None => {
                    current = None;
                    length = 0;
                }
            }
            if length >= self.min_match {
                return true;
            }
        }
        false
    }

    /// Copy of the grid for collaborators.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.clone(),
        }
    }

    /// Remove every glyph and forget the pending swap. Identities keep counting.
    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.pending_swap = None;
    }

    /// Build a board from kind rows for testing (index 0 = bottom row).
    ///
    /// Uppercase letters are plain glyphs, lowercase letters carry the
    /// row/column-clear bonus, `.` is empty.
    #[cfg(test)]
    pub(crate) fn from_layout(layout: &[&str]) -> Self {
        let rows = layout.len();
        let columns = layout.first().map(|r| r.len()).unwrap_or(0);
        let mut board = Self::new(rows, columns);
        for (row, line) in layout.iter().enumerate() {
            assert_eq!(line.len(), columns);
            for (column, ch) in line.chars().enumerate() {
                if ch == '.' {
                    continue;
                }
                let kind = GlyphKind::from_char(ch).expect("unknown glyph letter");
                let bonus = if ch.is_ascii_lowercase() {
                    BonusKind::ClearRowColumn
                } else {
                    BonusKind::None
                };
                board
                    .place(Position::new(row, column), kind, bonus)
                    .unwrap();
            }
        }
        board
    }

    /// Slot consistency check for tests.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                if let Some(glyph) = self.cell(row, column) {
                    assert_eq!(glyph.position(), Position::new(row, column));
                }
            }
        }
    }
}
