//! BoardMirror: the renderer's copy of the board, rebuilt from engine events.
//!
//! The engine task owns the real board. The UI thread only sees the event
//! stream, and replaying it in order reproduces the board exactly.

use crate::core::{BoardSnapshot, Cell, Glyph, GlyphId};
use crate::engine::{EngineEvent, EngineState};
use crate::types::Position;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardMirror {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    state: EngineState,
    score: u32,
    last_award: u32,
    hint: Vec<GlyphId>,
    /// Events applied since the last `BoardReset`.
    applied: u64,
}

impl BoardMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_award(&self) -> u32 {
        self.last_award
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// True until the first `BoardReset` arrives.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, position: Position) -> Cell {
        let idx = self.index(position)?;
        self.cells[idx]
    }

    pub fn is_hinted(&self, id: GlyphId) -> bool {
        self.hint.contains(&id)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells.clone(),
        }
    }

    fn index(&self, position: Position) -> Option<usize> {
        (position.row < self.rows && position.column < self.columns)
            .then(|| position.row * self.columns + position.column)
    }

    fn put(&mut self, position: Position, glyph: Glyph) {
        if let Some(idx) = self.index(position) {
            self.cells[idx] = Some(Glyph {
                row: position.row,
                column: position.column,
                ..glyph
            });
        }
    }

    /// Clear `position` if it still holds glyph `id`.
    fn vacate(&mut self, position: Position, id: GlyphId) {
        if let Some(idx) = self.index(position) {
            if self.cells[idx].map(|g| g.id) == Some(id) {
                self.cells[idx] = None;
            }
        }
    }

    fn swap(&mut self, a: Position, b: Position) {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return;
        };
        self.cells.swap(ia, ib);
        for (idx, position) in [(ia, a), (ib, b)] {
            if let Some(glyph) = self.cells[idx].as_mut() {
                glyph.row = position.row;
                glyph.column = position.column;
            }
        }
    }

    pub fn apply(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::BoardReset(snapshot) => {
                self.rows = snapshot.rows;
                self.columns = snapshot.columns;
                self.cells = snapshot.cells.clone();
                self.hint.clear();
                self.applied = 0;
            }
            EngineEvent::StateChanged(state) => self.state = *state,
            EngineEvent::GlyphsSwapped { a, b } | EngineEvent::SwapReverted { a, b } => {
                self.swap(*a, *b)
            }
            EngineEvent::GlyphRemoved(glyph) => self.vacate(glyph.position(), glyph.id),
            EngineEvent::GlyphMoved {
                glyph, from, to, ..
            } => {
                self.vacate(*from, glyph.id);
                self.put(*to, *glyph);
            }
            EngineEvent::GlyphCreated { glyph, target, .. } => self.put(*target, *glyph),
            EngineEvent::BonusCreated(glyph) => self.put(glyph.position(), *glyph),
            EngineEvent::ScoreChanged { total, award } => {
                self.score = *total;
                self.last_award = *award;
            }
            EngineEvent::HintPulse(glyphs) => {
                self.hint = glyphs.iter().map(|g| g.id).collect();
            }
            EngineEvent::HintCleared => self.hint.clear(),
        }
        self.applied += 1;
    }
}
