//! Query results: matched glyphs and altered (moved or created) glyphs.
//!
//! Both sets are built fresh for each board operation and deduplicate by
//! glyph identity while keeping insertion order, so callers see glyphs in the
//! order the board discovered them.

use crate::glyph::{Glyph, GlyphId};
use crate::types::{BonusKind, BonusSet, Position};

/// Distinct matched glyphs plus the bonuses the match ran into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    glyphs: Vec<Glyph>,
    bonuses: BonusSet,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a glyph unless one with the same identity is already present.
    pub fn insert(&mut self, glyph: Glyph) -> bool {
        if self.contains(glyph.id) {
            return false;
        }
        self.glyphs.push(glyph);
        true
    }

    pub fn extend<I: IntoIterator<Item = Glyph>>(&mut self, glyphs: I) {
        for glyph in glyphs {
            self.insert(glyph);
        }
    }

    /// Merge glyphs and bonuses of `other` into `self`.
    pub fn merge(&mut self, other: &MatchSet) {
        self.extend(other.glyphs.iter().copied());
        self.bonuses = self.bonuses.union(other.bonuses);
    }

    pub fn add_bonus(&mut self, bonus: BonusKind) {
        self.bonuses.insert(bonus);
    }

    pub fn contains(&self, id: GlyphId) -> bool {
        self.glyphs.iter().any(|g| g.id == id)
    }

    pub fn contains_bonus(&self, bonus: BonusKind) -> bool {
        self.bonuses.contains(bonus)
    }

    pub fn bonuses(&self) -> BonusSet {
        self.bonuses
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.iter()
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.glyphs.iter().map(Glyph::position)
    }

    /// Distinct columns touched by the match, in order of first appearance.
    pub fn columns(&self) -> Vec<usize> {
        let mut columns = Vec::new();
        for glyph in &self.glyphs {
            if !columns.contains(&glyph.column) {
                columns.push(glyph.column);
            }
        }
        columns
    }
}

/// A glyph that changed cell during a collapse or was created by a refill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlteredGlyph {
    /// The glyph at its destination.
    pub glyph: Glyph,
    pub from: Position,
    pub to: Position,
}

impl AlteredGlyph {
    /// Rows travelled.
    pub fn distance(&self) -> usize {
        self.from.row.abs_diff(self.to.row)
    }
}

/// Distinct altered glyphs plus the longest vertical travel among them.
///
/// The distance only paces animation; it never influences the rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlteredSet {
    entries: Vec<AlteredGlyph>,
    max_distance: usize,
}

impl AlteredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move of `glyph` (given at its destination) from `from`.
    ///
    /// A glyph recorded twice keeps its first origin and its latest destination.
    pub fn record(&mut self, glyph: Glyph, from: Position) {
        let to = glyph.position();
        let distance = from.row.abs_diff(to.row);
        self.max_distance = self.max_distance.max(distance);

        if let Some(entry) = self.entries.iter_mut().find(|e| e.glyph.id == glyph.id) {
            entry.glyph = glyph;
            entry.to = to;
            return;
        }
        self.entries.push(AlteredGlyph { glyph, from, to });
    }

    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AlteredGlyph] {
        &self.entries
    }

    pub fn glyphs(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.entries.iter().map(|e| e.glyph)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().map(|e| e.to)
    }
}
