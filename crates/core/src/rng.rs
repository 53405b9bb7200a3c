//! RNG module - glyph kind sources
//!
//! Generation and refills draw kinds through the [`KindSource`] trait:
//!
//! - [`SimpleRng`]: a seeded LCG drawing uniformly from the palette. Same seed,
//!   same board, which keeps games reproducible.
//! - [`SequenceSource`]: cycles through a fixed list of kinds, for tests and
//!   scripted demos.

use crate::types::GlyphKind;

/// Something that hands out glyph kinds from a palette.
pub trait KindSource {
    /// Draw one kind from `palette`. `palette` is never empty.
    fn next_kind(&mut self, palette: &[GlyphKind]) -> GlyphKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG have very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl KindSource for SimpleRng {
    fn next_kind(&mut self, palette: &[GlyphKind]) -> GlyphKind {
        let idx = self.next_range(palette.len() as u32) as usize;
        palette[idx]
    }
}

/// Cycles through a fixed list of kinds, ignoring the palette.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<GlyphKind>,
    index: usize,
}

impl SequenceSource {
    /// `kinds` must not be empty.
    pub fn new(kinds: Vec<GlyphKind>) -> Self {
        assert!(!kinds.is_empty(), "sequence source needs at least one kind");
        Self { kinds, index: 0 }
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl KindSource for SequenceSource {
    fn next_kind(&mut self, _palette: &[GlyphKind]) -> GlyphKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
