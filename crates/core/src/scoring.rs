//! Scoring module - points for a cascade pass
//!
//! Every pass of the cascade loop is scored on its own:
//! - `(count - 2) * match_score` for the glyphs the pass removes.
//! - A flat `subsequent_match_score` for every pass after the first.
//!
//! The engine sums the awards of one resolution and commits the sum once the
//! board is stable.

use crate::types::GameConfig;

/// Points for one cascade pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchAward {
    /// `(count - 2) * match_score`
    pub match_points: u32,
    /// Flat bonus, zero on the first pass.
    pub cascade_bonus: u32,
    pub total: u32,
}

/// Points for matched glyphs alone.
///
/// `count` below two scores nothing.
pub fn calculate_match_points(count: usize, match_score: u32) -> u32 {
    let scored = count.saturating_sub(2) as u32;
    scored.saturating_mul(match_score)
}

/// Award for a pass removing `count` glyphs. `pass_index` is 0-based.
pub fn calculate_award(count: usize, pass_index: u32, config: &GameConfig) -> MatchAward {
    let match_points = calculate_match_points(count, config.match_score);
    let cascade_bonus = if pass_index > 0 {
        config.subsequent_match_score
    } else {
        0
    };

    MatchAward {
        match_points,
        cascade_bonus,
        total: match_points.saturating_add(cascade_bonus),
    }
}
