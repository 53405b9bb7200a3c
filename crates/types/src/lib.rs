//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the workspace.
//! They carry no game logic, making them usable in any context (board rules,
//! resolution engine, terminal rendering, configuration files).
//!
//! # Coordinates
//!
//! Positions are `(row, column)` pairs. Row 0 is the **bottom** row of the
//! board; glyphs fall towards lower rows when the board collapses. New glyphs
//! spawn from a virtual row just above the board (`row == rows`).
//!
//! # Default Rules
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 12 | Board height |
//! | `DEFAULT_COLUMNS` | 8 | Board width |
//! | `MIN_MATCH` | 3 | Shortest run that counts as a match |
//! | `MIN_MATCH_FOR_BONUS` | 4 | Matched glyphs needed to award a bonus glyph |
//! | `MATCH_SCORE` | 60 | Points per matched glyph beyond two |
//! | `SUBSEQUENT_MATCH_SCORE` | 1000 | Flat bonus for every cascade pass after the first |
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `HINT_DELAY_MS` | 2000 | Idle time before the first hint pulse |
//! | `HINT_INTERVAL_MS` | 2000 | Interval between hint re-pulses |
//! | `SWAP_PAUSE_MS` | 200 | Swap animation time before matches are evaluated |
//! | `MOVE_STEP_MS` | 50 | Pacing per row travelled during collapse/refill |
//!
//! # Examples
//!
//! ```
//! use tui_match3_types::{GlyphKind, Position};
//!
//! let kind = GlyphKind::from_str("red").unwrap();
//! assert_eq!(kind, GlyphKind::Red);
//! assert_eq!(GlyphKind::from_char('R'), Some(GlyphKind::Red));
//!
//! let a = Position::new(0, 2);
//! assert!(a.is_adjacent(Position::new(0, 3)));
//! assert!(!a.is_adjacent(Position::new(1, 3)));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config;

pub use config::{ConfigError, GameConfig};

/// Board height in rows
pub const DEFAULT_ROWS: usize = 12;

/// Board width in columns
pub const DEFAULT_COLUMNS: usize = 8;

/// Minimum run length that counts as a match
pub const MIN_MATCH: usize = 3;

/// Minimum matched glyphs (after a swap) to award a row/column bonus glyph
pub const MIN_MATCH_FOR_BONUS: usize = 4;

/// Points per matched glyph beyond the first two
pub const MATCH_SCORE: u32 = 60;

/// Flat bonus for every cascade pass after the first
pub const SUBSEQUENT_MATCH_SCORE: u32 = 1000;

/// Idle time before the first hint pulse
pub const HINT_DELAY_MS: u64 = 2000;

/// Interval between hint re-pulses
pub const HINT_INTERVAL_MS: u64 = 2000;

/// Time the swap animation takes before matches are evaluated
pub const SWAP_PAUSE_MS: u64 = 200;

/// Pacing per row travelled during collapse and refill
pub const MOVE_STEP_MS: u64 = 50;

/// Glyph type tags (the palette colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphKind {
    Blue,
    Green,
    Orange,
    Purple,
    Red,
    Yellow,
}

impl GlyphKind {
    /// Every kind, in palette order.
    pub const ALL: [GlyphKind; 6] = [
        GlyphKind::Blue,
        GlyphKind::Green,
        GlyphKind::Orange,
        GlyphKind::Purple,
        GlyphKind::Red,
        GlyphKind::Yellow,
    ];

    /// Parse glyph kind from string (case-insensitive)
    ///
    /// ```
    /// use tui_match3_types::GlyphKind;
    ///
    /// assert_eq!(GlyphKind::from_str("Blue"), Some(GlyphKind::Blue));
    /// assert_eq!(GlyphKind::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(GlyphKind::Blue),
            "green" => Some(GlyphKind::Green),
            "orange" => Some(GlyphKind::Orange),
            "purple" => Some(GlyphKind::Purple),
            "red" => Some(GlyphKind::Red),
            "yellow" => Some(GlyphKind::Yellow),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GlyphKind::Blue => "blue",
            GlyphKind::Green => "green",
            GlyphKind::Orange => "orange",
            GlyphKind::Purple => "purple",
            GlyphKind::Red => "red",
            GlyphKind::Yellow => "yellow",
        }
    }

    /// Single-letter code (case-insensitive on input)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'b' => Some(GlyphKind::Blue),
            'g' => Some(GlyphKind::Green),
            'o' => Some(GlyphKind::Orange),
            'p' => Some(GlyphKind::Purple),
            'r' => Some(GlyphKind::Red),
            'y' => Some(GlyphKind::Yellow),
            _ => None,
        }
    }

    /// Uppercase single-letter code
    pub fn as_char(&self) -> char {
        match self {
            GlyphKind::Blue => 'B',
            GlyphKind::Green => 'G',
            GlyphKind::Orange => 'O',
            GlyphKind::Purple => 'P',
            GlyphKind::Red => 'R',
            GlyphKind::Yellow => 'Y',
        }
    }
}

impl fmt::Display for GlyphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Special effect carried by a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    #[default]
    None,
    /// Clears the whole row (horizontal match) or column (vertical match).
    ClearRowColumn,
}

/// A small set of [`BonusKind`] values.
///
/// Matches accumulate the bonuses they run into; callers only ever ask
/// whether a particular bonus is contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BonusSet {
    bits: u8,
}

impl BonusSet {
    pub const EMPTY: BonusSet = BonusSet { bits: 0 };

    fn bit(bonus: BonusKind) -> u8 {
        match bonus {
            BonusKind::None => 0,
            BonusKind::ClearRowColumn => 1,
        }
    }

    pub fn insert(&mut self, bonus: BonusKind) {
        self.bits |= Self::bit(bonus);
    }

    /// `BonusKind::None` is never "contained".
    pub fn contains(&self, bonus: BonusKind) -> bool {
        let bit = Self::bit(bonus);
        bit != 0 && self.bits & bit == bit
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn union(self, other: BonusSet) -> BonusSet {
        BonusSet {
            bits: self.bits | other.bits,
        }
    }
}

/// A cell coordinate on the board (row 0 = bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// True for pure horizontal or vertical neighbours (never diagonal, never self).
    pub fn is_adjacent(&self, other: Position) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.column.abs_diff(other.column);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
