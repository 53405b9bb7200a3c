//! Core rules module - pure, deterministic, and testable
//!
//! This crate holds the board and every rule that can be evaluated without a
//! clock. It has **no dependencies** on terminal, timing, or async code,
//! making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Boards can be built from text layouts in unit tests
//! - **Portable**: Usable from the resolution engine, a renderer, or a benchmark
//!
//! # Module Structure
//!
//! - [`board`]: the glyph grid with swap/undo, match detection, removal, collapse
//! - [`glyph`]: glyph records and identities
//! - [`sets`]: `MatchSet` and `AlteredSet` query results
//! - [`generate`]: matchless fills for new boards
//! - [`hint`]: potential-match scan
//! - [`rng`]: seeded kind sources
//! - [`scoring`]: per-pass awards
//! - [`snapshot`]: serializable board copies
//!
//! # Rules
//!
//! - **Runs**: three or more same-kind glyphs in a row or column match
//! - **Bonus glyphs**: a matched run holding a row/column-clear glyph expands
//!   to the whole row (horizontal run) or column (vertical run)
//! - **Gravity**: glyphs fall towards row 0; refills enter from above the board
//!
//! # Example
//!
//! ```
//! use tui_match3_core::{generate, Board, SimpleRng};
//! use tui_match3_core::types::{GameConfig, Position};
//!
//! let config = GameConfig::with_size(6, 6);
//! let mut board = generate(&config, &mut SimpleRng::new(12345)).unwrap();
//! assert!(!board.has_matches());
//!
//! board.swap(Position::new(0, 0), Position::new(0, 1)).unwrap();
//! board.undo_swap().unwrap();
//! assert!(!board.has_matches());
//! ```

pub mod board;
pub mod error;
pub mod generate;
pub mod glyph;
pub mod hint;
pub mod rng;
pub mod scoring;
pub mod sets;
pub mod snapshot;

pub use tui_match3_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, PendingSwap};
pub use error::BoardError;
pub use generate::{fill_without_matches, generate};
pub use glyph::{Glyph, GlyphId};
pub use hint::{first_potential_match, potential_matches, PotentialMatch};
pub use rng::{KindSource, SequenceSource, SimpleRng};
pub use scoring::{calculate_award, calculate_match_points, MatchAward};
pub use sets::{AlteredGlyph, AlteredSet, MatchSet};
pub use snapshot::BoardSnapshot;
