//! Game configuration.
//!
//! All rule and timing constants are externally supplied through [`GameConfig`].
//! Defaults match the constants in the crate root; a JSON file can override any
//! subset of fields (missing fields fall back to the defaults).

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    GlyphKind, DEFAULT_COLUMNS, DEFAULT_ROWS, HINT_DELAY_MS, HINT_INTERVAL_MS, MATCH_SCORE,
    MIN_MATCH, MIN_MATCH_FOR_BONUS, MOVE_STEP_MS, SUBSEQUENT_MATCH_SCORE, SWAP_PAUSE_MS,
};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {rows}x{columns}")]
    BoardTooSmall {
        rows: usize,
        columns: usize,
        min: usize,
    },
    #[error("minimum match must be at least 2, got {0}")]
    MinMatchTooSmall(usize),
    #[error("minimum match for bonus ({bonus}) is below the minimum match ({min_match})")]
    BonusThresholdTooSmall { bonus: usize, min_match: usize },
    #[error("palette needs at least 3 distinct kinds, got {0}")]
    PaletteTooSmall(usize),
    #[error("board uses a minimum match of {board}, config asks for {config}")]
    MinMatchMismatch { config: usize, board: usize },
    #[error("bonus kind `{0}` is not part of the palette")]
    BonusKindNotInPalette(GlyphKind),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rules, scoring, timing and palette for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub columns: usize,
    pub min_match: usize,
    pub min_match_for_bonus: usize,
    pub match_score: u32,
    pub subsequent_match_score: u32,
    pub hint_delay_ms: u64,
    pub hint_interval_ms: u64,
    pub swap_pause_ms: u64,
    pub move_step_ms: u64,
    /// Kinds drawn for generation and refills.
    pub palette: Vec<GlyphKind>,
    /// Kinds that have a row/column-clear bonus variant.
    pub bonus_kinds: Vec<GlyphKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            min_match: MIN_MATCH,
            min_match_for_bonus: MIN_MATCH_FOR_BONUS,
            match_score: MATCH_SCORE,
            subsequent_match_score: SUBSEQUENT_MATCH_SCORE,
            hint_delay_ms: HINT_DELAY_MS,
            hint_interval_ms: HINT_INTERVAL_MS,
            swap_pause_ms: SWAP_PAUSE_MS,
            move_step_ms: MOVE_STEP_MS,
            palette: GlyphKind::ALL.to_vec(),
            bonus_kinds: GlyphKind::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    /// Default rules on a board of the given size.
    pub fn with_size(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_match < 2 {
            return Err(ConfigError::MinMatchTooSmall(self.min_match));
        }
        if self.rows < self.min_match || self.columns < self.min_match {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                columns: self.columns,
                min: self.min_match,
            });
        }
        if self.min_match_for_bonus < self.min_match {
            return Err(ConfigError::BonusThresholdTooSmall {
                bonus: self.min_match_for_bonus,
                min_match: self.min_match,
            });
        }

        let mut distinct = self.palette.clone();
        distinct.sort();
        distinct.dedup();
        // Two kinds can box a cell in (left pair one kind, lower pair the other).
        if distinct.len() < 3 {
            return Err(ConfigError::PaletteTooSmall(distinct.len()));
        }

        if let Some(kind) = self
            .bonus_kinds
            .iter()
            .find(|kind| !self.palette.contains(kind))
        {
            return Err(ConfigError::BonusKindNotInPalette(*kind));
        }
        Ok(())
    }

    /// Whether `kind` has a row/column-clear bonus variant.
    pub fn has_bonus_variant(&self, kind: GlyphKind) -> bool {
        self.bonus_kinds.contains(&kind)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Create from environment variables.
    ///
    /// - `MATCH3_CONFIG`: optional path to a JSON config file
    /// - `MATCH3_ROWS` / `MATCH3_COLUMNS`: board size overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let mut config = match env::var("MATCH3_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim())?,
            _ => Self::default(),
        };

        if let Some(rows) = env::var("MATCH3_ROWS").ok().and_then(|s| s.parse().ok()) {
            config.rows = rows;
        }
        if let Some(columns) = env::var("MATCH3_COLUMNS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.columns = columns;
        }

        config.validate()?;
        Ok(config)
    }

    /// Pacing for a collapse/refill step where glyphs travel `distance` rows.
    pub fn pacing(&self, distance: usize) -> Duration {
        Duration::from_millis(self.move_step_ms.saturating_mul(distance as u64))
    }

    pub fn swap_pause(&self) -> Duration {
        Duration::from_millis(self.swap_pause_ms)
    }

    pub fn hint_delay(&self) -> Duration {
        Duration::from_millis(self.hint_delay_ms)
    }

    pub fn hint_interval(&self) -> Duration {
        Duration::from_millis(self.hint_interval_ms)
    }
}
