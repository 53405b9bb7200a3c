use thiserror::Error;

use crate::core::BoardError;
use crate::state::EngineState;
use crate::types::{ConfigError, GlyphKind, Position};

/// Resolution engine errors
///
/// User-input rejections are not errors: `request_swap` reports them as a
/// [`SwapOutcome`](crate::SwapOutcome).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot swap {a} with {b}: cells must be adjacent and on the board")]
    InvalidSwapRequest { a: Position, b: Position },
    #[error("no bonus variant configured for glyph kind `{0}`")]
    UnknownGlyphType(GlyphKind),
    #[error("operation needs state {expected:?}, engine is {actual:?}")]
    WrongState {
        expected: EngineState,
        actual: EngineState,
    },
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
