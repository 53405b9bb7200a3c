//! Board errors.
//!
//! Every variant signals a broken caller invariant (a bad coordinate, an undo
//! without a swap). None of them are retried.

use thiserror::Error;

use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position {position} is outside the {rows}x{columns} board")]
    OutOfBounds {
        position: Position,
        rows: usize,
        columns: usize,
    },
    #[error("no pending swap to undo")]
    NoPendingUndo,
    #[error("cell {0} is empty")]
    EmptyCell(Position),
    #[error("cell {0} is already occupied")]
    Occupied(Position),
}
