//! Engine events
//!
//! Collaborators (renderer, audio, score display) never query the engine
//! mid-resolution. They replay these events in order, which is enough to
//! mirror the board exactly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::core::{BoardSnapshot, Glyph};
use crate::state::EngineState;
use crate::types::Position;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A whole new board (start or restart).
    BoardReset(BoardSnapshot),
    StateChanged(EngineState),
    GlyphsSwapped { a: Position, b: Position },
    /// The swap produced no match and was undone.
    SwapReverted { a: Position, b: Position },
    GlyphRemoved(Glyph),
    /// `glyph` is given at its destination.
    GlyphMoved {
        glyph: Glyph,
        from: Position,
        to: Position,
        pacing: Duration,
    },
    /// `spawn` is the virtual cell above the board the glyph falls from.
    GlyphCreated {
        glyph: Glyph,
        spawn: Position,
        target: Position,
        pacing: Duration,
    },
    BonusCreated(Glyph),
    ScoreChanged { total: u32, award: u32 },
    HintPulse(Vec<Glyph>),
    HintCleared,
}

/// Fire-and-forget event output.
pub trait EventSink {
    fn emit(&mut self, event: EngineEvent);
}

impl EventSink for Vec<EngineEvent> {
    fn emit(&mut self, event: EngineEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<EngineEvent> {
    fn emit(&mut self, event: EngineEvent) {
        // A closed receiver means nobody is watching; the rules still run.
        let _ = self.send(event);
    }
}
