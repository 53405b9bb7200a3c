//! Engine state machine values and step reports.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Glyph, MatchAward};

/// Where the engine is in the swap/resolve cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EngineState {
    /// Waiting for a swap request.
    #[default]
    Idle,
    /// A swap was performed and awaits evaluation.
    SwapPending,
    /// The cascade loop is running.
    Resolving,
}

impl EngineState {
    pub fn is_idle(&self) -> bool {
        matches!(self, EngineState::Idle)
    }
}

/// Answer to a swap request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapOutcome {
    Accepted,
    RejectedNotAdjacent,
    RejectedBusy,
}

/// Result of evaluating a pending swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Not enough matches; the swap was undone.
    Reverted,
    /// The cascade loop is ready to run.
    Matched { count: usize, bonus_eligible: bool },
}

/// Report of one cascade pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    /// 0-based pass index.
    pub pass: u32,
    pub removed: usize,
    pub award: MatchAward,
    pub bonus: Option<Glyph>,
    pub collapsed: usize,
    pub created: usize,
    /// Rows travelled by the furthest moving glyph.
    pub distance: usize,
    /// Time collaborators get to animate this pass.
    pub pacing: Duration,
    /// True when this pass left the board stable and the engine is idle again.
    pub finished: bool,
}

/// Summary of a whole swap resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub reverted: bool,
    pub passes: u32,
    pub removed: usize,
    pub award: u32,
    pub bonus: Option<Glyph>,
}
