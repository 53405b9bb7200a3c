//! Resolution engine - swap, match, clear, collapse, refill, repeat
//!
//! The resolver owns the board and drives it through
//! `Idle -> SwapPending -> Resolving -> Idle`. Every phase is a plain
//! synchronous call so a driver can suspend between them:
//!
//! 1. [`Resolver::request_swap`] validates and performs the swap.
//! 2. [`Resolver::settle_swap`] evaluates it; a swap without a match is undone.
//! 3. [`Resolver::step`] runs one cascade pass; repeat until it reports
//!    `finished`.
//!
//! [`Resolver::run_to_idle`] chains 2 and 3 for callers without a clock.

use log::{debug, info, warn};

use crate::core::{
    calculate_award, fill_without_matches, first_potential_match, generate, AlteredSet, Board,
    BoardError, BoardSnapshot, KindSource, MatchSet, PotentialMatch, SimpleRng,
};
use crate::error::EngineError;
use crate::events::{EngineEvent, EventSink};
use crate::state::{CascadeStep, EngineState, Resolution, Settlement, SwapOutcome};
use crate::types::{BonusKind, ConfigError, GameConfig, GlyphKind, Position};

/// Where and what the bonus glyph of the first pass will be.
#[derive(Debug, Clone, Copy)]
struct BonusPlan {
    kind: GlyphKind,
    position: Position,
}

/// State carried between cascade passes.
#[derive(Debug, Clone)]
struct Cascade {
    matches: MatchSet,
    pass: u32,
    award: u32,
    bonus: Option<BonusPlan>,
}

/// The match-3 resolution engine.
#[derive(Debug, Clone)]
pub struct Resolver<S: KindSource = SimpleRng> {
    config: GameConfig,
    board: Board,
    source: S,
    state: EngineState,
    score: u32,
    /// Positions of the swap awaiting settlement, in request order.
    swap: Option<(Position, Position)>,
    cascade: Option<Cascade>,
    hint_active: bool,
}

impl Resolver<SimpleRng> {
    /// Validate `config` and generate a fresh matchless board from `seed`.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, EngineError> {
        Self::with_source(config, SimpleRng::new(seed))
    }
}

impl<S: KindSource> Resolver<S> {
    /// Like [`Resolver::new`] with a caller-supplied kind source.
    pub fn with_source(config: GameConfig, mut source: S) -> Result<Self, EngineError> {
        config.validate()?;
        let board = generate(&config, &mut source)?;
        Ok(Self::assemble(config, board, source))
    }

    /// Use a prepared board (e.g. from a level loader).
    ///
    /// Board dimensions override those in `config`; the minimum match must
    /// agree. The board is taken as-is: runs already on it are not resolved
    /// until a swap touches them.
    pub fn with_board(mut config: GameConfig, board: Board, source: S) -> Result<Self, EngineError> {
        if board.min_match() != config.min_match {
            return Err(ConfigError::MinMatchMismatch {
                config: config.min_match,
                board: board.min_match(),
            }
            .into());
        }
        config.rows = board.rows();
        config.columns = board.columns();
        config.validate()?;
        Ok(Self::assemble(config, board, source))
    }

    fn assemble(config: GameConfig, board: Board, source: S) -> Self {
        Self {
            config,
            board,
            source,
            state: EngineState::Idle,
            score: 0,
            swap: None,
            cascade: None,
            hint_active: false,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn hint_active(&self) -> bool {
        self.hint_active
    }

    fn set_state(&mut self, state: EngineState, events: &mut dyn EventSink) {
        if self.state != state {
            self.state = state;
            events.emit(EngineEvent::StateChanged(state));
        }
    }

    fn expect_state(&self, expected: EngineState) -> Result<(), EngineError> {
        if self.state != expected {
            return Err(EngineError::WrongState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Announce the current board and score to a new observer.
    pub fn publish(&self, events: &mut dyn EventSink) {
        events.emit(EngineEvent::BoardReset(self.board.snapshot()));
        events.emit(EngineEvent::StateChanged(self.state));
        events.emit(EngineEvent::ScoreChanged {
            total: self.score,
            award: 0,
        });
    }

    /// Both cells on the board and orthogonal neighbours.
    pub fn validate_swap(&self, a: Position, b: Position) -> Result<(), EngineError> {
        if self.board.contains(a) && self.board.contains(b) && a.is_adjacent(b) {
            Ok(())
        } else {
            Err(EngineError::InvalidSwapRequest { a, b })
        }
    }

    /// Swap the glyphs at `a` and `b` if the engine is idle and the cells
    /// are neighbours. Cancels any active hint first.
    pub fn request_swap(
        &mut self,
        a: Position,
        b: Position,
        events: &mut dyn EventSink,
    ) -> Result<SwapOutcome, EngineError> {
        if !self.state.is_idle() {
            warn!("swap {} <-> {} rejected: engine busy", a, b);
            return Ok(SwapOutcome::RejectedBusy);
        }
        if let Err(err) = self.validate_swap(a, b) {
            warn!("{}", err);
            return Ok(SwapOutcome::RejectedNotAdjacent);
        }

        self.clear_hint(events);
        self.board.swap(a, b)?;
        self.swap = Some((a, b));
        self.set_state(EngineState::SwapPending, events);
        events.emit(EngineEvent::GlyphsSwapped { a, b });
        info!("swap {} <-> {} accepted", a, b);
        Ok(SwapOutcome::Accepted)
    }

    /// Evaluate the pending swap.
    ///
    /// The glyph that came from `a` now sits at `b` and vice versa. Too few
    /// matches undo the swap. Otherwise the cascade is armed, together with
    /// the bonus glyph the first pass will create if the match is big enough.
    pub fn settle_swap(&mut self, events: &mut dyn EventSink) -> Result<Settlement, EngineError> {
        self.expect_state(EngineState::SwapPending)?;
        let Some((a, b)) = self.swap.take() else {
            return Err(EngineError::WrongState {
                expected: EngineState::SwapPending,
                actual: self.state,
            });
        };

        let from_a = self.board.matches_at(b)?;
        let from_b = self.board.matches_at(a)?;
        let mut total = from_a.clone();
        total.merge(&from_b);

        if total.len() < self.config.min_match {
            self.revert(a, b, events)?;
            debug!("swap {} <-> {} produced no match", a, b);
            return Ok(Settlement::Reverted);
        }

        let bonus_eligible = total.len() >= self.config.min_match_for_bonus
            && !from_a.contains_bonus(BonusKind::ClearRowColumn)
            && !from_b.contains_bonus(BonusKind::ClearRowColumn);

        let bonus = if bonus_eligible {
            let target = if !from_a.is_empty() { b } else { a };
            let Some(glyph) = self.board.get(target)? else {
                return Err(BoardError::EmptyCell(target).into());
            };
            if !self.config.has_bonus_variant(glyph.kind) {
                self.revert(a, b, events)?;
                return Err(EngineError::UnknownGlyphType(glyph.kind));
            }
            Some(BonusPlan {
                kind: glyph.kind,
                position: target,
            })
        } else {
            None
        };

        let count = total.len();
        self.cascade = Some(Cascade {
            matches: total,
            pass: 0,
            award: 0,
            bonus,
        });
        self.set_state(EngineState::Resolving, events);
        Ok(Settlement::Matched {
            count,
            bonus_eligible,
        })
    }

    fn revert(&mut self, a: Position, b: Position, events: &mut dyn EventSink) -> Result<(), EngineError> {
        self.board.undo_swap()?;
        events.emit(EngineEvent::SwapReverted { a, b });
        self.set_state(EngineState::Idle, events);
        Ok(())
    }

    /// Run one cascade pass: score, remove, place the bonus (first pass
    /// only), collapse, refill, then look for the next matches.
    pub fn step(&mut self, events: &mut dyn EventSink) -> Result<CascadeStep, EngineError> {
        self.expect_state(EngineState::Resolving)?;
        let Some(mut cascade) = self.cascade.take() else {
            return Err(EngineError::WrongState {
                expected: EngineState::Resolving,
                actual: self.state,
            });
        };

        let removed = cascade.matches.len();
        let award = calculate_award(removed, cascade.pass, &self.config);
        cascade.award = cascade.award.saturating_add(award.total);

        for glyph in cascade.matches.iter() {
            self.board.remove(glyph)?;
            events.emit(EngineEvent::GlyphRemoved(*glyph));
        }

        let bonus = match cascade.bonus.take() {
            Some(plan) => {
                let glyph = self
                    .board
                    .place(plan.position, plan.kind, BonusKind::ClearRowColumn)?;
                events.emit(EngineEvent::BonusCreated(glyph));
                info!("bonus {} created at {}", glyph.kind, plan.position);
                Some(glyph)
            }
            None => None,
        };

        let columns = cascade.matches.columns();
        let collapsed = self.board.collapse(columns.iter().copied())?;
        let created = self.refill(&columns)?;

        let distance = collapsed.max_distance().max(created.max_distance());
        let pacing = self.config.pacing(distance);
        for moved in collapsed.entries() {
            events.emit(EngineEvent::GlyphMoved {
                glyph: moved.glyph,
                from: moved.from,
                to: moved.to,
                pacing,
            });
        }
        for spawned in created.entries() {
            events.emit(EngineEvent::GlyphCreated {
                glyph: spawned.glyph,
                spawn: spawned.from,
                target: spawned.to,
                pacing,
            });
        }

        let next = self
            .board
            .matches_at_all(collapsed.positions().chain(created.positions()))?;

        debug!(
            "pass {}: removed {}, collapsed {}, created {}, next {}",
            cascade.pass,
            removed,
            collapsed.len(),
            created.len(),
            next.len()
        );

        let pass = cascade.pass;
        let finished = next.len() < self.config.min_match;
        if finished {
            self.score = self.score.saturating_add(cascade.award);
            events.emit(EngineEvent::ScoreChanged {
                total: self.score,
                award: cascade.award,
            });
            self.set_state(EngineState::Idle, events);
            info!(
                "resolved after {} passes, +{} (score {})",
                pass + 1,
                cascade.award,
                self.score
            );
        } else {
            cascade.matches = next;
            cascade.pass += 1;
            self.cascade = Some(cascade);
        }

        Ok(CascadeStep {
            pass,
            removed,
            award,
            bonus,
            collapsed: collapsed.len(),
            created: created.len(),
            distance,
            pacing,
            finished,
        })
    }

    /// Fill the empty cells of `columns` bottom-up with random palette kinds.
    ///
    /// New glyphs spawn just above the board, so each travels `rows - row`.
    fn refill(&mut self, columns: &[usize]) -> Result<AlteredSet, EngineError> {
        let mut created = AlteredSet::new();
        let spawn_row = self.board.rows();

        for &column in columns {
            for position in self.board.empty_cells_in_column(column)? {
                let kind = self.source.next_kind(&self.config.palette);
                let glyph = self.board.place(position, kind, BonusKind::None)?;
                created.record(glyph, Position::new(spawn_row, column));
            }
        }
        Ok(created)
    }

    /// Settle a pending swap and run every cascade pass without pausing.
    pub fn run_to_idle(&mut self, events: &mut dyn EventSink) -> Result<Resolution, EngineError> {
        let mut resolution = Resolution::default();

        if self.state == EngineState::SwapPending {
            if let Settlement::Reverted = self.settle_swap(events)? {
                resolution.reverted = true;
                return Ok(resolution);
            }
        }

        while self.state == EngineState::Resolving {
            let step = self.step(events)?;
            resolution.passes += 1;
            resolution.removed += step.removed;
            resolution.award = resolution.award.saturating_add(step.award.total);
            if step.bonus.is_some() {
                resolution.bonus = step.bonus;
            }
        }
        Ok(resolution)
    }

    /// First swap that would produce a match, without touching the board.
    pub fn scan_hint(&self) -> Result<Option<PotentialMatch>, EngineError> {
        Ok(first_potential_match(&self.board)?)
    }

    /// Highlight a potential match. Only pulses while idle.
    pub fn pulse_hint(
        &mut self,
        events: &mut dyn EventSink,
    ) -> Result<Option<PotentialMatch>, EngineError> {
        if !self.state.is_idle() {
            return Ok(None);
        }
        let hint = self.scan_hint()?;
        match &hint {
            Some(found) => {
                events.emit(EngineEvent::HintPulse(found.glyphs.clone()));
                self.hint_active = true;
            }
            None => debug!("no potential matches on the board"),
        }
        Ok(hint)
    }

    /// Remove hint markers, if any are shown.
    pub fn clear_hint(&mut self, events: &mut dyn EventSink) {
        if self.hint_active {
            self.hint_active = false;
            events.emit(EngineEvent::HintCleared);
        }
    }

    /// Start over on a fresh matchless board with a zero score.
    pub fn restart(&mut self, events: &mut dyn EventSink) -> Result<(), EngineError> {
        self.clear_hint(events);
        self.swap = None;
        self.cascade = None;
        self.board.clear();
        fill_without_matches(&mut self.board, &self.config.palette, &mut self.source)?;
        self.score = 0;
        self.set_state(EngineState::Idle, events);

        events.emit(EngineEvent::BoardReset(self.board.snapshot()));
        events.emit(EngineEvent::ScoreChanged { total: 0, award: 0 });
        info!("board restarted");
        Ok(())
    }
}
