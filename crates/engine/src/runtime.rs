//! Engine runtime integration.
//!
//! Bridges a synchronous UI loop with the resolver running on a tokio task.
//! The task owns the resolver, sleeps through swap and cascade animations,
//! and drives the hint timer. Commands arrive over one channel and events
//! leave over another.

use std::time::Duration;

use log::{debug, error, info};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::core::{KindSource, SimpleRng};
use crate::error::EngineError;
use crate::events::EngineEvent;
use crate::resolver::Resolver;
use crate::state::{EngineState, Settlement, SwapOutcome};
use crate::types::{GameConfig, Position};

/// Command delivered to the engine task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    Swap { a: Position, b: Position },
    /// Pulse a hint now instead of waiting for the timer.
    Hint,
    /// Start over; deferred until a running resolution finishes.
    Restart,
    Shutdown,
}

enum Flow {
    Continue,
    Stop,
}

struct Driver<S: KindSource> {
    resolver: Resolver<S>,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    events: mpsc::UnboundedSender<EngineEvent>,
    restart_requested: bool,
}

impl<S: KindSource> Driver<S> {
    async fn run(&mut self) -> Result<(), EngineError> {
        self.resolver.publish(&mut self.events);
        let mut hint_at = Instant::now() + self.resolver.config().hint_delay();

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let flow = match command {
                        None | Some(EngineCommand::Shutdown) => Flow::Stop,
                        Some(EngineCommand::Swap { a, b }) => {
                            let outcome = self.resolver.request_swap(a, b, &mut self.events)?;
                            if outcome == SwapOutcome::Accepted {
                                self.resolve().await?
                            } else {
                                Flow::Continue
                            }
                        }
                        Some(EngineCommand::Hint) => {
                            self.resolver.pulse_hint(&mut self.events)?;
                            Flow::Continue
                        }
                        Some(EngineCommand::Restart) => {
                            self.restart_requested = true;
                            Flow::Continue
                        }
                    };
                    if let Flow::Stop = flow {
                        break;
                    }
                    if self.restart_requested {
                        self.restart_requested = false;
                        self.resolver.restart(&mut self.events)?;
                    }
                    hint_at = Instant::now() + self.resolver.config().hint_delay();
                }
                _ = sleep_until(hint_at) => {
                    self.resolver.pulse_hint(&mut self.events)?;
                    hint_at = Instant::now() + self.resolver.config().hint_interval();
                }
            }
        }

        info!("engine stopped");
        Ok(())
    }

    /// Settle the accepted swap and run the cascade, pausing for animations.
    async fn resolve(&mut self) -> Result<Flow, EngineError> {
        let pause = self.resolver.config().swap_pause();
        if let Flow::Stop = self.wait(pause).await? {
            return Ok(Flow::Stop);
        }

        match self.resolver.settle_swap(&mut self.events) {
            Ok(Settlement::Reverted) => return Ok(Flow::Continue),
            Ok(Settlement::Matched { .. }) => {}
            Err(EngineError::UnknownGlyphType(kind)) => {
                // The swap was undone; the game goes on without the bonus.
                error!("no bonus variant for `{}`; swap reverted", kind);
                return Ok(Flow::Continue);
            }
            Err(err) => return Err(err),
        }

        while self.resolver.state() == EngineState::Resolving {
            let step = self.resolver.step(&mut self.events)?;
            if !step.finished {
                if let Flow::Stop = self.wait(step.pacing).await? {
                    return Ok(Flow::Stop);
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Sleep for `duration` while answering commands. Swaps arriving now are
    /// turned away by the resolver's own busy check.
    async fn wait(&mut self, duration: Duration) -> Result<Flow, EngineError> {
        let deadline = Instant::now() + duration;
        loop {
            tokio::select! {
                _ = sleep_until(deadline) => return Ok(Flow::Continue),
                command = self.commands.recv() => match command {
                    None | Some(EngineCommand::Shutdown) => return Ok(Flow::Stop),
                    Some(EngineCommand::Swap { a, b }) => {
                        let outcome = self.resolver.request_swap(a, b, &mut self.events)?;
                        debug!("swap {} <-> {} while busy: {:?}", a, b, outcome);
                    }
                    Some(EngineCommand::Restart) => self.restart_requested = true,
                    Some(EngineCommand::Hint) => {}
                },
            }
        }
    }
}

/// Run `resolver` until the command channel closes or `Shutdown` arrives.
///
/// Publishes the board first, so a fresh observer can build its mirror from
/// the event stream alone.
pub async fn run_engine<S: KindSource>(
    resolver: Resolver<S>,
    commands: mpsc::UnboundedReceiver<EngineCommand>,
    events: mpsc::UnboundedSender<EngineEvent>,
) -> Result<(), EngineError> {
    let mut driver = Driver {
        resolver,
        commands,
        events,
        restart_requested: false,
    };
    driver.run().await
}

/// Running engine instance, for callers without their own tokio runtime.
pub struct EngineHandle {
    _rt: Runtime,
    cmd_tx: mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::UnboundedReceiver<EngineEvent>,
}

impl EngineHandle {
    /// Start an engine on a freshly generated board.
    pub fn start(config: GameConfig, seed: u32) -> Result<Self, EngineError> {
        let resolver: Resolver<SimpleRng> = Resolver::new(config, seed)?;
        Self::spawn(resolver)
    }

    pub fn spawn<S>(resolver: Resolver<S>) -> Result<Self, EngineError>
    where
        S: KindSource + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<EngineEvent>();

        let rt = Runtime::new()?;
        rt.spawn(async move {
            if let Err(err) = run_engine(resolver, cmd_rx, event_tx).await {
                error!("engine task failed: {}", err);
            }
        });

        Ok(Self {
            _rt: rt,
            cmd_tx,
            event_rx,
        })
    }

    /// Returns false once the engine task has stopped.
    pub fn send(&self, command: EngineCommand) -> bool {
        self.cmd_tx.send(command).is_ok()
    }

    pub fn try_recv(&mut self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, SequenceSource};
    use crate::types::{BonusKind, GlyphKind};

    fn resolver() -> Resolver<SequenceSource> {
        let layout = ["RRGRY", "GBYBG", "YGBGY"];
        let mut board = Board::new(3, 5);
        for (row, line) in layout.iter().enumerate() {
            for (column, ch) in line.chars().enumerate() {
                board
                    .place(
                        Position::new(row, column),
                        GlyphKind::from_char(ch).unwrap(),
                        BonusKind::None,
                    )
                    .unwrap();
            }
        }
        let source = SequenceSource::new(vec![GlyphKind::Purple, GlyphKind::Orange]);
        Resolver::with_board(GameConfig::default(), board, source).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_publishes_board_then_stops() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_engine(resolver(), cmd_rx, event_tx));

        assert!(matches!(
            event_rx.recv().await,
            Some(EngineEvent::BoardReset(_))
        ));
        cmd_tx.send(EngineCommand::Shutdown).unwrap();
        task.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_fires_after_delay() {
        let (_cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let started = Instant::now();
        tokio::spawn(run_engine(resolver(), cmd_rx, event_tx));

        loop {
            match event_rx.recv().await {
                Some(EngineEvent::HintPulse(glyphs)) => {
                    assert_eq!(glyphs.len(), 3);
                    break;
                }
                Some(_) => continue,
                None => panic!("engine stopped before hinting"),
            }
        }
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }
}
