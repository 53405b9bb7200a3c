//! Terminal match-3 runner (default binary).
//!
//! The engine runs on its own tokio runtime behind an [`EngineHandle`]; this
//! loop only reads keys, forwards swap requests, replays engine events into a
//! board mirror, and redraws.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_match3::engine::{EngineCommand, EngineHandle};
use tui_match3::input::{handle_key_event, should_quit, Cursor, CursorOutput};
use tui_match3::logging::{self, LogSettings};
use tui_match3::term::{BoardMirror, CursorView, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::GameConfig;

const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    logging::init(&LogSettings::from_env())?;

    let config = GameConfig::from_env().context("invalid game configuration")?;
    let seed = seed_from_env();
    info!(
        "starting {}x{} board with seed {}",
        config.rows, config.columns, seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// `MATCH3_SEED`, or the clock when unset.
fn seed_from_env() -> u32 {
    std::env::var("MATCH3_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
}

fn run(term: &mut TerminalRenderer, config: GameConfig, seed: u32) -> Result<()> {
    let mut engine = EngineHandle::start(config.clone(), seed)?;
    let mut mirror = BoardMirror::new();
    let mut cursor = Cursor::new(config.rows, config.columns);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        while let Some(event) = engine.try_recv() {
            mirror.apply(&event);
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let cursor_view = CursorView {
            position: cursor.position(),
            selected: cursor.selected(),
        };
        view.render_into(&mirror, Some(&cursor_view), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(Duration::from_millis(FRAME_MS))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    engine.send(EngineCommand::Shutdown);
                    return Ok(());
                }

                let Some(action) = handle_key_event(key) else {
                    continue;
                };
                let command = match cursor.apply(action) {
                    Some(CursorOutput::Swap { a, b }) => Some(EngineCommand::Swap { a, b }),
                    Some(CursorOutput::Hint) => Some(EngineCommand::Hint),
                    Some(CursorOutput::Restart) => Some(EngineCommand::Restart),
                    Some(CursorOutput::Redraw) | None => None,
                };
                if let Some(command) = command {
                    if !engine.send(command) {
                        anyhow::bail!("engine stopped unexpectedly");
                    }
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
