//! Engine tests - swap validation, cascade resolution, scoring, hints

mod common;

use common::{
    board_with, board_with_min_match, four_in_a_row, pos, resolver_on, resolver_with,
    row_letters, single_pass, two_pass, CORNER, SIZE,
};
use tui_match3::core::SequenceSource;
use tui_match3::engine::{
    EngineError, EngineEvent, EngineState, Resolver, Settlement, SwapOutcome,
};
use tui_match3::types::{BonusKind, ConfigError, GameConfig, GlyphKind};

fn count<F: Fn(&EngineEvent) -> bool>(events: &[EngineEvent], f: F) -> usize {
    events.iter().filter(|e| f(e)).count()
}

#[test]
fn test_single_pass_resolution() {
    let mut resolver = single_pass();
    let mut events = Vec::new();

    let outcome = resolver
        .request_swap(pos(0, 2), pos(0, 3), &mut events)
        .unwrap();
    assert_eq!(outcome, SwapOutcome::Accepted);
    assert_eq!(resolver.state(), EngineState::SwapPending);
    assert_eq!(
        events,
        vec![
            EngineEvent::StateChanged(EngineState::SwapPending),
            EngineEvent::GlyphsSwapped {
                a: pos(0, 2),
                b: pos(0, 3)
            },
        ]
    );

    let resolution = resolver.run_to_idle(&mut events).unwrap();
    assert!(!resolution.reverted);
    assert_eq!(resolution.passes, 1);
    assert_eq!(resolution.removed, 3);
    assert_eq!(resolution.award, 60);
    assert!(resolution.bonus.is_none());

    assert_eq!(resolver.score(), 60);
    assert_eq!(resolver.state(), EngineState::Idle);
    assert!(resolver.board().is_full());
    assert!(!resolver.board().has_matches());

    // Columns 0..=2 fell one row; red and yellow refills landed on top.
    assert_eq!(row_letters(resolver.board(), 0), "GPGBBO");
    assert_eq!(row_letters(resolver.board(), 5), "RYRPGP");

    assert_eq!(
        count(&events, |e| matches!(e, EngineEvent::GlyphRemoved(g) if g.kind == GlyphKind::Red)),
        3
    );
    assert_eq!(count(&events, |e| matches!(e, EngineEvent::GlyphCreated { .. })), 3);
    assert_eq!(count(&events, |e| matches!(e, EngineEvent::GlyphMoved { .. })), 15);
    assert_eq!(
        &events[events.len() - 2..],
        &[
            EngineEvent::ScoreChanged {
                total: 60,
                award: 60
            },
            EngineEvent::StateChanged(EngineState::Idle),
        ]
    );
}

#[test]
fn test_swap_direction_does_not_matter() {
    let mut forward = single_pass();
    let mut backward = single_pass();
    let mut events = Vec::new();

    forward.request_swap(pos(0, 2), pos(0, 3), &mut events).unwrap();
    backward.request_swap(pos(0, 3), pos(0, 2), &mut events).unwrap();
    forward.run_to_idle(&mut events).unwrap();
    backward.run_to_idle(&mut events).unwrap();

    assert_eq!(forward.score(), backward.score());
    for row in 0..SIZE {
        assert_eq!(
            row_letters(forward.board(), row),
            row_letters(backward.board(), row)
        );
    }
}

#[test]
fn test_cascade_scores_subsequent_pass_bonus() {
    let mut resolver = two_pass();
    let mut events = Vec::new();

    resolver.request_swap(pos(0, 3), pos(0, 2), &mut events).unwrap();
    let resolution = resolver.run_to_idle(&mut events).unwrap();

    assert_eq!(resolution.passes, 2);
    assert_eq!(resolution.removed, 6);
    assert_eq!(resolution.award, 60 + (60 + 1000));
    assert_eq!(resolver.score(), 1120);
    assert!(!resolver.board().has_matches());

    // The score is committed once, after the last pass.
    let scores: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, EngineEvent::ScoreChanged { .. }))
        .collect();
    assert_eq!(
        scores,
        vec![&EngineEvent::ScoreChanged {
            total: 1120,
            award: 1120
        }]
    );
}

#[test]
fn test_step_reports_pacing_per_pass() {
    let mut resolver = two_pass();
    let mut events = Vec::new();
    resolver.request_swap(pos(0, 3), pos(0, 2), &mut events).unwrap();

    assert_eq!(
        resolver.settle_swap(&mut events).unwrap(),
        Settlement::Matched {
            count: 3,
            bonus_eligible: false
        }
    );

    let first = resolver.step(&mut events).unwrap();
    assert_eq!(first.pass, 0);
    assert_eq!(first.award.total, 60);
    assert_eq!(first.distance, 1);
    assert_eq!(first.pacing, resolver.config().pacing(1));
    assert!(!first.finished);
    assert_eq!(resolver.state(), EngineState::Resolving);
    assert_eq!(resolver.score(), 0);

    let second = resolver.step(&mut events).unwrap();
    assert_eq!(second.pass, 1);
    assert_eq!(second.award.cascade_bonus, 1000);
    assert!(second.finished);
    assert_eq!(resolver.state(), EngineState::Idle);
}

#[test]
fn test_four_in_a_row_creates_bonus_glyph() {
    let mut resolver = four_in_a_row();
    let mut events = Vec::new();

    resolver.request_swap(pos(1, 2), pos(0, 2), &mut events).unwrap();
    assert_eq!(
        resolver.settle_swap(&mut events).unwrap(),
        Settlement::Matched {
            count: 4,
            bonus_eligible: true
        }
    );

    let step = resolver.step(&mut events).unwrap();
    assert!(step.finished);
    assert_eq!(step.removed, 4);
    assert_eq!(step.award.total, 120);

    let bonus = step.bonus.unwrap();
    assert_eq!(bonus.kind, GlyphKind::Red);
    assert_eq!(bonus.bonus, BonusKind::ClearRowColumn);
    assert_eq!(bonus.position(), pos(0, 2));
    assert_eq!(resolver.board().get(pos(0, 2)).unwrap(), Some(bonus));
    assert!(events.contains(&EngineEvent::BonusCreated(bonus)));
    assert_eq!(resolver.score(), 120);
}

#[test]
fn test_bonus_tie_break_favours_first_position() {
    // Both swapped glyphs complete a vertical run of three.
    let layout = [
        (0, 2, GlyphKind::Red),
        (0, 3, GlyphKind::Yellow),
        (1, 2, GlyphKind::Yellow),
        (2, 2, GlyphKind::Yellow),
        (1, 3, GlyphKind::Red),
        (2, 3, GlyphKind::Red),
    ];

    let mut events = Vec::new();
    let mut resolver = resolver_with(&layout);
    resolver.request_swap(pos(0, 2), pos(0, 3), &mut events).unwrap();
    resolver.settle_swap(&mut events).unwrap();
    let bonus = resolver.step(&mut events).unwrap().bonus.unwrap();
    assert_eq!((bonus.kind, bonus.position()), (GlyphKind::Red, pos(0, 3)));

    let mut resolver = resolver_with(&layout);
    resolver.request_swap(pos(0, 3), pos(0, 2), &mut events).unwrap();
    resolver.settle_swap(&mut events).unwrap();
    let bonus = resolver.step(&mut events).unwrap().bonus.unwrap();
    assert_eq!((bonus.kind, bonus.position()), (GlyphKind::Yellow, pos(0, 2)));
}

#[test]
fn test_unknown_bonus_kind_reverts_swap() {
    let mut config = GameConfig::with_size(SIZE, SIZE);
    config.bonus_kinds = vec![GlyphKind::Blue];
    let mut resolver = resolver_on(four_in_a_row().board().clone(), config);
    let before = resolver.snapshot();
    let mut events = Vec::new();

    resolver.request_swap(pos(1, 2), pos(0, 2), &mut events).unwrap();
    let err = resolver.settle_swap(&mut events).unwrap_err();
    assert!(matches!(err, EngineError::UnknownGlyphType(GlyphKind::Red)));

    assert_eq!(resolver.state(), EngineState::Idle);
    assert_eq!(resolver.snapshot(), before);
    assert_eq!(resolver.score(), 0);
    assert!(events.contains(&EngineEvent::SwapReverted {
        a: pos(1, 2),
        b: pos(0, 2)
    }));
}

#[test]
fn test_swap_without_match_is_reverted() {
    let mut resolver = resolver_on(board_with(&[]), GameConfig::with_size(SIZE, SIZE));
    let before = resolver.snapshot();
    let mut events = Vec::new();

    assert_eq!(
        resolver.request_swap(pos(0, 0), pos(0, 1), &mut events).unwrap(),
        SwapOutcome::Accepted
    );
    let resolution = resolver.run_to_idle(&mut events).unwrap();
    assert!(resolution.reverted);
    assert_eq!(resolution.passes, 0);

    assert_eq!(resolver.snapshot(), before);
    assert_eq!(resolver.state(), EngineState::Idle);
    assert_eq!(resolver.score(), 0);
    assert_eq!(
        events.last(),
        Some(&EngineEvent::StateChanged(EngineState::Idle))
    );
    assert!(events.contains(&EngineEvent::SwapReverted {
        a: pos(0, 0),
        b: pos(0, 1)
    }));
}

#[test]
fn test_invalid_swaps_are_rejected_without_side_effects() {
    let mut resolver = single_pass();
    let before = resolver.snapshot();
    let mut events = Vec::new();

    for (a, b) in [
        (pos(0, 0), pos(0, 2)),
        (pos(0, 0), pos(1, 1)),
        (pos(0, 0), pos(0, 0)),
        (pos(0, 5), pos(0, 6)),
    ] {
        assert_eq!(
            resolver.request_swap(a, b, &mut events).unwrap(),
            SwapOutcome::RejectedNotAdjacent
        );
        assert!(resolver.validate_swap(a, b).is_err());
    }
    assert!(events.is_empty());
    assert_eq!(resolver.snapshot(), before);
    assert_eq!(resolver.state(), EngineState::Idle);
}

#[test]
fn test_swap_while_busy_is_rejected() {
    let mut resolver = single_pass();
    let mut events = Vec::new();

    resolver.request_swap(pos(0, 2), pos(0, 3), &mut events).unwrap();
    let pending = resolver.snapshot();
    events.clear();

    assert_eq!(
        resolver.request_swap(pos(3, 0), pos(3, 1), &mut events).unwrap(),
        SwapOutcome::RejectedBusy
    );
    resolver.settle_swap(&mut events).unwrap();
    events.clear();
    assert_eq!(
        resolver.request_swap(pos(3, 0), pos(3, 1), &mut events).unwrap(),
        SwapOutcome::RejectedBusy
    );
    assert!(events.is_empty());

    resolver.run_to_idle(&mut events).unwrap();
    assert_ne!(resolver.snapshot(), pending);
    assert_eq!(resolver.score(), 60);
}

#[test]
fn test_phase_calls_out_of_order_fail() {
    let mut resolver = single_pass();
    let mut events = Vec::new();

    assert!(matches!(
        resolver.settle_swap(&mut events),
        Err(EngineError::WrongState {
            expected: EngineState::SwapPending,
            actual: EngineState::Idle
        })
    ));
    assert!(matches!(
        resolver.step(&mut events),
        Err(EngineError::WrongState {
            expected: EngineState::Resolving,
            ..
        })
    ));
    assert!(events.is_empty());
}

#[test]
fn test_hint_pulse_and_clear() {
    let mut resolver = single_pass();
    let mut events = Vec::new();

    let hint = resolver.pulse_hint(&mut events).unwrap().unwrap();
    assert_eq!((hint.from, hint.to), (pos(0, 2), pos(0, 3)));
    assert!(resolver.hint_active());
    assert_eq!(events, vec![EngineEvent::HintPulse(hint.glyphs.clone())]);

    // Scanning again without a move gives the same answer.
    assert_eq!(resolver.scan_hint().unwrap(), Some(hint));

    // An accepted swap clears the highlight before anything else.
    events.clear();
    resolver.request_swap(pos(0, 2), pos(0, 3), &mut events).unwrap();
    assert_eq!(events[0], EngineEvent::HintCleared);
    assert!(!resolver.hint_active());

    // No pulses while the swap is pending.
    events.clear();
    assert!(resolver.pulse_hint(&mut events).unwrap().is_none());
    assert!(events.is_empty());
}

#[test]
fn test_dead_board_pulses_nothing() {
    let mut resolver = resolver_on(board_with(&[]), GameConfig::with_size(SIZE, SIZE));
    let mut events = Vec::new();
    assert!(resolver.pulse_hint(&mut events).unwrap().is_none());
    assert!(!resolver.hint_active());
    assert!(events.is_empty());
}

#[test]
fn test_restart_resets_board_and_score() {
    let mut resolver = single_pass();
    let mut events = Vec::new();
    resolver.request_swap(pos(0, 2), pos(0, 3), &mut events).unwrap();
    resolver.run_to_idle(&mut events).unwrap();
    assert_eq!(resolver.score(), 60);

    events.clear();
    resolver.restart(&mut events).unwrap();
    assert_eq!(resolver.score(), 0);
    assert_eq!(resolver.state(), EngineState::Idle);
    assert!(resolver.board().is_full());
    assert!(!resolver.board().has_matches());
    assert_eq!(
        events,
        vec![
            EngineEvent::BoardReset(resolver.snapshot()),
            EngineEvent::ScoreChanged { total: 0, award: 0 },
        ]
    );
}

#[test]
fn test_new_resolver_starts_idle_on_matchless_board() {
    let resolver = Resolver::new(GameConfig::default(), 7).unwrap();
    assert_eq!(resolver.state(), EngineState::Idle);
    assert_eq!(resolver.score(), 0);
    assert!(resolver.board().is_full());
    assert!(!resolver.board().has_matches());
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = GameConfig::default();
    config.palette = vec![GlyphKind::Red, GlyphKind::Blue];
    config.bonus_kinds = vec![GlyphKind::Red];
    assert!(matches!(
        Resolver::new(config, 1),
        Err(EngineError::Config(_))
    ));
}

#[test]
fn test_crossing_runs_of_three_count_together() {
    let mut resolver = resolver_with(&CORNER);
    let mut events = Vec::new();
    resolver.request_swap(pos(0, 3), pos(0, 2), &mut events).unwrap();
    assert_eq!(
        resolver.settle_swap(&mut events).unwrap(),
        Settlement::Matched {
            count: 5,
            bonus_eligible: true
        }
    );
}

#[test]
fn test_min_match_of_four_ignores_runs_of_three() {
    let config = GameConfig {
        min_match: 4,
        ..GameConfig::with_size(SIZE, SIZE)
    };
    let mut resolver = resolver_on(board_with_min_match(4, &CORNER), config);
    let before = resolver.snapshot();
    let mut events = Vec::new();

    assert_eq!(
        resolver.request_swap(pos(0, 3), pos(0, 2), &mut events).unwrap(),
        SwapOutcome::Accepted
    );
    assert_eq!(
        resolver.settle_swap(&mut events).unwrap(),
        Settlement::Reverted
    );
    assert_eq!(resolver.snapshot(), before);
    assert_eq!(resolver.state(), EngineState::Idle);
}

#[test]
fn test_board_and_config_must_agree_on_min_match() {
    let config = GameConfig {
        min_match: 4,
        ..GameConfig::with_size(SIZE, SIZE)
    };
    let source = SequenceSource::new(vec![GlyphKind::Red]);
    let result = Resolver::with_board(config, board_with(&CORNER), source);
    assert!(matches!(
        result,
        Err(EngineError::Config(ConfigError::MinMatchMismatch {
            config: 4,
            board: 3
        }))
    ));
}
