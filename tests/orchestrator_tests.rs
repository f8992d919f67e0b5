//! Orchestrator integration tests.
//!
//! Whole games driven through the public request API: moves, merges,
//! undo and discard budgets, replay, restart, and the narrative seam.

use std::cell::RefCell;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fortune_stack::core::{Action, ColumnId, DeckEntry, EngineConfig, Seed};
use fortune_stack::error::{ConfigError, NarrativeError};
use fortune_stack::game::{EngineEvent, MergePhase, Orchestrator, RejectReason};
use fortune_stack::narrative::{NarrativeRequest, NarrativeService};
use fortune_stack::rules::check_game_over;

fn fixed_clock() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap()
}

/// Place on the first legal column, discard when stuck. Settles every move.
fn play_greedy(game: &mut Orchestrator, max_steps: usize) {
    for _ in 0..max_steps {
        if game.is_game_over() {
            return;
        }
        match game.legal_columns().first().copied() {
            Some(column) => {
                assert!(game.move_card(column).is_accepted());
                game.settle();
            }
            None => {
                if !game.discard().is_accepted() {
                    return;
                }
            }
        }
    }
}

fn expected_value(game: &Orchestrator) -> u64 {
    let deck = &game.config().deck;
    let unlock = if game.state().higher_tier_cards_added {
        deck.unlock_value()
    } else {
        0
    };
    deck.base_value() + unlock
}

// =============================================================================
// Full Game Tests
// =============================================================================

#[test]
fn test_greedy_game_terminates_with_report() {
    for seed in ["alpha", "beta", "gamma"] {
        let mut game = Orchestrator::new(seed).with_clock(fixed_clock);
        play_greedy(&mut game, 1_000);

        assert!(game.is_game_over(), "seed {seed}");
        let report = game.fortune().expect("report at game over");
        let population = game.state().columns.iter().map(|c| c.len()).sum::<usize>()
            + game.state().queue.len();
        assert_eq!(report.tier_counts.total() as usize, population);
        assert_eq!(report.timestamp, fixed_clock());
        assert!(game.legal_columns().is_empty());
    }
}

#[test]
fn test_population_invariant_every_move() {
    let mut game = Orchestrator::new(2024u32);
    for _ in 0..200 {
        if game.is_game_over() {
            break;
        }
        let Some(column) = game.legal_columns().first().copied() else {
            if !game.discard().is_accepted() {
                break;
            }
            continue;
        };
        game.move_card(column);
        game.settle();
        assert_eq!(game.state().accounted_value(), expected_value(&game));
    }
}

#[test]
fn test_status_and_fortune_agree() {
    for seed in 0u32..10 {
        let mut game = Orchestrator::new(seed);
        play_greedy(&mut game, 1_000);
        let _ = game.undo();

        let status = check_game_over(game.state(), &game.config().board);
        assert_eq!(game.status(), status);
        assert_eq!(game.is_game_over(), game.fortune().is_some());
    }
}

// =============================================================================
// Merge Sequencing Tests
// =============================================================================

#[test]
fn test_moves_rejected_until_chain_drains() {
    let mut game = Orchestrator::new("busy");
    let column = game.legal_columns()[0];
    assert!(game.move_card(column).is_accepted());

    while game.is_busy() {
        let other = ColumnId::new(1);
        assert_eq!(game.move_card(other).rejection(), Some(RejectReason::Busy));
        game.advance(Duration::from_millis(16));
    }
    assert!(matches!(game.phase(), MergePhase::Idle));
    assert!(game.animating_cards().is_empty());
}

#[test]
fn test_timing_does_not_change_outcome() {
    let mut framed = Orchestrator::new(99u32);
    let mut settled = Orchestrator::new(99u32);

    for _ in 0..30 {
        if framed.is_game_over() {
            break;
        }
        let Some(column) = framed.legal_columns().first().copied() else {
            break;
        };
        framed.move_card(column);
        settled.move_card(column);

        while framed.is_busy() {
            framed.advance(Duration::from_millis(33));
        }
        settled.settle();

        assert_eq!(framed.state().columns, settled.state().columns);
        assert_eq!(framed.state().score, settled.state().score);
        assert_eq!(framed.state().deck, settled.state().deck);
    }
    assert!(framed.state().elapsed_ms > 0);
    assert_eq!(settled.state().elapsed_ms, 0);
}

#[test]
fn test_merge_events_are_ordered() {
    // Find a move that merges, then check the event order.
    for seed in 0u32..50 {
        let mut game = Orchestrator::new(seed);
        let Some(&column) = game.legal_columns().iter().find(|&&id| {
            let top = game.state().column(id).and_then(|c| c.top()).map(|c| c.value);
            top == game.state().placeable().map(|c| c.value)
        }) else {
            continue;
        };

        game.move_card(column);
        let events = game.settle();
        let started = events
            .iter()
            .position(|e| matches!(e, EngineEvent::MergeStarted { .. }));
        let merged = events
            .iter()
            .position(|e| matches!(e, EngineEvent::Merged { .. }));
        assert!(started.is_some() && merged.is_some());
        assert!(started < merged);
        return;
    }
    panic!("no seed offered an immediate merge");
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_budgets_monotonic() {
    let mut game = Orchestrator::new("budgets");
    let mut undo = game.state().undo_remaining;
    let mut discard = game.state().discards_remaining;

    let script = [
        Action::Move(ColumnId(1)),
        Action::Undo,
        Action::Discard,
        Action::Move(ColumnId(2)),
        Action::Undo,
        Action::Undo,
        Action::Discard,
        Action::Move(ColumnId(3)),
        Action::Undo,
    ];
    for action in script {
        game.handle(action);
        game.settle();
        assert!(game.state().undo_remaining <= undo);
        assert!(game.state().discards_remaining <= discard);
        undo = game.state().undo_remaining;
        discard = game.state().discards_remaining;
    }
}

#[test]
fn test_extra_undo_is_noop() {
    let mut game = Orchestrator::new(17u32);
    for _ in 0..3 {
        let column = game.legal_columns()[0];
        game.move_card(column);
        game.settle();
    }
    assert!(game.undo().is_accepted());
    assert!(game.undo().is_accepted());
    assert_eq!(game.state().undo_remaining, 0);

    let before = game.state().clone();
    assert_eq!(game.undo().rejection(), Some(RejectReason::NoUndoRemaining));
    assert_eq!(game.state(), &before);
}

// =============================================================================
// Replay / Restart Tests
// =============================================================================

#[test]
fn test_replay_from_action_log() {
    let mut original = Orchestrator::new("replay");
    for step in 0..25 {
        if original.is_game_over() {
            break;
        }
        if step == 10 {
            original.undo();
            continue;
        }
        match original.legal_columns().last().copied() {
            Some(column) => {
                original.move_card(column);
                original.settle();
            }
            None => {
                original.discard();
            }
        }
    }

    let mut replay = Orchestrator::new(original.seed().clone());
    for record in original.action_log() {
        assert!(replay.handle(record.action.clone()).is_accepted());
        replay.settle();
    }

    assert_eq!(
        replay.state().fingerprint().unwrap(),
        original.state().fingerprint().unwrap()
    );
    assert_eq!(replay.action_log(), original.action_log());
}

#[test]
fn test_restart_resets_everything() {
    let mut game = Orchestrator::new("first");
    play_greedy(&mut game, 20);

    let outcome = game.handle(Action::Restart(Seed::from("second")));
    assert!(outcome.is_accepted());
    assert!(game.action_log().is_empty());
    assert!(game.undo_history().is_empty());
    assert_eq!(game.state().undo_remaining, 2);
    assert_eq!(game.state().discards_remaining, 1);
    assert_eq!(game.state(), Orchestrator::new("second").state());
}

#[test]
fn test_restart_allowed_while_busy() {
    let mut game = Orchestrator::new(5u32);
    let column = game.legal_columns()[0];
    game.move_card(column);
    assert!(game.is_busy());

    assert!(game.restart(6u32).is_accepted());
    assert!(!game.is_busy());
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_invalid_config_rejected() {
    let mut config = EngineConfig::default();
    config.deck.base.push(DeckEntry::new(6, 2));

    let result = Orchestrator::with_config(config, 1u32);
    assert!(matches!(result, Err(ConfigError::NotPowerOfTwo(6))));
}

#[test]
fn test_custom_budgets() {
    let mut config = EngineConfig::default();
    config.budgets.undo = 0;
    config.budgets.discard = 3;

    let mut game = Orchestrator::with_config(config, 1u32).unwrap();
    let column = game.legal_columns()[0];
    game.move_card(column);
    game.settle();

    assert_eq!(game.undo().rejection(), Some(RejectReason::NoUndoRemaining));
    assert_eq!(game.state().discards_remaining, 3);
}

// =============================================================================
// Narrative Tests
// =============================================================================

struct RecordingService {
    prompts: RefCell<Vec<String>>,
}

impl NarrativeService for RecordingService {
    fn summarize(&self, request: &NarrativeRequest) -> Result<String, NarrativeError> {
        self.prompts.borrow_mut().push(request.user_prompt());
        Ok(format!("score {}", request.score()))
    }
}

struct OfflineService;

impl NarrativeService for OfflineService {
    fn summarize(&self, _request: &NarrativeRequest) -> Result<String, NarrativeError> {
        Err(NarrativeError::Transport("connection refused".to_string()))
    }
}

#[test]
fn test_narrate_needs_report() {
    let game = Orchestrator::new("early");
    let service = RecordingService {
        prompts: RefCell::new(Vec::new()),
    };
    assert!(matches!(game.narrate(&service), Err(NarrativeError::NoReport)));
    assert!(service.prompts.borrow().is_empty());
}

#[test]
fn test_narrate_after_game_over() {
    let mut game = Orchestrator::new("story").with_clock(fixed_clock);
    play_greedy(&mut game, 1_000);
    let service = RecordingService {
        prompts: RefCell::new(Vec::new()),
    };

    let summary = game.narrate(&service).unwrap();
    assert_eq!(summary, format!("score {}", game.state().score));
    assert!(service.prompts.borrow()[0].contains("Date/time: 2024-01-01 00:00"));
}

#[test]
fn test_narrative_failure_is_isolated() {
    let mut game = Orchestrator::new("offline");
    play_greedy(&mut game, 1_000);
    let before = game.state().clone();
    let report = game.fortune().cloned();

    assert!(matches!(
        game.narrate(&OfflineService),
        Err(NarrativeError::Transport(_))
    ));
    assert_eq!(game.state(), &before);
    assert_eq!(game.fortune().cloned(), report);
}
