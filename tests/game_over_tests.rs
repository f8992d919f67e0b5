//! Placement rule and game-over evaluator integration tests.

use fortune_stack::board::Column;
use fortune_stack::cards::{Card, LuckAttributes, SuitId, Tier};
use fortune_stack::core::{BoardConfig, CardId, ColumnId, GameState};
use fortune_stack::rules::{can_place, check_game_over, legal_columns, GameOverReason};

fn card(id: u32, value: u32) -> Card {
    Card::new(
        CardId(id),
        value,
        LuckAttributes {
            tier: Tier::Symbolic,
            suit: SuitId::Will,
        },
    )
}

fn empty_state() -> GameState {
    GameState::new(&BoardConfig::default())
}

// =============================================================================
// Placement Tests
// =============================================================================

#[test]
fn test_scenario_empty_column_accepts_eight() {
    assert!(can_place(&card(1, 8), &Column::new(ColumnId(1))));
}

#[test]
fn test_placement_ignores_suit_and_tier() {
    let top = Card::new(
        CardId(1),
        16,
        LuckAttributes {
            tier: Tier::Destiny,
            suit: SuitId::DestinyLove,
        },
    );
    let column = Column::with_cards(ColumnId(1), [top]);

    assert!(can_place(&card(2, 16), &column));
    assert!(!can_place(&card(3, 32), &column));
}

// =============================================================================
// Game-Over Scenario Tests
// =============================================================================

#[test]
fn test_scenario_deadlock() {
    let mut state = empty_state();
    for (i, column) in state.columns.iter_mut().enumerate() {
        column.push(card(i as u32, 16 >> i));
    }
    state.queue.push_back(card(10, 32));
    state.deck.push_back(card(11, 2));
    state.discards_remaining = 0;

    assert!(legal_columns(&state).is_empty());
    let status = check_game_over(&state, &BoardConfig::default());
    assert!(status.is_game_over);
    assert_eq!(status.reason, Some(GameOverReason::Deadlock));
    assert_eq!(status.trigger_column, None);
}

#[test]
fn test_scenario_deck_exhaustion() {
    let mut state = empty_state();
    // Column contents do not matter
    state.columns[0].push(card(1, 512));
    state.columns[3].push(card(2, 2));

    let status = check_game_over(&state, &BoardConfig::default());
    assert_eq!(status.reason, Some(GameOverReason::DeckEmpty));
}

#[test]
fn test_empty_column_prevents_deadlock() {
    let mut state = empty_state();
    for column in state.columns.iter_mut().take(3) {
        column.push(card(1, 2));
    }
    state.queue.push_back(card(10, 2048));
    state.discards_remaining = 0;

    assert!(!check_game_over(&state, &BoardConfig::default()).is_game_over);
}

// =============================================================================
// Priority Tests
// =============================================================================

#[test]
fn test_overflow_beats_deadlock() {
    let mut state = empty_state();
    for i in 0..8 {
        state.columns[1].push(card(i, 256 >> i));
    }
    for (i, index) in [0usize, 2, 3].into_iter().enumerate() {
        state.columns[index].push(card(100 + i as u32, 4));
    }
    state.queue.push_back(card(200, 1024));
    state.deck.push_back(card(201, 2));
    state.discards_remaining = 0;

    let status = check_game_over(&state, &BoardConfig::default());
    assert_eq!(status.reason, Some(GameOverReason::Overflow));
    assert_eq!(status.trigger_column, Some(ColumnId(2)));
}

#[test]
fn test_overflow_beats_deck_empty() {
    let mut state = empty_state();
    for i in 0..8 {
        state.columns[3].push(card(i, 2));
    }

    let status = check_game_over(&state, &BoardConfig::default());
    assert_eq!(status.reason, Some(GameOverReason::Overflow));
    assert_eq!(status.trigger_column, Some(ColumnId(4)));
}

#[test]
fn test_first_overflowing_column_reported() {
    let mut state = empty_state();
    for column in [1usize, 2] {
        for i in 0..8 {
            state.columns[column].push(card(i, 2));
        }
    }
    let status = check_game_over(&state, &BoardConfig::default());
    assert_eq!(status.trigger_column, Some(ColumnId(2)));
}

#[test]
fn test_custom_overflow_depth() {
    let board = BoardConfig {
        overflow_depth: 3,
        ..BoardConfig::default()
    };
    let mut state = GameState::new(&board);
    state.queue.push_back(card(1, 2));
    for i in 0..3 {
        state.columns[0].push(card(10 + i, 2));
    }

    assert_eq!(
        check_game_over(&state, &board).reason,
        Some(GameOverReason::Overflow)
    );
}
