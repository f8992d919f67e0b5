//! Property tests for the engine invariants.

use fortune_stack::board::Column;
use fortune_stack::cards::{Card, CardMint, LuckAttributes, SuitId, Tier};
use fortune_stack::core::{Action, CardId, CardIdAllocator, ColumnId, LuckConfig, SeededRng};
use fortune_stack::game::Orchestrator;
use fortune_stack::merge::{BatchMerge, MergeResolution, SingleStepMerge};
use fortune_stack::rules::can_place;
use im::Vector;
use proptest::prelude::*;

fn card(id: u32, value: u32) -> Card {
    Card::new(
        CardId(id),
        value,
        LuckAttributes {
            tier: Tier::Common,
            suit: SuitId::Change,
        },
    )
}

fn column_of(values: &[u32]) -> Vector<Card> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| card(i as u32 + 1, v))
        .collect()
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => (1u8..=4).prop_map(|c| Action::Move(ColumnId(c))),
        1 => Just(Action::Undo),
        1 => Just(Action::Discard),
    ]
}

/// Power-of-two exponents, distinct and descending.
fn descending_exponents() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(2u32..12, 1..6)
        .prop_map(|set| set.into_iter().rev().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_placement_rule(
        exponents in prop::collection::vec(1u32..12, 0..8),
        card_exp in 1u32..12,
    ) {
        let values: Vec<u32> = exponents.iter().map(|e| 1 << e).collect();
        let column = Column::with_cards(ColumnId(1), column_of(&values));
        let candidate = card(999, 1 << card_exp);

        let expected = values.last().map_or(true, |&top| candidate.value <= top);
        prop_assert_eq!(can_place(&candidate, &column), expected);
    }

    #[test]
    fn prop_merge_equivalence(exponents in descending_exponents()) {
        // Strictly descending, then the top value repeated
        let mut values: Vec<u32> = exponents.iter().map(|e| 1 << e).collect();
        let top = *values.last().unwrap();
        values.push(top);
        let input = column_of(&values);
        let luck = LuckConfig::default();

        let mut ids = CardIdAllocator::new();
        let mut rng = SeededRng::new(1u32);
        let mut mint = CardMint::new(&mut ids, &luck, &mut rng);
        let mut single = input.clone();
        let mut single_score = 0;
        loop {
            let step = SingleStepMerge.resolve(&single, &mut mint);
            if step.score_gained == 0 {
                break;
            }
            single = step.cards;
            single_score += step.score_gained;
        }

        let mut ids = CardIdAllocator::new();
        let mut rng = SeededRng::new(1u32);
        let mut mint = CardMint::new(&mut ids, &luck, &mut rng);
        let batch = BatchMerge.resolve(&input, &mut mint);

        prop_assert_eq!(single.last().map(|c| c.value), batch.cards.last().map(|c| c.value));
        prop_assert_eq!(single_score, batch.score_gained);
    }

    #[test]
    fn prop_population_invariant(
        seed in any::<u32>(),
        actions in prop::collection::vec(action_strategy(), 0..60),
    ) {
        let mut game = Orchestrator::new(seed);
        for action in actions {
            game.handle(action);
            game.settle();

            let state = game.state();
            let deck = &game.config().deck;
            let expected = deck.base_value()
                + if state.higher_tier_cards_added { deck.unlock_value() } else { 0 };
            prop_assert_eq!(state.accounted_value(), expected);

            let mut ids: Vec<CardId> = state.live_cards().map(|c| c.id).collect();
            let live = ids.len();
            ids.sort();
            ids.dedup();
            prop_assert_eq!(ids.len(), live);
        }
    }

    #[test]
    fn prop_budgets_never_increase(
        seed in any::<u32>(),
        actions in prop::collection::vec(action_strategy(), 0..60),
    ) {
        let mut game = Orchestrator::new(seed);
        let mut undo = game.state().undo_remaining;
        let mut discard = game.state().discards_remaining;

        for action in actions {
            game.handle(action);
            game.settle();
            prop_assert!(game.state().undo_remaining <= undo);
            prop_assert!(game.state().discards_remaining <= discard);
            undo = game.state().undo_remaining;
            discard = game.state().discards_remaining;
        }
    }

    #[test]
    fn prop_setup_deterministic(seed in any::<u32>()) {
        let a = Orchestrator::new(seed);
        let b = Orchestrator::new(seed);
        prop_assert_eq!(a.state().fingerprint().unwrap(), b.state().fingerprint().unwrap());
    }

    #[test]
    fn prop_queue_never_exceeds_capacity(
        seed in any::<u32>(),
        actions in prop::collection::vec(action_strategy(), 0..40),
    ) {
        let mut game = Orchestrator::new(seed);
        for action in actions {
            game.handle(action);
            game.settle();
            prop_assert!(game.state().queue.len() <= game.config().board.queue_size);
            prop_assert!(!game.is_busy());
        }
    }
}
