//! The single owner of a game's mutable state.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use rustc_hash::FxHashSet;

use super::events::{EngineEvent, Outcome, RejectReason};
use super::history::UndoHistory;
use super::phase::MergePhase;
use super::setup::setup_game;
use super::unlock::unlock_higher_tier_cards;
use crate::cards::CardMint;
use crate::core::{
    Action, ActionRecord, CardId, CardIdAllocator, ColumnId, EngineConfig, GameState, Seed,
    SeededRng,
};
use crate::error::{ConfigError, NarrativeError};
use crate::fortune::{evaluate_fortune, FortuneReport};
use crate::merge::{MergeOutcome, MergeResolution, SingleStepMerge};
use crate::narrative::{NarrativeRequest, NarrativeService};
use crate::rules::{can_place, check_game_over, legal_columns, GameOverStatus};

/// Sequences moves, merges, unlocks, and game-over detection.
///
/// ## Driving
///
/// Requests (`move_card`, `undo`, `discard`, `restart`) return immediately.
/// A move starts a merge sequence that progresses only when the driver calls
/// [`advance`](Self::advance) with elapsed wall-clock time, or
/// [`settle`](Self::settle) to drain it at once. While the sequence is in
/// flight the orchestrator is busy and rejects moves.
///
/// ## Example
///
/// ```
/// use fortune_stack::game::Orchestrator;
///
/// let mut game = Orchestrator::new("2024-01-01:player");
/// if let Some(&column) = game.legal_columns().first() {
///     assert!(game.move_card(column).is_accepted());
///     assert!(game.is_busy());
///     game.settle();
///     assert!(!game.is_busy());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Orchestrator {
    config: EngineConfig,
    seed: Seed,
    state: GameState,
    rng: SeededRng,
    ids: CardIdAllocator,
    history: UndoHistory,
    phase: MergePhase,
    status: GameOverStatus,
    fortune: Option<FortuneReport>,
    animating: FxHashSet<CardId>,
    log: Vec<ActionRecord>,
    clock: fn() -> DateTime<Utc>,
}

impl Orchestrator {
    /// Start a game with the default configuration.
    pub fn new(seed: impl Into<Seed>) -> Self {
        Self::build(EngineConfig::default(), seed.into())
    }

    /// Start a game with a custom configuration.
    pub fn with_config(config: EngineConfig, seed: impl Into<Seed>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed.into()))
    }

    /// Replace the clock used to timestamp fortune reports.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn build(config: EngineConfig, seed: Seed) -> Self {
        let mut rng = SeededRng::new(seed.clone());
        let mut ids = CardIdAllocator::new();
        let state = {
            let mut mint = CardMint::new(&mut ids, &config.luck, &mut rng);
            setup_game(&config, &mut mint)
        };
        info!("game seeded with {seed}");

        let mut game = Self {
            history: UndoHistory::new(config.budgets.history_depth),
            config,
            seed,
            state,
            rng,
            ids,
            phase: MergePhase::Idle,
            status: GameOverStatus::ongoing(),
            fortune: None,
            animating: FxHashSet::default(),
            log: Vec::new(),
            clock: Utc::now,
        };
        let mut events = Vec::new();
        game.refresh_status(&mut events);
        game
    }

    // === Requests ===

    /// Dispatch a UI request.
    pub fn handle(&mut self, action: Action) -> Outcome {
        match action {
            Action::Move(column) => self.move_card(column),
            Action::Undo => self.undo(),
            Action::Discard => self.discard(),
            Action::Restart(seed) => self.restart(seed),
        }
    }

    /// Place the queue's placeable card on `column` and start merge resolution.
    pub fn move_card(&mut self, column: ColumnId) -> Outcome {
        let action = Action::Move(column);
        if let Err(reason) = self.check_move(column) {
            return self.reject(&action, reason);
        }

        self.history.push(self.state.snapshot());
        let Some(card) = self.state.take_placeable() else {
            return self.reject(&action, RejectReason::EmptyQueue);
        };
        if let Some(target) = self.state.column_mut(column) {
            target.push(card);
        }
        let drawn = self.state.draw_into_queue();
        debug!("placed {card} on {column}");

        self.set_phase(MergePhase::AwaitingMerge {
            column,
            remaining: self.config.timing.merge_start_delay(),
        });
        self.record(action);
        Outcome::Accepted(vec![EngineEvent::CardPlaced {
            column,
            card,
            drawn,
        }])
    }

    fn check_move(&self, column: ColumnId) -> Result<(), RejectReason> {
        if self.is_busy() {
            return Err(RejectReason::Busy);
        }
        if self.status.is_game_over {
            return Err(RejectReason::GameOver);
        }
        let card = self.state.placeable().ok_or(RejectReason::EmptyQueue)?;
        let target = self
            .state
            .column(column)
            .ok_or(RejectReason::UnknownColumn)?;
        if target.len() >= self.config.board.overflow_depth {
            return Err(RejectReason::ColumnFull);
        }
        if !can_place(card, target) {
            return Err(RejectReason::IllegalPlacement);
        }
        Ok(())
    }

    /// Restore the newest settled snapshot.
    ///
    /// Allowed after game over; the status is re-evaluated and the fortune
    /// report follows it.
    pub fn undo(&mut self) -> Outcome {
        let action = Action::Undo;
        if self.is_busy() {
            return self.reject(&action, RejectReason::Busy);
        }
        if self.state.undo_remaining == 0 {
            return self.reject(&action, RejectReason::NoUndoRemaining);
        }
        let Some(snapshot) = self.history.pop() else {
            return self.reject(&action, RejectReason::NoHistory);
        };

        self.state.restore(snapshot);
        self.state.undo_remaining -= 1;
        debug!(
            "undo to score {}, {} undo left",
            self.state.score, self.state.undo_remaining
        );

        let mut events = vec![EngineEvent::Undone {
            score: self.state.score,
        }];
        self.refresh_status(&mut events);
        self.record(action);
        Outcome::Accepted(events)
    }

    /// Trash the placeable card and draw a replacement.
    pub fn discard(&mut self) -> Outcome {
        let action = Action::Discard;
        if self.is_busy() {
            return self.reject(&action, RejectReason::Busy);
        }
        if self.status.is_game_over {
            return self.reject(&action, RejectReason::GameOver);
        }
        if self.state.discards_remaining == 0 {
            return self.reject(&action, RejectReason::NoDiscardRemaining);
        }
        let Some(card) = self.state.take_placeable() else {
            return self.reject(&action, RejectReason::EmptyQueue);
        };

        self.state.trash.push_back(card);
        let drawn = self.state.draw_into_queue();
        self.state.discards_remaining -= 1;
        debug!("discarded {card}");

        let mut events = vec![EngineEvent::CardDiscarded { card, drawn }];
        self.refresh_status(&mut events);
        self.record(action);
        Outcome::Accepted(events)
    }

    /// Throw the game away and start a new one. Always accepted.
    pub fn restart(&mut self, seed: impl Into<Seed>) -> Outcome {
        let seed = seed.into();
        let clock = self.clock;
        *self = Self::build(self.config.clone(), seed.clone());
        self.clock = clock;
        Outcome::Accepted(vec![EngineEvent::Restarted { seed }])
    }

    // === Driver ===

    /// Progress the merge sequence by `elapsed` of wall-clock time.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<EngineEvent> {
        if !self.status.is_game_over {
            let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
            self.state.elapsed_ms = self.state.elapsed_ms.saturating_add(millis);
        }
        self.drive(Some(elapsed))
    }

    /// Run the merge sequence to completion, ignoring the animation delays.
    pub fn settle(&mut self) -> Vec<EngineEvent> {
        self.drive(None)
    }

    /// Time until the next phase transition, `None` when idle.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.phase.remaining()
    }

    /// Columns the placeable card may go to right now.
    #[must_use]
    pub fn legal_columns(&self) -> Vec<ColumnId> {
        if self.is_busy() || self.status.is_game_over {
            return Vec::new();
        }
        legal_columns(&self.state)
            .into_iter()
            .filter(|&id| {
                self.state
                    .column(id)
                    .is_some_and(|c| c.len() < self.config.board.overflow_depth)
            })
            .collect()
    }

    /// `budget` of `None` means unbounded.
    fn drive(&mut self, mut budget: Option<Duration>) -> Vec<EngineEvent> {
        let mut events = Vec::new();

        loop {
            let phase = std::mem::replace(&mut self.phase, MergePhase::Idle);
            let from = phase.name();
            let next = match phase {
                MergePhase::Idle => break,
                MergePhase::AwaitingMerge { column, remaining } => {
                    match spend(&mut budget, remaining) {
                        Some(left) => {
                            self.phase = MergePhase::AwaitingMerge {
                                column,
                                remaining: left,
                            };
                            break;
                        }
                        None => self.begin_merge(column, &mut events),
                    }
                }
                MergePhase::Animating {
                    column,
                    step,
                    remaining,
                } => match spend(&mut budget, remaining) {
                    Some(left) => {
                        self.phase = MergePhase::Animating {
                            column,
                            step,
                            remaining: left,
                        };
                        break;
                    }
                    None => self.finish_merge(column, step, &mut events),
                },
                MergePhase::Settled { column } => self.settle_column(column, &mut events),
            };
            if from != next.name() {
                trace!("phase {from} -> {}", next.name());
            }
            self.phase = next;
        }

        events
    }

    fn begin_merge(&mut self, column: ColumnId, events: &mut Vec<EngineEvent>) -> MergePhase {
        let Some(cards) = self.state.column(column).map(|c| c.cards.clone()) else {
            return MergePhase::Settled { column };
        };

        let mut mint = CardMint::new(&mut self.ids, &self.config.luck, &mut self.rng);
        let step = SingleStepMerge.resolve(&cards, &mut mint);
        if !step.merged() {
            return MergePhase::Settled { column };
        }

        self.animating.extend(step.merged_card_ids.iter().copied());
        events.push(EngineEvent::MergeStarted {
            column,
            card_ids: step.merged_card_ids.clone(),
        });
        MergePhase::Animating {
            column,
            step,
            remaining: self.config.timing.merge_settle_delay(),
        }
    }

    fn finish_merge(
        &mut self,
        column: ColumnId,
        step: MergeOutcome,
        events: &mut Vec<EngineEvent>,
    ) -> MergePhase {
        let MergeOutcome {
            cards,
            score_gained,
            merged_card_ids,
            created,
        } = step;

        for id in &merged_card_ids {
            self.animating.remove(id);
        }
        if let Some(target) = self.state.column_mut(column) {
            target.cards = cards;
        }
        self.state.score += score_gained;

        if let Some(&card) = created.first() {
            debug!("merged into {card} on {column}, +{score_gained}");
            events.push(EngineEvent::Merged {
                column,
                card,
                score_gained,
            });
        }

        // The next pair is checked without a further delay.
        MergePhase::AwaitingMerge {
            column,
            remaining: Duration::ZERO,
        }
    }

    fn settle_column(&mut self, column: ColumnId, events: &mut Vec<EngineEvent>) -> MergePhase {
        trace!("{column} settled");
        let mut mint = CardMint::new(&mut self.ids, &self.config.luck, &mut self.rng);
        if let Some(injected) = unlock_higher_tier_cards(&mut self.state, &self.config.deck, &mut mint)
        {
            events.push(EngineEvent::TierUnlocked { injected });
        }
        self.refresh_status(events);
        MergePhase::Idle
    }

    fn refresh_status(&mut self, events: &mut Vec<EngineEvent>) {
        let status = check_game_over(&self.state, &self.config.board);
        self.status = status;

        if !status.is_game_over {
            self.fortune = None;
            return;
        }

        info!(
            "game over: {} (column {:?}), final score {}",
            status.reason.map_or_else(String::new, |r| r.to_string()),
            status.trigger_column.map(ColumnId::raw),
            self.state.score
        );
        self.fortune = Some(evaluate_fortune(
            &self.state.columns,
            &self.state.queue,
            &self.config.fortune,
            (self.clock)(),
        ));
        events.push(EngineEvent::GameOver(status));
    }

    fn set_phase(&mut self, phase: MergePhase) {
        if self.phase.name() != phase.name() {
            trace!("phase {} -> {}", self.phase.name(), phase.name());
        }
        self.phase = phase;
    }

    fn reject(&self, action: &Action, reason: RejectReason) -> Outcome {
        debug!("rejected {action}: {reason}");
        Outcome::Rejected(reason)
    }

    fn record(&mut self, action: Action) {
        let sequence = u32::try_from(self.log.len()).unwrap_or(u32::MAX);
        self.log.push(ActionRecord::new(action, sequence));
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed the current game was built from.
    #[must_use]
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Status as of the last settled evaluation.
    #[must_use]
    pub fn status(&self) -> GameOverStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over
    }

    /// Fortune report, present exactly while the game is over.
    #[must_use]
    pub fn fortune(&self) -> Option<&FortuneReport> {
        self.fortune.as_ref()
    }

    /// Check whether a merge is being shown.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.phase, MergePhase::Animating { .. })
    }

    /// Check whether a merge sequence is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Ids of cards currently mid-merge.
    #[must_use]
    pub fn animating_cards(&self) -> &FxHashSet<CardId> {
        &self.animating
    }

    #[must_use]
    pub fn phase(&self) -> &MergePhase {
        &self.phase
    }

    /// Accepted actions of the current game, in order.
    #[must_use]
    pub fn action_log(&self) -> &[ActionRecord] {
        &self.log
    }

    #[must_use]
    pub fn undo_history(&self) -> &UndoHistory {
        &self.history
    }

    // === Narrative ===

    /// Ask `service` for a reading of the fortune report.
    ///
    /// Never touches engine state, whatever the service does.
    pub fn narrate(&self, service: &dyn NarrativeService) -> Result<String, NarrativeError> {
        let report = self.fortune.as_ref().ok_or(NarrativeError::NoReport)?;
        let logs = self.log.iter().map(|record| record.action.to_string());
        let request = NarrativeRequest::new(report, self.state.score).with_logs(logs);
        service.summarize(&request)
    }
}

/// Take `wait` out of `budget`. `Some(left)` if the wait is not over yet.
fn spend(budget: &mut Option<Duration>, wait: Duration) -> Option<Duration> {
    match budget {
        None => None,
        Some(available) if *available >= wait => {
            *available -= wait;
            None
        }
        Some(available) => {
            let left = wait - *available;
            *available = Duration::ZERO;
            Some(left)
        }
    }
}
