use rand::prelude::*;

use crate::*;

/// Drives one round at a time: dealing, the two-card selection cycle, the countdown and the end
/// of the round.
///
/// The host owns the controller and calls it from a single logical thread. Per frame it calls
/// [`tick`](Self::tick) exactly once before forwarding any player input, then drains
/// [`drain_events`](Self::drain_events).
#[derive(Clone, Debug)]
pub struct RoundController<L = GridSlots> {
    rules: RoundRules,
    catalog: FaceCatalog,
    slots: L,
    rng: SmallRng,
    generation: Generation,
    pub(crate) state: RoundState,
    pub(crate) board: Board,
    selection: Selection,
    schedule: Schedule,
    input_locked: bool,
    pub(crate) events: Vec<RoundEvent>,
}

impl RoundController<GridSlots> {
    /// Controller laying cards out on a grid, with deals drawn from OS entropy.
    pub fn new(rules: RoundRules, catalog: FaceCatalog) -> Result<Self> {
        Self::with_slots(rules, catalog, GridSlots, rand::random())
    }

    /// Controller laying cards out on a grid, with reproducible deals.
    pub fn with_seed(rules: RoundRules, catalog: FaceCatalog, seed: u64) -> Result<Self> {
        Self::with_slots(rules, catalog, GridSlots, seed)
    }
}

impl<L: SlotProvider> RoundController<L> {
    pub fn with_slots(rules: RoundRules, catalog: FaceCatalog, slots: L, seed: u64) -> Result<Self> {
        Ok(Self {
            rules: rules.validate()?,
            catalog,
            slots,
            rng: SmallRng::seed_from_u64(seed),
            generation: Generation::default(),
            state: RoundState::default(),
            board: Board::default(),
            selection: Selection::default(),
            schedule: Schedule::default(),
            input_locked: false,
            events: Vec::new(),
        })
    }

    pub fn rules(&self) -> &RoundRules {
        &self.rules
    }

    pub fn catalog(&self) -> &FaceCatalog {
        &self.catalog
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn score(&self) -> CardCount {
        self.state.score
    }

    pub fn time_remaining(&self) -> Seconds {
        self.state.time_remaining
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    /// Notifications queued since the last drain, oldest first.
    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        core::mem::take(&mut self.events)
    }

    /// Deals a fresh shuffled board and starts the countdown. On error the controller is left
    /// exactly as it was.
    pub fn start_round(&mut self, rows: Coord, columns: Coord) -> Result<()> {
        let pair_count = pair_count_for(rows, columns)?;
        check_pair_count(pair_count, self.catalog.len())?;

        let slots = self.slots.slots(rows, columns)?;
        let seed = self.rng.random::<u64>();
        let cards = ShuffledDeck::new(seed).build(pair_count, self.catalog.keys())?;
        let board = Board::assign_layout(cards, slots)?;

        let duration = self.rules.game_duration(pair_count);
        self.begin(board, RoundState::new(rows, columns, duration));
        log::debug!(
            "round {:?} started: {rows}x{columns}, {pair_count} pairs, {duration}s",
            self.generation
        );

        self.events.push(RoundEvent::RoundStarted { rows, columns });
        if self.rules.preview > 0. {
            self.board.reveal_all();
            self.input_locked = true;
            self.schedule
                .push(self.generation, self.rules.preview, Completion::EndPreview);
        }
        self.emit_score();
        self.emit_timer();
        Ok(())
    }

    /// Advances the countdown and runs whatever delayed transitions came due. The timer is
    /// checked first, so a timeout wins over a comparison settling in the same tick.
    pub fn tick(&mut self, elapsed: Seconds) -> TickOutcome {
        if !self.state.phase.is_live() {
            return TickOutcome::NoChange;
        }
        if !elapsed.is_finite() || elapsed < 0. {
            log::warn!("ignoring tick of {elapsed}s");
            return TickOutcome::NoChange;
        }

        self.state.time_remaining -= elapsed;
        if self.state.time_remaining <= 0. {
            self.state.time_remaining = 0.;
            self.emit_timer();
            self.end_round(false);
            return TickOutcome::TimedOut;
        }
        self.emit_timer();

        let mut outcome = TickOutcome::Running;
        for completion in self.schedule.advance(elapsed, self.generation) {
            if let Some(resolved) = self.complete(completion) {
                outcome = TickOutcome::Resolved(resolved);
            }
            if self.state.phase.is_ended() {
                break;
            }
        }
        outcome
    }

    /// Turns a card face up. Input that cannot apply right now is ignored rather than rejected;
    /// only an index off the board is an error.
    pub fn select_card(&mut self, index: CardIndex) -> Result<SelectOutcome> {
        if !matches!(self.state.phase, RoundPhase::Playing) {
            log::trace!("card {index} ignored in {:?}", self.state.phase);
            return Ok(SelectOutcome::Ignored);
        }
        let index = self.board.validate_index(index)?;
        if self.input_locked || !self.board[index].is_selectable() {
            log::trace!("card {index} ignored");
            return Ok(SelectOutcome::Ignored);
        }

        self.board[index].revealed = true;
        self.events.push(RoundEvent::CardRevealed(index));

        if self.selection.first.is_none() {
            self.selection.first = Some(index);
            return Ok(SelectOutcome::FirstRevealed);
        }

        self.selection.second = Some(index);
        self.state.phase = RoundPhase::Resolving;
        self.schedule
            .push(self.generation, self.rules.settle_delay, Completion::Settle);
        Ok(SelectOutcome::ComparisonPending)
    }

    /// Applies the outcome of the pending comparison. Normally reached through [`tick`](Self::tick)
    /// once the settle delay has passed; calling it directly settles immediately.
    pub fn resolve_comparison(&mut self) -> ComparisonOutcome {
        if !matches!(self.state.phase, RoundPhase::Resolving) {
            return ComparisonOutcome::NoChange;
        }
        let Some((first, second)) = self.selection.pair() else {
            log::warn!("resolving without two selected cards");
            return ComparisonOutcome::NoChange;
        };
        self.schedule.cancel(|completion| *completion == Completion::Settle);

        let outcome = if self.board[first].pairs_with(&self.board[second]) {
            self.board[first].resolved = true;
            self.board[second].resolved = true;
            self.state.score += 1;
            self.events.push(RoundEvent::CardsMatched(first, second));
            self.emit_score();
            ComparisonOutcome::Matched
        } else {
            self.events.push(RoundEvent::CardsMismatched(first, second));
            self.after(self.rules.flip_back_delay, Completion::Rehide(first, second));
            ComparisonOutcome::Mismatched
        };
        log::debug!("cards {first} and {second}: {outcome:?}");

        self.selection.clear();
        self.state.phase = RoundPhase::Playing;
        if self.rules.input_lock > 0. {
            self.input_locked = true;
            self.schedule
                .push(self.generation, self.rules.input_lock, Completion::ReleaseInput);
        }

        if outcome == ComparisonOutcome::Matched && self.board.is_complete() {
            self.end_round(true);
            return ComparisonOutcome::Won;
        }
        outcome
    }

    /// Replaces board and state wholesale and voids everything the previous round scheduled.
    pub(crate) fn begin(&mut self, board: Board, state: RoundState) {
        self.generation = self.generation.next();
        self.schedule.clear();
        self.events.clear();
        self.selection.clear();
        self.input_locked = false;
        self.board = board;
        self.state = state;
    }

    pub(crate) fn slot_provider(&self) -> &L {
        &self.slots
    }

    pub(crate) fn emit_score(&mut self) {
        self.events.push(RoundEvent::ScoreChanged(self.state.score));
    }

    pub(crate) fn emit_timer(&mut self) {
        self.events
            .push(RoundEvent::TimerChanged(self.state.timer_fraction()));
    }

    fn after(&mut self, delay: Seconds, completion: Completion) {
        if delay > 0. {
            self.schedule.push(self.generation, delay, completion);
        } else {
            self.complete(completion);
        }
    }

    fn complete(&mut self, completion: Completion) -> Option<ComparisonOutcome> {
        match completion {
            Completion::Settle => return Some(self.resolve_comparison()),
            Completion::Rehide(first, second) => {
                for index in [first, second] {
                    if !self.board[index].resolved {
                        self.board[index].revealed = false;
                    }
                }
                self.events.push(RoundEvent::CardsHidden(first, second));
            }
            Completion::ReleaseInput => self.input_locked = false,
            Completion::EndPreview => {
                self.board.hide_unresolved();
                self.input_locked = false;
                self.events.push(RoundEvent::PreviewEnded);
            }
        }
        None
    }

    fn end_round(&mut self, won: bool) {
        if self.state.phase.is_ended() {
            return;
        }
        self.state.phase = RoundPhase::Ended { won };
        self.schedule.clear();
        self.selection.clear();
        self.input_locked = false;
        self.events.push(RoundEvent::RoundEnded { won });
        log::debug!("round {:?} ended, won: {won}", self.generation);
    }
}
