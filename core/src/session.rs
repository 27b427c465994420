use hashbrown::HashMap;

use crate::*;

/// Key-value byte storage supplied by the host.
pub trait BlobStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()>;
    fn remove(&mut self, key: &str);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.blobs.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.blobs.remove(key);
    }
}

pub trait StorageKey {
    const KEY: &'static str;
}

pub struct SavedRound;

impl StorageKey for SavedRound {
    const KEY: &'static str = "pairmatch:round";
}

pub struct BestScore;

impl StorageKey for BestScore {
    const KEY: &'static str = "pairmatch:best-score";
}

/// A controller bound to the store that keeps its saved round and best score.
#[derive(Clone, Debug)]
pub struct Session<S, L = GridSlots> {
    controller: RoundController<L>,
    store: S,
    best_score: CardCount,
}

impl<S: BlobStore, L: SlotProvider> Session<S, L> {
    pub fn new(controller: RoundController<L>, store: S) -> Self {
        let best_score = store
            .get(BestScore::KEY)
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();
        Self {
            controller,
            store,
            best_score,
        }
    }

    /// Read-only; play goes through the session so best score and saves stay in step.
    pub fn controller(&self) -> &RoundController<L> {
        &self.controller
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn best_score(&self) -> CardCount {
        self.best_score
    }

    pub fn start_round(&mut self, rows: Coord, columns: Coord) -> Result<()> {
        self.controller.start_round(rows, columns)
    }

    pub fn select_card(&mut self, index: CardIndex) -> Result<SelectOutcome> {
        let outcome = self.controller.select_card(index)?;
        self.sync();
        Ok(outcome)
    }

    pub fn tick(&mut self, elapsed: Seconds) -> TickOutcome {
        let outcome = self.controller.tick(elapsed);
        if outcome.has_update() {
            self.sync();
        }
        outcome
    }

    pub fn resolve_comparison(&mut self) -> ComparisonOutcome {
        let outcome = self.controller.resolve_comparison();
        if outcome.has_update() {
            self.sync();
        }
        outcome
    }

    /// Stores the live round. Returns `false` when there is nothing to keep, in which case any
    /// older save is dropped.
    pub fn save(&mut self) -> Result<bool> {
        let phase = self.controller.phase();
        if phase.is_idle() || phase.is_ended() {
            self.store.remove(SavedRound::KEY);
            return Ok(false);
        }
        let bytes = self.controller.save()?;
        self.store.set(SavedRound::KEY, bytes)?;
        Ok(true)
    }

    /// Resumes the stored round, if there is one.
    pub fn load(&mut self) -> Result<bool> {
        let Some(bytes) = self.store.get(SavedRound::KEY) else {
            return Ok(false);
        };
        self.controller.load(&bytes)?;
        Ok(true)
    }

    pub fn has_saved_round(&self) -> bool {
        self.store.get(SavedRound::KEY).is_some()
    }

    pub fn discard_saved_round(&mut self) {
        self.store.remove(SavedRound::KEY);
    }

    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        self.controller.drain_events()
    }

    fn sync(&mut self) {
        let score = self.controller.score();
        if score > self.best_score {
            self.best_score = score;
            match serde_json::to_vec(&score) {
                Ok(bytes) => {
                    if let Err(err) = self.store.set(BestScore::KEY, bytes) {
                        log::error!("failed to store best score: {err}");
                    }
                }
                Err(err) => log::error!("failed to encode best score: {err}"),
            }
        }
        if self.controller.phase().is_ended() {
            self.store.remove(SavedRound::KEY);
        }
    }
}
