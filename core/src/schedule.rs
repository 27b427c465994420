use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Delayed transition of a round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    /// Apply the outcome of the pending comparison.
    Settle,
    /// Turn a mismatched pair face down again.
    Rehide(CardIndex, CardIndex),
    /// Accept selections again after a comparison.
    ReleaseInput,
    /// Turn the whole board face down after the opening reveal.
    EndPreview,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Entry {
    generation: Generation,
    remaining: Seconds,
    completion: Completion,
}

/// Batch of completions that came due during one tick.
pub type DueCompletions = SmallVec<[Completion; 4]>;

/// Pending completions, each tagged with the round generation that scheduled it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn push(&mut self, generation: Generation, delay: Seconds, completion: Completion) {
        self.entries.push(Entry {
            generation,
            remaining: delay.max(0.),
            completion,
        });
    }

    /// Moves time forward and returns the completions of `current` that are now due, in the order
    /// they were scheduled. Entries from any other generation are dropped.
    pub fn advance(&mut self, elapsed: Seconds, current: Generation) -> DueCompletions {
        let mut due = DueCompletions::new();
        self.entries.retain_mut(|entry| {
            if entry.generation != current {
                log::trace!("dropping stale {:?} from {:?}", entry.completion, entry.generation);
                return false;
            }
            entry.remaining -= elapsed;
            if entry.remaining <= 0. {
                due.push(entry.completion);
                false
            } else {
                true
            }
        });
        due
    }

    /// Removes every pending completion matching `predicate`, returning how many were removed.
    pub fn cancel(&mut self, predicate: impl Fn(&Completion) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !predicate(&entry.completion));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, completion: Completion) -> bool {
        self.entries.iter().any(|entry| entry.completion == completion)
    }
}
