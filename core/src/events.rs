use serde::{Deserialize, Serialize};

use crate::*;

/// Notification queued by the round controller for the host to drain.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundEvent {
    RoundStarted { rows: Coord, columns: Coord },
    RoundRestored { rows: Coord, columns: Coord },
    PreviewEnded,
    CardRevealed(CardIndex),
    CardsMatched(CardIndex, CardIndex),
    CardsMismatched(CardIndex, CardIndex),
    CardsHidden(CardIndex, CardIndex),
    ScoreChanged(CardCount),
    /// Remaining share of the round's time budget, in `0.0..=1.0`.
    TimerChanged(f32),
    RoundEnded { won: bool },
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    Ignored,
    FirstRevealed,
    ComparisonPending,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Ignored => false,
            FirstRevealed => true,
            ComparisonPending => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ComparisonOutcome {
    NoChange,
    Matched,
    Mismatched,
    Won,
}

impl ComparisonOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Running,
    Resolved(ComparisonOutcome),
    TimedOut,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn has_ended(self) -> bool {
        matches!(self, Self::TimedOut | Self::Resolved(ComparisonOutcome::Won))
    }
}
