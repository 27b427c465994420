use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use config::*;
pub use deck::*;
pub use error::*;
pub use events::*;
pub use layout::*;
pub use pairmatch_protocol::{CardSaveData, SaveData};
pub use round::*;
pub use schedule::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod card;
mod config;
mod deck;
mod error;
mod events;
mod layout;
mod persist;
mod round;
mod schedule;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    Idle,
    Playing,
    Resolving,
    Ended { won: bool },
}

impl RoundPhase {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether the timer runs.
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Playing | Self::Resolving)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended { .. })
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Ended { won: true })
    }
}

impl Default for RoundPhase {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub rows: Coord,
    pub columns: Coord,
    pub score: CardCount,
    pub time_remaining: Seconds,
    pub game_duration: Seconds,
    pub phase: RoundPhase,
}

impl RoundState {
    pub(crate) fn new(rows: Coord, columns: Coord, game_duration: Seconds) -> Self {
        Self {
            rows,
            columns,
            score: 0,
            time_remaining: game_duration,
            game_duration,
            phase: RoundPhase::Playing,
        }
    }

    pub const fn pair_count(&self) -> CardCount {
        mult(self.rows, self.columns) / 2
    }

    pub const fn pairs_remaining(&self) -> CardCount {
        self.pair_count().saturating_sub(self.score)
    }

    pub fn timer_fraction(&self) -> f32 {
        if self.game_duration > 0. {
            (self.time_remaining / self.game_duration).clamp(0., 1.)
        } else {
            0.
        }
    }
}

/// Cards picked in the current comparison cycle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub first: Option<CardIndex>,
    pub second: Option<CardIndex>,
}

impl Selection {
    pub const fn pair(&self) -> Option<(CardIndex, CardIndex)> {
        match (self.first, self.second) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.first.is_none() && self.second.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Pairs on a `rows x columns` board, or why that board cannot be built.
pub fn pair_count_for(rows: Coord, columns: Coord) -> Result<CardCount> {
    if rows == 0 || columns == 0 {
        return Err(GameError::InvalidConfiguration(ConfigIssue::EmptyGrid));
    }
    let cells = mult(rows, columns);
    if cells % 2 != 0 {
        return Err(GameError::InvalidConfiguration(ConfigIssue::OddCellCount(cells)));
    }
    Ok(cells / 2)
}
