use serde::{Deserialize, Serialize};

/// Single grid axis used for row and column counts.
pub type Coord = u16;

/// Count type used for cell, card and pair counts.
pub type CardCount = u32;

/// Identifier shared by the two cards of a pair.
pub type PairKey = u32;

/// Index of a card in board order.
pub type CardIndex = usize;

/// Seconds, as supplied by the host clock.
pub type Seconds = f32;

pub const fn mult(a: Coord, b: Coord) -> CardCount {
    let a = a as CardCount;
    let b = b as CardCount;
    a.saturating_mul(b)
}

/// Where a card is drawn: a cell of a computed grid or a fixed anchor point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Position {
    Cell { row: Coord, column: Coord },
    Anchor { x: f32, y: f32 },
}

impl Position {
    pub const fn cell(self) -> Option<(Coord, Coord)> {
        match self {
            Self::Cell { row, column } => Some((row, column)),
            Self::Anchor { .. } => None,
        }
    }
}

/// Round counter used to tell completions of a previous round from current ones.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Generation(pub u64);

impl Generation {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}
