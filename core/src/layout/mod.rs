use serde::{Deserialize, Serialize};

use crate::*;
pub use fit::*;

mod fit;

/// Source of the positions cards are laid out on, in the order cards are assigned to them.
pub trait SlotProvider {
    fn slots(&self, rows: Coord, columns: Coord) -> Result<Vec<Position>>;
}

/// Row-major cells of a `rows x columns` grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridSlots;

impl SlotProvider for GridSlots {
    fn slots(&self, rows: Coord, columns: Coord) -> Result<Vec<Position>> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidConfiguration(ConfigIssue::EmptyGrid));
        }
        Ok((0..rows)
            .flat_map(|row| (0..columns).map(move |column| Position::Cell { row, column }))
            .collect())
    }
}

/// Fixed anchor points placed by the host; a round uses the first `rows * columns` of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorSlots {
    anchors: Vec<Position>,
}

impl AnchorSlots {
    pub fn new(points: impl IntoIterator<Item = (f32, f32)>) -> Self {
        Self {
            anchors: points
                .into_iter()
                .map(|(x, y)| Position::Anchor { x, y })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

impl SlotProvider for AnchorSlots {
    fn slots(&self, rows: Coord, columns: Coord) -> Result<Vec<Position>> {
        let cards = mult(rows, columns) as usize;
        if cards == 0 {
            return Err(GameError::InvalidConfiguration(ConfigIssue::EmptyGrid));
        }
        if cards > self.anchors.len() {
            return Err(GameError::InvalidConfiguration(
                ConfigIssue::SlotCountMismatch {
                    slots: self.anchors.len(),
                    cards,
                },
            ));
        }
        Ok(self.anchors[..cards].to_vec())
    }
}
