use serde::{Deserialize, Serialize};

use crate::PairKey;

/// One card on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: PairKey,
    pub face_key: String,
    pub resolved: bool,
    pub revealed: bool,
}

impl CardRecord {
    pub fn new(id: PairKey, face_key: impl Into<String>) -> Self {
        Self {
            id,
            face_key: face_key.into(),
            resolved: false,
            revealed: false,
        }
    }

    /// Whether the card may be picked by the player right now.
    pub const fn is_selectable(&self) -> bool {
        !self.resolved && !self.revealed
    }

    pub fn pairs_with(&self, other: &CardRecord) -> bool {
        self.id == other.id
    }
}
