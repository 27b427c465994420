use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player may see of one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Shown(String),
    Resolved(String),
}

impl CardFace {
    pub fn face_key(&self) -> Option<&str> {
        match self {
            Self::Hidden => None,
            Self::Shown(key) | Self::Resolved(key) => Some(key),
        }
    }
}

impl From<&CardRecord> for CardFace {
    fn from(card: &CardRecord) -> Self {
        if card.resolved {
            Self::Resolved(card.face_key.clone())
        } else if card.revealed {
            Self::Shown(card.face_key.clone())
        } else {
            Self::Hidden
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub position: Option<Position>,
    pub face: CardFace,
}

/// Read-only projection of a round for drawing. Face keys of hidden cards are withheld.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub rows: Coord,
    pub columns: Coord,
    pub phase: RoundPhase,
    pub score: CardCount,
    pub timer_fraction: f32,
    pub input_locked: bool,
    pub cards: Vec<CardView>,
    pub cells: Array2<Option<CardIndex>>,
}

impl RoundView {
    pub fn from_controller<L: SlotProvider>(controller: &RoundController<L>) -> Self {
        let state = controller.state();
        let board = controller.board();
        let cards = board
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| CardView {
                position: board.position(index),
                face: card.into(),
            })
            .collect();

        Self {
            rows: state.rows,
            columns: state.columns,
            phase: state.phase,
            score: state.score,
            timer_fraction: state.timer_fraction(),
            input_locked: controller.is_input_locked(),
            cards,
            cells: board.cell_map(state.rows, state.columns),
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.cards
            .iter()
            .filter(|card| card.face == CardFace::Hidden)
            .count()
    }
}
