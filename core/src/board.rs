use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Live cards of one round together with the slot each one is drawn at.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<CardRecord>,
    positions: Vec<Position>,
}

impl Board {
    /// Gives `slots[i]` to `cards[i]`. Slots must be distinct and exactly as many as cards.
    pub fn assign_layout(cards: Vec<CardRecord>, slots: Vec<Position>) -> Result<Self> {
        if slots.len() != cards.len() {
            return Err(GameError::InvalidConfiguration(
                ConfigIssue::SlotCountMismatch {
                    slots: slots.len(),
                    cards: cards.len(),
                },
            ));
        }
        for (i, slot) in slots.iter().enumerate() {
            if slots[..i].contains(slot) {
                return Err(GameError::InvalidConfiguration(ConfigIssue::DuplicateSlot(i)));
            }
        }
        Ok(Self {
            cards,
            positions: slots,
        })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardRecord] {
        &self.cards
    }

    pub fn get(&self, index: CardIndex) -> Option<&CardRecord> {
        self.cards.get(index)
    }

    pub fn position(&self, index: CardIndex) -> Option<Position> {
        self.positions.get(index).copied()
    }

    pub fn validate_index(&self, index: CardIndex) -> Result<CardIndex> {
        if index < self.cards.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidCard)
        }
    }

    /// True once every card is resolved; an empty board is never complete.
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|card| card.resolved)
    }

    pub fn resolved_count(&self) -> usize {
        self.cards.iter().filter(|card| card.resolved).count()
    }

    pub fn find_by_face_key(&self, key: &str) -> Option<&CardRecord> {
        self.cards.iter().find(|card| card.face_key == key)
    }

    /// Card index drawn at each grid cell; anchor positions and cells outside the grid are skipped.
    pub fn cell_map(&self, rows: Coord, columns: Coord) -> Array2<Option<CardIndex>> {
        let mut map = Array2::from_elem([rows as usize, columns as usize], None);
        for (index, position) in self.positions.iter().enumerate() {
            if let Some((row, column)) = position.cell() {
                if row < rows && column < columns {
                    map[[row as usize, column as usize]] = Some(index);
                }
            }
        }
        map
    }

    pub(crate) fn hide_unresolved(&mut self) {
        for card in self.cards.iter_mut().filter(|card| !card.resolved) {
            card.revealed = false;
        }
    }

    pub(crate) fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.revealed = true;
        }
    }
}

impl Index<CardIndex> for Board {
    type Output = CardRecord;

    fn index(&self, index: CardIndex) -> &Self::Output {
        &self.cards[index]
    }
}

impl IndexMut<CardIndex> for Board {
    fn index_mut(&mut self, index: CardIndex) -> &mut Self::Output {
        &mut self.cards[index]
    }
}
