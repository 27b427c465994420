use crate::*;
pub use catalog::*;
pub use shuffled::*;

mod catalog;
mod shuffled;

pub trait DeckBuilder {
    /// Emits two cards per pair, `id` in `0..pair_count`, faces taken from `face_keys` in order.
    fn build(self, pair_count: CardCount, face_keys: &[String]) -> Result<Vec<CardRecord>>;
}

pub(crate) fn check_pair_count(pair_count: CardCount, available: usize) -> Result<()> {
    if pair_count == 0 {
        return Err(GameError::InvalidConfiguration(ConfigIssue::NoPairs));
    }
    if pair_count as usize > available {
        return Err(GameError::InvalidConfiguration(
            ConfigIssue::NotEnoughFaces {
                requested: pair_count,
                available,
            },
        ));
    }
    Ok(())
}

/// Cards in pair order, unshuffled.
pub(crate) fn paired_cards(pair_count: CardCount, face_keys: &[String]) -> Vec<CardRecord> {
    face_keys
        .iter()
        .take(pair_count as usize)
        .zip(0..)
        .flat_map(|(face_key, id)| {
            [
                CardRecord::new(id, face_key.clone()),
                CardRecord::new(id, face_key.clone()),
            ]
        })
        .collect()
}
