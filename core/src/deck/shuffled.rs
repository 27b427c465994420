use super::*;

/// Deck builder that shuffles the paired cards with a seeded generator, so a seed always yields the
/// same deck.
#[derive(Clone, Debug, PartialEq)]
pub struct ShuffledDeck {
    seed: u64,
}

impl ShuffledDeck {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckBuilder for ShuffledDeck {
    fn build(self, pair_count: CardCount, face_keys: &[String]) -> Result<Vec<CardRecord>> {
        use rand::prelude::*;

        check_pair_count(pair_count, face_keys.len())?;

        let mut cards = paired_cards(pair_count, face_keys);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        fisher_yates(&mut cards, &mut rng);

        log::debug!(
            "built deck of {} cards from seed {:#x}",
            cards.len(),
            self.seed
        );
        Ok(cards)
    }
}

/// Walks from the last index down, swapping each slot with a uniformly drawn one at or below it.
pub fn fisher_yates<T>(items: &mut [T], rng: &mut impl rand::Rng) {
    for i in (0..items.len()).rev() {
        let k = rng.random_range(0..=i);
        items.swap(i, k);
    }
}
