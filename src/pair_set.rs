use std::collections::HashSet;

use rand::Rng;

use crate::error::GameError;
use crate::pair::WordPair;

/// Pairs shown at once, and the smallest list a session accepts
pub const BATCH_SIZE: usize = 5;
pub const MIN_PAIRS: usize = BATCH_SIZE;

/// The shuffled deck for a session and the cursor of the next unserved pair
#[derive(Debug, Default, Clone)]
pub struct PairSet {
    deck: Vec<WordPair>,
    cursor: usize,
}

impl PairSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, pairs: &[WordPair]) -> Result<(), GameError> {
        self.load_with_rng(pairs, &mut rand::thread_rng())
    }

    /// Validates `pairs`, then replaces the deck with a shuffled copy.
    /// On error the previous deck is kept.
    pub fn load_with_rng<R: Rng + ?Sized>(
        &mut self,
        pairs: &[WordPair],
        rng: &mut R,
    ) -> Result<(), GameError> {
        validate(pairs)?;

        let mut deck = pairs.to_vec();
        shuffle(&mut deck, rng);

        self.deck = deck;
        self.cursor = 0;
        Ok(())
    }

    /// Next `size` pairs from the cursor. The cursor always moves by `size`;
    /// an empty result means the deck is exhausted.
    pub fn next_batch(&mut self, size: usize) -> Vec<WordPair> {
        let start = self.cursor.min(self.deck.len());
        let end = (self.cursor + size).min(self.deck.len());
        self.cursor += size;
        self.deck[start..end].to_vec()
    }

    /// Pairs not yet served in any batch
    pub fn remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }
}

pub fn validate(pairs: &[WordPair]) -> Result<(), GameError> {
    if pairs.len() < MIN_PAIRS {
        return Err(GameError::InsufficientData {
            found: pairs.len(),
            required: MIN_PAIRS,
        });
    }

    let mut seen = HashSet::with_capacity(pairs.len());
    for pair in pairs {
        if !seen.insert(pair.id()) {
            return Err(GameError::DuplicatePair(pair.id()));
        }
    }
    Ok(())
}

/// Fisher-Yates, walking down from the last index
fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::PairId;
    use assert_matches::assert_matches;
    use rand::{rngs::StdRng, SeedableRng};

    fn pairs(n: u32) -> Vec<WordPair> {
        (0..n)
            .map(|i| WordPair::new(PairId(i), format!("s{i}"), format!("t{i}")).unwrap())
            .collect()
    }

    #[test]
    fn test_load_rejects_four_pairs() {
        let mut set = PairSet::new();
        assert_eq!(
            set.load(&pairs(4)),
            Err(GameError::InsufficientData {
                found: 4,
                required: 5
            })
        );
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let mut list = pairs(5);
        list.push(WordPair::new(PairId(2), "again", "wieder").unwrap());
        let mut set = PairSet::new();
        assert_matches!(set.load(&list), Err(GameError::DuplicatePair(PairId(2))));
    }

    #[test]
    fn test_failed_load_keeps_previous_deck() {
        let mut set = PairSet::new();
        set.load(&pairs(6)).unwrap();
        set.next_batch(5);

        assert!(set.load(&pairs(3)).is_err());
        assert_eq!(set.len(), 6);
        assert_eq!(set.remaining(), 1);
    }

    #[test]
    fn test_load_is_a_permutation() {
        let input = pairs(12);
        let mut set = PairSet::new();
        set.load_with_rng(&input, &mut StdRng::seed_from_u64(7))
            .unwrap();

        let mut ids: Vec<PairId> = set.next_batch(12).iter().map(|p| p.id()).collect();
        ids.sort();
        let expected: Vec<PairId> = input.iter().map(|p| p.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_same_seed_same_deck() {
        let input = pairs(10);
        let mut a = PairSet::new();
        let mut b = PairSet::new();
        a.load_with_rng(&input, &mut StdRng::seed_from_u64(42)).unwrap();
        b.load_with_rng(&input, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.next_batch(10), b.next_batch(10));
    }

    #[test]
    fn test_next_batch_short_then_empty() {
        let mut set = PairSet::new();
        set.load(&pairs(7)).unwrap();

        assert_eq!(set.next_batch(5).len(), 5);
        assert_eq!(set.remaining(), 2);

        assert_eq!(set.next_batch(5).len(), 2);
        assert_eq!(set.remaining(), 0);

        assert!(set.next_batch(5).is_empty());
        assert_eq!(set.remaining(), 0);
    }

    #[test]
    fn test_reload_resets_cursor() {
        let mut set = PairSet::new();
        set.load(&pairs(5)).unwrap();
        set.next_batch(5);
        assert_eq!(set.remaining(), 0);

        set.load(&pairs(5)).unwrap();
        assert_eq!(set.remaining(), 5);
    }
}
