use crate::error::GameError;
use crate::pair::{PairId, Side, WordPair};

/// Result of recording one pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Only one side has a pick so far
    Pending,
    Matched(WordPair),
    /// Both picks stay pending until `acknowledge_mismatch`
    Mismatched { source: PairId, target: PairId },
}

/// Evaluates source/target picks against the live batch
#[derive(Debug, Default, Clone)]
pub struct MatchEngine {
    batch: Vec<WordPair>,
    matched: Vec<WordPair>,
    source_pick: Option<PairId>,
    target_pick: Option<PairId>,
}

impl MatchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swaps in a new batch. Matched pairs from earlier batches are kept.
    pub fn set_batch(&mut self, pairs: Vec<WordPair>) {
        self.batch = pairs;
        self.clear_picks();
    }

    /// Empties batch, picks and matched pairs for a new session
    pub fn reset(&mut self) {
        self.batch.clear();
        self.matched.clear();
        self.clear_picks();
    }

    pub fn select(&mut self, side: Side, id: PairId) -> Result<SelectionEvent, GameError> {
        if !self.batch.iter().any(|p| p.id() == id) {
            return Err(GameError::UnknownPair(id));
        }

        match side {
            Side::Source => self.source_pick = Some(id),
            Side::Target => self.target_pick = Some(id),
        }

        let (Some(source), Some(target)) = (self.source_pick, self.target_pick) else {
            return Ok(SelectionEvent::Pending);
        };

        if source != target {
            return Ok(SelectionEvent::Mismatched { source, target });
        }

        // present: checked against the batch above
        let idx = self
            .batch
            .iter()
            .position(|p| p.id() == source)
            .ok_or(GameError::UnknownPair(source))?;
        let pair = self.batch.remove(idx);
        self.matched.push(pair.clone());
        self.clear_picks();

        Ok(SelectionEvent::Matched(pair))
    }

    /// Clears both picks. Returns whether anything was pending.
    pub fn acknowledge_mismatch(&mut self) -> bool {
        let had_picks = self.source_pick.is_some() || self.target_pick.is_some();
        self.clear_picks();
        had_picks
    }

    pub fn selection(&self, side: Side) -> Option<PairId> {
        match side {
            Side::Source => self.source_pick,
            Side::Target => self.target_pick,
        }
    }

    /// Unmatched pairs of the current batch
    pub fn batch(&self) -> &[WordPair] {
        &self.batch
    }

    pub fn matched(&self) -> &[WordPair] {
        &self.matched
    }

    fn clear_picks(&mut self) {
        self.source_pick = None;
        self.target_pick = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn batch() -> Vec<WordPair> {
        [("cat", "猫"), ("dog", "狗"), ("sun", "太阳")]
            .iter()
            .enumerate()
            .map(|(i, (s, t))| WordPair::new(PairId(i as u32), *s, *t).unwrap())
            .collect()
    }

    fn engine() -> MatchEngine {
        let mut engine = MatchEngine::new();
        engine.set_batch(batch());
        engine
    }

    #[test]
    fn test_single_pick_is_pending() {
        let mut engine = engine();
        assert_eq!(
            engine.select(Side::Target, PairId(1)),
            Ok(SelectionEvent::Pending)
        );
        assert_eq!(engine.selection(Side::Target), Some(PairId(1)));
        assert_eq!(engine.selection(Side::Source), None);
    }

    #[test]
    fn test_match_moves_pair_out_of_batch() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(0)).unwrap();
        let event = engine.select(Side::Target, PairId(0)).unwrap();

        assert_matches!(event, SelectionEvent::Matched(ref p) if p.source() == "cat");
        assert_eq!(engine.batch().len(), 2);
        assert!(engine.batch().iter().all(|p| p.id() != PairId(0)));
        assert_eq!(engine.matched().len(), 1);
        assert_eq!(engine.selection(Side::Source), None);
        assert_eq!(engine.selection(Side::Target), None);
    }

    #[test]
    fn test_mismatch_keeps_picks_until_acknowledged() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(1)).unwrap();
        assert_eq!(
            engine.select(Side::Target, PairId(2)),
            Ok(SelectionEvent::Mismatched {
                source: PairId(1),
                target: PairId(2)
            })
        );
        assert_eq!(engine.selection(Side::Source), Some(PairId(1)));
        assert_eq!(engine.selection(Side::Target), Some(PairId(2)));

        assert!(engine.acknowledge_mismatch());
        assert_eq!(engine.selection(Side::Source), None);
        assert_eq!(engine.selection(Side::Target), None);
        assert_eq!(engine.batch().len(), 3);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(1)).unwrap();
        engine.select(Side::Target, PairId(2)).unwrap();

        assert!(engine.acknowledge_mismatch());
        assert!(!engine.acknowledge_mismatch());
        assert_eq!(engine.selection(Side::Source), None);
        assert_eq!(engine.batch().len(), 3);
    }

    #[test]
    fn test_new_pick_replaces_same_side() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(1)).unwrap();
        engine.select(Side::Source, PairId(2)).unwrap();
        assert_eq!(engine.selection(Side::Source), Some(PairId(2)));

        let event = engine.select(Side::Target, PairId(2)).unwrap();
        assert_matches!(event, SelectionEvent::Matched(_));
    }

    #[test]
    fn test_unknown_pair_leaves_state_alone() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(0)).unwrap();

        assert_eq!(
            engine.select(Side::Target, PairId(9)),
            Err(GameError::UnknownPair(PairId(9)))
        );
        assert_eq!(engine.selection(Side::Source), Some(PairId(0)));
        assert_eq!(engine.selection(Side::Target), None);
    }

    #[test]
    fn test_matched_pair_becomes_unknown() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(0)).unwrap();
        engine.select(Side::Target, PairId(0)).unwrap();

        assert_matches!(
            engine.select(Side::Source, PairId(0)),
            Err(GameError::UnknownPair(_))
        );
    }

    #[test]
    fn test_duplicate_terms_match_by_id() {
        let mut engine = MatchEngine::new();
        engine.set_batch(vec![
            WordPair::new(PairId(0), "bank", "Bank").unwrap(),
            WordPair::new(PairId(1), "bank", "Ufer").unwrap(),
        ]);

        engine.select(Side::Source, PairId(0)).unwrap();
        assert_matches!(
            engine.select(Side::Target, PairId(1)),
            Ok(SelectionEvent::Mismatched { .. })
        );
    }

    #[test]
    fn test_set_batch_clears_picks() {
        let mut engine = engine();
        engine.select(Side::Source, PairId(0)).unwrap();
        engine.set_batch(batch());
        assert_eq!(engine.selection(Side::Source), None);
    }
}
