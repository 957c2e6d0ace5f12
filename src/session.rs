use rand::Rng;
use tracing::{debug, info, warn};

use crate::clock::{SessionClock, DEFAULT_DURATION_SECS};
use crate::engine::{MatchEngine, SelectionEvent};
use crate::error::GameError;
use crate::pair::{PairId, Side, WordPair};
use crate::pair_set::{self, PairSet, BATCH_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub duration_secs: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    pub attempts: u32,
    pub correct: u32,
}

impl SessionStats {
    /// Rounded percentage of attempts that matched, 0 before any attempt
    pub fn accuracy(&self) -> u32 {
        if self.attempts == 0 {
            return 0;
        }
        ((self.correct as f64 / self.attempts as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum EndReason {
    #[strum(serialize = "all pairs matched")]
    AllMatched,
    #[strum(serialize = "time expired")]
    TimeExpired,
}

/// What the learner sees once a session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub reason: EndReason,
    pub accuracy: u32,
    pub attempts: u32,
    pub correct: u32,
    pub matched: usize,
    pub total: usize,
}

impl SessionReport {
    pub fn message(&self) -> String {
        self.reason.to_string()
    }
}

/// Events handed back to the renderer, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    BatchSet(Vec<WordPair>),
    Matched(WordPair),
    Mismatched { source: PairId, target: PairId },
    MismatchCleared,
    Ended(SessionReport),
}

/// Owns every piece of mutable session state: deck cursor, live batch and
/// picks, stats and the clock. All operations run to completion before the
/// next one is accepted.
#[derive(Debug, Default)]
pub struct SessionController {
    config: SessionConfig,
    state: SessionState,
    pairs: PairSet,
    engine: MatchEngine,
    clock: SessionClock,
    stats: SessionStats,
    report: Option<SessionReport>,
}

impl SessionController {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn start(&mut self, pairs: &[WordPair]) -> Result<Vec<SessionEvent>, GameError> {
        self.start_with_rng(pairs, &mut rand::thread_rng())
    }

    /// Starts (or restarts) a session. Validation happens before anything is
    /// touched, so a refused start leaves the current session as it was.
    pub fn start_with_rng<R: Rng + ?Sized>(
        &mut self,
        pairs: &[WordPair],
        rng: &mut R,
    ) -> Result<Vec<SessionEvent>, GameError> {
        if let Err(e) = pair_set::validate(pairs) {
            warn!(error = %e, "refusing to start session");
            return Err(e);
        }

        self.clock.stop();
        self.pairs.load_with_rng(pairs, rng)?;
        self.engine.reset();
        self.stats = SessionStats::default();
        self.report = None;

        let batch = self.pairs.next_batch(BATCH_SIZE);
        self.engine.set_batch(batch.clone());
        self.clock.start(self.config.duration_secs);
        self.state = SessionState::Running;

        info!(
            pairs = self.pairs.len(),
            duration_secs = self.config.duration_secs,
            "session started"
        );
        Ok(vec![SessionEvent::BatchSet(batch)])
    }

    pub fn select(&mut self, side: Side, id: PairId) -> Result<Vec<SessionEvent>, GameError> {
        if self.state != SessionState::Running {
            return Err(GameError::NotRunning);
        }

        let event = self.engine.select(side, id).inspect_err(|e| {
            warn!(error = %e, %side, "ignoring pick");
        })?;
        debug!(%side, %id, ?event, "pick");

        let mut events = vec![];
        match event {
            SelectionEvent::Pending => {}
            SelectionEvent::Mismatched { source, target } => {
                self.stats.attempts += 1;
                events.push(SessionEvent::Mismatched { source, target });
            }
            SelectionEvent::Matched(pair) => {
                self.stats.attempts += 1;
                self.stats.correct += 1;
                events.push(SessionEvent::Matched(pair));
                self.after_match(&mut events);
            }
        }
        Ok(events)
    }

    fn after_match(&mut self, events: &mut Vec<SessionEvent>) {
        let matched = self.matched_count();
        let total = self.pairs.len();

        if matched % BATCH_SIZE == 0 {
            let next = self.pairs.next_batch(BATCH_SIZE);
            if next.is_empty() || matched == total {
                events.push(self.end(EndReason::AllMatched));
            } else {
                self.engine.set_batch(next.clone());
                events.push(SessionEvent::BatchSet(next));
            }
        }

        if self.state == SessionState::Running && matched == total {
            events.push(self.end(EndReason::AllMatched));
        }
    }

    /// One elapsed second. Ignored unless a session is running.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        if self.state != SessionState::Running {
            return vec![];
        }

        if self.clock.tick().expired {
            vec![self.end(EndReason::TimeExpired)]
        } else {
            vec![]
        }
    }

    pub fn acknowledge_mismatch(&mut self) -> Vec<SessionEvent> {
        if self.engine.acknowledge_mismatch() {
            vec![SessionEvent::MismatchCleared]
        } else {
            vec![]
        }
    }

    fn end(&mut self, reason: EndReason) -> SessionEvent {
        self.clock.stop();
        self.state = SessionState::Ended;

        let report = SessionReport {
            reason,
            accuracy: self.stats.accuracy(),
            attempts: self.stats.attempts,
            correct: self.stats.correct,
            matched: self.matched_count(),
            total: self.pairs.len(),
        };
        self.report = Some(report);

        info!(
            reason = %reason,
            accuracy = report.accuracy,
            attempts = report.attempts,
            correct = report.correct,
            "session ended"
        );
        SessionEvent::Ended(report)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn remaining_secs(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn batch(&self) -> &[WordPair] {
        self.engine.batch()
    }

    pub fn selection(&self, side: Side) -> Option<PairId> {
        self.engine.selection(side)
    }

    pub fn matched_count(&self) -> usize {
        self.engine.matched().len()
    }

    pub fn deck_size(&self) -> usize {
        self.pairs.len()
    }

    pub fn report(&self) -> Option<SessionReport> {
        self.report
    }
}
