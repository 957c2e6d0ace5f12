use std::collections::HashSet;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::config::Config;
use crate::error::GameError;
use crate::pair::{PairId, Side, WordPair};
use crate::runtime::TICK_RATE_MS;
use crate::session::{SessionController, SessionEvent, SessionReport};

const TICKS_PER_SECOND: u32 = (1000 / TICK_RATE_MS) as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// The loaded list is too short to play
    Waiting,
    Playing,
    Results,
}

/// A pair highlighted as wrong, counting down to release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub source: PairId,
    pub target: PairId,
    pub ticks_left: u32,
}

/// One batch as laid out on screen. Rows keep their place after a match so
/// the columns don't jump around; matched rows are just no longer selectable.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub sources: Vec<WordPair>,
    pub targets: Vec<WordPair>,
    pub matched: HashSet<PairId>,
}

impl Board {
    /// Target column order is shuffled for display only
    pub fn new(batch: Vec<WordPair>) -> Self {
        let mut targets = batch.clone();
        targets.shuffle(&mut rand::thread_rng());
        Self {
            sources: batch,
            targets,
            matched: HashSet::new(),
        }
    }

    pub fn column(&self, side: Side) -> &[WordPair] {
        match side {
            Side::Source => &self.sources,
            Side::Target => &self.targets,
        }
    }

    pub fn rows(&self) -> usize {
        self.sources.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub side: Side,
    pub row: usize,
}

impl Default for Focus {
    fn default() -> Self {
        Self {
            side: Side::Source,
            row: 0,
        }
    }
}

/// Front-end state around a `SessionController`: what is on screen, where
/// the cursor is, and the timing the engine deliberately leaves out.
#[derive(Debug)]
pub struct App {
    pub session: SessionController,
    pub pairs: Vec<WordPair>,
    pub state: AppState,
    pub board: Board,
    pub focus: Focus,
    pub feedback: Option<Feedback>,
    pub message: Option<String>,
    feedback_ticks: u32,
    subsecond_ticks: u32,
}

impl App {
    pub fn new(pairs: Vec<WordPair>, config: &Config) -> Self {
        let feedback_ticks = u32::try_from((config.feedback_ms / TICK_RATE_MS).max(1))
            .unwrap_or(u32::MAX);
        let mut app = Self {
            session: SessionController::new(config.into()),
            pairs,
            state: AppState::Waiting,
            board: Board::default(),
            focus: Focus::default(),
            feedback: None,
            message: None,
            feedback_ticks,
            subsecond_ticks: 0,
        };
        app.restart();
        app
    }

    /// Starts a fresh session over the loaded list
    pub fn restart(&mut self) {
        self.feedback = None;
        self.subsecond_ticks = 0;
        self.focus = Focus::default();
        self.message = None;

        match self.session.start(&self.pairs) {
            Ok(events) => {
                self.state = AppState::Playing;
                self.apply(events);
            }
            Err(e) => {
                self.state = AppState::Waiting;
                self.message = Some(e.to_string());
            }
        }
    }

    /// Called once per runtime tick
    pub fn on_tick(&mut self) {
        if self.state != AppState::Playing {
            return;
        }

        if let Some(fb) = self.feedback.as_mut() {
            fb.ticks_left = fb.ticks_left.saturating_sub(1);
            if fb.ticks_left == 0 {
                let events = self.session.acknowledge_mismatch();
                self.apply(events);
            }
        }

        self.subsecond_ticks += 1;
        if self.subsecond_ticks >= TICKS_PER_SECOND {
            self.subsecond_ticks = 0;
            let events = self.session.tick();
            self.apply(events);
        }
    }

    /// Picks the focused item. Ignored while a mismatch is still on screen.
    pub fn select_focused(&mut self) {
        if self.state != AppState::Playing || self.feedback.is_some() {
            return;
        }
        let Some(id) = self
            .board
            .column(self.focus.side)
            .get(self.focus.row)
            .map(|p| p.id())
        else {
            return;
        };
        if self.board.matched.contains(&id) {
            return;
        }

        match self.session.select(self.focus.side, id) {
            Ok(events) => {
                // a lone pick hands focus to the other column
                self.focus.side = if events.is_empty() {
                    self.focus.side.other()
                } else {
                    Side::Source
                };
                self.apply(events);
                self.snap_focus();
            }
            Err(e @ GameError::UnknownPair(_)) => debug!(error = %e, "stale pick"),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    pub fn move_focus(&mut self, delta: isize) {
        let rows = self.board.rows();
        if rows == 0 {
            return;
        }
        let mut row = self.focus.row;
        for _ in 0..rows {
            row = (row as isize + delta).rem_euclid(rows as isize) as usize;
            if self.is_open(self.focus.side, row) {
                self.focus.row = row;
                return;
            }
        }
    }

    pub fn switch_column(&mut self) {
        self.focus_column(self.focus.side.other());
    }

    pub fn focus_column(&mut self, side: Side) {
        self.focus.side = side;
        self.snap_focus();
    }

    pub fn is_selected(&self, side: Side, id: PairId) -> bool {
        self.session.selection(side) == Some(id)
    }

    pub fn is_wrong(&self, side: Side, id: PairId) -> bool {
        self.feedback.is_some_and(|fb| match side {
            Side::Source => fb.source == id,
            Side::Target => fb.target == id,
        })
    }

    pub fn report(&self) -> Option<SessionReport> {
        self.session.report()
    }

    /// Applies engine events to what is on screen
    pub fn apply(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::BatchSet(batch) => {
                    self.board = Board::new(batch);
                    self.focus = Focus::default();
                    self.snap_focus();
                }
                SessionEvent::Matched(pair) => {
                    self.board.matched.insert(pair.id());
                }
                SessionEvent::Mismatched { source, target } => {
                    self.feedback = Some(Feedback {
                        source,
                        target,
                        ticks_left: self.feedback_ticks,
                    });
                }
                SessionEvent::MismatchCleared => {
                    self.feedback = None;
                }
                SessionEvent::Ended(report) => {
                    self.feedback = None;
                    self.board = Board::default();
                    self.message = Some(report.message());
                    self.state = AppState::Results;
                }
            }
        }
    }

    fn is_open(&self, side: Side, row: usize) -> bool {
        self.board
            .column(side)
            .get(row)
            .is_some_and(|p| !self.board.matched.contains(&p.id()))
    }

    /// Moves focus onto the nearest unmatched row of the focused column
    fn snap_focus(&mut self) {
        let rows = self.board.rows();
        if rows == 0 || self.is_open(self.focus.side, self.focus.row) {
            return;
        }
        self.focus.row = self.focus.row.min(rows - 1);
        if !self.is_open(self.focus.side, self.focus.row) {
            self.move_focus(1);
        }
    }
}
