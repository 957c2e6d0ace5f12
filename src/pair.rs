use std::fmt;

/// Identifies a word pair within a session. Matching always goes through the
/// id so that duplicate terms never produce ambiguous matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub u32);

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A source term and its translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair {
    id: PairId,
    source: String,
    target: String,
}

impl WordPair {
    /// Returns `None` when either side is blank.
    pub fn new(id: PairId, source: impl Into<String>, target: impl Into<String>) -> Option<Self> {
        let source = source.into();
        let target = target.into();
        if source.trim().is_empty() || target.trim().is_empty() {
            return None;
        }
        Some(Self { id, source, target })
    }

    pub fn id(&self) -> PairId {
        self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &str {
        &self.target
    }
}

/// Which column a pick was made in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Side {
    Source,
    Target,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Source => Side::Target,
            Side::Target => Side::Source,
        }
    }
}
