use thiserror::Error;

use crate::pair::PairId;

/// Errors returned by the matching session engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("need at least {required} word pairs to start, found {found}")]
    InsufficientData { found: usize, required: usize },
    #[error("pair {0} is not in the current batch")]
    UnknownPair(PairId),
    #[error("pair id {0} appears more than once")]
    DuplicatePair(PairId),
    #[error("no session is running")]
    NotRunning,
}

/// Errors raised while turning a word list file into pairs
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported word list format {0:?}, expected a .txt or .csv file")]
    UnsupportedFormat(String),
    #[error("line {line} is missing a source or target column")]
    MalformedInput { line: usize },
    #[error("word list contains no usable pairs")]
    Empty,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
