//! Word list parsing.
//!
//! Two layouts are accepted, chosen by file extension:
//!
//! - `.txt`: one pair per line, source and target separated by whitespace
//! - `.csv`: one pair per record, `source,target`
//!
//! Lines missing either column are dropped here and never reach the session
//! engine. Ids are assigned in file order.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::LoadError;
use crate::pair::{PairId, WordPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Whitespace,
    Comma,
}

impl ListFormat {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(ListFormat::Whitespace),
            "csv" => Ok(ListFormat::Comma),
            _ => Err(LoadError::UnsupportedFormat(
                path.as_ref().display().to_string(),
            )),
        }
    }
}

/// Pairs that survived parsing, plus how many lines were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    pub pairs: Vec<WordPair>,
    pub dropped: usize,
}

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<WordList, LoadError> {
    let format = ListFormat::from_path(&path)?;
    let content = fs::read_to_string(&path)?;
    let list = parse(&content, format)?;

    if list.pairs.is_empty() {
        return Err(LoadError::Empty);
    }
    debug!(
        path = %path.as_ref().display(),
        pairs = list.pairs.len(),
        dropped = list.dropped,
        "word list loaded"
    );
    Ok(list)
}

pub fn parse(content: &str, format: ListFormat) -> Result<WordList, LoadError> {
    let rows = match format {
        ListFormat::Whitespace => whitespace_rows(content),
        ListFormat::Comma => comma_rows(content)?,
    };

    let mut list = WordList::default();
    for (line, row) in rows {
        match row {
            Ok((source, target)) => {
                let id = PairId(list.pairs.len() as u32);
                match WordPair::new(id, source, target) {
                    Some(pair) => list.pairs.push(pair),
                    None => drop_line(&mut list, LoadError::MalformedInput { line }),
                }
            }
            Err(e) => drop_line(&mut list, e),
        }
    }
    Ok(list)
}

fn drop_line(list: &mut WordList, reason: LoadError) {
    debug!(%reason, "dropping line");
    list.dropped += 1;
}

type Row = (usize, Result<(String, String), LoadError>);

fn whitespace_rows(content: &str) -> Vec<Row> {
    content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(idx, l)| {
            let line = idx + 1;
            let mut parts = l.split_whitespace();
            let row = match (parts.next(), parts.next()) {
                (Some(s), Some(t)) => Ok((s.to_string(), t.to_string())),
                _ => Err(LoadError::MalformedInput { line }),
            };
            (line, row)
        })
        .collect()
}

fn comma_rows(content: &str) -> Result<Vec<Row>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = vec![];
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let row = match (record.get(0), record.get(1)) {
            (Some(s), Some(t)) if !s.is_empty() && !t.is_empty() => {
                Ok((s.to_string(), t.to_string()))
            }
            _ => Err(LoadError::MalformedInput { line }),
        };
        rows.push((line, row));
    }
    Ok(rows)
}
