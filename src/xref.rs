//! Vote-weighted cross-reference conversion (`from,to,votes` CSV to JSONL edges).

use std::collections::HashMap;
use std::path::Path;

use crate::error::Error;
use crate::types::Edge;

/// One vote row from the input CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRow {
    /// Verse the cross-reference starts from.
    pub from_verse: String,
    /// Verse the cross-reference points to.
    pub to_verse: String,
    /// Net community votes; rows at or below zero are dropped.
    pub votes: i64,
}

impl VoteRow {
    /// Build a row from the first three columns of a record.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedRow` for missing columns or a non-integer vote count.
    pub fn from_record(record: &csv::StringRecord) -> Result<Self, Error> {
        let (Some(from_verse), Some(to_verse), Some(raw_votes)) = (record.get(0), record.get(1), record.get(2))
        else {
            return Err(Error::MalformedRow {
                reason: format!("expected 3 columns, found {}", record.len()),
            });
        };
        let votes = raw_votes.trim().parse::<i64>().map_err(|_err| return Error::MalformedRow {
            reason: format!("vote count `{raw_votes}` is not an integer"),
        })?;
        return Ok(Self {
            from_verse: from_verse.to_string(),
            to_verse: to_verse.to_string(),
            votes,
        });
    }
}

/// Groups targets by source, remembering the order sources first appeared.
#[derive(Debug, Default)]
pub struct Aggregator {
    /// Position of each source in `groups`.
    index: HashMap<String, usize>,
    /// Sources with their targets, in first-seen order.
    groups: Vec<(String, Vec<String>)>,
}

impl Aggregator {
    /// Add one row. Rows with `votes <= 0` are ignored and do not register their source.
    pub fn push(&mut self, row: VoteRow) {
        if row.votes <= 0 {
            return;
        }
        let position = match self.index.get(&row.from_verse) {
            Some(&position) => position,
            None => {
                let position = self.groups.len();
                self.index.insert(row.from_verse.clone(), position);
                self.groups.push((row.from_verse, Vec::new()));
                position
            },
        };
        if let Some((_, targets)) = self.groups.get_mut(position) {
            targets.push(row.to_verse);
        }
    }

    /// One edge per distinct source, in first-seen order.
    pub fn into_edges(self) -> Vec<Edge> {
        return self
            .groups
            .into_iter()
            .map(|(source, targets)| return Edge::directed(source, targets))
            .collect();
    }
}

/// Read a vote CSV (with header) and aggregate it into edges.
///
/// # Errors
///
/// Returns reader errors, or the first row error wrapped with its line number.
pub fn convert_file(path: &Path) -> Result<Vec<Edge>, Error> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut aggregator = Aggregator::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line);
        tracing::debug!(line, "reading vote row");
        let row = VoteRow::from_record(&record).map_err(|e| return e.in_row(line))?;
        aggregator.push(row);
    }

    return Ok(aggregator.into_edges());
}
