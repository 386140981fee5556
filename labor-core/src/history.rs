//! Calculation history.
//!
//! Most recent first, capped at [`HISTORY_CAPACITY`]. Entries are only ever
//! added at the front or dropped off the back; `clear` is the only other way
//! to remove them.

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::models::{CalculationInput, CalculationResult, CalculatorKind, HistoryEntry};

pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously saved entries, keeping the first
    /// [`HISTORY_CAPACITY`].
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Records a calculation stamped with the current time.
    pub fn append(
        &mut self,
        calculator: CalculatorKind,
        input: CalculationInput,
        result: CalculationResult,
    ) -> &HistoryEntry {
        self.append_at(Utc::now(), calculator, input, result)
    }

    /// Records a calculation with an explicit timestamp.
    ///
    /// The id is the timestamp in milliseconds, bumped past the newest entry
    /// when two calculations land in the same millisecond.
    pub fn append_at(
        &mut self,
        timestamp: DateTime<Utc>,
        calculator: CalculatorKind,
        input: CalculationInput,
        result: CalculationResult,
    ) -> &HistoryEntry {
        let mut id = timestamp.timestamp_millis();
        if let Some(newest) = self.entries.first() {
            if id <= newest.id {
                id = newest.id + 1;
            }
        }

        self.entries.insert(
            0,
            HistoryEntry {
                id,
                timestamp,
                calculator,
                input,
                result,
            },
        );
        self.entries.truncate(HISTORY_CAPACITY);
        debug!(id, %calculator, len = self.entries.len(), "history entry added");

        &self.entries[0]
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.entries.len(), "history cleared");
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching `predicate`, newest first.
    pub fn filter<P>(
        &self,
        predicate: P,
    ) -> Vec<&HistoryEntry>
    where
        P: Fn(&HistoryEntry) -> bool,
    {
        self.entries.iter().filter(|e| predicate(e)).collect()
    }

    /// Entries whose calculator label contains `term` (case-insensitive) or
    /// whose local date string (`2024. 3. 5.`) contains it, optionally limited
    /// to one calculator. An empty term matches everything.
    pub fn search(
        &self,
        term: &str,
        kind: Option<CalculatorKind>,
    ) -> Vec<&HistoryEntry> {
        let needle = term.trim().to_lowercase();
        self.filter(|entry| {
            let kind_matches = kind.is_none_or(|k| entry.calculator == k);
            kind_matches && (needle.is_empty() || matches_term(entry, &needle))
        })
    }
}

fn matches_term(
    entry: &HistoryEntry,
    needle: &str,
) -> bool {
    entry.calculator.label().to_lowercase().contains(needle) || display_date(entry).contains(needle)
}

/// Creation date in local time, formatted `YYYY. M. D.`.
pub fn display_date(entry: &HistoryEntry) -> String {
    entry
        .timestamp
        .with_timezone(&Local)
        .format("%Y. %-m. %-d.")
        .to_string()
}
