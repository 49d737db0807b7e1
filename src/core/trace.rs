//! Transition trace recording.
//!
//! The automaton appends one [`TraceRecord`] per fired transition while it
//! parses. The trace is pure observability: the engine never consults it,
//! and clearing it never changes parsing behavior. Records are serializable
//! so a run can be inspected or shipped elsewhere after the fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One fired transition.
///
/// `offset` is the position of the triggering element within its `parse`
/// call; offsets restart at zero on every call, so a trace spanning several
/// calls is segmented by descending-offset boundaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Index of the state the cursor left.
    pub from: usize,
    /// Index of the state the cursor entered.
    pub to: usize,
    /// Zero-based position of the triggering element in the input.
    pub offset: usize,
    /// When the transition fired.
    pub at: DateTime<Utc>,
}

/// Ordered log of fired transitions.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use turnstile::{Trace, TraceRecord};
///
/// let mut trace = Trace::new();
/// trace.record(TraceRecord { from: 0, to: 1, offset: 5, at: Utc::now() });
/// trace.record(TraceRecord { from: 1, to: 2, offset: 19, at: Utc::now() });
///
/// assert_eq!(trace.path(), vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    records: Vec<TraceRecord>,
}

impl Trace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Trace {
            records: Vec::new(),
        }
    }

    /// Append one fired transition.
    pub fn record(&mut self, record: TraceRecord) {
        self.records.push(record);
    }

    /// All recorded transitions, oldest first.
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    /// Number of recorded transitions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// The sequence of states the cursor passed through: the first record's
    /// source followed by every record's destination. Empty when no
    /// transition fired.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }

    /// Wall-clock span from the first to the last recorded transition.
    ///
    /// `None` when the trace is empty; zero when it holds a single record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}
