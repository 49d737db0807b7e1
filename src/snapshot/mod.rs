//! Serializable snapshots of an automaton's runtime position.
//!
//! A snapshot captures where a machine *is* — cursor, begin/end/auto-reset
//! settings, and the transition trace — so a run can be inspected, stored,
//! or resumed on an identically wired machine. Rules and hooks are closures
//! and are never serialized; restoring adopts position only.

use crate::core::Trace;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Captured runtime position of an automaton.
///
/// Produced by [`Automaton::snapshot`](crate::Automaton::snapshot) and
/// consumed by [`Automaton::restore`](crate::Automaton::restore). The JSON
/// and binary codecs round-trip the same data; [`Snapshot::from_json`] and
/// [`Snapshot::from_bytes`] validate before returning.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version.
    pub version: u32,

    /// Unique snapshot identifier.
    pub id: String,

    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,

    /// State count of the machine that took the snapshot.
    pub state_count: usize,

    /// Cursor position.
    pub current: usize,

    /// Reset target.
    pub begin: usize,

    /// Terminal state, when one was configured.
    pub end: Option<usize>,

    /// Whether auto-reset was enabled.
    pub auto_reset: bool,

    /// Transitions fired up to the capture point.
    pub trace: Trace,
}

impl Snapshot {
    /// Check internal consistency: supported version, and every recorded
    /// index within `0..state_count`.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if self.state_count == 0 {
            return Err(SnapshotError::ValidationFailed(
                "state count is zero".to_string(),
            ));
        }
        self.check_index("current", self.current)?;
        self.check_index("begin", self.begin)?;
        if let Some(end) = self.end {
            self.check_index("end", end)?;
        }
        for record in self.trace.records() {
            self.check_index("trace source", record.from)?;
            self.check_index("trace destination", record.to)?;
        }
        Ok(())
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Encode as a compact binary blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Decode from a binary blob and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn check_index(&self, what: &str, index: usize) -> Result<(), SnapshotError> {
        if index < self.state_count {
            Ok(())
        } else {
            Err(SnapshotError::ValidationFailed(format!(
                "{what} index {index} out of range for {} states",
                self.state_count
            )))
        }
    }
}
