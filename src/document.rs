//! Root QSON document.

use serde::{Deserialize, Serialize};

use crate::{cabrillo::headers::HeaderTable, contest::ContestReference, qso::Qso};

/// Source tag stamped on documents parsed from Cabrillo.
pub const CABRILLO_SOURCE: &str = "cabrillo";

/// Normalized contest log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QsonDocument {
    /// Origin format.
    pub source: String,
    /// Every header as read, keyed by canonical tag.
    pub raw_headers: HeaderTable,
    /// Contest entry metadata; never empty.
    pub refs: Vec<ContestReference>,
    /// Primary QSOs, ascending by start time.
    pub qsos: Vec<Qso>,
    /// Cross-QSOs, in file order.
    pub qsos_other: Vec<Qso>,
}

impl QsonDocument {
    /// Total QSO and cross-QSO count.
    pub fn qso_count(&self) -> usize {
        self.qsos.len() + self.qsos_other.len()
    }

    /// Primary contest reference.
    pub fn contest(&self) -> Option<&ContestReference> {
        self.refs.first()
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a document previously produced by [`QsonDocument::to_json`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
