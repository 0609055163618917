//! Runtime event stream payloads.

use crate::types::{DocumentId, LineNumber};

/// Events emitted from the importer loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportEvent {
    /// A document was parsed and archived.
    Imported {
        /// Archive id.
        doc_id: DocumentId,
        /// Primary QSO count.
        qsos: usize,
        /// Cross-QSO count.
        cross_qsos: usize,
    },
    /// A strict import was rejected.
    Rejected {
        /// Offending source line.
        line: LineNumber,
    },
    /// The archive sink reported durable writes.
    Flushed,
}
