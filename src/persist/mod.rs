//! Archive of parsed documents.

/// SQLite-backed archive.
pub mod sqlite;

pub use crate::error::{PersistError, PersistResult};

use crate::{document::QsonDocument, types::DocumentId};

/// Destination for parsed documents.
pub trait DocumentSink: Send {
    /// Stores `doc`, returning its archive id.
    fn append_document(&mut self, doc: &QsonDocument) -> PersistResult<DocumentId>;

    /// Loads a previously stored document.
    fn load_document(&self, id: DocumentId) -> PersistResult<Option<QsonDocument>>;

    /// Forces buffered writes to durable storage.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}
