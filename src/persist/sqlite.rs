//! SQLite-backed document archive.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::{
    cabrillo::headers::HeaderTable,
    contest::ContestReference,
    document::QsonDocument,
    qso::Qso,
    types::DocumentId,
};

use super::{DocumentSink, PersistError, PersistResult};

/// Version number for serialized QSO payloads.
pub const QSO_FORMAT_VERSION: u16 = 1;

const KIND_PRIMARY: i64 = 1;
const KIND_CROSS: i64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct QsoEnvelope {
    format_version: u16,
    qso: Qso,
}

/// SQLite implementation of [`crate::persist::DocumentSink`].
pub struct SqliteDocumentSink {
    conn: Connection,
}

impl SqliteDocumentSink {
    /// Opens or creates an archive at `path`.
    ///
    /// Enables WAL mode, `synchronous=NORMAL` and foreign keys.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory archive.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// Ids of all archived documents, oldest first.
    pub fn document_ids(&self) -> PersistResult<Vec<DocumentId>> {
        let mut stmt = self.conn.prepare("SELECT id FROM documents ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row? as DocumentId);
        }
        Ok(out)
    }

    /// Every archived QSO or cross-QSO with `call` on their side.
    pub fn qsos_by_call(&self, call: &str) -> PersistResult<Vec<(DocumentId, Qso)>> {
        let mut stmt = self.conn.prepare(
            "SELECT doc_id, payload FROM qsos WHERE call = ?1 ORDER BY doc_id, kind, position",
        )?;
        let rows = stmt.query_map(params![call], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (doc_id, payload) = row?;
            out.push((doc_id as DocumentId, decode_qso_payload(&payload)?));
        }
        Ok(out)
    }

    /// Removes a document and its QSOs. Returns false when it did not exist.
    pub fn delete_document(&mut self, id: DocumentId) -> PersistResult<bool> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM qsos WHERE doc_id = ?1", params![id as i64])?;
        let count = tx.execute("DELETE FROM documents WHERE id = ?1", params![id as i64])?;
        tx.commit()?;
        Ok(count > 0)
    }

    fn load_qsos(&self, id: DocumentId, kind: i64) -> PersistResult<Vec<Qso>> {
        let mut stmt = self.conn.prepare(
            "SELECT payload FROM qsos WHERE doc_id = ?1 AND kind = ?2 ORDER BY position ASC",
        )?;
        let rows = stmt.query_map(params![id as i64, kind], |row| row.get::<_, Vec<u8>>(0))?;
        let mut out = Vec::new();
        for row in rows {
            out.push(decode_qso_payload(&row?)?);
        }
        Ok(out)
    }
}

impl DocumentSink for SqliteDocumentSink {
    fn append_document(&mut self, doc: &QsonDocument) -> PersistResult<DocumentId> {
        let headers = serde_json::to_vec(&doc.raw_headers)?;
        let refs = serde_json::to_vec(&doc.refs)?;
        let reference = doc.contest();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO documents(ts_ms, source, contest, callsign, headers, refs) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                now_ms() as i64,
                doc.source,
                reference.and_then(|r| r.contest.as_deref()),
                reference.and_then(|r| r.call.as_deref()),
                headers,
                refs,
            ],
        )?;
        let doc_id = tx.last_insert_rowid();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO qsos(doc_id, kind, position, number, line, start_ms, call, payload) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            let tagged = doc
                .qsos
                .iter()
                .enumerate()
                .map(|(pos, q)| (KIND_PRIMARY, pos, q))
                .chain(doc.qsos_other.iter().enumerate().map(|(pos, q)| (KIND_CROSS, pos, q)));
            for (kind, position, qso) in tagged {
                let payload = serde_json::to_vec(&QsoEnvelope {
                    format_version: QSO_FORMAT_VERSION,
                    qso: qso.clone(),
                })?;
                stmt.execute(params![
                    doc_id,
                    kind,
                    position as i64,
                    qso.number as i64,
                    qso.line as i64,
                    qso.start_millis,
                    qso.their.call,
                    payload,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!(doc_id, qsos = doc.qso_count(), "archived document");
        Ok(doc_id as DocumentId)
    }

    fn load_document(&self, id: DocumentId) -> PersistResult<Option<QsonDocument>> {
        let row: Option<(String, Vec<u8>, Vec<u8>)> = self
            .conn
            .query_row(
                "SELECT source, headers, refs FROM documents WHERE id = ?1",
                params![id as i64],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((source, headers, refs)) = row else {
            return Ok(None);
        };

        let raw_headers: HeaderTable = serde_json::from_slice(&headers)?;
        let refs: Vec<ContestReference> = serde_json::from_slice(&refs)?;
        Ok(Some(QsonDocument {
            source,
            raw_headers,
            refs,
            qsos: self.load_qsos(id, KIND_PRIMARY)?,
            qsos_other: self.load_qsos(id, KIND_CROSS)?,
        }))
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn decode_qso_payload(payload: &[u8]) -> PersistResult<Qso> {
    let envelope: QsoEnvelope = serde_json::from_slice(payload)?;
    if envelope.format_version != QSO_FORMAT_VERSION {
        return Err(PersistError::Message(format!(
            "unsupported qso format version: {}",
            envelope.format_version
        )));
    }
    Ok(envelope.qso)
}
