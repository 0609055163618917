//! Error taxonomy for parsing, persistence and the import runtime.

use thiserror::Error;

use crate::types::LineNumber;

/// Reasons a single QSO line cannot be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QsoLineError {
    /// Fewer tokens than the exchange layout needs.
    #[error("QSO line has {found} tokens, layout needs {expected}")]
    Truncated {
        /// Minimum token count for the layout.
        expected: usize,
        /// Tokens actually present.
        found: usize,
    },
    /// Date token is not a calendar date.
    #[error("invalid QSO date: {0}")]
    InvalidDate(String),
    /// Time token is not a valid `HHMM` time.
    #[error("invalid QSO time: {0}")]
    InvalidTime(String),
}

/// Document-level parse failure, only raised in strict mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A QSO or cross-QSO line was rejected.
    #[error("line {line}: {source}")]
    Line {
        /// 1-based source line.
        line: LineNumber,
        /// Underlying mapping failure.
        source: QsoLineError,
    },
}

/// Failures from a [`crate::persist::DocumentSink`].
#[derive(Debug, Error)]
pub enum PersistError {
    /// SQLite driver error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Payload (de)serialization error.
    #[error("serde: {0}")]
    Serde(#[from] serde_json::Error),
    /// Anything else.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Failures surfaced through the import runtime handle.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Strict parse rejected the document.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The archive sink failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
    /// The runtime task is gone.
    #[error("importer channel closed")]
    ChannelClosed,
}
