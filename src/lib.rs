//! Cabrillo contest-log parsing into the normalized QSON document model.
//!
//! # Examples
//!
//! One-shot conversion with [`cabrillo::cabrillo_to_qson`]:
//! ```
//! use qson::{cabrillo::cabrillo_to_qson, types::{FieldValue, Frequency}};
//!
//! let doc = cabrillo_to_qson(
//!     "START-OF-LOG: 3.0\n\
//!      CONTEST: IARU-HF\n\
//!      CALLSIGN: KI2D\n\
//!      QSO: 7002 CW 2021-07-10 1207 KI2D 599 8 VE3MGY 599 4\n\
//!      END-OF-LOG:\n",
//! );
//! let qso = &doc.qsos[0];
//! assert_eq!(qso.freq, Frequency::Khz(7002));
//! assert_eq!(qso.our.get("ituZone"), Some(&FieldValue::Number(8)));
//! assert_eq!(doc.refs[0].contest.as_deref(), Some("IARU-HF"));
//! ```
//!
//! Importer runtime with SQLite archive:
//! ```no_run
//! use qson::{
//!     persist::sqlite::SqliteDocumentSink,
//!     runtime::handle::{spawn_importer, ImporterConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sink = SqliteDocumentSink::open("qson.db").expect("open sqlite");
//! let handle = spawn_importer(Some(Box::new(sink)), ImporterConfig::default());
//! let text = std::fs::read_to_string("iaru.log").expect("read log");
//! let imported = handle.import(text).await.expect("import");
//! println!("archived as {:?}", imported.doc_id);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Frequency-to-band lookup.
pub mod band;
/// Cabrillo scanner, header collector, layouts and parser.
pub mod cabrillo;
/// Contest entry metadata.
pub mod contest;
/// Root QSON document.
pub mod document;
/// Error types.
pub mod error;
/// Document archive abstraction and SQLite implementation.
pub mod persist;
/// QSO and exchange records.
pub mod qso;
/// Async single-writer import service and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
