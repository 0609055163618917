use std::time::Duration;

use qson::{
    cabrillo::ParseOptions,
    error::RuntimeError,
    persist::sqlite::SqliteDocumentSink,
    runtime::{
        events::ImportEvent,
        handle::{ImporterConfig, spawn_importer},
    },
};

const LOG: &str = "CONTEST: NAQP-CW
CALLSIGN: KI2D
QSO: 14030 CW 2023-01-14 1800 KI2D DAN NY NJ4P ACE TN
X-QSO: 7030 CW 2023-01-14 1801 KI2D DAN NY K4AAA BOB GA
";

#[tokio::test]
async fn import_archives_and_emits_event() {
    let handle = spawn_importer(None, ImporterConfig::default());
    let mut sub = handle.subscribe();

    let imported = handle.import(LOG).await.expect("import");
    assert_eq!(imported.document.qsos.len(), 1);
    assert_eq!(imported.document.qsos_other.len(), 1);

    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv");
    assert_eq!(
        evt,
        ImportEvent::Imported {
            doc_id: imported.doc_id,
            qsos: 1,
            cross_qsos: 1,
        }
    );

    let loaded = handle.get(imported.doc_id).await.expect("get").expect("document");
    assert_eq!(loaded, imported.document);
    assert!(handle.get(imported.doc_id + 1).await.expect("get").is_none());

    handle.shutdown().await.expect("shutdown");
    assert!(matches!(handle.import(LOG).await, Err(RuntimeError::ChannelClosed)));
}

#[tokio::test]
async fn strict_import_rejects_and_sqlite_sink_flushes() {
    let sink = SqliteDocumentSink::open_in_memory().expect("open sqlite");
    let cfg = ImporterConfig {
        parse: ParseOptions { strict: true },
        flush_on_import: true,
        ..ImporterConfig::default()
    };
    let handle = spawn_importer(Some(Box::new(sink)), cfg);
    let mut sub = handle.subscribe();

    let bad = "CONTEST: NAQP-CW\nQSO: 14030 CW 2023-01-14 1800 KI2D DAN\n";
    let err = handle.import(bad).await.expect_err("strict rejects");
    assert!(matches!(err, RuntimeError::Parse(_)));
    let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
        .await
        .expect("event")
        .expect("recv");
    assert_eq!(evt, ImportEvent::Rejected { line: 2 });

    let imported = handle.import(LOG).await.expect("import");
    let mut seen = Vec::new();
    for _ in 0..2 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        seen.push(evt);
    }
    assert!(matches!(seen[0], ImportEvent::Imported { doc_id, .. } if doc_id == imported.doc_id));
    assert_eq!(seen[1], ImportEvent::Flushed);

    let loaded = handle.get(imported.doc_id).await.expect("get").expect("document");
    assert_eq!(loaded, imported.document);
    handle.shutdown().await.expect("shutdown");
}
