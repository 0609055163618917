use tempfile::TempDir;

use qson::{
    cabrillo::cabrillo_to_qson,
    persist::{DocumentSink, sqlite::SqliteDocumentSink},
    types::FieldValue,
};

const LOG: &str = "START-OF-LOG: 3.0
CONTEST: CQ-WW-CW
CALLSIGN: K1ABC
ADDRESS: 1 Main St
ADDRESS: Springfield
QSO: 14025 CW 2023-11-25 0105 K1ABC 599 5 DL1XYZ 599 14
QSO: 7010 CW 2023-11-25 0001 K1ABC 599 5 JA1AAA 599 25
X-QSO: 3510 CW 2023-11-25 0300 K1ABC 599 5 DL1XYZ 599 14
END-OF-LOG:
";

#[test]
fn archived_document_reloads_identically() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("qson.db");

    let doc = cabrillo_to_qson(LOG);
    let mut sink = SqliteDocumentSink::open(&db_path).expect("open sqlite");
    let id = sink.append_document(&doc).expect("append");
    sink.flush().expect("flush");
    drop(sink);

    let reopened = SqliteDocumentSink::open(&db_path).expect("reopen");
    assert_eq!(reopened.document_ids().expect("ids"), vec![id]);
    let loaded = reopened.load_document(id).expect("load").expect("document");
    assert_eq!(loaded, doc);
    assert!(reopened.load_document(id + 1).expect("load").is_none());
}

#[test]
fn qsos_are_queryable_by_call_and_deletable() {
    let mut sink = SqliteDocumentSink::open_in_memory().expect("open sqlite");
    let first = sink.append_document(&cabrillo_to_qson(LOG)).expect("append");
    let second = sink.append_document(&cabrillo_to_qson(LOG)).expect("append");
    assert_ne!(first, second);

    let hits = sink.qsos_by_call("DL1XYZ").expect("by call");
    assert_eq!(hits.len(), 4);
    assert!(hits.iter().all(|(_, q)| q.their.call == "DL1XYZ"));

    assert!(sink.delete_document(first).expect("delete"));
    assert!(!sink.delete_document(first).expect("delete again"));
    let hits = sink.qsos_by_call("DL1XYZ").expect("by call");
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|(doc_id, _)| *doc_id == second));
}

#[test]
fn invalid_transmitter_survives_archive() {
    let doc = cabrillo_to_qson(
        "CONTEST: ARRL-DX-CW\nQSO: 14025 CW 2023-02-18 0001 K1ABC 599 MA DL1XYZ 599 100 A\n",
    );
    assert_eq!(doc.qsos[0].our.transmitter, Some(FieldValue::Invalid));

    let mut sink = SqliteDocumentSink::open_in_memory().expect("open sqlite");
    let id = sink.append_document(&doc).expect("append");
    let loaded = sink.load_document(id).expect("load").expect("document");
    assert_eq!(loaded, doc);
}
