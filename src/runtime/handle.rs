//! Importer handle and its single-writer command loop.

use hashbrown::HashMap;
use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    cabrillo::parser::{CabrilloParser, ParseOptions},
    document::QsonDocument,
    error::{ParseError, PersistError, RuntimeError},
    persist::DocumentSink,
    types::DocumentId,
};

use super::events::ImportEvent;

/// Importer runtime settings.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Parser options applied to every import.
    pub parse: ParseOptions,
    /// Bound of the command queue.
    pub command_queue_bound: usize,
    /// Capacity of the broadcast event channel.
    pub event_capacity: usize,
    /// Flush the sink after every import.
    pub flush_on_import: bool,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            command_queue_bound: 64,
            event_capacity: 256,
            flush_on_import: false,
        }
    }
}

/// Outcome of one import.
#[derive(Debug, Clone)]
pub struct Imported {
    /// Archive id.
    pub doc_id: DocumentId,
    /// Parsed document.
    pub document: QsonDocument,
}

/// Cloneable handle to the importer task.
#[derive(Clone)]
pub struct ImporterHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<ImportEvent>,
}

enum Command {
    Import {
        text: String,
        resp: oneshot::Sender<Result<Imported, RuntimeError>>,
    },
    Get {
        doc_id: DocumentId,
        resp: oneshot::Sender<Result<Option<QsonDocument>, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<Result<(), RuntimeError>>,
    },
}

/// Documents are archived in `sink`, or kept in memory when it is `None`.
enum Archive {
    Sink(Box<dyn DocumentSink>),
    Memory {
        docs: HashMap<DocumentId, QsonDocument>,
        next_id: DocumentId,
    },
}

impl Archive {
    fn append(&mut self, doc: &QsonDocument) -> Result<DocumentId, PersistError> {
        match self {
            Self::Sink(sink) => sink.append_document(doc),
            Self::Memory { docs, next_id } => {
                let id = *next_id;
                *next_id += 1;
                docs.insert(id, doc.clone());
                Ok(id)
            }
        }
    }

    fn load(&self, doc_id: DocumentId) -> Result<Option<QsonDocument>, PersistError> {
        match self {
            Self::Sink(sink) => sink.load_document(doc_id),
            Self::Memory { docs, .. } => Ok(docs.get(&doc_id).cloned()),
        }
    }

    fn flush(&mut self) -> Result<bool, PersistError> {
        match self {
            Self::Sink(sink) => sink.flush().map(|_| true),
            Self::Memory { .. } => Ok(false),
        }
    }
}

/// Spawns the importer task on the current tokio runtime.
pub fn spawn_importer(sink: Option<Box<dyn DocumentSink>>, config: ImporterConfig) -> ImporterHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<ImportEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();
    let parser = CabrilloParser::with_options(config.parse.clone());
    let mut archive = match sink {
        Some(sink) => Archive::Sink(sink),
        None => Archive::Memory {
            docs: HashMap::new(),
            next_id: 1,
        },
    };

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::Import { text, resp } => {
                    let result = import_one(&parser, &mut archive, &events_tx_loop, &text, config.flush_on_import);
                    let _ = resp.send(result);
                }
                Command::Get { doc_id, resp } => {
                    let _ = resp.send(archive.load(doc_id).map_err(RuntimeError::from));
                }
                Command::Shutdown { resp } => {
                    let result = archive.flush().map(|_| ()).map_err(RuntimeError::from);
                    let _ = resp.send(result);
                    break;
                }
            }
        }
        tracing::debug!("importer loop stopped");
    });

    ImporterHandle { cmd_tx, events_tx }
}

fn import_one(
    parser: &CabrilloParser,
    archive: &mut Archive,
    events: &broadcast::Sender<ImportEvent>,
    text: &str,
    flush: bool,
) -> Result<Imported, RuntimeError> {
    let document = match parser.parse(text) {
        Ok(doc) => doc,
        Err(err) => {
            let ParseError::Line { line, .. } = &err;
            let _ = events.send(ImportEvent::Rejected { line: *line });
            return Err(err.into());
        }
    };

    let doc_id = archive.append(&document)?;
    let _ = events.send(ImportEvent::Imported {
        doc_id,
        qsos: document.qsos.len(),
        cross_qsos: document.qsos_other.len(),
    });

    if flush && archive.flush()? {
        let _ = events.send(ImportEvent::Flushed);
    }

    tracing::info!(doc_id, qsos = document.qso_count(), "imported cabrillo log");
    Ok(Imported { doc_id, document })
}

impl ImporterHandle {
    /// Subscribes to importer events.
    pub fn subscribe(&self) -> broadcast::Receiver<ImportEvent> {
        self.events_tx.subscribe()
    }

    /// Parses and archives one Cabrillo log.
    pub async fn import(&self, text: impl Into<String>) -> Result<Imported, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Import {
                text: text.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Loads an archived document.
    pub async fn get(&self, doc_id: DocumentId) -> Result<Option<QsonDocument>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Get { doc_id, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Flushes the sink and stops the importer task.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }
}
