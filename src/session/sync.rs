//! Background submission of whole sheets.
//!
//! One tokio task owns the transport and sends queued documents strictly in
//! the order they were submitted. Callers get a [`SyncTicket`] they may await
//! for the outcome or simply drop.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::client::{SheetTransport, TransportError};
use crate::models::Sheet;

enum SyncRequest {
    Submit {
        sheet: Sheet,
        done: oneshot::Sender<Result<(), TransportError>>,
    },
    Flush(oneshot::Sender<()>),
}

/// Completion signal for one queued submission.
#[derive(Debug)]
#[must_use = "drop the ticket explicitly to fire and forget"]
pub struct SyncTicket(oneshot::Receiver<Result<(), TransportError>>);

impl SyncTicket {
    /// Wait for the submission to be attempted.
    pub async fn wait(self) -> Result<(), TransportError> {
        self.0.await.unwrap_or(Err(TransportError::Disconnected))
    }
}

/// Handle to the ordered submission worker. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SyncQueue {
    tx: mpsc::UnboundedSender<SyncRequest>,
}

impl SyncQueue {
    /// Start the worker. Must be called from within a tokio runtime.
    ///
    /// The worker exits once every handle is dropped and the queue is drained.
    pub fn spawn<T: SheetTransport>(transport: Arc<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(transport, rx));
        Self { tx }
    }

    /// Queue a full document for submission.
    pub fn submit(&self, sheet: Sheet) -> SyncTicket {
        let (done, ticket) = oneshot::channel();
        tracing::debug!("Queueing sheet submission ({} topics)", sheet.topics.len());
        if self.tx.send(SyncRequest::Submit { sheet, done }).is_err() {
            // The request (and its sender) is dropped, so the ticket reports Disconnected.
            tracing::warn!("Sync worker stopped; submission dropped");
        }
        SyncTicket(ticket)
    }

    /// Resolve once every previously queued submission has been attempted.
    pub async fn flush(&self) {
        let (done, flushed) = oneshot::channel();
        if self.tx.send(SyncRequest::Flush(done)).is_ok() {
            let _ = flushed.await;
        }
    }
}

async fn run<T: SheetTransport>(transport: Arc<T>, mut rx: mpsc::UnboundedReceiver<SyncRequest>) {
    while let Some(request) = rx.recv().await {
        match request {
            SyncRequest::Submit { sheet, done } => {
                let result = transport.submit_document(&sheet).await;
                if let Err(e) = &result {
                    tracing::warn!("Sheet sync failed: {}", e);
                }
                let _ = done.send(result);
            }
            SyncRequest::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("Sync worker stopped");
}
