//! Write-behind queue — fire-and-forget persistence in submission order.
//!
//! Callers enqueue writes without awaiting them. A single writer task drains
//! the queue, so writes to the same key land in the order they were made
//! (last write wins). Failures are logged and counted, never returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::traits::KeyValueStore;
use crate::error::GuidanceError;

enum WriteCommand {
    Set { key: String, value: String },
    Remove { key: String },
    Flush(oneshot::Sender<()>),
}

/// Ordered, non-blocking writer in front of a `KeyValueStore`.
pub struct WriteBehind {
    store: Arc<dyn KeyValueStore>,
    tx: mpsc::UnboundedSender<WriteCommand>,
    failed: Arc<AtomicU64>,
}

impl WriteBehind {
    /// Spawn the writer task. Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let failed = Arc::new(AtomicU64::new(0));
        tokio::spawn(run_writer(Arc::clone(&store), rx, Arc::clone(&failed)));
        Self { store, tx, failed }
    }

    /// Queue a write.
    pub fn set(&self, key: &str, value: String) {
        self.send(WriteCommand::Set {
            key: key.to_string(),
            value,
        });
    }

    /// Queue a delete.
    pub fn remove(&self, key: &str) {
        self.send(WriteCommand::Remove {
            key: key.to_string(),
        });
    }

    /// Wait until every write queued before this call has been applied.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.send(WriteCommand::Flush(done_tx));
        let _ = done_rx.await;
    }

    /// Read a key after draining pending writes, so queued values are visible.
    ///
    /// Read failures degrade to `None`.
    pub async fn get(&self, key: &str) -> Option<String> {
        self.flush().await;
        match self.store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                let err = GuidanceError::StorageUnavailable {
                    key: key.to_string(),
                    reason: e.to_string(),
                };
                warn!(error = %err, "Read failed, continuing with session-only state");
                None
            }
        }
    }

    /// Number of writes that failed since startup.
    pub fn failed_writes(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    fn send(&self, cmd: WriteCommand) {
        if self.tx.send(cmd).is_err() {
            warn!("Guidance writer task is gone, dropping write");
        }
    }
}

async fn run_writer(
    store: Arc<dyn KeyValueStore>,
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
    failed: Arc<AtomicU64>,
) {
    while let Some(cmd) = rx.recv().await {
        let (key, result) = match cmd {
            WriteCommand::Set { key, value } => {
                let result = store.set(&key, &value).await;
                (key, result)
            }
            WriteCommand::Remove { key } => {
                let result = store.remove(&key).await;
                (key, result)
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
                continue;
            }
        };

        match result {
            Ok(()) => debug!(key = %key, "Persisted guidance key"),
            Err(e) => {
                failed.fetch_add(1, Ordering::Relaxed);
                let err = GuidanceError::StorageUnavailable {
                    key,
                    reason: e.to_string(),
                };
                warn!(error = %err, "Write failed, continuing with session-only state");
            }
        }
    }
    debug!("Guidance writer task stopped");
}
