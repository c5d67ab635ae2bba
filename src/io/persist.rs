//! Debounced background persistence
//!
//! The application persists the full snapshot after every mutation, but
//! rapid successive mutations must coalesce into one write, and a save must
//! never block the ledger. This module runs a single worker task with one
//! in-flight save slot: snapshots queued during the quiet period or during
//! a save supersede each other, and only the newest is ever written. Save
//! failures are reported and tolerated; local state stays authoritative
//! and the next snapshot retries the backend.

use crate::io::snapshot::{self, Snapshot};
use crate::types::LedgerError;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Storage backend a snapshot is persisted to
///
/// Injected into the saver so the engine and its callers never know where
/// snapshots actually go (a file here; a remote store in the full
/// application).
pub trait SnapshotPort: Send + Sync {
    /// Persist one snapshot
    fn save(&self, snapshot: &Snapshot) -> Result<(), LedgerError>;
}

/// Filesystem-backed snapshot storage
pub struct FileSnapshotPort {
    path: PathBuf,
}

impl FileSnapshotPort {
    /// Persist snapshots to the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotPort { path: path.into() }
    }
}

impl SnapshotPort for FileSnapshotPort {
    fn save(&self, snapshot: &Snapshot) -> Result<(), LedgerError> {
        snapshot::save(snapshot, &self.path)
    }
}

/// Debounced, superseding snapshot saver
///
/// Queue snapshots as often as you like; after a quiet period the newest
/// queued snapshot is written and everything older is discarded unwritten.
/// At most one save is in flight at any time.
pub struct DebouncedSaver {
    sender: mpsc::UnboundedSender<Snapshot>,
    worker: JoinHandle<()>,
}

impl DebouncedSaver {
    /// Spawn the saver worker on the current tokio runtime
    pub fn spawn(port: Arc<dyn SnapshotPort>, quiet_period: Duration) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Snapshot>();

        let worker = tokio::spawn(async move {
            while let Some(first) = receiver.recv().await {
                tokio::time::sleep(quiet_period).await;

                // Everything queued during the quiet period supersedes
                // what came before; only the newest snapshot is written.
                let mut latest = first;
                while let Ok(newer) = receiver.try_recv() {
                    latest = newer;
                }

                if let Err(e) = port.save(&latest) {
                    eprintln!("Snapshot save failed (kept in memory only): {e}");
                }
            }
        });

        DebouncedSaver { sender, worker }
    }

    /// Queue a snapshot for persistence
    ///
    /// Never blocks. A later queue supersedes this one if the quiet period
    /// has not elapsed yet.
    pub fn queue(&self, snapshot: Snapshot) {
        // The worker only stops when the sender is dropped, so this cannot
        // actually fail during the saver's lifetime.
        let _ = self.sender.send(snapshot);
    }

    /// Flush pending snapshots and stop the worker
    pub async fn close(self) {
        drop(self.sender);
        let _ = self.worker.await;
    }
}
