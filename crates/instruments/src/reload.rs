//! Copy-on-write reload of the master script.
//!
//! A reload builds a complete new index and swaps the shared `Arc`; readers
//! holding an older snapshot keep it until they drop it.

use anyhow::Result;
use notify::{Event, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::RecvTimeoutError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use crate::error::DatasetError;
use crate::index::InstrumentIndex;
use crate::resolver::Resolver;

const CLOSED_POLL: Duration = Duration::from_millis(250);

/// Read side of the shared index.
#[derive(Debug, Clone)]
pub struct IndexHandle {
    rx: watch::Receiver<Arc<InstrumentIndex>>,
}

impl IndexHandle {
    /// A handle over an index that is never reloaded.
    #[must_use]
    pub fn fixed(index: InstrumentIndex) -> Self {
        let (_tx, rx) = watch::channel(Arc::new(index));
        Self { rx }
    }

    /// Snapshot of the index as of now.
    #[must_use]
    pub fn current(&self) -> Arc<InstrumentIndex> {
        self.rx.borrow().clone()
    }

    #[must_use]
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.current())
    }
}

pub struct DatasetWatcher {
    path: PathBuf,
    tx: watch::Sender<Arc<InstrumentIndex>>,
}

impl DatasetWatcher {
    /// Creates a watcher for `path` seeded with an already loaded index.
    ///
    /// Returns the watcher and a handle readers resolve through.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, initial: InstrumentIndex) -> (Self, IndexHandle) {
        let (tx, rx) = watch::channel(Arc::new(initial));
        (
            Self {
                path: path.into(),
                tx,
            },
            IndexHandle { rx },
        )
    }

    /// Loads the file again and publishes the new index.
    ///
    /// # Errors
    ///
    /// Returns the loader error; the published index is left untouched.
    pub fn reload(&self) -> Result<usize, DatasetError> {
        reload_into(&self.tx, &self.path)
    }

    /// Watches the dataset file and reloads whenever it is written or
    /// replaced.
    ///
    /// The parent directory is watched rather than the file itself, so a
    /// file swapped in by rename keeps triggering reloads.
    ///
    /// # Errors
    ///
    /// Returns an error if file watching cannot be initiated or if the watcher task fails.
    pub async fn watch(&self) -> Result<()> {
        let tx = self.tx.clone();
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let (notify_tx, notify_rx) = std::sync::mpsc::channel();

            let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            })?;

            watcher.watch(watch_dir(&path), RecursiveMode::NonRecursive)?;

            // Stops once every IndexHandle is gone.
            while !tx.is_closed() {
                let event = match notify_rx.recv_timeout(CLOSED_POLL) {
                    Ok(event) => event,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };
                if touches_dataset(&event, &path) {
                    tracing::info!(path = %path.display(), "Master script changed, reloading...");
                    if let Err(e) = reload_into(&tx, &path) {
                        tracing::warn!("Failed to reload master script, keeping previous index: {}", e);
                    }
                }
            }

            Ok::<_, anyhow::Error>(())
        })
        .await??;

        Ok(())
    }
}

fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

/// True for a write to, or a create or rename onto, the dataset file.
fn touches_dataset(event: &Event, path: &Path) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}

fn reload_into(tx: &watch::Sender<Arc<InstrumentIndex>>, path: &Path) -> Result<usize, DatasetError> {
    let index = InstrumentIndex::from_csv(path)?;
    let len = index.len();
    tx.send_replace(Arc::new(index));
    tracing::info!(records = len, "Master script reloaded");
    Ok(len)
}
