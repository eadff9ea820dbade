//! Full re-indexing of the item index from the catalog store.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, TryLockError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{error, info, warn};

use shopsearch_core::traits::{CatalogStore, ItemIndexer};
use shopsearch_core::types::IndexedItem;

const SHUTDOWN_POLL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReindexOutcome {
    Completed { records: usize },
    /// Another run held the job guard.
    Skipped,
}

pub struct ReindexJob<S, W> where S: CatalogStore, W: ItemIndexer {
    store: S,
    indexer: W,
    batch_size: usize,
    running: Mutex<()>,
}

impl<S, W> ReindexJob<S, W> where S: CatalogStore, W: ItemIndexer {
    pub fn new(store: S, indexer: W, batch_size: usize) -> Self {
        Self { store, indexer, batch_size: batch_size.max(1), running: Mutex::new(()) }
    }

    pub fn store(&self) -> &S { &self.store }

    pub fn indexer(&self) -> &W { &self.indexer }

    pub fn run(&self) -> Result<ReindexOutcome> { self.run_with_progress(|_| {}) }

    /// Stream every catalog record into the index; `on_batch` receives the
    /// number of items written by each committed batch.
    pub fn run_with_progress(&self, mut on_batch: impl FnMut(usize)) -> Result<ReindexOutcome> {
        let _guard = match self.running.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                warn!("item reindex already running, skipping");
                return Ok(ReindexOutcome::Skipped);
            }
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        let started = Instant::now();
        info!(batch_size = self.batch_size, "item reindex started");
        let mut records = 0usize;
        self.store.for_each_record(self.batch_size, &mut |batch| {
            let items: Vec<IndexedItem> = batch.into_iter().map(IndexedItem::from).collect();
            let written = self.indexer.upsert(&items)?;
            records += written;
            on_batch(written);
            Ok(())
        })?;
        info!(records, elapsed_ms = started.elapsed().as_millis() as u64, "item reindex finished");
        Ok(ReindexOutcome::Completed { records })
    }

    /// Run the job, then wait `interval`, until `shutdown` is raised.
    /// A failed run is logged and does not stop the loop.
    pub fn run_periodically(&self, interval: Duration, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::Relaxed) {
            if let Err(err) = self.run() {
                error!(error = %err, "item reindex failed");
            }
            let deadline = Instant::now() + interval;
            while !shutdown.load(Ordering::Relaxed) {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                thread::sleep(SHUTDOWN_POLL.min(deadline - now));
            }
        }
        info!("periodic item reindex stopped");
    }
}
