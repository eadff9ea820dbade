//! Wiring shared by the `shopsearch` and `shopsearch-indexer` binaries.

use std::path::PathBuf;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use shopsearch_core::config::{expand_path, Settings};
use shopsearch_core::traits::CatalogStore;
use shopsearch_resolve::{ReindexJob, ReindexOutcome};
use shopsearch_store::SqliteCatalogStore;
use shopsearch_text::TantivyItemIndex;

/// Logs go to stderr so stdout stays clean for JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

pub fn open_store(settings: &Settings, store_path: Option<&PathBuf>) -> anyhow::Result<SqliteCatalogStore> {
    let path = store_path.cloned().unwrap_or_else(|| expand_path(&settings.data.store_path));
    SqliteCatalogStore::open(&path).with_context(|| format!("opening catalog store {}", path.display()))
}

/// `fresh` wipes the index directory first.
pub fn open_index(settings: &Settings, index_dir: Option<&PathBuf>, fresh: bool) -> anyhow::Result<TantivyItemIndex> {
    let dir = index_dir.cloned().unwrap_or_else(|| expand_path(&settings.data.index_dir));
    let index = if fresh { TantivyItemIndex::create(dir)? } else { TantivyItemIndex::open_or_create(dir)? };
    Ok(index.with_writer_heap(settings.reindex.writer_heap_bytes))
}

pub fn reindex_with_progress(job: &ReindexJob<SqliteCatalogStore, TantivyItemIndex>) -> anyhow::Result<ReindexOutcome> {
    let total = job.store().count_records()?;
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} items ({percent}%) {msg}")?
            .progress_chars("#>-"),
    );
    let outcome = job.run_with_progress(|written| pb.inc(written as u64))?;
    match outcome {
        ReindexOutcome::Completed { records } => pb.finish_with_message(format!("indexed {records} items")),
        ReindexOutcome::Skipped => pb.abandon_with_message("another reindex is running"),
    }
    Ok(outcome)
}
