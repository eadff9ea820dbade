use std::sync::atomic::AtomicBool;
use std::time::Duration;
use std::{env, path::PathBuf};

use shopsearch_cli::{init_tracing, open_index, open_store, reindex_with_progress};
use shopsearch_core::config::Config;
use shopsearch_resolve::ReindexJob;

fn path_arg(args: &[String], i: usize, flag: &str) -> PathBuf {
    match args.get(i + 1) {
        Some(value) => PathBuf::from(value),
        None => { eprintln!("Error: {flag} requires a path"); std::process::exit(1) }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let args: Vec<String> = env::args().skip(1).collect();
    let mut watch = false; let mut fresh = false; let mut index_dir = None; let mut store_path = None;
    let mut i = 0; while i < args.len() { match args[i].as_str() {
        "--watch" | "-w" => watch = true,
        "--fresh" => fresh = true,
        "--index" => { index_dir = Some(path_arg(&args, i, "--index")); i += 1; }
        "--store" => { store_path = Some(path_arg(&args, i, "--store")); i += 1; }
        other => { eprintln!("Unknown argument: {other}"); std::process::exit(1); } } i += 1; }

    println!("shopsearch indexer\n==================");
    let store = open_store(&settings, store_path.as_ref())?;
    let index = open_index(&settings, index_dir.as_ref(), fresh)?;
    let job = ReindexJob::new(store, index, settings.reindex.batch_size);

    if watch {
        let interval_secs: u64 = config.get("reindex.interval_secs")?;
        let interval = Duration::from_secs(interval_secs);
        println!("Re-indexing every {}s until stopped", interval.as_secs());
        // Never raised: the loop runs until the process is stopped.
        let shutdown = AtomicBool::new(false);
        job.run_periodically(interval, &shutdown);
        return Ok(());
    }

    let outcome = reindex_with_progress(&job)?;
    println!("{outcome:?}");
    println!("Documents in index: {}", job.indexer().num_docs());
    Ok(())
}
