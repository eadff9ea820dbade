use std::env;

use shopsearch_cli::{init_tracing, open_index, open_store, reindex_with_progress};
use shopsearch_core::config::Config;
use shopsearch_resolve::{ReindexJob, SearchService};

const USAGE: &str = "Usage: shopsearch <resolve|narrow|region|reindex> [args...]
  resolve <text>              resolve with the SKU fast path, wide page
  narrow <text>               heuristic resolution, narrow page
  region <region_id> <text>   region-enriched result
  reindex                     rebuild the item index from the catalog store";

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() { eprintln!("{USAGE}"); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn text_arg(args: &[String]) -> String {
    let text = args.join(" ");
    if text.is_empty() { eprintln!("{USAGE}"); std::process::exit(1); }
    text
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let (cmd, args) = parse_args();

    let store = open_store(&settings, None)?;
    let index = open_index(&settings, None, false)?;
    match cmd.as_str() {
        "resolve" | "narrow" => {
            let text = text_arg(&args);
            let service = SearchService::new(index, store, settings.search);
            let groups = if cmd == "resolve" { service.resolve_with_sku_fallback(&text)? } else { service.resolve_narrow(&text)? };
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        "region" => {
            let region_id = args.first().and_then(|r| r.parse::<i64>().ok()).unwrap_or_else(|| {
                eprintln!("Error: region requires a numeric region id"); std::process::exit(1)
            });
            let text = text_arg(&args[1..]);
            let service = SearchService::new(index, store, settings.search);
            let result = service.resolve_for_region(region_id, &text)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        "reindex" => {
            let job = ReindexJob::new(store, index, settings.reindex.batch_size);
            let outcome = reindex_with_progress(&job)?;
            println!("{outcome:?}");
        }
        _ => { eprintln!("Unknown command: {}\n{USAGE}", cmd); std::process::exit(1); }
    }
    Ok(())
}
