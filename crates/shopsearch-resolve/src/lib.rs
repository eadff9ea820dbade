#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod chain;
pub mod context;
pub mod enrich;
pub mod grouping;
pub mod prepass;
pub mod reindex;
pub mod service;

pub use context::ResolutionContext;
pub use reindex::{ReindexJob, ReindexOutcome};
pub use service::SearchService;
