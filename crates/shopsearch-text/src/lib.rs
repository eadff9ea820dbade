//! shopsearch-text
//!
//! Tantivy-backed item index. `index` owns the on-disk index and the write
//! path, `search` answers the `ItemIndex` lookups, `query` builds the tantivy
//! queries behind them.

pub mod tantivy_utils;
pub mod index;
pub mod query;
pub mod search;

pub use index::TantivyItemIndex;
