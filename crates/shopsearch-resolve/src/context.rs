//! Per-request resolution state.
//!
//! A `ResolutionContext` is created for every query, mutated in place by the
//! pre-pass and the chain stages, and consumed by grouping.

use anyhow::Result;

use shopsearch_core::traits::FUZZY_MARKER;
use shopsearch_core::translit::transliterate;
use shopsearch_core::types::{CatalogueId, IndexedItem};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Residual query: what is left after facet tokens were taken out.
    pub query: String,
    /// The query as the caller sent it.
    pub base_query: String,
    pub brand: String,
    pub item_type: String,
    pub catalogue_id: Option<CatalogueId>,
    /// Items returned by the winning brand probe.
    pub brand_items: Vec<IndexedItem>,
    /// Current candidates.
    pub items: Vec<IndexedItem>,
    /// Whether an empty lookup may be retried with the transliterated text.
    pub need_convert: bool,
    pub page_size: usize,
}

impl ResolutionContext {
    pub fn new(query: impl Into<String>, base_query: impl Into<String>, need_convert: bool, page_size: usize) -> Self {
        Self { query: query.into(), base_query: base_query.into(), need_convert, page_size, ..Self::default() }
    }

    pub fn tokens(&self) -> Vec<String> { self.query.split_whitespace().map(str::to_string).collect() }

    /// Take `token` out of the residual; the rest is re-joined by single spaces.
    pub fn remove_token(&mut self, token: &str) {
        self.query = self.query.split_whitespace().filter(|t| *t != token).collect::<Vec<_>>().join(" ");
    }

    pub fn mark_fuzzy(&mut self) { self.query = with_marker(&self.query); }
}

pub fn with_marker(text: &str) -> String { format!("{text}{FUZZY_MARKER}") }

/// Transliterate `text`, keeping a trailing fuzzy marker in place.
pub fn convert_query(text: &str) -> String {
    match text.strip_suffix(FUZZY_MARKER) {
        Some(body) => with_marker(&transliterate(body)),
        None => transliterate(text),
    }
}

/// Collapse whitespace runs into single spaces.
pub fn collapse_whitespace(text: &str) -> String { text.split_whitespace().collect::<Vec<_>>().join(" ") }

/// Run `lookup` on `text`; an empty answer is retried once on the
/// transliterated text when `need_convert` allows it.
pub fn with_convert_retry<F>(text: &str, need_convert: bool, mut lookup: F) -> Result<Vec<IndexedItem>>
where
    F: FnMut(&str) -> Result<Vec<IndexedItem>>,
{
    let items = lookup(text)?;
    if items.is_empty() && need_convert {
        return lookup(&convert_query(text));
    }
    Ok(items)
}
