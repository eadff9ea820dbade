//! Region-aware result assembly on top of resolution.

use std::collections::HashSet;

use anyhow::Result;
use tracing::debug;

use shopsearch_core::traits::{CatalogStore, ItemIndex};
use shopsearch_core::types::{CatalogueGroup, Category, CategoryRow, ItemId, QueryKind, SearchResult, TypeHelpText};

use crate::service::SearchService;

impl<I, S> SearchService<I, S> where I: ItemIndex, S: CatalogStore {
    /// Resolve `text` and join the matched items with the region's prices,
    /// images and category breadcrumbs.
    pub fn resolve_for_region(&self, region_id: i64, text: &str) -> Result<SearchResult> {
        let groups = match self.resolve_by_sku(text)? {
            Some(groups) => groups,
            None => self.resolve_narrow(text)?,
        };
        let brand = groups.first().and_then(|g| g.brand.as_deref()).unwrap_or_default().to_lowercase();

        let ids: Vec<ItemId> = groups.iter().flat_map(|g| g.items.iter().flatten()).map(|i| i.item_id).collect();
        let items = self.store().find_items(region_id, &ids)?;
        let enriched: Vec<ItemId> = items.iter().map(|i| i.item_id).collect();
        let categories = build_categories(self.store().find_categories(&enriched)?, &brand);
        debug!(region_id, groups = groups.len(), items = items.len(), categories = categories.len(), "region result");

        Ok(SearchResult { items, categories, type_queries: suggestion(&groups) })
    }
}

/// One category per catalogue code, first row wins.
pub fn build_categories(rows: Vec<CategoryRow>, brand: &str) -> Vec<Category> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.code.clone()))
        .map(|row| {
            let mut url = format!("/cat/{}", row.code);
            if !brand.is_empty() {
                url.push_str(&format!("/brands/{brand}"));
            }
            Category { url, parent_url: format!("/cat/{}", row.parent_code), name: row.name, parent_name: row.parent_name, image: row.image }
        })
        .collect()
}

/// "See also" hint built from the first group: its first item's type and its brand.
pub fn suggestion(groups: &[CatalogueGroup]) -> Vec<TypeHelpText> {
    let Some(group) = groups.first() else {
        return Vec::new();
    };
    let item_type = group.first_item().map(|i| i.item_type.as_str()).unwrap_or_default();
    let brand = group.brand.as_deref().unwrap_or_default();
    vec![TypeHelpText { kind: QueryKind::SeeAlso, text: format!("{item_type} {brand}").trim().to_string() }]
}
