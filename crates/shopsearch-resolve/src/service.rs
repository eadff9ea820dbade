use anyhow::Result;
use tracing::{debug, warn};

use shopsearch_core::config::SearchSettings;
use shopsearch_core::error::Error;
use shopsearch_core::traits::{CatalogStore, ItemIndex};
use shopsearch_core::translit::{contains_unsafe_chars, is_numeric, transliterate};
use shopsearch_core::types::{normalize_brand, CatalogueGroup, ItemId};

use crate::context::ResolutionContext;
use crate::grouping::group_items;
use crate::{chain, prepass};

/// Resolves free-text queries against the item index, falling back on the
/// catalog store for SKU lookups and region enrichment.
pub struct SearchService<I, S> where I: ItemIndex, S: CatalogStore {
    index: I,
    store: S,
    settings: SearchSettings,
}

impl<I, S> SearchService<I, S> where I: ItemIndex, S: CatalogStore {
    pub fn new(index: I, store: S, settings: SearchSettings) -> Self { Self { index, store, settings } }

    pub fn index(&self) -> &I { &self.index }

    pub fn store(&self) -> &S { &self.store }

    pub fn settings(&self) -> SearchSettings { self.settings }

    /// Heuristic resolution with the wide page.
    pub fn resolve(&self, text: &str) -> Result<Vec<CatalogueGroup>> { self.resolve_heuristic(text, self.settings.page_size) }

    /// Heuristic resolution with the narrow page.
    pub fn resolve_narrow(&self, text: &str) -> Result<Vec<CatalogueGroup>> {
        self.resolve_heuristic(text, self.settings.narrow_page_size)
    }

    /// SKU fast path for numeric text, heuristic resolution otherwise.
    pub fn resolve_with_sku_fallback(&self, text: &str) -> Result<Vec<CatalogueGroup>> {
        match self.resolve_by_sku(text)? {
            Some(groups) => Ok(groups),
            None => self.resolve(text),
        }
    }

    /// `None` means the caller has to resolve heuristically: the text is not
    /// numeric, or neither the SKU nor a name prefix matched.
    pub fn resolve_by_sku(&self, text: &str) -> Result<Option<Vec<CatalogueGroup>>> {
        if !is_numeric(Some(text)) {
            return Ok(None);
        }
        let Some(raw_id) = self.store.find_item_id_by_sku(text)? else {
            let groups = self.resolve_by_item_name(text)?;
            debug!(sku = text, groups = groups.len(), "no sku row, tried name prefix");
            return Ok((!groups.is_empty()).then_some(groups));
        };
        let Ok(item_id) = raw_id.trim().parse::<ItemId>() else {
            warn!(sku = text, item_id = %raw_id, "sku points to a non-numeric item id");
            return Ok(None);
        };
        match self.resolve_by_item_id(item_id) {
            Ok(groups) => Ok(Some(groups)),
            Err(err) if Error::is_not_found(&err) => {
                warn!(sku = text, item_id, "sku points to an item missing from the index");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Literal name-prefix lookup, grouped without a brand.
    pub fn resolve_by_item_name(&self, name: &str) -> Result<Vec<CatalogueGroup>> {
        let items = self.index.find_by_name(name, self.settings.page_size)?;
        Ok(group_items(items, name, ""))
    }

    /// The singleton group of one indexed item; [`Error::NotFound`] when the
    /// index does not know it.
    pub fn resolve_by_item_id(&self, item_id: ItemId) -> Result<Vec<CatalogueGroup>> {
        let mut items = self.index.find_by_item_id(item_id, 1)?;
        if items.is_empty() {
            return Err(Error::NotFound(format!("item {item_id}")).into());
        }
        let item = items.swap_remove(0);
        let brand = normalize_brand(&item.brand);
        Ok(vec![CatalogueGroup::single(item, brand)])
    }

    fn resolve_heuristic(&self, text: &str, page_size: usize) -> Result<Vec<CatalogueGroup>> {
        let mut query = text.to_string();
        let mut need_convert = true;
        if contains_unsafe_chars(&query) {
            query = transliterate(&query);
            need_convert = false;
        } else if contains_unsafe_chars(&transliterate(&query)) {
            need_convert = false;
        }
        let mut ctx = ResolutionContext::new(query, text, need_convert, page_size);

        prepass::run(&self.index, &mut ctx)?;
        if let Some(group) = prepass::brand_only_group(&ctx) {
            debug!(brand = %ctx.brand, "brand-only query");
            return Ok(vec![group]);
        }
        ctx.mark_fuzzy();
        chain::run(&self.index, &mut ctx)?;

        let items = std::mem::take(&mut ctx.items);
        let groups = group_items(items, &ctx.query, &ctx.brand);
        debug!(query = text, brand = %ctx.brand, item_type = %ctx.item_type, groups = groups.len(), "resolved");
        Ok(groups)
    }
}
