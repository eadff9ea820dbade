use std::collections::HashMap;

use shopsearch_core::traits::FUZZY_MARKER;
use shopsearch_core::types::{normalize_brand, CatalogueGroup, CatalogueId, IndexedItem};

/// Bucket `items` by catalogue, or collapse them to the exact match.
///
/// An item is an exact match for `text` (fuzzy markers ignored) when its name
/// is the whole text, or when the text starts with the item type and ends
/// with its name. The first such item wins and becomes the only group.
pub fn group_items(items: Vec<IndexedItem>, text: &str, brand: &str) -> Vec<CatalogueGroup> {
    let text = text.replace(FUZZY_MARKER, "");
    let brand = normalize_brand(brand);

    let mut exact: Option<IndexedItem> = None;
    let mut slots: HashMap<CatalogueId, usize> = HashMap::new();
    let mut buckets: Vec<Vec<IndexedItem>> = Vec::new();
    for item in items {
        if exact.is_none() && is_exact_match(&text, &item) {
            exact = Some(item.clone());
        }
        let slot = *slots.entry(item.catalogue_id).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(item);
    }

    if let Some(item) = exact {
        return vec![CatalogueGroup::single(item, brand)];
    }
    buckets
        .into_iter()
        .filter_map(|bucket| {
            let first = bucket.first()?;
            let (catalogue, catalogue_id) = (first.catalogue.clone(), first.catalogue_id);
            Some(CatalogueGroup::new(catalogue, catalogue_id, Some(bucket), brand.clone()))
        })
        .collect()
}

fn is_exact_match(text: &str, item: &IndexedItem) -> bool {
    if item.name.is_empty() {
        return false;
    }
    text == item.name || (text.ends_with(item.name.as_str()) && text.starts_with(item.item_type.as_str()))
}
