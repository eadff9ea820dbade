//! Domain types shared by the index, the catalog store and the resolver.

use serde::{Deserialize, Serialize};

pub type ItemId = i64;
pub type CatalogueId = i64;

/// One document of the search index.
///
/// - `item_id`: identity of the item, unique across the index
/// - `catalogue_id`/`catalogue`: the catalogue the item is listed in
/// - `full_name`: display name, "<type> <brand> <name>" at indexing time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedItem {
    pub name: String,
    pub full_name: String,
    pub item_id: ItemId,
    pub catalogue_id: CatalogueId,
    pub catalogue: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub description: String,
}

/// The externally visible unit of a resolution.
///
/// `items == None` is a group reference: the caller lands on the catalogue
/// (or brand page) instead of listing items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueGroup {
    pub catalogue: String,
    pub catalogue_id: CatalogueId,
    pub items: Option<Vec<IndexedItem>>,
    pub brand: Option<String>,
}

impl CatalogueGroup {
    pub fn new(catalogue: impl Into<String>, catalogue_id: CatalogueId, items: Option<Vec<IndexedItem>>, brand: Option<String>) -> Self {
        Self { catalogue: catalogue.into(), catalogue_id, items, brand }
    }

    /// A group holding exactly `item`, named after the item's catalogue.
    pub fn single(item: IndexedItem, brand: Option<String>) -> Self {
        Self { catalogue: item.catalogue.clone(), catalogue_id: item.catalogue_id, items: Some(vec![item]), brand }
    }

    pub fn item_count(&self) -> usize { self.items.as_ref().map_or(0, Vec::len) }

    pub fn first_item(&self) -> Option<&IndexedItem> { self.items.as_ref().and_then(|items| items.first()) }
}

/// Empty brand means "no brand" on the outside.
pub fn normalize_brand(brand: &str) -> Option<String> {
    if brand.is_empty() { None } else { Some(brand.to_string()) }
}

/// A relational catalog row as streamed by re-indexing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub item_id: ItemId,
    pub name: String,
    pub brand: String,
    pub item_type: String,
    pub description: String,
    pub catalogue_id: CatalogueId,
    pub catalogue: String,
}

impl From<CatalogRecord> for IndexedItem {
    fn from(r: CatalogRecord) -> Self {
        let full_name = [r.item_type.as_str(), r.brand.as_str(), r.name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            name: r.name,
            full_name,
            item_id: r.item_id,
            catalogue_id: r.catalogue_id,
            catalogue: r.catalogue,
            brand: r.brand,
            item_type: r.item_type,
            description: r.description,
        }
    }
}

/// An item enriched with region-specific presentation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub item_id: ItemId,
    pub name: String,
    pub price: i64,
    pub url: String,
    pub image: Option<String>,
    pub catalogue: String,
}

/// Raw breadcrumb row: the item's catalogue and its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub name: String,
    pub parent_name: String,
    pub code: String,
    pub parent_code: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub parent_name: String,
    pub url: String,
    pub parent_url: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryKind {
    SeeAlso,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeHelpText {
    pub kind: QueryKind,
    pub text: String,
}

/// Region-aware response of the enrichment path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<CatalogueItem>,
    pub categories: Vec<Category>,
    pub type_queries: Vec<TypeHelpText>,
}
