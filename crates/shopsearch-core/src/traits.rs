use crate::types::{CatalogRecord, CatalogueId, CatalogueItem, CategoryRow, IndexedItem, ItemId};

/// Trailing marker asking the index to match the text loosely.
pub const FUZZY_MARKER: char = '?';

/// Read side of the item search index.
///
/// Every lookup is bounded by `limit` and returns items in index order
/// (best match first). An empty vector is a normal outcome, never an error.
/// Query text ending with [`FUZZY_MARKER`] asks for loose matching.
pub trait ItemIndex: Send + Sync {
    /// Literal, case-insensitive prefix match on the item name.
    fn find_by_name(&self, prefix: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_brand(&self, token: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_type(&self, text: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_text_and_type(&self, text: &str, item_type: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_text_and_brand(&self, text: &str, brand: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_type_and_brand(&self, text: &str, brand: &str, item_type: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_catalogue_name(&self, text: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_catalogue_id(&self, text: &str, catalogue_id: CatalogueId, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    fn find_by_item_id(&self, item_id: ItemId, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
    /// Weakest mode: any token, any field, order independent.
    fn find_weak(&self, text: &str, limit: usize) -> anyhow::Result<Vec<IndexedItem>>;
}

/// Write side of the item index, used only by re-indexing.
pub trait ItemIndexer: Send + Sync {
    /// Replace-or-insert by `item_id`; returns how many items were written.
    fn upsert(&self, items: &[IndexedItem]) -> anyhow::Result<usize>;
}

/// Relational catalog, read-only from the resolver's point of view.
pub trait CatalogStore: Send + Sync {
    /// Raw identifier stored for the SKU; not guaranteed to be numeric.
    fn find_item_id_by_sku(&self, sku: &str) -> anyhow::Result<Option<String>>;
    fn find_items(&self, region_id: i64, item_ids: &[ItemId]) -> anyhow::Result<Vec<CatalogueItem>>;
    fn find_categories(&self, item_ids: &[ItemId]) -> anyhow::Result<Vec<CategoryRow>>;
    fn count_records(&self) -> anyhow::Result<usize>;
    /// Streams the whole catalog in batches of at most `batch_size` records.
    fn for_each_record(&self, batch_size: usize, f: &mut dyn FnMut(Vec<CatalogRecord>) -> anyhow::Result<()>) -> anyhow::Result<()>;
}
