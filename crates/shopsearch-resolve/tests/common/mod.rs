#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;

use shopsearch_core::traits::{CatalogStore, ItemIndex};
use shopsearch_core::types::{CatalogRecord, CatalogueId, CatalogueItem, CategoryRow, IndexedItem, ItemId};

pub fn item(item_id: i64, name: &str, item_type: &str, brand: &str, catalogue_id: i64, catalogue: &str) -> IndexedItem {
    IndexedItem {
        name: name.to_string(),
        full_name: format!("{item_type} {brand} {name}").trim().to_string(),
        item_id,
        catalogue_id,
        catalogue: catalogue.to_string(),
        brand: brand.to_string(),
        item_type: item_type.to_string(),
        description: String::new(),
    }
}

/// Index answering from a script keyed by call signature, e.g.
/// `brand(acme)` or `type_brand(?|Acme|shoe)`. Unscripted calls find
/// nothing. Every call is recorded with its limit.
#[derive(Default)]
pub struct ScriptedIndex {
    answers: HashMap<String, Vec<IndexedItem>>,
    calls: Mutex<Vec<(String, usize)>>,
}

impl ScriptedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn on(mut self, call: &str, items: Vec<IndexedItem>) -> Self {
        self.answers.insert(call.to_string(), items);
        self
    }

    pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().iter().map(|(c, _)| c.clone()).collect() }

    pub fn limits(&self) -> Vec<usize> { self.calls.lock().unwrap().iter().map(|(_, l)| *l).collect() }

    fn answer(&self, call: String, limit: usize) -> Result<Vec<IndexedItem>> {
        let items = self.answers.get(&call).cloned().unwrap_or_default();
        self.calls.lock().unwrap().push((call, limit));
        Ok(items)
    }
}

impl ItemIndex for ScriptedIndex {
    fn find_by_name(&self, prefix: &str, limit: usize) -> Result<Vec<IndexedItem>> { self.answer(format!("name({prefix})"), limit) }

    fn find_by_brand(&self, token: &str, limit: usize) -> Result<Vec<IndexedItem>> { self.answer(format!("brand({token})"), limit) }

    fn find_by_type(&self, text: &str, limit: usize) -> Result<Vec<IndexedItem>> { self.answer(format!("type({text})"), limit) }

    fn find_by_text_and_type(&self, text: &str, item_type: &str, limit: usize) -> Result<Vec<IndexedItem>> {
        self.answer(format!("text_type({text}|{item_type})"), limit)
    }

    fn find_by_text_and_brand(&self, text: &str, brand: &str, limit: usize) -> Result<Vec<IndexedItem>> {
        self.answer(format!("text_brand({text}|{brand})"), limit)
    }

    fn find_by_type_and_brand(&self, text: &str, brand: &str, item_type: &str, limit: usize) -> Result<Vec<IndexedItem>> {
        self.answer(format!("type_brand({text}|{brand}|{item_type})"), limit)
    }

    fn find_by_catalogue_name(&self, text: &str, limit: usize) -> Result<Vec<IndexedItem>> {
        self.answer(format!("catalogue_name({text})"), limit)
    }

    fn find_by_catalogue_id(&self, text: &str, catalogue_id: CatalogueId, limit: usize) -> Result<Vec<IndexedItem>> {
        self.answer(format!("catalogue_id({text}|{catalogue_id})"), limit)
    }

    fn find_by_item_id(&self, item_id: ItemId, limit: usize) -> Result<Vec<IndexedItem>> { self.answer(format!("item_id({item_id})"), limit) }

    fn find_weak(&self, text: &str, limit: usize) -> Result<Vec<IndexedItem>> { self.answer(format!("weak({text})"), limit) }
}

/// Store that only knows SKUs.
#[derive(Default)]
pub struct SkuStore {
    skus: HashMap<String, String>,
}

impl SkuStore {
    pub fn with(mut self, sku: &str, item_id: &str) -> Self {
        self.skus.insert(sku.to_string(), item_id.to_string());
        self
    }
}

impl CatalogStore for SkuStore {
    fn find_item_id_by_sku(&self, sku: &str) -> Result<Option<String>> { Ok(self.skus.get(sku).cloned()) }

    fn find_items(&self, _region_id: i64, _item_ids: &[ItemId]) -> Result<Vec<CatalogueItem>> { Ok(Vec::new()) }

    fn find_categories(&self, _item_ids: &[ItemId]) -> Result<Vec<CategoryRow>> { Ok(Vec::new()) }

    fn count_records(&self) -> Result<usize> { Ok(0) }

    fn for_each_record(&self, _batch_size: usize, _f: &mut dyn FnMut(Vec<CatalogRecord>) -> Result<()>) -> Result<()> { Ok(()) }
}
