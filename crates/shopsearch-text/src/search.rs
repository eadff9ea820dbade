use anyhow::Result;
use tantivy::collector::TopDocs;
use tantivy::query::Query;
use tantivy::TantivyDocument;
use tracing::trace;

use shopsearch_core::traits::ItemIndex;
use shopsearch_core::types::{CatalogueId, IndexedItem, ItemId};

use crate::index::TantivyItemIndex;
use crate::query::{id_query, must_all, prefix_query, QueryText};

impl TantivyItemIndex {
	fn run(&self, query: &dyn Query, limit: usize) -> Result<Vec<IndexedItem>> {
		let searcher = self.reader.searcher();
		let top_docs = searcher.search(query, &TopDocs::with_limit(limit.max(1)))?;
		let mut items = Vec::with_capacity(top_docs.len());
		for (_score, addr) in top_docs {
			let doc: TantivyDocument = searcher.doc(addr)?;
			items.push(self.fields.from_document(&doc));
		}
		trace!(query = ?query, hits = items.len(), "item lookup");
		Ok(items)
	}

	/// Single-field probe: nothing to look for means nothing found.
	fn probe(&self, field: tantivy::schema::Field, text: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		match QueryText::parse(text).all_tokens(&[field]) {
			Some(q) => self.run(q.as_ref(), limit),
			None => Ok(Vec::new()),
		}
	}

	fn text_clause(&self, text: &str) -> Option<Box<dyn Query>> {
		QueryText::parse(text).all_tokens(&self.fields.text_fields())
	}

	fn run_all(&self, clauses: Vec<Option<Box<dyn Query>>>, limit: usize) -> Result<Vec<IndexedItem>> {
		match must_all(clauses) {
			Some(q) => self.run(q.as_ref(), limit),
			None => Ok(Vec::new()),
		}
	}

	fn filter_clause(&self, field: tantivy::schema::Field, value: &str) -> Option<Box<dyn Query>> {
		QueryText::parse(value).all_tokens(&[field])
	}
}

impl ItemIndex for TantivyItemIndex {
	fn find_by_name(&self, prefix: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		if prefix.is_empty() { return Ok(Vec::new()); }
		let q = prefix_query(self.fields.name_prefix, prefix)?;
		self.run(q.as_ref(), limit)
	}

	fn find_by_brand(&self, token: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		self.probe(self.fields.brand, token, limit)
	}

	fn find_by_type(&self, text: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		self.probe(self.fields.item_type, text, limit)
	}

	fn find_by_text_and_type(&self, text: &str, item_type: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		self.run_all(vec![self.text_clause(text), self.filter_clause(self.fields.item_type, item_type)], limit)
	}

	fn find_by_text_and_brand(&self, text: &str, brand: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		self.run_all(vec![self.text_clause(text), self.filter_clause(self.fields.brand, brand)], limit)
	}

	fn find_by_type_and_brand(&self, text: &str, brand: &str, item_type: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		self.run_all(
			vec![
				self.text_clause(text),
				self.filter_clause(self.fields.brand, brand),
				self.filter_clause(self.fields.item_type, item_type),
			],
			limit,
		)
	}

	fn find_by_catalogue_name(&self, text: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		self.probe(self.fields.catalogue, text, limit)
	}

	fn find_by_catalogue_id(&self, text: &str, catalogue_id: CatalogueId, limit: usize) -> Result<Vec<IndexedItem>> {
		self.run_all(vec![self.text_clause(text), Some(id_query(self.fields.catalogue_id, catalogue_id))], limit)
	}

	fn find_by_item_id(&self, item_id: ItemId, limit: usize) -> Result<Vec<IndexedItem>> {
		self.run(id_query(self.fields.item_id, item_id).as_ref(), limit)
	}

	fn find_weak(&self, text: &str, limit: usize) -> Result<Vec<IndexedItem>> {
		match QueryText::parse(text).any_token(&self.fields.all_text_fields()) {
			Some(q) => self.run(q.as_ref(), limit),
			None => Ok(Vec::new()),
		}
	}
}
