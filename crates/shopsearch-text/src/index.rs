use anyhow::{Context, Result};
use std::path::PathBuf;
use tantivy::directory::MmapDirectory;
use tantivy::{Index, IndexReader, IndexWriter, ReloadPolicy, Term};
use tracing::{debug, info};

use shopsearch_core::traits::ItemIndexer;
use shopsearch_core::types::IndexedItem;

use crate::tantivy_utils::{build_schema, register_tokenizers, ItemFields};

const DEFAULT_WRITER_HEAP_BYTES: usize = 50_000_000;

/// Item index backed by tantivy. Implements both the read side
/// (`ItemIndex`, see `search`) and the write side (`ItemIndexer`).
/// Clones share the underlying index and reader.
#[derive(Clone)]
pub struct TantivyItemIndex {
	pub(crate) index: Index,
	pub(crate) reader: IndexReader,
	pub(crate) fields: ItemFields,
	writer_heap_bytes: usize,
}

impl TantivyItemIndex {
	/// Create a fresh index in `index_dir`, wiping whatever was there.
	pub fn create(index_dir: PathBuf) -> Result<Self> {
		if index_dir.exists() { std::fs::remove_dir_all(&index_dir)?; }
		std::fs::create_dir_all(&index_dir)?;
		let index = Index::create_in_dir(&index_dir, build_schema())
			.with_context(|| format!("creating index in {}", index_dir.display()))?;
		info!(dir = %index_dir.display(), "created item index");
		Self::from_index(index)
	}

	pub fn open(index_dir: PathBuf) -> Result<Self> {
		let index = Index::open_in_dir(&index_dir).with_context(|| format!("opening index in {}", index_dir.display()))?;
		Self::from_index(index)
	}

	/// Open the index in `index_dir`, creating an empty one if missing.
	pub fn open_or_create(index_dir: PathBuf) -> Result<Self> {
		std::fs::create_dir_all(&index_dir)?;
		let dir = MmapDirectory::open(&index_dir)?;
		let index = Index::open_or_create(dir, build_schema())?;
		Self::from_index(index)
	}

	pub fn in_memory() -> Result<Self> {
		Self::from_index(Index::create_in_ram(build_schema()))
	}

	fn from_index(index: Index) -> Result<Self> {
		register_tokenizers(&index);
		let fields = ItemFields::from_schema(&index.schema())?;
		let reader: IndexReader = index.reader_builder().reload_policy(ReloadPolicy::Manual).try_into()?;
		Ok(Self { index, reader, fields, writer_heap_bytes: DEFAULT_WRITER_HEAP_BYTES })
	}

	pub fn with_writer_heap(mut self, bytes: usize) -> Self {
		self.writer_heap_bytes = bytes;
		self
	}

	/// Pick up commits made by other writers of the same directory.
	pub fn reload(&self) -> Result<()> {
		self.reader.reload()?;
		Ok(())
	}

	pub fn num_docs(&self) -> u64 { self.reader.searcher().num_docs() }
}

impl ItemIndexer for TantivyItemIndex {
	fn upsert(&self, items: &[IndexedItem]) -> anyhow::Result<usize> {
		if items.is_empty() { return Ok(0); }
		let mut writer: IndexWriter = self.index.writer(self.writer_heap_bytes)?;
		for item in items {
			writer.delete_term(Term::from_field_i64(self.fields.item_id, item.item_id));
			writer.add_document(self.fields.to_document(item))?;
		}
		writer.commit()?;
		self.reader.reload()?;
		debug!(count = items.len(), "upserted items");
		Ok(items.len())
	}
}
