use tantivy::schema::{Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, Value, FAST, INDEXED, STORED};
use tantivy::tokenizer::{LowerCaser, RawTokenizer, SimpleTokenizer, TextAnalyzer, Token, TokenStream};
use tantivy::{doc, Index, TantivyDocument};

use shopsearch_core::types::IndexedItem;

pub const ITEM_ANALYZER: &str = "item_text";
pub const NAME_PREFIX_ANALYZER: &str = "raw_lower";

pub fn build_schema() -> Schema {
	let mut schema_builder = Schema::builder();
	let _item_id = schema_builder.add_i64_field("item_id", INDEXED | STORED | FAST);
	let _catalogue_id = schema_builder.add_i64_field("catalogue_id", INDEXED | STORED);
	let text_indexing = TextFieldIndexing::default().set_tokenizer(ITEM_ANALYZER).set_index_option(IndexRecordOption::WithFreqsAndPositions);
	let text_options = TextOptions::default().set_indexing_options(text_indexing).set_stored();
	for name in ["name", "full_name", "catalogue", "brand", "type", "description"] {
		schema_builder.add_text_field(name, text_options.clone());
	}
	// whole lower-cased name as a single term, for literal prefix lookups
	let prefix_indexing = TextFieldIndexing::default().set_tokenizer(NAME_PREFIX_ANALYZER).set_index_option(IndexRecordOption::Basic);
	let _name_prefix = schema_builder.add_text_field("name_prefix", TextOptions::default().set_indexing_options(prefix_indexing));
	schema_builder.build()
}

pub fn item_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default()).filter(LowerCaser).build()
}

pub fn register_tokenizers(index: &Index) {
	index.tokenizers().register(ITEM_ANALYZER, item_analyzer());
	index.tokenizers().register(NAME_PREFIX_ANALYZER, TextAnalyzer::builder(RawTokenizer::default()).filter(LowerCaser).build());
}

/// Tokens of `text` exactly as the item fields were indexed.
pub fn analyze(text: &str) -> Vec<String> {
	let mut analyzer = item_analyzer();
	let mut stream = analyzer.token_stream(text);
	let mut tokens = Vec::new();
	stream.process(&mut |token: &Token| tokens.push(token.text.clone()));
	tokens
}

/// Resolved field handles of the item schema.
#[derive(Debug, Clone, Copy)]
pub struct ItemFields {
	pub item_id: Field,
	pub catalogue_id: Field,
	pub name: Field,
	pub name_prefix: Field,
	pub full_name: Field,
	pub catalogue: Field,
	pub brand: Field,
	pub item_type: Field,
	pub description: Field,
}

impl ItemFields {
	pub fn from_schema(schema: &Schema) -> tantivy::Result<Self> {
		Ok(Self {
			item_id: schema.get_field("item_id")?,
			catalogue_id: schema.get_field("catalogue_id")?,
			name: schema.get_field("name")?,
			name_prefix: schema.get_field("name_prefix")?,
			full_name: schema.get_field("full_name")?,
			catalogue: schema.get_field("catalogue")?,
			brand: schema.get_field("brand")?,
			item_type: schema.get_field("type")?,
			description: schema.get_field("description")?,
		})
	}

	/// Fields free query text is matched against in scoped lookups.
	pub fn text_fields(&self) -> [Field; 3] { [self.name, self.full_name, self.description] }

	pub fn all_text_fields(&self) -> [Field; 6] { [self.name, self.full_name, self.catalogue, self.brand, self.item_type, self.description] }

	pub fn to_document(&self, item: &IndexedItem) -> TantivyDocument {
		doc!(
			self.item_id => item.item_id,
			self.catalogue_id => item.catalogue_id,
			self.name => item.name.clone(),
			self.name_prefix => item.name.clone(),
			self.full_name => item.full_name.clone(),
			self.catalogue => item.catalogue.clone(),
			self.brand => item.brand.clone(),
			self.item_type => item.item_type.clone(),
			self.description => item.description.clone(),
		)
	}

	pub fn from_document(&self, doc: &TantivyDocument) -> IndexedItem {
		let text = |field: Field| doc.get_first(field).and_then(|v| v.as_str()).unwrap_or("").to_string();
		let number = |field: Field| doc.get_first(field).and_then(|v| v.as_i64()).unwrap_or(0);
		IndexedItem {
			name: text(self.name),
			full_name: text(self.full_name),
			item_id: number(self.item_id),
			catalogue_id: number(self.catalogue_id),
			catalogue: text(self.catalogue),
			brand: text(self.brand),
			item_type: text(self.item_type),
			description: text(self.description),
		}
	}
}
