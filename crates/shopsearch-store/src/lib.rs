//! shopsearch-store
//!
//! SQLite catalog: SKU lookups, region enrichment joins and the record
//! stream consumed by re-indexing.

pub mod schema;
pub mod sqlite;

pub use schema::SCHEMA_SQL;
pub use sqlite::SqliteCatalogStore;
