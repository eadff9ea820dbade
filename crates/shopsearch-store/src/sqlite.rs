use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tracing::debug;

use shopsearch_core::traits::CatalogStore;
use shopsearch_core::types::{CatalogRecord, CatalogueItem, CategoryRow, ItemId};

use crate::schema::SCHEMA_SQL;

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for SqliteCatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteCatalogStore").finish_non_exhaustive()
    }
}

impl SqliteCatalogStore {
    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn.lock().map_err(|_| anyhow!("sqlite connection mutex poisoned"))?;
        f(&conn)
    }

    /// Open (or create) the catalog at `path` and make sure the tables exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Run raw SQL against the catalog. Used to load fixtures and dumps.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.with_conn(|conn| Ok(conn.execute_batch(sql)?))
    }
}

/// `?2, ?3, ...` for `count` values starting at parameter `first`.
fn placeholders(first: usize, count: usize) -> String {
    (first..first + count).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

/// Order rows by the position of their item id in `ids`.
fn sort_by_request<T>(rows: &mut [(ItemId, T)], ids: &[ItemId]) {
    rows.sort_by_key(|(id, _)| ids.iter().position(|x| x == id).unwrap_or(usize::MAX));
}

impl CatalogStore for SqliteCatalogStore {
    fn find_item_id_by_sku(&self, sku: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row("SELECT item_id FROM item_sku WHERE sku = ?1", params![sku], |row| row.get::<_, String>(0))
                .optional()?;
            Ok(value)
        })
    }

    fn find_items(&self, region_id: i64, item_ids: &[ItemId]) -> Result<Vec<CatalogueItem>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.with_conn(|conn| {
            let sql = format!(
                r"
                SELECT
                  i.item_id,
                  i.name,
                  r.price,
                  i.url,
                  (
                    SELECT im.url
                    FROM item_image im
                    WHERE im.item_id = i.item_id
                    ORDER BY im.position ASC
                    LIMIT 1
                  ) AS image,
                  c.name
                FROM item i
                JOIN remain r ON r.item_id = i.item_id AND r.region_id = ?1
                JOIN catalogue c ON c.catalogue_id = i.catalogue_id
                WHERE i.item_id IN ({})
                ",
                placeholders(2, item_ids.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let values = std::iter::once(region_id).chain(item_ids.iter().copied());
            let rows = stmt.query_map(params_from_iter(values), |row| {
                let item_id = row.get::<_, i64>(0)?;
                Ok((
                    item_id,
                    CatalogueItem {
                        item_id,
                        name: row.get(1)?,
                        price: row.get(2)?,
                        url: row.get(3)?,
                        image: row.get(4)?,
                        catalogue: row.get(5)?,
                    },
                ))
            })?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            sort_by_request(&mut out, item_ids);
            debug!(region_id, requested = item_ids.len(), found = out.len(), "enriched items");
            Ok(out.into_iter().map(|(_, item)| item).collect())
        })
    }

    fn find_categories(&self, item_ids: &[ItemId]) -> Result<Vec<CategoryRow>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.with_conn(|conn| {
            let sql = format!(
                r"
                SELECT
                  i.item_id,
                  c.name,
                  COALESCE(p.name, ''),
                  c.code,
                  COALESCE(p.code, ''),
                  c.image
                FROM item i
                JOIN catalogue c ON c.catalogue_id = i.catalogue_id
                LEFT JOIN catalogue p ON p.catalogue_id = c.parent_id
                WHERE i.item_id IN ({})
                ",
                placeholders(1, item_ids.len())
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(item_ids.iter()), |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    CategoryRow {
                        name: row.get(1)?,
                        parent_name: row.get(2)?,
                        code: row.get(3)?,
                        parent_code: row.get(4)?,
                        image: row.get(5)?,
                    },
                ))
            })?;
            let mut out = Vec::new();
            for row in rows {
                out.push(row?);
            }
            sort_by_request(&mut out, item_ids);
            Ok(out.into_iter().map(|(_, category)| category).collect())
        })
    }

    fn count_records(&self) -> Result<usize> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM item", [], |row| row.get::<_, i64>(0))?;
            Ok(usize::try_from(count).unwrap_or(0))
        })
    }

    fn for_each_record(&self, batch_size: usize, f: &mut dyn FnMut(Vec<CatalogRecord>) -> Result<()>) -> Result<()> {
        let batch_size = batch_size.max(1);
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT
                  i.item_id,
                  i.name,
                  COALESCE(i.brand, ''),
                  COALESCE(i.type, ''),
                  COALESCE(i.description, ''),
                  i.catalogue_id,
                  c.name
                FROM item i
                JOIN catalogue c ON c.catalogue_id = i.catalogue_id
                ORDER BY i.item_id ASC
                ",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(CatalogRecord {
                    item_id: row.get(0)?,
                    name: row.get(1)?,
                    brand: row.get(2)?,
                    item_type: row.get(3)?,
                    description: row.get(4)?,
                    catalogue_id: row.get(5)?,
                    catalogue: row.get(6)?,
                })
            })?;
            let mut batch = Vec::with_capacity(batch_size);
            for row in rows {
                batch.push(row?);
                if batch.len() == batch_size {
                    f(std::mem::replace(&mut batch, Vec::with_capacity(batch_size)))?;
                }
            }
            if !batch.is_empty() {
                f(batch)?;
            }
            Ok(())
        })
    }
}
