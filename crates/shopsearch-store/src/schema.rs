/// Catalog tables. `item_sku.item_id` is text on purpose: SKUs imported from
/// suppliers are not guaranteed to point at a numeric item id.
pub const SCHEMA_SQL: &str = r"
    PRAGMA foreign_keys = ON;
    CREATE TABLE IF NOT EXISTS catalogue (
        catalogue_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        code TEXT NOT NULL,
        parent_id INTEGER REFERENCES catalogue(catalogue_id),
        image TEXT
    );

    CREATE TABLE IF NOT EXISTS item (
        item_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        brand TEXT,
        type TEXT,
        description TEXT,
        url TEXT NOT NULL DEFAULT '',
        catalogue_id INTEGER NOT NULL REFERENCES catalogue(catalogue_id)
    );

    CREATE TABLE IF NOT EXISTS item_sku (
        sku TEXT PRIMARY KEY,
        item_id TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS remain (
        item_id INTEGER NOT NULL REFERENCES item(item_id),
        region_id INTEGER NOT NULL,
        price INTEGER NOT NULL,
        PRIMARY KEY (item_id, region_id)
    );

    CREATE TABLE IF NOT EXISTS item_image (
        item_id INTEGER NOT NULL REFERENCES item(item_id),
        position INTEGER NOT NULL DEFAULT 0,
        url TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_item_catalogue ON item(catalogue_id);
    CREATE INDEX IF NOT EXISTS idx_item_image_item ON item_image(item_id, position);
";
