/// Schema for the menu cache.
///
/// `menu_item` mirrors the remote menu record one column per field. Rows are
/// only ever inserted; a row with an existing id is left untouched.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS menu_item (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    price TEXT NOT NULL,
    image TEXT NOT NULL,
    category TEXT NOT NULL
);

-- Single row holding the completion time of the last successful sync
CREATE TABLE IF NOT EXISTS sync_state (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    last_synced_at TEXT NOT NULL
);
"#;
