pub mod feed;
pub mod schema;

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::debug;

use crate::menu::types::MenuEntry;

pub use feed::MenuFeed;

/// Local menu cache backed by SQLite.
///
/// Constructed once per process and shared behind an `Arc`. Every committed
/// insert that adds rows is pushed to subscribers as a fresh snapshot.
pub struct MenuStore {
  conn: Mutex<Connection>,
  snapshot: watch::Sender<Vec<MenuEntry>>,
}

impl MenuStore {
  /// Open or create the cache database at `path`
  pub fn open(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create database directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open database at {}: {}", path.display(), e))?;

    Self::with_connection(conn)
  }

  /// Open a throwaway database that lives only as long as the store
  pub fn open_in_memory() -> Result<Self> {
    let conn =
      Connection::open_in_memory().map_err(|e| eyre!("Failed to open in-memory database: {}", e))?;
    Self::with_connection(conn)
  }

  fn with_connection(conn: Connection) -> Result<Self> {
    conn
      .execute_batch(schema::SCHEMA)
      .map_err(|e| eyre!("Failed to run migrations: {}", e))?;

    let initial = load_all(&conn)?;
    debug!(rows = initial.len(), "Opened menu cache");
    let (snapshot, _) = watch::channel(initial);

    Ok(Self {
      conn: Mutex::new(conn),
      snapshot,
    })
  }

  /// Insert entries in a single transaction, skipping ids already present.
  ///
  /// Returns how many rows were actually added. Existing rows are never
  /// overwritten.
  pub fn insert_many(&self, entries: &[MenuEntry]) -> Result<usize> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let tx = conn
      .unchecked_transaction()
      .map_err(|e| eyre!("Failed to begin transaction: {}", e))?;

    let mut inserted = 0;
    {
      let mut stmt = tx
        .prepare(
          "INSERT OR IGNORE INTO menu_item (id, title, description, price, image, category)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .map_err(|e| eyre!("Failed to prepare insert: {}", e))?;

      for entry in entries {
        inserted += stmt
          .execute(params![
            entry.id,
            entry.title,
            entry.description,
            entry.price,
            entry.image,
            entry.category
          ])
          .map_err(|e| eyre!("Failed to insert menu item {}: {}", entry.id, e))?;
      }
    }

    tx.commit()
      .map_err(|e| eyre!("Failed to commit transaction: {}", e))?;

    debug!(offered = entries.len(), inserted, "Inserted menu items");

    if inserted > 0 {
      let rows = load_all(&conn)?;
      self.snapshot.send_replace(rows);
    }

    Ok(inserted)
  }

  /// Subscribe to the live contents of the menu table
  pub fn subscribe(&self) -> MenuFeed {
    MenuFeed::new(self.snapshot.subscribe())
  }

  /// One-off read of every stored entry, in storage order
  pub fn snapshot(&self) -> Vec<MenuEntry> {
    self.snapshot.borrow().clone()
  }

  /// Record that a sync just completed
  pub fn mark_synced(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute(
        "INSERT OR REPLACE INTO sync_state (id, last_synced_at) VALUES (1, datetime('now'))",
        [],
      )
      .map_err(|e| eyre!("Failed to record sync time: {}", e))?;

    Ok(())
  }

  /// When the last successful sync completed, if one ever did
  pub fn last_synced_at(&self) -> Result<Option<DateTime<Utc>>> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let mut stmt = conn
      .prepare("SELECT last_synced_at FROM sync_state WHERE id = 1")
      .map_err(|e| eyre!("Failed to prepare query: {}", e))?;

    let result: Option<String> = stmt
      .query_row([], |row| row.get(0))
      .optional()
      .map_err(|e| eyre!("Failed to read sync state: {}", e))?;

    result.map(|s| parse_datetime(&s)).transpose()
  }
}

/// Read every row of the menu table. No ORDER BY: order is whatever SQLite
/// returns.
fn load_all(conn: &Connection) -> Result<Vec<MenuEntry>> {
  let mut stmt = conn
    .prepare("SELECT id, title, description, price, image, category FROM menu_item")
    .map_err(|e| eyre!("Failed to prepare menu query: {}", e))?;

  let rows = stmt
    .query_map([], |row| {
      Ok(MenuEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        image: row.get(4)?,
        category: row.get(5)?,
      })
    })
    .map_err(|e| eyre!("Failed to query menu items: {}", e))?
    .collect::<rusqlite::Result<Vec<_>>>()
    .map_err(|e| eyre!("Failed to read menu item: {}", e))?;

  Ok(rows)
}

/// Parse a datetime string from SQLite format.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
  // SQLite stores as "YYYY-MM-DD HH:MM:SS"
  chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|dt| dt.and_utc())
    .map_err(|e| eyre!("Failed to parse datetime '{}': {}", s, e))
}
