//! One-shot startup sync: fetch the remote menu and merge it into the cache.

use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::db::MenuStore;

use super::api_types::ApiMenuItem;
use super::client::MenuClient;
use super::types::MenuEntry;

/// Outcome of a completed sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
  /// Records in the remote document
  pub fetched: usize,
  /// Records that were new to the cache
  pub inserted: usize,
}

/// Handle to the background sync task.
///
/// Dropping it does not cancel the task; presentation never waits on it and
/// learns about new rows through the store's feed instead.
pub struct SyncHandle {
  task: JoinHandle<()>,
}

impl SyncHandle {
  /// Wait for the task to run to completion
  pub async fn wait(self) {
    if let Err(e) = self.task.await {
      if !e.is_cancelled() {
        warn!(error = %e, "Menu sync task panicked");
      }
    }
  }

  pub fn abort(&self) {
    self.task.abort();
  }
}

/// Start the sync on a background task. Failures are logged and dropped:
/// the cache simply stays as it was.
pub fn spawn_startup_sync(client: MenuClient, store: Arc<MenuStore>) -> SyncHandle {
  let task = tokio::spawn(async move {
    if let Err(e) = sync_menu(&client, &store).await {
      warn!(error = %e, "Menu sync failed, keeping cached menu");
    }
  });

  SyncHandle { task }
}

/// Fetch the menu and insert every record not already cached
pub async fn sync_menu(client: &MenuClient, store: &Arc<MenuStore>) -> Result<SyncReport> {
  info!(url = %client.url(), "Syncing menu");

  let items = client
    .fetch_menu()
    .await
    .map_err(|e| eyre!("Failed to fetch menu: {}", e))?;

  let entries: Vec<MenuEntry> = items.into_iter().map(ApiMenuItem::into_entry).collect();
  let fetched = entries.len();

  // SQLite work is blocking, keep it off the async workers
  let store = Arc::clone(store);
  let inserted = tokio::task::spawn_blocking(move || -> Result<usize> {
    let inserted = store.insert_many(&entries)?;
    store.mark_synced()?;
    Ok(inserted)
  })
  .await
  .map_err(|e| eyre!("Menu insert task failed: {}", e))??;

  info!(fetched, inserted, "Menu sync complete");

  Ok(SyncReport { fetched, inserted })
}
