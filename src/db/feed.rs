//! Reactive read over the menu table.

use tokio::sync::watch;

use crate::menu::types::MenuEntry;

/// Live view of every row in the menu table.
///
/// The feed always holds the latest snapshot. `changed()` resolves once the
/// store has committed an insert that added rows after the last time this
/// feed's snapshot was read.
#[derive(Debug, Clone)]
pub struct MenuFeed {
  rx: watch::Receiver<Vec<MenuEntry>>,
}

impl MenuFeed {
  pub(super) fn new(rx: watch::Receiver<Vec<MenuEntry>>) -> Self {
    Self { rx }
  }

  /// Current entries, marking them as seen
  pub fn current(&mut self) -> Vec<MenuEntry> {
    self.rx.borrow_and_update().clone()
  }

  /// Whether rows were added since the snapshot was last read
  pub fn has_changed(&self) -> bool {
    self.rx.has_changed().unwrap_or(false)
  }

  /// Wait for the next change. Returns false once the store is gone.
  pub async fn changed(&mut self) -> bool {
    self.rx.changed().await.is_ok()
  }
}
