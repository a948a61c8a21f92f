//! Serde-deserializable types matching the remote menu document.
//!
//! These types are separate from the cached `MenuEntry` so the wire shape and
//! the table shape can drift independently.

use serde::Deserialize;

use super::types::MenuEntry;

/// Top-level document served by the menu endpoint
#[derive(Debug, Deserialize)]
pub struct ApiMenuResponse {
  pub menu: Vec<ApiMenuItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMenuItem {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub price: String,
  pub image: String,
  pub category: String,
}

impl ApiMenuItem {
  pub fn into_entry(self) -> MenuEntry {
    MenuEntry {
      id: self.id,
      title: self.title,
      description: self.description,
      price: self.price,
      image: self.image,
      category: self.category,
    }
  }
}
