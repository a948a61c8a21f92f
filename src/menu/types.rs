
/// One cached menu item, as stored in the `menu_item` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
  pub id: i64,
  pub title: String,
  pub description: String,
  pub price: String,
  /// Image URL or data URI, stored as received
  pub image: String,
  pub category: String,
}

/// Menu categories offered as filter chips on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
  Starters,
  Mains,
  Desserts,
}

impl Category {
  /// Value stored in the `category` column for this category
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Starters => "starters",
      Category::Mains => "mains",
      Category::Desserts => "desserts",
    }
  }

  /// Chip label shown to the user
  pub fn label(&self) -> &'static str {
    match self {
      Category::Starters => "Starters",
      Category::Mains => "Mains",
      Category::Desserts => "Desserts",
    }
  }

  pub fn all() -> &'static [Category] {
    &[Category::Starters, Category::Mains, Category::Desserts]
  }
}

impl std::str::FromStr for Category {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "starters" => Ok(Category::Starters),
      "mains" => Ok(Category::Mains),
      "desserts" => Ok(Category::Desserts),
      other => Err(format!(
        "unknown category '{}' (expected starters, mains or desserts)",
        other
      )),
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
