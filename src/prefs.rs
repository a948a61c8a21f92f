//! Key-value preferences persisted as a small JSON file.

use color_eyre::{eyre::eyre, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const EMAIL: &str = "email";

/// String preferences for the "Little Lemon" namespace.
///
/// Every mutation is written through to disk before returning.
#[derive(Debug)]
pub struct Preferences {
  path: PathBuf,
  values: BTreeMap<String, String>,
}

impl Preferences {
  /// Load preferences from `path`. A missing file is an empty namespace.
  pub fn open(path: &Path) -> Result<Self> {
    let values: BTreeMap<String, String> = if path.exists() {
      let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre!("Failed to read preferences {}: {}", path.display(), e))?;
      serde_json::from_str(&contents)
        .map_err(|e| eyre!("Failed to parse preferences {}: {}", path.display(), e))?
    } else {
      BTreeMap::new()
    };

    Ok(Self {
      path: path.to_path_buf(),
      values,
    })
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  pub fn contains(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  /// Set several keys in one write
  pub fn set_many(&mut self, pairs: &[(&str, &str)]) -> Result<()> {
    for (key, value) in pairs {
      self.values.insert(key.to_string(), value.to_string());
    }
    self.save()
  }

  /// Remove several keys in one write
  pub fn remove_many(&mut self, keys: &[&str]) -> Result<()> {
    for key in keys {
      self.values.remove(*key);
    }
    self.save()
  }

  /// Write to a sibling temp file, then rename over the original
  fn save(&self) -> Result<()> {
    if let Some(parent) = self.path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create preferences directory: {}", e))?;
    }

    let data = serde_json::to_vec_pretty(&self.values)
      .map_err(|e| eyre!("Failed to serialize preferences: {}", e))?;

    let tmp = self.path.with_extension("json.tmp");
    std::fs::write(&tmp, data)
      .map_err(|e| eyre!("Failed to write preferences {}: {}", tmp.display(), e))?;
    std::fs::rename(&tmp, &self.path)
      .map_err(|e| eyre!("Failed to replace preferences {}: {}", self.path.display(), e))?;

    debug!(path = %self.path.display(), keys = self.values.len(), "Saved preferences");
    Ok(())
  }
}
