//! Generic load/save of a store's index record.
//!
//! Records whose layout changed over time migrate older layouts in their
//! `Deserialize` impl, so decoding here stays a single `serde_json` call.
//!
//! Each store keeps one small JSON record (`<category>/index.json`) listing what
//! it holds. Loading never fails: a missing or unreadable index yields the
//! record's default, and the reason is reported through [`LoadStatus`]. Saving
//! replaces the file atomically, so a concurrent reader in the other process
//! never sees a partial index.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::consts::INDEX_FILENAME;
use crate::error::StoreError;
use crate::store::blob::{read_bytes, write_json};
use crate::store::paths::{Category, ContainerPaths};

/// A record persisted as a store index.
pub trait IndexRecord: Serialize + DeserializeOwned + Default {
  /// Short name used in error messages.
  const NAME: &'static str;
}

/// How an index load went.
#[derive(Debug)]
pub enum LoadStatus {
  /// Decoded from disk.
  Loaded,
  /// No index file yet; started from the default.
  Missing,
  /// The file was unreadable or malformed; started from the default.
  Recovered(StoreError),
}

impl LoadStatus {
  pub fn is_recovered(&self) -> bool {
    matches!(self, LoadStatus::Recovered(_))
  }
}

/// Loads and saves one index record.
#[derive(Debug, Clone)]
pub struct IndexStore<T> {
  path: PathBuf,
  _record: PhantomData<fn() -> T>,
}

impl<T: IndexRecord> IndexStore<T> {
  /// Index store for `category`, creating the category directory if needed.
  pub fn new(paths: &ContainerPaths, category: Category) -> Self {
    Self {
      path: paths.resolve(category, INDEX_FILENAME),
      _record: PhantomData,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Load the record, substituting the default on any failure.
  pub fn load(&self) -> (T, LoadStatus) {
    match self.try_load() {
      Ok(record) => (record, LoadStatus::Loaded),
      Err(StoreError::NotFound(_)) => {
        debug!(path = %self.path.display(), "no {} index yet, starting empty", T::NAME);
        (T::default(), LoadStatus::Missing)
      }
      Err(e) => {
        warn!("{} index unusable, starting empty: {}", T::NAME, e);
        (T::default(), LoadStatus::Recovered(e))
      }
    }
  }

  fn try_load(&self) -> Result<T, StoreError> {
    let bytes = read_bytes(&self.path)?;
    serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode {
      path: self.path.clone(),
      source: e,
    })
  }

  /// Atomically replace the index file with `record`.
  pub fn save(&self, record: &T) -> Result<(), StoreError> {
    write_json(&self.path, record, T::NAME)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use std::fs;
  use tempfile::TempDir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  struct Sample {
    items: Vec<String>,
  }

  impl IndexRecord for Sample {
    const NAME: &'static str = "sample";
  }

  fn temp_index() -> (TempDir, IndexStore<Sample>) {
    let temp = TempDir::new().unwrap();
    let store = IndexStore::new(&ContainerPaths::new(temp.path()), Category::Custard);
    (temp, store)
  }

  #[test]
  fn load_missing_returns_default() {
    let (_temp, store) = temp_index();
    let (record, status) = store.load();
    assert_eq!(record, Sample::default());
    assert!(matches!(status, LoadStatus::Missing));
  }

  #[test]
  fn save_and_load_roundtrip() {
    let (_temp, store) = temp_index();
    let record = Sample {
      items: vec!["a".into(), "b".into()],
    };
    store.save(&record).unwrap();
    let (loaded, status) = store.load();
    assert_eq!(loaded, record);
    assert!(matches!(status, LoadStatus::Loaded));
  }

  #[test]
  fn load_handles_corrupted_json() {
    let (_temp, store) = temp_index();
    fs::write(store.path(), "not valid json {{{").unwrap();
    let (record, status) = store.load();
    assert_eq!(record, Sample::default());
    assert!(status.is_recovered());
  }

  #[test]
  fn load_handles_wrong_schema() {
    let (_temp, store) = temp_index();
    fs::write(store.path(), r#"{"foo": "bar"}"#).unwrap();
    let (_, status) = store.load();
    assert!(matches!(status, LoadStatus::Recovered(StoreError::Decode { .. })));
  }

  #[test]
  fn load_handles_empty_file() {
    let (_temp, store) = temp_index();
    fs::write(store.path(), "").unwrap();
    let (record, status) = store.load();
    assert_eq!(record, Sample::default());
    assert!(status.is_recovered());
  }

  #[test]
  fn save_reports_write_failure() {
    let (_temp, store) = temp_index();
    // A directory where the index file should be makes the rename fail.
    fs::create_dir_all(store.path()).unwrap();
    let result = store.save(&Sample::default());
    assert!(matches!(result, Err(StoreError::Write { .. })));
  }
}
