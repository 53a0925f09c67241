//! Reading and writing single JSON blob files.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::util::fs::{remove_if_exists, write_atomic};

/// Read a whole file, mapping a missing file to [`StoreError::NotFound`].
pub fn read_bytes(path: &Path) -> Result<Vec<u8>, StoreError> {
  fs::read(path).map_err(|e| {
    if e.kind() == io::ErrorKind::NotFound {
      StoreError::NotFound(path.to_path_buf())
    } else {
      StoreError::Read {
        path: path.to_path_buf(),
        source: e,
      }
    }
  })
}

/// Read and decode a JSON blob.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
  let bytes = read_bytes(path)?;
  serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Atomically write raw bytes.
pub fn write_bytes(path: &Path, content: &[u8]) -> Result<(), StoreError> {
  write_atomic(path, content).map_err(|e| StoreError::Write {
    path: path.to_path_buf(),
    source: e,
  })
}

/// Encode `value` as JSON and atomically write it.
pub fn write_json<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<(), StoreError> {
  let content = serde_json::to_vec_pretty(value).map_err(|e| StoreError::Encode { what, source: e })?;
  write_bytes(path, &content)
}

/// Delete a blob; an absent file counts as deleted.
pub fn remove(path: &Path) -> Result<bool, StoreError> {
  remove_if_exists(path).map_err(|e| StoreError::Remove {
    path: path.to_path_buf(),
    source: e,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde::Deserialize;
  use tempfile::TempDir;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Sample {
    name: String,
  }

  #[test]
  fn missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    let result = read_json::<Sample>(&temp.path().join("absent.json"));
    assert!(matches!(result, Err(StoreError::NotFound(_))));
  }

  #[test]
  fn malformed_file_is_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    fs::write(&path, "garbage data").unwrap();
    assert!(matches!(read_json::<Sample>(&path), Err(StoreError::Decode { .. })));
  }

  #[test]
  fn wrong_schema_is_decode_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("wrong.json");
    fs::write(&path, r#"{"unexpected": "structure"}"#).unwrap();
    assert!(matches!(read_json::<Sample>(&path), Err(StoreError::Decode { .. })));
  }

  #[test]
  fn write_then_read() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sample.json");
    let sample = Sample { name: "flick".into() };
    write_json(&path, &sample, "sample").unwrap();
    assert_eq!(read_json::<Sample>(&path).unwrap(), sample);
  }

  #[test]
  fn write_into_file_parent_fails() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "x").unwrap();
    let result = write_bytes(&blocker.join("child.json"), b"{}");
    assert!(matches!(result, Err(StoreError::Write { .. })));
  }
}
