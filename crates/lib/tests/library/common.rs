use kbstore_lib::ContainerPaths;
use kbstore_lib::custard::{Custard, CustardMetadata, InputStyle, Language};
use tempfile::TempDir;

/// A fresh container and the paths pointing at it.
pub fn container() -> (TempDir, ContainerPaths) {
  let temp = TempDir::new().unwrap();
  let paths = ContainerPaths::new(temp.path());
  (temp, paths)
}

pub fn custard(identifier: &str) -> Custard {
  Custard {
    identifier: identifier.to_string(),
    language: Language::JaJp,
    input_style: InputStyle::Roman2kana,
    metadata: CustardMetadata {
      custard_version: "1.2".into(),
      display_name: identifier.to_string(),
    },
    interface: serde_json::json!({"key_style": "pc_style", "keys": []}),
  }
}

/// Parse an index file straight from disk.
pub fn index_on_disk(paths: &ContainerPaths, dir: &str) -> serde_json::Value {
  let bytes = std::fs::read(paths.root().join(dir).join("index.json")).unwrap();
  serde_json::from_slice(&bytes).unwrap()
}
