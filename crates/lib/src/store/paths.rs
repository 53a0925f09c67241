//! Path resolution inside the shared container.
//!
//! # Layout
//!
//! ```text
//! <container>/
//! ├── themes/
//! │   ├── index.json
//! │   ├── theme_<id>.theme
//! │   └── theme_<id>_bg.png
//! └── custard/
//!     ├── index.json
//!     ├── <token>_main.custard
//!     ├── <token>_edit.json
//!     └── tabbar_<id>.tabbar
//! ```

use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::consts::{CUSTARD_DIR, THEMES_DIR};
use crate::error::StoreError;
use crate::platform::paths::container_dir;

/// A top-level directory of the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
  Themes,
  Custard,
}

impl Category {
  pub fn dir_name(self) -> &'static str {
    match self {
      Category::Themes => THEMES_DIR,
      Category::Custard => CUSTARD_DIR,
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.dir_name())
  }
}

/// Resolves logical names to files under one container root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerPaths {
  root: PathBuf,
}

impl ContainerPaths {
  pub fn new(root: impl Into<PathBuf>) -> Self {
    Self { root: root.into() }
  }

  /// Container at the default location (see [`container_dir`]).
  pub fn from_env() -> Self {
    Self::new(container_dir())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn category_dir(&self, category: Category) -> PathBuf {
    self.root.join(category.dir_name())
  }

  /// Create the category directory if it is missing.
  ///
  /// Failure is only logged: the next read or write in that directory reports
  /// its own filesystem error.
  pub fn ensure_dir(&self, category: Category) {
    let dir = self.category_dir(category);
    if dir.is_dir() {
      return;
    }
    match fs::create_dir_all(&dir) {
      Ok(()) => debug!(path = %dir.display(), "created store directory"),
      Err(e) => warn!(path = %dir.display(), "failed to create store directory: {}", e),
    }
  }

  /// Path of `name` inside `category`, creating the directory on first use.
  pub fn resolve(&self, category: Category, name: &str) -> PathBuf {
    self.ensure_dir(category);
    let path = self.category_dir(category).join(name);
    trace!(path = %path.display(), "resolved");
    path
  }

  /// Container-relative reference to `name`, as stored inside blobs.
  pub fn relative(category: Category, name: &str) -> String {
    format!("{}/{}", category.dir_name(), name)
  }

  /// Resolve a container-relative reference read back from a blob.
  ///
  /// Only plain relative paths are accepted; absolute paths and `..` are rejected.
  pub fn resolve_relative(&self, reference: &str) -> Result<PathBuf, StoreError> {
    let rel = Path::new(reference);
    let plain = rel.components().all(|c| matches!(c, Component::Normal(_)));
    if reference.is_empty() || !plain {
      return Err(StoreError::InvalidPicturePath(reference.to_string()));
    }
    Ok(self.root.join(rel))
  }
}
