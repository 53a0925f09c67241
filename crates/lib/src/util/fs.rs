//! Atomic file replacement and tolerant deletion.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Atomically replace `path` with `content` via temp-file + rename in the target directory.
///
/// Readers in either process see the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
  let parent = path.parent().unwrap_or_else(|| Path::new("."));
  fs::create_dir_all(parent)?;
  let mut tmp = NamedTempFile::new_in(parent)?;
  tmp.write_all(content)?;
  tmp.flush()?;
  tmp
    .persist(path)
    .map(|_| ())
    .map_err(|err| io::Error::new(err.error.kind(), err.error))
}

/// Remove a file, treating "already gone" as success.
///
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
  match fs::remove_file(path) {
    Ok(()) => Ok(true),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
    Err(e) => Err(e),
  }
}
