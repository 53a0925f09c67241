//! Errors and operation outcomes shared by the stores.
//!
//! Reads return `Result<T, StoreError>`. Mutating calls apply their in-memory
//! effect unconditionally and report whatever did not reach disk through an
//! [`Outcome`], so callers can tell a committed change from one that only lives
//! in memory.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

/// Errors raised while reading or writing the container.
#[derive(Debug, Error)]
pub enum StoreError {
  /// The requested blob has no backing file.
  #[error("no stored object at '{0}'")]
  NotFound(PathBuf),

  /// The file exists but could not be read.
  #[error("failed to read '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The file was read but its content is malformed.
  #[error("failed to decode '{path}': {source}")]
  Decode {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// A value could not be serialized.
  #[error("failed to encode {what}: {source}")]
  Encode {
    what: &'static str,
    #[source]
    source: serde_json::Error,
  },

  /// Writing or replacing a file failed.
  #[error("failed to write '{path}': {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Deleting a file failed for a reason other than it being absent.
  #[error("failed to remove '{path}': {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Image bytes are not a PNG.
  #[error("image data is not a PNG ({0} bytes)")]
  InvalidImage(usize),

  /// A stored picture reference escapes the container.
  #[error("picture reference '{0}' is not a container-relative path")]
  InvalidPicturePath(String),

  /// Every theme id up to `u32::MAX` is taken.
  #[error("no theme id left after {0}")]
  IdsExhausted(u32),
}

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
  /// Nothing stored under the requested key.
  NotFound,
  /// Stored data (or caller-supplied data) is malformed.
  Decode,
  /// A write, replace or delete did not happen.
  Write,
  /// Any other filesystem failure while reading.
  Io,
}

impl StoreError {
  /// Classify this error.
  pub fn class(&self) -> ErrorClass {
    match self {
      StoreError::NotFound(_) => ErrorClass::NotFound,
      StoreError::Decode { .. } | StoreError::InvalidImage(_) | StoreError::InvalidPicturePath(_) => {
        ErrorClass::Decode
      }
      StoreError::Encode { .. }
      | StoreError::Write { .. }
      | StoreError::Remove { .. }
      | StoreError::IdsExhausted(_) => ErrorClass::Write,
      StoreError::Read { .. } => ErrorClass::Io,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.class() == ErrorClass::NotFound
  }
}

/// How much an absorbed failure matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  /// A cleanup step failed; the index itself is consistent on disk.
  Recoverable,
  /// The index write failed; memory is ahead of disk until the next successful save.
  Uncommitted,
}

/// A failure absorbed by a mutating call.
#[derive(Debug)]
pub struct Issue {
  pub severity: Severity,
  pub error: StoreError,
}

/// Result of a mutating call: its value plus any absorbed failures.
#[derive(Debug)]
#[must_use]
pub struct Outcome<T = ()> {
  pub value: T,
  pub issues: Vec<Issue>,
}

impl<T> Outcome<T> {
  pub fn new(value: T) -> Self {
    Self {
      value,
      issues: Vec::new(),
    }
  }

  /// Record an absorbed failure. Every issue is logged once, here.
  pub(crate) fn push(&mut self, severity: Severity, error: StoreError) {
    warn!(?severity, "{}", error);
    self.issues.push(Issue { severity, error });
  }

  /// True unless the index write failed.
  pub fn is_committed(&self) -> bool {
    !self.issues.iter().any(|issue| issue.severity == Severity::Uncommitted)
  }

  /// True when nothing at all went wrong.
  pub fn is_clean(&self) -> bool {
    self.issues.is_empty()
  }

  pub fn into_value(self) -> T {
    self.value
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
    Outcome {
      value: f(self.value),
      issues: self.issues,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tracing_test::traced_test;

  fn write_error() -> StoreError {
    StoreError::Write {
      path: PathBuf::from("themes/index.json"),
      source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
    }
  }

  #[test]
  fn classes_follow_taxonomy() {
    assert_eq!(StoreError::NotFound(PathBuf::from("x")).class(), ErrorClass::NotFound);
    assert_eq!(StoreError::InvalidImage(3).class(), ErrorClass::Decode);
    assert_eq!(write_error().class(), ErrorClass::Write);
    assert_eq!(StoreError::IdsExhausted(u32::MAX).class(), ErrorClass::Write);
    let read = StoreError::Read {
      path: PathBuf::from("x"),
      source: io::Error::other("boom"),
    };
    assert_eq!(read.class(), ErrorClass::Io);
  }

  #[test]
  fn recoverable_issue_keeps_commit() {
    let mut outcome = Outcome::new(());
    outcome.push(Severity::Recoverable, StoreError::NotFound(PathBuf::from("bg.png")));
    assert!(outcome.is_committed());
    assert!(!outcome.is_clean());
  }

  #[test]
  #[traced_test]
  fn uncommitted_issue_is_logged() {
    let mut outcome = Outcome::new(7);
    outcome.push(Severity::Uncommitted, write_error());
    assert!(!outcome.is_committed());
    assert_eq!(outcome.map(|v| v + 1).value, 8);
    assert!(logs_contain("read-only"));
  }
}
