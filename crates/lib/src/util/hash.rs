//! Filesystem-safe tokens for arbitrary identifiers.
//!
//! Custard identifiers are user-chosen and may contain Unicode, path separators
//! or characters some filesystems reject. Files are therefore named after a
//! `ContentToken`: the full SHA-256 of the identifier's UTF-8 bytes, as lowercase hex.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of a token in characters.
pub const TOKEN_LEN: usize = 64;

/// A 64-character lowercase hex SHA-256 digest.
///
/// # Format
///
/// Only `[0-9a-f]`, so it can be embedded in a file name as is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContentToken(pub String);

impl ContentToken {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for ContentToken {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Hash an identifier into its file name token.
pub fn hash_identifier(identifier: &str) -> ContentToken {
  let mut hasher = Sha256::new();
  hasher.update(identifier.as_bytes());
  ContentToken(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_digest() {
    assert_eq!(
      hash_identifier("hello world").as_str(),
      "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
    );
  }

  #[test]
  fn hash_is_deterministic() {
    assert_eq!(hash_identifier("my_layout"), hash_identifier("my_layout"));
  }

  #[test]
  fn distinct_identifiers_distinct_tokens() {
    assert_ne!(hash_identifier("flick_ja"), hash_identifier("flick_JA"));
    assert_ne!(hash_identifier(""), hash_identifier(" "));
  }

  #[test]
  fn token_is_filename_safe() {
    for id in ["../../etc/passwd", "a/b\\c", "かな配列", "emoji 😀", "con", "", "x:y*z?"] {
      let token = hash_identifier(id);
      assert_eq!(token.as_str().len(), TOKEN_LEN);
      assert!(
        token.as_str().chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "unexpected character in {}",
        token
      );
    }
  }
}
