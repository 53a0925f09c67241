//! Shared utilities.
//!
//! Identifier hashing and atomic file replacement.

pub mod fs;
pub mod hash;
