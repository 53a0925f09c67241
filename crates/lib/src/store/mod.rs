//! Container layout and blob file access.

pub mod blob;
pub mod paths;
