//! kbstore-lib: persistence for keyboard customization assets
//!
//! This crate stores the assets a host application and its keyboard extension
//! share through one container directory:
//! - `ThemeStore`: user themes, their background images and the light/dark selection
//! - `CustardStore`: custom layouts ("custards"), their edit snapshots and tab bars
//!
//! Both stores keep a small JSON index next to their blob files and replace every
//! file atomically. Neither coordinates with the other process beyond that: the
//! last index write wins.

pub mod consts;
pub mod custard;
pub mod error;
pub mod index;
pub mod platform;
pub mod store;
pub mod theme;
pub mod util;

pub use custard::CustardStore;
pub use error::{ErrorClass, Issue, Outcome, Severity, StoreError};
pub use store::paths::{Category, ContainerPaths};
pub use theme::ThemeStore;
