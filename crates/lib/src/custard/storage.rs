//! Custard storage.
//!
//! # Storage Layout
//!
//! ```text
//! {container}/custard/
//! ├── index.json              # CustardIndexRecord
//! ├── <token>_main.custard    # Compiled custard
//! ├── <token>_edit.json       # Optional editor snapshot
//! └── tabbar_<id>.tabbar      # Tab bar
//! ```
//!
//! `<token>` is the content hash of the custard identifier, so any identifier
//! maps to a safe, fixed-length file name.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::consts::{CUSTARD_EDIT_SUFFIX, CUSTARD_MAIN_SUFFIX};
use crate::error::{Outcome, Severity, StoreError};
use crate::index::{IndexStore, LoadStatus};
use crate::store::blob;
use crate::store::paths::{Category, ContainerPaths};
use crate::util::hash::hash_identifier;

use super::types::{
  Custard, CustardEntryMetadata, CustardIndexRecord, EditSnapshot, Language, TabBarData, TabBarItem, TabTarget,
};

fn main_file_name(identifier: &str) -> String {
  format!("{}{}", hash_identifier(identifier), CUSTARD_MAIN_SUFFIX)
}

fn edit_file_name(identifier: &str) -> String {
  format!("{}{}", hash_identifier(identifier), CUSTARD_EDIT_SUFFIX)
}

fn tab_bar_file_name(id: u32) -> String {
  format!("tabbar_{}.tabbar", id)
}

/// Custards, tab bars and their metadata, backed by the shared container.
///
/// Like [`ThemeStore`](crate::theme::ThemeStore), it owns an in-memory copy of
/// its index and rewrites the whole index after every mutation.
#[derive(Debug)]
pub struct CustardStore {
  paths: ContainerPaths,
  index: IndexStore<CustardIndexRecord>,
  record: CustardIndexRecord,
  load_status: LoadStatus,
}

impl CustardStore {
  /// Load the custard index from `paths`, starting empty if it is unusable.
  pub fn load(paths: &ContainerPaths) -> Self {
    let index = IndexStore::new(paths, Category::Custard);
    let (record, load_status) = index.load();
    Self {
      paths: paths.clone(),
      index,
      record,
      load_status,
    }
  }

  /// Discard the in-memory index and read it again from disk.
  pub fn reload(&mut self) {
    let (record, load_status) = self.index.load();
    self.record = record;
    self.load_status = load_status;
  }

  pub fn load_status(&self) -> &LoadStatus {
    &self.load_status
  }

  pub fn available_custards(&self) -> &[String] {
    &self.record.available_custards
  }

  pub fn available_tab_bars(&self) -> &[u32] {
    &self.record.available_tab_bars
  }

  pub fn metadata(&self) -> &std::collections::BTreeMap<String, CustardEntryMetadata> {
    &self.record.metadata
  }

  fn path(&self, name: &str) -> PathBuf {
    self.paths.resolve(Category::Custard, name)
  }

  /// Load a compiled custard.
  pub fn custard(&self, identifier: &str) -> Result<Custard, StoreError> {
    blob::read_json(&self.path(&main_file_name(identifier)))
  }

  /// Load the editor snapshot saved alongside a custard.
  pub fn user_edit_snapshot(&self, identifier: &str) -> Result<EditSnapshot, StoreError> {
    blob::read_json(&self.path(&edit_file_name(identifier)))
  }

  /// Path of the compiled custard file, if it exists and can be read.
  pub fn custard_file_path(&self, identifier: &str) -> Result<PathBuf, StoreError> {
    let path = self.path(&main_file_name(identifier));
    blob::read_bytes(&path)?;
    Ok(path)
  }

  pub fn tab_bar(&self, id: u32) -> Result<TabBarData, StoreError> {
    blob::read_json(&self.path(&tab_bar_file_name(id)))
  }

  /// Whether tab bar `id` already has an item that only switches to `tab`.
  ///
  /// A missing or unreadable tab bar counts as not containing it.
  pub fn tab_bar_contains(&self, id: u32, tab: &TabTarget) -> bool {
    self.tab_bar(id).map(|bar| bar.contains_move_to(tab)).unwrap_or(false)
  }

  /// Save a custard.
  ///
  /// Writes the compiled file and, when given, the editor snapshot; registers
  /// the identifier; with `update_tab_bar`, appends a "switch to this custard"
  /// item to the default tab bar unless one is already there; then records the
  /// metadata and saves the index.
  pub fn save_custard(
    &mut self,
    custard: &Custard,
    metadata: CustardEntryMetadata,
    edit: Option<&EditSnapshot>,
    update_tab_bar: bool,
  ) -> Result<Outcome, StoreError> {
    let identifier = &custard.identifier;
    blob::write_json(&self.path(&main_file_name(identifier)), custard, "custard")?;
    if let Some(edit) = edit {
      blob::write_json(&self.path(&edit_file_name(identifier)), edit, "edit snapshot")?;
    }

    if !self.record.available_custards.contains(identifier) {
      self.record.available_custards.push(identifier.clone());
    }

    let tab = TabTarget::Custom(identifier.clone());
    if update_tab_bar && !self.tab_bar_contains(TabBarData::DEFAULT_ID, &tab) {
      let item = TabBarItem::move_tab(custard.metadata.display_name.clone(), tab);
      self.append_tab_bar_item(TabBarData::DEFAULT_ID, item)?;
    }

    self.record.metadata.insert(identifier.clone(), metadata);
    debug!(identifier = %identifier, "saved custard");
    Ok(self.persist(()))
  }

  /// Remove a custard from the index and delete its files.
  ///
  /// The index entry goes even if the compiled file cannot be deleted; that
  /// file is then left behind unreferenced. A failure to delete the editor
  /// snapshot is ignored.
  pub fn remove_custard(&mut self, identifier: &str) -> Outcome {
    self.record.available_custards.retain(|existing| existing != identifier);
    self.record.metadata.remove(identifier);

    let mut outcome = Outcome::new(());
    if let Err(e) = blob::remove(&self.path(&main_file_name(identifier))) {
      outcome.push(Severity::Recoverable, e);
    }
    if let Err(e) = blob::remove(&self.path(&edit_file_name(identifier))) {
      debug!(identifier = %identifier, "edit snapshot not removed: {}", e);
    }

    let saved = self.persist(());
    outcome.issues.extend(saved.issues);
    outcome
  }

  fn append_tab_bar_item(&mut self, id: u32, item: TabBarItem) -> Result<(), StoreError> {
    let mut bar = match self.tab_bar(id) {
      Ok(bar) => bar,
      Err(e) => {
        if !e.is_not_found() {
          warn!(tab_bar = id, "replacing unreadable tab bar: {}", e);
        }
        TabBarData {
          identifier: id,
          ..TabBarData::default_bar()
        }
      }
    };
    bar.items.push(item);
    self.write_tab_bar(&bar)
  }

  fn write_tab_bar(&mut self, bar: &TabBarData) -> Result<(), StoreError> {
    blob::write_json(&self.path(&tab_bar_file_name(bar.identifier)), bar, "tab bar")?;
    if !self.record.available_tab_bars.contains(&bar.identifier) {
      self.record.available_tab_bars.push(bar.identifier);
    }
    Ok(())
  }

  /// Append `item` to tab bar `id`, starting from the default tab bar if none is stored.
  pub fn add_tab_bar(&mut self, id: u32, item: TabBarItem) -> Result<Outcome, StoreError> {
    self.append_tab_bar_item(id, item)?;
    Ok(self.persist(()))
  }

  pub fn save_tab_bar_data(&mut self, bar: &TabBarData) -> Result<Outcome, StoreError> {
    self.write_tab_bar(bar)?;
    Ok(self.persist(()))
  }

  /// Delete a tab bar.
  ///
  /// If the file exists but cannot be deleted, the index keeps listing it.
  pub fn remove_tab_bar(&mut self, id: u32) -> Outcome {
    let mut outcome = Outcome::new(());
    if let Err(e) = blob::remove(&self.path(&tab_bar_file_name(id))) {
      outcome.push(Severity::Recoverable, e);
      return outcome;
    }
    self.record.available_tab_bars.retain(|&existing| existing != id);

    let saved = self.persist(());
    outcome.issues.extend(saved.issues);
    outcome
  }

  pub fn share_link(&self, identifier: &str) -> Option<&str> {
    self.record.metadata.get(identifier)?.share_link.as_deref()
  }

  /// Record a share link for a custard that has metadata.
  ///
  /// Returns `false` (and changes nothing) for an identifier without metadata.
  pub fn set_share_link(&mut self, identifier: &str, link: impl Into<String>) -> Outcome<bool> {
    let recorded = match self.record.metadata.get_mut(identifier) {
      Some(entry) => {
        entry.share_link = Some(link.into());
        true
      }
      None => false,
    };
    self.persist(recorded)
  }

  /// Identifiers of custards written for `language`, in index order.
  ///
  /// Entries whose file is missing or fails to decode are skipped.
  pub fn available_custards_for(&self, language: Language) -> Vec<String> {
    if language == Language::None {
      return Vec::new();
    }
    self
      .record
      .available_custards
      .iter()
      .filter(|identifier| match self.custard(identifier) {
        Ok(custard) => custard.language == language,
        Err(e) => {
          warn!(identifier = %identifier, "skipping custard: {}", e);
          false
        }
      })
      .cloned()
      .collect()
  }

  fn persist<T>(&self, value: T) -> Outcome<T> {
    let mut outcome = Outcome::new(value);
    if let Err(e) = self.index.save(&self.record) {
      outcome.push(Severity::Uncommitted, e);
    }
    outcome
  }
}
