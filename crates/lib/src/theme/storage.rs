//! Theme storage.
//!
//! # Storage Layout
//!
//! ```text
//! {container}/themes/
//! ├── index.json          # ThemeIndexRecord: stored ids + light/dark selection
//! ├── theme_<id>.theme    # Theme blob
//! └── theme_<id>_bg.png   # Optional background picture
//! ```
//!
//! The two built-in themes (`0` Default, `-1` Classic) are never written.

use std::num::NonZeroU32;

use tracing::{debug, warn};

use crate::error::{Outcome, Severity, StoreError};
use crate::index::{IndexStore, LoadStatus};
use crate::store::blob;
use crate::store::paths::{Category, ContainerPaths};

use super::types::{PngImage, Theme, ThemeId, ThemeIndexRecord, ThemePicture};

fn theme_file_name(id: NonZeroU32) -> String {
  format!("theme_{}.theme", id)
}

fn background_file_name(id: NonZeroU32) -> String {
  format!("theme_{}_bg.png", id)
}

/// Themes and the current selection, backed by the shared container.
///
/// Holds its own copy of the index, loaded once. Every mutating call saves the
/// whole record; a concurrent writer in the other process is overwritten.
#[derive(Debug)]
pub struct ThemeStore {
  paths: ContainerPaths,
  index: IndexStore<ThemeIndexRecord>,
  record: ThemeIndexRecord,
  load_status: LoadStatus,
}

impl ThemeStore {
  /// Load the theme index from `paths`, starting empty if it is unusable.
  pub fn load(paths: &ContainerPaths) -> Self {
    let index = IndexStore::new(paths, Category::Themes);
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

  pub fn record(&self) -> &ThemeIndexRecord {
    &self.record
  }

  pub fn selected(&self) -> ThemeId {
    self.record.selected
  }

  pub fn selected_dark(&self) -> ThemeId {
    self.record.selected_dark
  }

  /// Display title of a built-in theme; `None` for user themes.
  pub fn title(&self, id: ThemeId) -> Option<&'static str> {
    match id {
      ThemeId::Virtual(builtin) => Some(builtin.title()),
      ThemeId::Stored(_) => None,
    }
  }

  /// Built-ins first (Default, Classic), then stored ids ascending.
  pub fn indices(&self) -> Vec<ThemeId> {
    let mut stored = self.record.current_indices.clone();
    stored.sort_unstable();
    [ThemeId::DEFAULT, ThemeId::CLASSIC]
      .into_iter()
      .chain(stored.into_iter().map(ThemeId::Stored))
      .collect()
  }

  /// Load a theme.
  ///
  /// A stored background picture is read back into memory. If that fails the
  /// theme is still returned, without a picture.
  pub fn theme(&self, id: ThemeId) -> Result<Theme, StoreError> {
    let stored = match id {
      ThemeId::Virtual(builtin) => return Ok(builtin.theme()),
      ThemeId::Stored(stored) => stored,
    };

    let path = self.paths.resolve(Category::Themes, &theme_file_name(stored));
    let mut theme: Theme = blob::read_json(&path)?;

    if let ThemePicture::Path(reference) = &theme.picture {
      theme.picture = match self.load_picture(reference) {
        Ok(image) => ThemePicture::Image(image),
        Err(e) => {
          warn!(theme = %id, "background picture unavailable: {}", e);
          ThemePicture::None
        }
      };
    }

    Ok(theme)
  }

  fn load_picture(&self, reference: &str) -> Result<PngImage, StoreError> {
    let path = self.paths.resolve_relative(reference)?;
    PngImage::from_bytes(blob::read_bytes(&path)?)
  }

  /// Save a theme, assigning the next id if it has none.
  ///
  /// An in-memory picture is written to `theme_<id>_bg.png` first and the blob
  /// stores its path. Returns the theme's id, or [`StoreError::IdsExhausted`]
  /// when a new id would have to wrap around.
  pub fn save_theme(&mut self, mut theme: Theme) -> Result<Outcome<ThemeId>, StoreError> {
    let id = match theme.id {
      Some(id) => id,
      None => {
        let id = self.record.next_id().ok_or(StoreError::IdsExhausted(u32::MAX))?;
        theme.id = Some(id);
        id
      }
    };

    if let ThemePicture::Image(image) = &theme.picture {
      let name = background_file_name(id);
      blob::write_bytes(&self.paths.resolve(Category::Themes, &name), image.as_bytes())?;
      theme.picture = ThemePicture::Path(ContainerPaths::relative(Category::Themes, &name));
    }

    let path = self.paths.resolve(Category::Themes, &theme_file_name(id));
    blob::write_json(&path, &theme, "theme")?;
    debug!(theme = %id, "saved theme");

    if !self.record.current_indices.contains(&id) {
      self.record.current_indices.push(id);
    }
    Ok(self.persist(ThemeId::Stored(id)))
  }

  /// Use `id` for both light and dark appearance.
  pub fn select(&mut self, id: ThemeId) -> Outcome {
    self.record.selected = id;
    self.record.selected_dark = id;
    self.persist(())
  }

  pub fn select_for_light(&mut self, id: ThemeId) -> Outcome {
    self.record.selected = id;
    self.persist(())
  }

  pub fn select_for_dark(&mut self, id: ThemeId) -> Outcome {
    self.record.selected_dark = id;
    self.persist(())
  }

  /// Remove a stored theme and its files.
  ///
  /// Only the light selection falls back to Default when it pointed at the
  /// removed theme; the dark selection is left as is. Default itself is never
  /// removed. Classic has no files and stays listed, but removing it still
  /// moves a light selection of Classic back to Default.
  pub fn remove(&mut self, id: ThemeId) -> Outcome {
    if id == ThemeId::DEFAULT {
      return Outcome::new(());
    }
    if self.record.selected == id {
      self.record.selected = ThemeId::DEFAULT;
    }
    let stored = match id {
      ThemeId::Virtual(_) => return self.persist(()),
      ThemeId::Stored(stored) => stored,
    };

    self.record.current_indices.retain(|&existing| existing != stored);

    let mut outcome = Outcome::new(());
    for name in [theme_file_name(stored), background_file_name(stored)] {
      if let Err(e) = blob::remove(&self.paths.resolve(Category::Themes, &name)) {
        outcome.push(Severity::Recoverable, e);
      }
    }

    let saved = self.persist(());
    outcome.issues.extend(saved.issues);
    outcome
  }

  fn persist<T>(&self, value: T) -> Outcome<T> {
    let mut outcome = Outcome::new(value);
    if let Err(e) = self.index.save(&self.record) {
      outcome.push(Severity::Uncommitted, e);
    }
    outcome
  }
}
