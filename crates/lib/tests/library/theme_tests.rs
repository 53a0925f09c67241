//! ThemeStore instances sharing a container.

use kbstore_lib::ThemeStore;
use kbstore_lib::theme::{Theme, ThemeId};

use super::common::{container, index_on_disk};

#[test]
fn saved_theme_is_visible_after_reload() {
  let (_temp, paths) = container();
  let mut host = ThemeStore::load(&paths);
  let mut extension = ThemeStore::load(&paths);

  let id = host.save_theme(Theme::classic()).unwrap().into_value();
  host.select(id).into_value();

  assert_eq!(extension.selected(), ThemeId::DEFAULT);
  extension.reload();
  assert_eq!(extension.selected(), id);
  assert_eq!(extension.selected_dark(), id);
  assert_eq!(extension.theme(id).unwrap().id, Some(std::num::NonZeroU32::new(1).unwrap()));
}

#[test]
fn stale_selection_overwrites_other_instance() {
  let (_temp, paths) = container();
  let mut host = ThemeStore::load(&paths);
  let mut extension = ThemeStore::load(&paths);

  let id = host.save_theme(Theme::native()).unwrap().into_value();
  extension.select_for_dark(ThemeId::CLASSIC).into_value();

  // The extension never saw the new theme, so its write drops it from the index.
  let index = index_on_disk(&paths, "themes");
  assert_eq!(index["currentIndices"], serde_json::json!([]));
  assert_eq!(index["selectedIndex_dark"], -1);
  assert!(ThemeStore::load(&paths).theme(id).is_ok());
}

#[test]
fn ids_continue_from_disk_state() {
  let (_temp, paths) = container();
  let mut host = ThemeStore::load(&paths);
  host.save_theme(Theme::native()).unwrap().into_value();
  host.save_theme(Theme::native()).unwrap().into_value();

  let mut extension = ThemeStore::load(&paths);
  let id = extension.save_theme(Theme::native()).unwrap().into_value();

  assert_eq!(id, ThemeId::stored(3).unwrap());
  assert_eq!(
    extension.indices(),
    vec![
      ThemeId::DEFAULT,
      ThemeId::CLASSIC,
      ThemeId::stored(1).unwrap(),
      ThemeId::stored(2).unwrap(),
      ThemeId::stored(3).unwrap()
    ]
  );
}
