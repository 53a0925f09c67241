//! CustardStore instances sharing a container.

use kbstore_lib::CustardStore;
use kbstore_lib::custard::{CustardEntryMetadata, Origin, TabBarData, TabTarget};

use super::common::{container, custard, index_on_disk};

fn user_made() -> CustardEntryMetadata {
  CustardEntryMetadata::new(Origin::UserMade)
}

#[test]
fn last_writer_wins() {
  let (_temp, paths) = container();
  let mut host = CustardStore::load(&paths);
  let mut extension = CustardStore::load(&paths);

  host
    .save_custard(&custard("foo"), user_made(), None, false)
    .unwrap()
    .into_value();
  extension
    .save_custard(&custard("bar"), user_made(), None, false)
    .unwrap()
    .into_value();

  let index = index_on_disk(&paths, "custard");
  assert_eq!(index["availableCustards"], serde_json::json!(["bar"]));
  assert_eq!(CustardStore::load(&paths).available_custards(), ["bar".to_string()]);
}

#[test]
fn blobs_survive_lost_index_entry() {
  let (_temp, paths) = container();
  let mut host = CustardStore::load(&paths);
  let mut extension = CustardStore::load(&paths);

  host
    .save_custard(&custard("foo"), user_made(), None, false)
    .unwrap()
    .into_value();
  extension
    .save_custard(&custard("bar"), user_made(), None, false)
    .unwrap()
    .into_value();

  // "foo" is no longer indexed but its file is still readable.
  let reader = CustardStore::load(&paths);
  assert!(!reader.available_custards().contains(&"foo".to_string()));
  assert_eq!(reader.custard("foo").unwrap().identifier, "foo");
}

#[test]
fn reload_picks_up_other_instance() {
  let (_temp, paths) = container();
  let mut host = CustardStore::load(&paths);
  let mut extension = CustardStore::load(&paths);

  host
    .save_custard(&custard("shared"), user_made(), None, true)
    .unwrap()
    .into_value();
  assert!(extension.available_custards().is_empty());

  extension.reload();

  assert_eq!(extension.available_custards(), ["shared".to_string()]);
  assert_eq!(extension.available_tab_bars(), [TabBarData::DEFAULT_ID]);
  assert!(extension.tab_bar_contains(TabBarData::DEFAULT_ID, &TabTarget::Custom("shared".into())));
  assert!(extension.set_share_link("shared", "https://example.com/c/7").value);
  assert_eq!(index_on_disk(&paths, "custard")["metadata"]["shared"]["shareLink"], "https://example.com/c/7");
}
