use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::IndexRecord;

/// Keyboard language a custard is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
  #[serde(rename = "ja_JP")]
  JaJp,
  #[serde(rename = "en_US")]
  EnUs,
  #[serde(rename = "el_GR")]
  ElGr,
  #[serde(rename = "undefined")]
  Undefined,
  #[serde(rename = "none")]
  None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputStyle {
  Direct,
  Roman2kana,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustardMetadata {
  pub custard_version: String,
  pub display_name: String,
}

/// A compiled custom keyboard layout.
///
/// `interface` is the key layout itself; the store treats it as opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Custard {
  pub identifier: String,
  pub language: Language,
  pub input_style: InputStyle,
  pub metadata: CustardMetadata,
  pub interface: serde_json::Value,
}

/// The in-app editor's working copy of a custard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditSnapshot(pub serde_json::Value);

/// Where a stored custard came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
  UserMade,
  Imported,
}

/// Per-custard bookkeeping kept in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustardEntryMetadata {
  pub origin: Origin,
  #[serde(rename = "shareLink", default, skip_serializing_if = "Option::is_none")]
  pub share_link: Option<String>,
}

impl CustardEntryMetadata {
  pub fn new(origin: Origin) -> Self {
    Self {
      origin,
      share_link: None,
    }
  }
}

/// Built-in keyboard tabs a tab bar can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemTab {
  UserJapanese,
  UserEnglish,
  FlickJapanese,
  QwertyEnglish,
  EmojiTab,
  ClipboardHistoryTab,
}

/// A keyboard tab: built-in or a stored custard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tab_type", content = "identifier", rename_all = "snake_case")]
pub enum TabTarget {
  System(SystemTab),
  Custom(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TabBarAction {
  MoveTab { tab: TabTarget },
  Input { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TabItemLabel {
  Text(String),
  Image(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabBarItem {
  pub label: TabItemLabel,
  #[serde(default)]
  pub pinned: bool,
  pub actions: Vec<TabBarAction>,
}

impl TabBarItem {
  /// Unpinned text item whose only action is switching to `tab`.
  pub fn move_tab(label: impl Into<String>, tab: TabTarget) -> Self {
    Self {
      label: TabItemLabel::Text(label.into()),
      pinned: false,
      actions: vec![TabBarAction::MoveTab { tab }],
    }
  }

  /// True when the item does exactly "switch to `tab`" and nothing else.
  pub fn only_moves_to(&self, tab: &TabTarget) -> bool {
    matches!(self.actions.as_slice(), [TabBarAction::MoveTab { tab: target }] if target == tab)
  }
}

/// A tab bar: an ordered list of items, stored one file per id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabBarData {
  pub identifier: u32,
  pub items: Vec<TabBarItem>,
}

impl TabBarData {
  /// Id of the tab bar shown by default.
  pub const DEFAULT_ID: u32 = 0;

  /// Built-in default tab bar, used until one has been saved.
  pub fn default_bar() -> Self {
    Self {
      identifier: Self::DEFAULT_ID,
      items: vec![
        TabBarItem::move_tab("あいう", TabTarget::System(SystemTab::UserJapanese)),
        TabBarItem::move_tab("ABC", TabTarget::System(SystemTab::UserEnglish)),
        TabBarItem::move_tab("絵文字", TabTarget::System(SystemTab::EmojiTab)),
      ],
    }
  }

  pub fn contains_move_to(&self, tab: &TabTarget) -> bool {
    self.items.iter().any(|item| item.only_moves_to(tab))
  }
}

/// The custard index: known custards, tab bars and per-custard metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustardIndexRecord {
  /// Identifiers in display order, without duplicates.
  #[serde(rename = "availableCustards")]
  pub available_custards: Vec<String>,
  #[serde(rename = "availableTabBars")]
  pub available_tab_bars: Vec<u32>,
  pub metadata: BTreeMap<String, CustardEntryMetadata>,
}

impl IndexRecord for CustardIndexRecord {
  const NAME: &'static str = "custard";
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn index_uses_shared_key_names() {
    let mut record = CustardIndexRecord::default();
    record.available_custards.push("flick_greek".into());
    record.available_tab_bars.push(0);
    record.metadata.insert(
      "flick_greek".into(),
      CustardEntryMetadata {
        origin: Origin::UserMade,
        share_link: Some("https://example.com/c/1".into()),
      },
    );

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "availableCustards": ["flick_greek"],
        "availableTabBars": [0],
        "metadata": {"flick_greek": {"origin": "userMade", "shareLink": "https://example.com/c/1"}}
      })
    );
  }

  #[test]
  fn index_requires_all_fields() {
    let result = serde_json::from_str::<CustardIndexRecord>(r#"{"availableCustards": []}"#);
    assert!(result.is_err());
  }

  #[test]
  fn metadata_without_share_link() {
    let meta: CustardEntryMetadata = serde_json::from_str(r#"{"origin": "imported"}"#).unwrap();
    assert_eq!(meta, CustardEntryMetadata::new(Origin::Imported));
    assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"origin":"imported"}"#);
  }

  #[test]
  fn language_codes() {
    assert_eq!(serde_json::to_string(&Language::JaJp).unwrap(), r#""ja_JP""#);
    assert_eq!(serde_json::from_str::<Language>(r#""el_GR""#).unwrap(), Language::ElGr);
    assert!(serde_json::from_str::<Language>(r#""fr_FR""#).is_err());
  }

  #[test]
  fn only_moves_to_requires_single_action() {
    let target = TabTarget::Custom("mine".into());
    let item = TabBarItem::move_tab("mine", target.clone());
    assert!(item.only_moves_to(&target));
    assert!(!item.only_moves_to(&TabTarget::Custom("other".into())));

    let mut extended = item.clone();
    extended.actions.push(TabBarAction::Input { text: "x".into() });
    assert!(!extended.only_moves_to(&target));
  }

  #[test]
  fn default_bar_switches_to_system_tabs() {
    let bar = TabBarData::default_bar();
    assert_eq!(bar.identifier, TabBarData::DEFAULT_ID);
    assert!(bar.contains_move_to(&TabTarget::System(SystemTab::UserJapanese)));
    assert!(!bar.contains_move_to(&TabTarget::Custom("anything".into())));
  }

  #[test]
  fn tab_action_encoding() {
    let action = TabBarAction::MoveTab {
      tab: TabTarget::Custom("my layout".into()),
    };
    assert_eq!(
      serde_json::to_value(&action).unwrap(),
      serde_json::json!({"type": "move_tab", "tab": {"tab_type": "custom", "identifier": "my layout"}})
    );
  }
}
