use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::error::StoreError;
use crate::index::IndexRecord;

/// A theme that ships with the keyboard and has no backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTheme {
  /// The system-matching default theme (raw id `0`).
  Default,
  /// The classic look (raw id `-1`).
  Classic,
}

impl BuiltinTheme {
  pub fn title(self) -> &'static str {
    match self {
      BuiltinTheme::Default => "Default",
      BuiltinTheme::Classic => "Classic",
    }
  }

  pub fn theme(self) -> Theme {
    match self {
      BuiltinTheme::Default => Theme::native(),
      BuiltinTheme::Classic => Theme::classic(),
    }
  }
}

/// Identifies a theme: a built-in one or a stored user theme.
///
/// On disk this is the raw integer: `0` Default, `-1` Classic, positive for stored themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ThemeId {
  Virtual(BuiltinTheme),
  Stored(NonZeroU32),
}

impl ThemeId {
  pub const DEFAULT: ThemeId = ThemeId::Virtual(BuiltinTheme::Default);
  pub const CLASSIC: ThemeId = ThemeId::Virtual(BuiltinTheme::Classic);

  /// A stored id; `None` for zero.
  pub fn stored(id: u32) -> Option<Self> {
    NonZeroU32::new(id).map(ThemeId::Stored)
  }

  pub fn raw(self) -> i64 {
    match self {
      ThemeId::Virtual(BuiltinTheme::Default) => 0,
      ThemeId::Virtual(BuiltinTheme::Classic) => -1,
      ThemeId::Stored(id) => i64::from(id.get()),
    }
  }
}

/// An integer that names no theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid theme id {0}")]
pub struct InvalidThemeId(pub i64);

impl TryFrom<i64> for ThemeId {
  type Error = InvalidThemeId;

  fn try_from(raw: i64) -> Result<Self, Self::Error> {
    match raw {
      0 => Ok(ThemeId::DEFAULT),
      -1 => Ok(ThemeId::CLASSIC),
      n => u32::try_from(n)
        .ok()
        .and_then(ThemeId::stored)
        .ok_or(InvalidThemeId(n)),
    }
  }
}

impl From<ThemeId> for i64 {
  fn from(id: ThemeId) -> Self {
    id.raw()
  }
}

impl From<NonZeroU32> for ThemeId {
  fn from(id: NonZeroU32) -> Self {
    ThemeId::Stored(id)
  }
}

impl fmt::Display for ThemeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.raw())
  }
}

impl FromStr for ThemeId {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let raw: i64 = s.trim().parse().map_err(|_| format!("not a theme id: {}", s))?;
    ThemeId::try_from(raw).map_err(|e| e.to_string())
  }
}

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
  pub red: u8,
  pub green: u8,
  pub blue: u8,
  pub alpha: u8,
}

impl Color {
  pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
    Self {
      red,
      green,
      blue,
      alpha,
    }
  }

  pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
    Self::rgba(red, green, blue, 255)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
  Ultralight,
  Thin,
  Light,
  Regular,
  Medium,
  Semibold,
  Bold,
  Heavy,
  Black,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG-encoded image bytes held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct PngImage(Vec<u8>);

impl PngImage {
  /// Wrap `bytes`, checking the PNG signature.
  pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, StoreError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
      Ok(Self(bytes))
    } else {
      Err(StoreError::InvalidImage(bytes.len()))
    }
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.0
  }

  pub fn into_bytes(self) -> Vec<u8> {
    self.0
  }
}

impl fmt::Debug for PngImage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "PngImage({} bytes)", self.0.len())
  }
}

/// Background picture of a theme.
///
/// `Image` exists only in memory: saving a theme writes it to a sibling PNG
/// file and stores a `Path` instead, and serializing it directly is an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ThemePicture {
  #[default]
  None,
  /// Container-relative path of an image file.
  Path(String),
  #[serde(skip)]
  Image(PngImage),
}

/// A keyboard theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
  /// Assigned on first save.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<NonZeroU32>,
  pub background_color: Color,
  #[serde(default)]
  pub picture: ThemePicture,
  pub text_color: Color,
  pub text_font: FontWeight,
  pub result_text_color: Color,
  pub result_background_color: Color,
  pub border_color: Color,
  pub border_width: f64,
  pub normal_key_fill_color: Color,
  pub special_key_fill_color: Color,
  pub pushed_key_fill_color: Color,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suggest_key_fill_color: Option<Color>,
}

impl Theme {
  /// The built-in Default theme.
  pub fn native() -> Self {
    Self {
      id: None,
      background_color: Color::rgb(209, 211, 217),
      picture: ThemePicture::None,
      text_color: Color::rgb(0, 0, 0),
      text_font: FontWeight::Regular,
      result_text_color: Color::rgb(0, 0, 0),
      result_background_color: Color::rgb(209, 211, 217),
      border_color: Color::rgba(0, 0, 0, 0),
      border_width: 0.0,
      normal_key_fill_color: Color::rgb(255, 255, 255),
      special_key_fill_color: Color::rgb(171, 177, 186),
      pushed_key_fill_color: Color::rgb(171, 177, 186),
      suggest_key_fill_color: None,
    }
  }

  /// The built-in Classic theme.
  pub fn classic() -> Self {
    Self {
      id: None,
      background_color: Color::rgb(222, 224, 228),
      picture: ThemePicture::None,
      text_color: Color::rgb(0, 0, 0),
      text_font: FontWeight::Bold,
      result_text_color: Color::rgb(0, 0, 0),
      result_background_color: Color::rgb(222, 224, 228),
      border_color: Color::rgba(0, 0, 0, 0),
      border_width: 1.0,
      normal_key_fill_color: Color::rgb(250, 250, 250),
      special_key_fill_color: Color::rgb(200, 200, 205),
      pushed_key_fill_color: Color::rgb(180, 180, 185),
      suggest_key_fill_color: Some(Color::rgb(245, 200, 120)),
    }
  }
}

/// The theme index: which user themes exist and which are selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeIndexRecord {
  /// Stored theme ids in insertion order, without duplicates.
  #[serde(rename = "currentIndices")]
  pub current_indices: Vec<NonZeroU32>,
  #[serde(rename = "selectedIndex")]
  pub selected: ThemeId,
  #[serde(rename = "selectedIndex_dark")]
  pub selected_dark: ThemeId,
}

impl Default for ThemeIndexRecord {
  fn default() -> Self {
    Self {
      current_indices: Vec::new(),
      selected: ThemeId::DEFAULT,
      selected_dark: ThemeId::DEFAULT,
    }
  }
}

impl ThemeIndexRecord {
  /// Id for the next new theme: one past the largest stored id.
  ///
  /// `None` once the largest stored id is `u32::MAX`; ids are never reused.
  pub fn next_id(&self) -> Option<NonZeroU32> {
    match self.current_indices.iter().max() {
      Some(max) => max.checked_add(1),
      None => Some(NonZeroU32::MIN),
    }
  }
}

/// Theme index layouts found on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ThemeIndexLayout {
  /// Written before dark-mode selection existed: no `selectedIndex_dark`, or `null`.
  Legacy,
  /// Light and dark selection.
  Current,
}

impl ThemeIndexLayout {
  fn detect(value: &serde_json::Value) -> Self {
    match value.get("selectedIndex_dark") {
      None | Some(serde_json::Value::Null) => ThemeIndexLayout::Legacy,
      Some(_) => ThemeIndexLayout::Current,
    }
  }
}

#[derive(Deserialize)]
struct LegacyThemeIndex {
  #[serde(rename = "currentIndices")]
  current_indices: Vec<i64>,
  #[serde(rename = "selectedIndex")]
  selected: ThemeId,
}

impl LegacyThemeIndex {
  /// Dark selection starts out equal to the light one.
  fn migrate(self) -> DecodedThemeIndex {
    DecodedThemeIndex {
      current_indices: self.current_indices,
      selected: self.selected,
      selected_dark: self.selected,
    }
  }
}

#[derive(Deserialize)]
struct CurrentThemeIndex {
  #[serde(rename = "currentIndices")]
  current_indices: Vec<i64>,
  #[serde(rename = "selectedIndex")]
  selected: ThemeId,
  #[serde(rename = "selectedIndex_dark")]
  selected_dark: serde_json::Value,
}

impl CurrentThemeIndex {
  /// A dark selection that names no theme falls back to the light one.
  fn migrate(self) -> DecodedThemeIndex {
    let selected_dark = ThemeId::deserialize(&self.selected_dark).unwrap_or_else(|e| {
      warn!(value = %self.selected_dark, "ignoring dark theme selection: {}", e);
      self.selected
    });
    DecodedThemeIndex {
      current_indices: self.current_indices,
      selected: self.selected,
      selected_dark,
    }
  }
}

struct DecodedThemeIndex {
  current_indices: Vec<i64>,
  selected: ThemeId,
  selected_dark: ThemeId,
}

impl DecodedThemeIndex {
  /// Older writers listed the built-in `0` among the stored ids; keep only
  /// positive ids, first occurrence wins.
  fn into_record(self) -> ThemeIndexRecord {
    let mut current_indices: Vec<NonZeroU32> = Vec::with_capacity(self.current_indices.len());
    for raw in self.current_indices {
      let Some(id) = u32::try_from(raw).ok().and_then(NonZeroU32::new) else {
        continue;
      };
      if !current_indices.contains(&id) {
        current_indices.push(id);
      }
    }
    ThemeIndexRecord {
      current_indices,
      selected: self.selected,
      selected_dark: self.selected_dark,
    }
  }
}

impl<'de> Deserialize<'de> for ThemeIndexRecord {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let decoded = match ThemeIndexLayout::detect(&value) {
      ThemeIndexLayout::Legacy => LegacyThemeIndex::deserialize(value)
        .map_err(<D::Error as serde::de::Error>::custom)?
        .migrate(),
      ThemeIndexLayout::Current => CurrentThemeIndex::deserialize(value)
        .map_err(<D::Error as serde::de::Error>::custom)?
        .migrate(),
    };
    Ok(decoded.into_record())
  }
}

impl IndexRecord for ThemeIndexRecord {
  const NAME: &'static str = "theme";
}
