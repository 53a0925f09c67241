//! User themes and the light/dark theme selection.

mod storage;
mod types;

pub use storage::ThemeStore;
pub use types::{
  BuiltinTheme, Color, FontWeight, InvalidThemeId, PngImage, Theme, ThemeId, ThemeIndexRecord, ThemePicture,
};
