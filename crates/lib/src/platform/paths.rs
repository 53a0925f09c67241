//! Default container location.
//!
//! Stores never call these on their own; the container root is always handed to
//! [`ContainerPaths`](crate::store::paths::ContainerPaths) explicitly. These helpers
//! only supply the default a front end passes in.

use std::path::PathBuf;

use crate::consts::{APP_NAME, CONTAINER_ENV};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  std::env::var("USERPROFILE").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  std::env::var("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join("AppData").join("Roaming"))
    .join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Returns the shared container root.
///
/// `KBSTORE_CONTAINER` wins when set; otherwise `<data_dir>/container`.
pub fn container_dir() -> PathBuf {
  if let Ok(path) = std::env::var(CONTAINER_ENV) {
    return PathBuf::from(path);
  }

  default_container_dir()
}

pub fn default_container_dir() -> PathBuf {
  data_dir().join("container")
}

#[cfg(test)]
#[cfg(not(windows))]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  #[serial]
  fn env_var_overrides_default_container() {
    temp_env::with_vars(
      [
        (CONTAINER_ENV, Some("/custom/container")),
        ("XDG_DATA_HOME", Some("/custom/data")),
      ],
      || {
        assert_eq!(container_dir(), PathBuf::from("/custom/container"));
      },
    );
  }

  #[test]
  #[serial]
  fn xdg_data_home_takes_precedence() {
    temp_env::with_vars(
      [
        (CONTAINER_ENV, None::<&str>),
        ("XDG_DATA_HOME", Some("/custom/data")),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(container_dir(), PathBuf::from("/custom/data").join(APP_NAME).join("container"));
      },
    );
  }

  #[test]
  #[serial]
  fn falls_back_to_home_directory() {
    temp_env::with_vars(
      [
        (CONTAINER_ENV, None::<&str>),
        ("XDG_DATA_HOME", None::<&str>),
        ("HOME", Some("/home/user")),
      ],
      || {
        assert_eq!(
          container_dir(),
          PathBuf::from("/home/user/.local/share").join(APP_NAME).join("container")
        );
      },
    );
  }
}
