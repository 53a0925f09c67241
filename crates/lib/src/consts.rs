//! Names shared by every store in the container.

/// Application name used for default directories.
pub const APP_NAME: &str = "kbstore";

/// Environment variable overriding the default container root.
pub const CONTAINER_ENV: &str = "KBSTORE_CONTAINER";

/// Index file name inside each category directory.
pub const INDEX_FILENAME: &str = "index.json";

/// Directory holding theme blobs and the theme index.
pub const THEMES_DIR: &str = "themes";

/// Directory holding custard blobs, tab bars and the custard index.
pub const CUSTARD_DIR: &str = "custard";

/// Suffix of the compiled custard blob.
pub const CUSTARD_MAIN_SUFFIX: &str = "_main.custard";

/// Suffix of the editable custard snapshot.
pub const CUSTARD_EDIT_SUFFIX: &str = "_edit.json";
