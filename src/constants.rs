//! Application-wide constants.
//!
//! This module defines names and file locations shared by the settings store,
//! the key-binding store and the command-line front end.

/// The display name of the application.
pub const APP_NAME: &str = "Digital";

/// The binary name of the command-line front end.
pub const APP_BINARY_NAME: &str = "digital-prefs";

/// Environment variable that overrides every per-user storage root.
pub const HOME_ENV_VAR: &str = "DIGITAL_HOME";

/// Directory below the platform config dir holding `settings.toml`.
pub const CONFIG_DIR_NAME: &str = "Digital";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Hidden per-user directory on non-Windows systems.
pub const UNIX_HOME_DIR_NAME: &str = ".digital";

/// Directory holding the key-binding file, both on disk and in the bundle.
pub const KEYBINDS_DIR_NAME: &str = "keybinds";

/// Key-binding file name.
pub const KEYBINDS_FILE_NAME: &str = "kb.json";
