//! Shared test fixtures for integration and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use digital_prefs::keybinds::{DefaultsSource, KeyBindMap, KeyBindStore};
use digital_prefs::models::{Color, ColorKey, KeyCombo};
use digital_prefs::scheme::catalog::default_scheme;
use digital_prefs::scheme::Scheme;
use digital_prefs::settings::SettingsStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Defaults used by the first-run tests.
pub const FIRST_RUN_DEFAULTS: &str = r#"{"NewRow": "R", "Delete": "Shift+D"}"#;

/// Path of `kb.json` below a `DIGITAL_HOME` directory.
pub fn keybinds_file(home: &Path) -> PathBuf {
    home.join("keybinds").join("kb.json")
}

/// Path of `settings.toml` below a `DIGITAL_HOME` directory.
pub fn settings_file(home: &Path) -> PathBuf {
    home.join("settings.toml")
}

/// Writes a key-binding document to the local file below `home`.
pub fn write_keybinds(home: &Path, json: &str) {
    let path = keybinds_file(home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, json).unwrap();
}

/// Reads the local key-binding file below `home`.
pub fn read_keybinds(home: &Path) -> KeyBindMap {
    let content = fs::read_to_string(keybinds_file(home)).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Key-binding store inside a fresh temp directory.
///
/// # Returns
/// The store (unloaded) and the directory guard.
pub fn temp_keybind_store(defaults: DefaultsSource) -> (KeyBindStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = KeyBindStore::new(keybinds_file(dir.path()), defaults);
    (store, dir)
}

/// Builds a mapping from `(action, "KEY" | "Shift+KEY")` pairs.
pub fn bindings(pairs: &[(&str, &str)]) -> KeyBindMap {
    pairs
        .iter()
        .map(|(action, key)| ((*action).to_string(), KeyCombo::parse(key)))
        .collect()
}

/// File-backed settings store inside `home`.
pub fn settings_store(home: &Path) -> Arc<SettingsStore> {
    Arc::new(SettingsStore::open(settings_file(home)).unwrap())
}

/// A custom palette that differs from the default scheme in two keys.
pub fn custom_palette(seed: u8) -> Scheme {
    default_scheme()
        .derive()
        .set(ColorKey::Background, Color::rgb(seed, seed, seed))
        .set(ColorKey::Grid, Color::rgba(seed, 0, 0, 128))
        .build()
}
