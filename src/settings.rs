//! Settings store for the color scheme selection.
//!
//! This module holds the process-wide key/value settings the scheme registry
//! depends on: which named scheme is active and the user's custom palette.
//! Values are persisted in TOML with platform-specific directory resolution,
//! and every change is announced to registered listeners.

use crate::constants::{CONFIG_DIR_NAME, HOME_ENV_VAR, SETTINGS_FILE_NAME};
use crate::scheme::{Scheme, SchemeSelector};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError, RwLock, Weak};

/// Persisted settings values.
///
/// # File Location
///
/// - Linux: `~/.config/Digital/settings.toml`
/// - macOS: `~/Library/Application Support/Digital/settings.toml`
/// - Windows: `%APPDATA%\Digital\settings.toml`
///
/// `DIGITAL_HOME` replaces the directory on every platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Which named scheme is in effect
    #[serde(default)]
    pub color_scheme: SchemeSelector,
    /// The user's custom palette, if one was ever saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_color_scheme: Option<Scheme>,
}

/// Identifies which setting changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// The active scheme selector
    ColorScheme,
    /// The custom palette
    CustomColorScheme,
}

/// Returns false once it should be unregistered.
type Listener = Arc<dyn Fn(SettingKey) -> bool + Send + Sync>;

/// Thread-safe settings store with change notification.
///
/// Listeners run on the writing thread after the store's lock is released,
/// so they may read the store freely.
pub struct SettingsStore {
    path: Option<PathBuf>,
    values: RwLock<Settings>,
    listeners: Mutex<Vec<Listener>>,
}

impl SettingsStore {
    /// Creates a store that is never written to disk.
    #[must_use]
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            values: RwLock::new(settings),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Opens the store backed by `path`.
    ///
    /// A missing file yields default settings; the file is created on the
    /// first [`save`](Self::save).
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = Self::read_file(&path)?;

        Ok(Self {
            path: Some(path),
            values: RwLock::new(settings),
            listeners: Mutex::new(Vec::new()),
        })
    }

    /// Opens the store at [`settings_file_path`](Self::settings_file_path).
    pub fn open_default() -> Result<Self> {
        Self::open(Self::settings_file_path()?)
    }

    /// The process-wide store.
    ///
    /// Opened from the default location on first use. If the file cannot be
    /// read the store falls back to in-memory defaults so theming never blocks
    /// startup.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<SettingsStore>> = OnceLock::new();
        let store = GLOBAL.get_or_init(|| {
            let store = Self::open_default().unwrap_or_else(|e| {
                tracing::warn!("Failed to load settings, using defaults: {:#}", e);
                Self::in_memory(Settings::default())
            });
            Arc::new(store)
        });
        Arc::clone(store)
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Digital/`
    /// - macOS: `~/Library/Application Support/Digital/`
    /// - Windows: `%APPDATA%\Digital\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV_VAR) {
            return Ok(PathBuf::from(home));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the settings file.
    pub fn settings_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of every current value.
    #[must_use]
    pub fn snapshot(&self) -> Settings {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The active scheme selector.
    #[must_use]
    pub fn color_scheme(&self) -> SchemeSelector {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .color_scheme
    }

    /// The stored custom palette, if any.
    #[must_use]
    pub fn custom_color_scheme(&self) -> Option<Scheme> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .custom_color_scheme
            .clone()
    }

    /// Sets the active scheme selector and notifies listeners on change.
    pub fn set_color_scheme(&self, selector: SchemeSelector) {
        let changed = {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            let changed = values.color_scheme != selector;
            values.color_scheme = selector;
            changed
        };

        if changed {
            tracing::debug!("Color scheme set to {}", selector);
            self.notify(SettingKey::ColorScheme);
        }
    }

    /// Stores the custom palette and notifies listeners on change.
    pub fn set_custom_color_scheme(&self, scheme: Scheme) {
        let changed = {
            let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
            let changed = !values
                .custom_color_scheme
                .as_ref()
                .is_some_and(|current| current.is_identical(&scheme));
            values.custom_color_scheme = Some(scheme);
            changed
        };

        if changed {
            tracing::debug!("Custom color scheme updated");
            self.notify(SettingKey::CustomColorScheme);
        }
    }

    /// Removes the custom palette and notifies listeners if one was set.
    pub fn clear_custom_color_scheme(&self) {
        let changed = self
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .custom_color_scheme
            .take()
            .is_some();

        if changed {
            self.notify(SettingKey::CustomColorScheme);
        }
    }

    /// Registers a change listener for the lifetime of the store.
    pub fn add_listener<F>(&self, listener: F)
    where
        F: Fn(SettingKey) + Send + Sync + 'static,
    {
        self.push_listener(Arc::new(move |key| {
            listener(key);
            true
        }));
    }

    /// Registers a listener bound to `target`.
    ///
    /// The store only keeps a weak reference; once `target` is dropped the
    /// listener is removed on the next notification.
    pub fn add_weak_listener<T, F>(&self, target: &Arc<T>, listener: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&T, SettingKey) + Send + Sync + 'static,
    {
        let weak: Weak<T> = Arc::downgrade(target);
        self.push_listener(Arc::new(move |key| match weak.upgrade() {
            Some(target) => {
                listener(&target, key);
                true
            }
            None => false,
        }));
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn push_listener(&self, listener: Listener) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }

    /// Saves settings to the backing file using atomic write.
    ///
    /// Uses temp file + rename pattern. In-memory stores have nothing to do.
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        // Ensure config directory exists
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context(format!(
                "Failed to create config directory: {}",
                dir.display()
            ))?;
        }

        let content =
            toml::to_string_pretty(&self.snapshot()).context("Failed to serialize settings")?;

        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp settings file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp settings file to: {}",
            path.display()
        ))?;

        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    fn read_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).context(format!(
            "Failed to read settings file: {}",
            path.display()
        ))?;

        toml::from_str(&content).context(format!(
            "Failed to parse settings file: {}",
            path.display()
        ))
    }

    fn notify(&self, key: SettingKey) {
        // Clone out so listeners may register further listeners.
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let stale: Vec<Listener> = listeners
            .into_iter()
            .filter(|listener| !listener(key))
            .collect();

        if !stale.is_empty() {
            tracing::debug!("Dropping {} stale settings listener(s)", stale.len());
            self.listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|listener| !stale.iter().any(|gone| Arc::ptr_eq(listener, gone)));
        }
    }
}

impl fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listener_count = self
            .listeners
            .lock()
            .map_or(0, |listeners| listeners.len());
        f.debug_struct("SettingsStore")
            .field("path", &self.path)
            .field("values", &self.snapshot())
            .field("listeners", &listener_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Color, ColorKey};
    use crate::scheme::catalog::default_scheme;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn custom_scheme() -> Scheme {
        default_scheme()
            .derive()
            .set(ColorKey::Background, Color::rgb(1, 2, 3))
            .build()
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.color_scheme, SchemeSelector::Dark);
        assert!(settings.custom_color_scheme.is_none());
    }

    #[test]
    fn test_partial_settings_file() {
        let settings: Settings = toml::from_str("color_scheme = \"color_blind\"").unwrap();
        assert_eq!(settings.color_scheme, SchemeSelector::ColorBlind);
        assert!(settings.custom_color_scheme.is_none());
    }

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let store = SettingsStore::open(temp_dir.path().join("settings.toml")).unwrap();
        assert_eq!(store.snapshot(), Settings::default());
    }

    #[test]
    fn test_open_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "color_scheme = \"plaid\"").unwrap();

        let err = SettingsStore::open(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse settings file"));
    }

    #[test]
    fn test_save_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.toml");

        let store = SettingsStore::open(&path).unwrap();
        store.set_color_scheme(SchemeSelector::Custom);
        store.set_custom_color_scheme(custom_scheme());
        store.save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("toml.tmp").exists());

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.color_scheme(), SchemeSelector::Custom);
        assert_eq!(reopened.custom_color_scheme(), Some(custom_scheme()));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let store = SettingsStore::in_memory(Settings::default());
        assert!(store.save().is_ok());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_listeners_fire_only_on_change() {
        let store = SettingsStore::in_memory(Settings::default());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.add_listener(move |key| {
            assert_eq!(key, SettingKey::ColorScheme);
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set_color_scheme(SchemeSelector::Default);
        store.set_color_scheme(SchemeSelector::Default);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_theme_only_custom_change_notifies() {
        let store = SettingsStore::in_memory(Settings::default());
        store.set_custom_color_scheme(custom_scheme());
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        store.add_listener(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        store.set_custom_color_scheme(custom_scheme());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let dark = custom_scheme()
            .derive()
            .theme(crate::scheme::DARK_THEME)
            .theme_type(crate::scheme::ThemeType::Dark)
            .build();
        store.set_custom_color_scheme(dark);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_weak_listener_removed_after_target_dropped() {
        let store = SettingsStore::in_memory(Settings::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let target = Arc::new(Arc::clone(&calls));
        store.add_weak_listener(&target, |calls, _| {
            calls.fetch_add(1, Ordering::SeqCst);
        });
        store.add_listener(|_| {});
        assert_eq!(store.listener_count(), 2);

        store.set_color_scheme(SchemeSelector::Default);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 2);

        drop(target);
        store.set_color_scheme(SchemeSelector::ColorBlind);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_listener_can_read_store() {
        let store = Arc::new(SettingsStore::in_memory(Settings::default()));
        let observed = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&store);
        let sink = Arc::clone(&observed);
        store.add_listener(move |_| {
            if let Some(store) = weak.upgrade() {
                *sink.lock().unwrap() = Some(store.custom_color_scheme());
            }
        });

        store.set_custom_color_scheme(custom_scheme());
        assert_eq!(*observed.lock().unwrap(), Some(Some(custom_scheme())));

        store.clear_custom_color_scheme();
        assert_eq!(*observed.lock().unwrap(), Some(None));
    }
}
