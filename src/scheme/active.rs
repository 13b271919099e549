//! The color scheme currently in effect.
//!
//! [`ActiveScheme`] caches the resolved scheme and keeps it in step with the
//! settings store: a listener recomputes it whenever the selector changes, or
//! the custom palette changes while it is selected. Live palette editing goes
//! through [`ActiveScheme::update_custom_scheme`], which installs the new
//! scheme directly instead of waiting for the listener.

use super::catalog::{SchemeRegistry, SchemeSelector};
use super::Scheme;
use crate::settings::{SettingKey, SettingsStore};
use std::sync::{Arc, Once, OnceLock, PoisonError, RwLock};

/// Cached active scheme bound to a settings store.
///
/// Cloning is cheap and yields a handle to the same cache.
#[derive(Debug, Clone)]
pub struct ActiveScheme {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    registry: SchemeRegistry,
    current: RwLock<Option<Arc<Scheme>>>,
    listener: Once,
}

impl ActiveScheme {
    /// Creates an empty cache over `settings`; nothing is resolved until the
    /// first [`get`](Self::get).
    #[must_use]
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: SchemeRegistry::new(settings),
                current: RwLock::new(None),
                listener: Once::new(),
            }),
        }
    }

    /// The process-wide cache over [`SettingsStore::global`].
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<ActiveScheme> = OnceLock::new();
        GLOBAL.get_or_init(|| Self::new(SettingsStore::global()))
    }

    /// The registry used to resolve selectors.
    #[must_use]
    pub fn registry(&self) -> &SchemeRegistry {
        &self.inner.registry
    }

    /// The backing settings store.
    #[must_use]
    pub fn settings(&self) -> &Arc<SettingsStore> {
        self.inner.registry.settings()
    }

    /// Returns the scheme in effect.
    ///
    /// The first call resolves the selector and subscribes to the settings
    /// store; later calls only clone the cached pointer.
    #[must_use]
    pub fn get(&self) -> Arc<Scheme> {
        self.inner.listener.call_once(|| self.subscribe());

        if let Some(scheme) = self.inner.cached() {
            return scheme;
        }

        let mut current = self
            .inner
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(scheme) = current.as_ref() {
            return Arc::clone(scheme);
        }

        let scheme = self.inner.resolve_selected();
        *current = Some(Arc::clone(&scheme));
        scheme
    }

    /// Selects a named scheme.
    ///
    /// The settings listener picks up the change and recomputes the cache.
    pub fn select(&self, selector: SchemeSelector) {
        self.settings().set_color_scheme(selector);
    }

    /// Stores an edited custom palette.
    ///
    /// When the custom scheme is selected and `scheme` differs from the one
    /// in use, it becomes the active scheme immediately.
    pub fn update_custom_scheme(&self, scheme: Scheme) {
        let scheme = Arc::new(scheme);

        {
            // Hold the cache lock so a concurrent selector change cannot
            // interleave between reading the selector and installing.
            let mut current = self
                .inner
                .current
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let replaced = self.inner.registry.replace_custom(&scheme);
            if replaced && self.settings().color_scheme() == SchemeSelector::Custom {
                tracing::debug!("Installing edited custom scheme");
                *current = Some(Arc::clone(&scheme));
            }
        }

        self.settings().set_custom_color_scheme((*scheme).clone());
    }

    fn subscribe(&self) {
        self.settings()
            .add_weak_listener(&self.inner, |inner, key| inner.on_setting_changed(key));
    }
}

impl Inner {
    fn cached(&self) -> Option<Arc<Scheme>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn resolve_selected(&self) -> Arc<Scheme> {
        self.registry.resolve(self.registry.settings().color_scheme())
    }

    fn on_setting_changed(&self, key: SettingKey) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        match key {
            SettingKey::ColorScheme => {}
            SettingKey::CustomColorScheme => {
                self.registry.invalidate_custom();
                if self.registry.settings().color_scheme() != SchemeSelector::Custom {
                    return;
                }
            }
        }

        let scheme = self.resolve_selected();
        // Keep the installed pointer when nothing visible changed.
        let unchanged = current
            .as_deref()
            .is_some_and(|installed| installed.is_identical(&scheme));
        if !unchanged {
            tracing::debug!("Active color scheme recomputed");
            *current = Some(scheme);
        }
    }
}

/// The scheme currently in effect for the whole process.
///
/// ```no_run
/// use digital_prefs::models::ColorKey;
/// use digital_prefs::scheme::active_scheme;
///
/// let background = active_scheme().color(ColorKey::Background);
/// ```
#[must_use]
pub fn active_scheme() -> Arc<Scheme> {
    ActiveScheme::global().get()
}
