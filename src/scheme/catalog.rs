//! Named color schemes and their resolution.

use super::{Scheme, ThemeType, DARK_THEME, LIGHT_THEME};
use crate::models::{Color, ColorKey};
use crate::settings::SettingsStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

static DEFAULT_SCHEME: LazyLock<Arc<Scheme>> = LazyLock::new(|| {
    Arc::new(
        Scheme::builder()
            .set(ColorKey::Background, Color::rgb(255, 250, 250))
            .set(ColorKey::Main, Color::BLACK)
            .set(ColorKey::Selected, Color::rgb(208, 208, 208))
            .set(ColorKey::Wire, Color::BLUE.darker())
            .set(ColorKey::WireLow, Color::rgb(0, 142, 0))
            .set(ColorKey::WireHigh, Color::rgb(102, 255, 102))
            .set(ColorKey::WireOut, Color::RED.darker())
            .set(ColorKey::WireValue, Color::rgb(50, 162, 50))
            .set(ColorKey::WireZ, Color::GRAY)
            .set(ColorKey::Pins, Color::GRAY)
            .set(ColorKey::Highlight, Color::CYAN)
            .set(ColorKey::Grid, Color::rgb(210, 210, 210))
            .set(ColorKey::Passed, Color::GREEN)
            .set(ColorKey::Error, Color::RED)
            .set(ColorKey::Disabled, Color::LIGHT_GRAY)
            .set(ColorKey::Testcase, Color::rgba(180, 255, 180, 200))
            .set(ColorKey::Async, Color::rgba(255, 180, 180, 200))
            .theme(LIGHT_THEME)
            .theme_type(ThemeType::Light)
            .build(),
    )
});

static DARK_SCHEME: LazyLock<Arc<Scheme>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_SCHEME
            .derive()
            .set(ColorKey::Background, Color::rgb(54, 54, 54))
            .set(ColorKey::Main, Color::rgb(220, 220, 220))
            .set(ColorKey::Selected, Color::rgb(52, 52, 52))
            .set(ColorKey::Grid, Color::rgb(79, 79, 79))
            .set(ColorKey::Disabled, Color::rgb(40, 40, 40))
            .set(ColorKey::Wire, Color::rgb(52, 152, 219))
            .set(ColorKey::Highlight, Color::rgb(120, 182, 231))
            .set(ColorKey::WireOut, Color::rgb(231, 77, 60))
            .theme(DARK_THEME)
            .theme_type(ThemeType::Dark)
            .build(),
    )
});

static COLOR_BLIND_SCHEME: LazyLock<Arc<Scheme>> = LazyLock::new(|| {
    Arc::new(
        DEFAULT_SCHEME
            .derive()
            .set(ColorKey::Wire, Color::rgb(0, 0, 255))
            .set(ColorKey::WireHigh, Color::rgb(98, 255, 41))
            .set(ColorKey::WireLow, Color::rgb(0, 52, 0))
            .set(ColorKey::WireOut, Color::rgb(250, 165, 0))
            .set(ColorKey::Highlight, Color::rgb(255, 255, 0))
            .build(),
    )
});

/// The stock light scheme.
#[must_use]
pub fn default_scheme() -> Arc<Scheme> {
    Arc::clone(&DEFAULT_SCHEME)
}

/// The stock dark scheme.
#[must_use]
pub fn dark_scheme() -> Arc<Scheme> {
    Arc::clone(&DARK_SCHEME)
}

/// The scheme tuned for color-blind users.
#[must_use]
pub fn color_blind_scheme() -> Arc<Scheme> {
    Arc::clone(&COLOR_BLIND_SCHEME)
}

/// Which named scheme is in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeSelector {
    /// The normal light scheme
    Default,
    /// The dark scheme
    #[default]
    Dark,
    /// Scheme suited for color-blind users
    ColorBlind,
    /// User-defined palette stored in the settings
    Custom,
}

impl SchemeSelector {
    /// Every selector in catalog order.
    pub const ALL: [Self; 4] = [Self::Default, Self::Dark, Self::ColorBlind, Self::Custom];

    /// Stable identifier used in settings files and on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::ColorBlind => "color_blind",
            Self::Custom => "custom",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Dark => "Dark",
            Self::ColorBlind => "Color blind",
            Self::Custom => "Custom",
        }
    }

    /// The compiled-in scheme for this selector, or `None` for `Custom`.
    #[must_use]
    pub fn builtin(self) -> Option<Arc<Scheme>> {
        match self {
            Self::Default => Some(default_scheme()),
            Self::Dark => Some(dark_scheme()),
            Self::ColorBlind => Some(color_blind_scheme()),
            Self::Custom => None,
        }
    }
}

impl fmt::Display for SchemeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SchemeSelector {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let normalized = match s.trim().to_lowercase().replace(['-', ' '], "_") {
            name if name == "colorblind" => "color_blind".to_string(),
            name => name,
        };
        Self::ALL
            .into_iter()
            .find(|selector| selector.id() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown color scheme '{s}'. Must be one of: default, dark, color_blind, custom"
                )
            })
    }
}

/// Resolves selectors to schemes.
///
/// Built-in schemes are shared statics. The custom scheme is read from the
/// settings store on first use and memoized until it is replaced or
/// invalidated.
#[derive(Debug)]
pub struct SchemeRegistry {
    settings: Arc<SettingsStore>,
    custom: RwLock<Option<Arc<Scheme>>>,
}

impl SchemeRegistry {
    /// Creates a registry backed by `settings`.
    #[must_use]
    pub fn new(settings: Arc<SettingsStore>) -> Self {
        Self {
            settings,
            custom: RwLock::new(None),
        }
    }

    /// The settings store this registry reads from.
    #[must_use]
    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Returns the scheme for `selector`.
    ///
    /// Never fails: a missing custom scheme resolves to the default scheme.
    #[must_use]
    pub fn resolve(&self, selector: SchemeSelector) -> Arc<Scheme> {
        match selector.builtin() {
            Some(scheme) => scheme,
            None => self.custom(),
        }
    }

    /// Every selector with its resolved scheme, in catalog order.
    #[must_use]
    pub fn list(&self) -> Vec<(SchemeSelector, Arc<Scheme>)> {
        SchemeSelector::ALL
            .into_iter()
            .map(|selector| (selector, self.resolve(selector)))
            .collect()
    }

    /// The custom scheme, loading it from the settings store on first use.
    fn custom(&self) -> Arc<Scheme> {
        if let Some(scheme) = self.custom.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Arc::clone(scheme);
        }

        let mut slot = self.custom.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have filled the slot while we waited.
        if let Some(scheme) = slot.as_ref() {
            return Arc::clone(scheme);
        }

        let scheme = match self.settings.custom_color_scheme() {
            Some(scheme) => Arc::new(scheme),
            None => {
                tracing::warn!("No custom color scheme in settings, using the default scheme");
                default_scheme()
            }
        };
        *slot = Some(Arc::clone(&scheme));
        scheme
    }

    /// Swaps in a new custom scheme.
    ///
    /// Returns false, leaving the memo untouched, when `scheme` is identical
    /// to the one already memoized (colors, theme and type).
    pub(crate) fn replace_custom(&self, scheme: &Arc<Scheme>) -> bool {
        let mut slot = self.custom.write().unwrap_or_else(PoisonError::into_inner);
        if slot.as_deref().is_some_and(|current| current.is_identical(scheme)) {
            return false;
        }
        *slot = Some(Arc::clone(scheme));
        true
    }

    /// Drops the memoized custom scheme so the next resolve re-reads settings.
    pub(crate) fn invalidate_custom(&self) {
        *self.custom.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
