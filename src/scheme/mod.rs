//! Color schemes for the circuit editor.
//!
//! A [`Scheme`] is an immutable palette: one [`Color`] per [`ColorKey`], a
//! theme identifier for the widget toolkit and a light/dark tag. Schemes are
//! only ever produced by a [`SchemeBuilder`], either from scratch or derived
//! from an existing scheme.
//!
//! The named schemes live in [`catalog`], and the scheme currently in effect
//! is tracked by [`active::ActiveScheme`].

pub mod active;
pub mod catalog;

pub use active::{active_scheme, ActiveScheme};
pub use catalog::{SchemeRegistry, SchemeSelector};

use crate::models::{Color, ColorKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Theme identifier of the light widget look.
pub const LIGHT_THEME: &str = "FlatLightLaf";

/// Theme identifier of the dark widget look.
pub const DARK_THEME: &str = "FlatDarkLaf";

/// Light/dark classification of a scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeType {
    /// Dark text on a light background
    #[default]
    Light,
    /// Light text on a dark background
    Dark,
}

impl ThemeType {
    /// macOS appearance name matching this type, for title bar styling.
    #[must_use]
    pub const fn aqua_appearance(self) -> &'static str {
        match self {
            Self::Light => "NSAppearanceNameAqua",
            Self::Dark => "NSAppearanceNameDarkAqua",
        }
    }
}

/// Immutable color scheme.
///
/// Equality and hashing only look at the colors: two schemes with the same
/// palette are equal even if their theme id or type differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SchemeRepr", into = "SchemeRepr")]
pub struct Scheme {
    colors: [Color; ColorKey::COUNT],
    theme: String,
    theme_type: ThemeType,
}

impl Scheme {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> SchemeBuilder {
        SchemeBuilder::new()
    }

    /// Starts a builder seeded with this scheme's colors, theme and type.
    #[must_use]
    pub fn derive(&self) -> SchemeBuilder {
        SchemeBuilder::from_base(self)
    }

    /// Returns the color for `key`.
    #[must_use]
    pub fn color(&self, key: ColorKey) -> Color {
        self.colors[key.index()]
    }

    /// Iterates over every key and its color in key order.
    pub fn colors(&self) -> impl Iterator<Item = (ColorKey, Color)> + '_ {
        ColorKey::ALL.into_iter().map(|key| (key, self.color(key)))
    }

    /// Widget theme identifier.
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Light/dark tag.
    #[must_use]
    pub const fn theme_type(&self) -> ThemeType {
        self.theme_type
    }

    /// macOS appearance name for the window title bar.
    #[must_use]
    pub const fn aqua_appearance(&self) -> &'static str {
        self.theme_type.aqua_appearance()
    }

    /// True when colors, theme id and type all match.
    ///
    /// Stricter than `==`, which only compares colors.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self == other && self.theme == other.theme && self.theme_type == other.theme_type
    }

    /// Keys whose color differs from `base`, with this scheme's color.
    ///
    /// Applying the result to `base.derive()` rebuilds this palette.
    #[must_use]
    pub fn diff_from(&self, base: &Self) -> Vec<(ColorKey, Color)> {
        self.colors()
            .filter(|&(key, color)| base.color(key) != color)
            .collect()
    }
}

impl PartialEq for Scheme {
    fn eq(&self, other: &Self) -> bool {
        self.colors == other.colors
    }
}

impl Eq for Scheme {}

impl Hash for Scheme {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.colors.hash(state);
    }
}

/// Staging area for a [`Scheme`].
///
/// The builder owns its own color array; `build` consumes it, so nothing can
/// alias a published scheme.
#[derive(Debug, Clone)]
pub struct SchemeBuilder {
    colors: [Option<Color>; ColorKey::COUNT],
    theme: String,
    theme_type: ThemeType,
}

impl SchemeBuilder {
    /// Creates a builder with no colors set, the light theme and type Light.
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors: [None; ColorKey::COUNT],
            theme: LIGHT_THEME.to_string(),
            theme_type: ThemeType::Light,
        }
    }

    /// Creates a builder seeded from `base`.
    #[must_use]
    pub fn from_base(base: &Scheme) -> Self {
        Self {
            colors: base.colors.map(Some),
            theme: base.theme.clone(),
            theme_type: base.theme_type,
        }
    }

    /// Sets one color.
    pub fn set(mut self, key: ColorKey, color: Color) -> Self {
        self.colors[key.index()] = Some(color);
        self
    }

    /// Copies every color from `scheme`, leaving theme and type alone.
    pub fn set_all(mut self, scheme: &Scheme) -> Self {
        for (key, color) in scheme.colors() {
            self.colors[key.index()] = Some(color);
        }
        self
    }

    /// Sets the widget theme identifier.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Sets the light/dark tag.
    pub fn theme_type(mut self, theme_type: ThemeType) -> Self {
        self.theme_type = theme_type;
        self
    }

    /// Returns the staged color for `key`, if any.
    #[must_use]
    pub fn color(&self, key: ColorKey) -> Option<Color> {
        self.colors[key.index()]
    }

    /// Freezes the builder into a scheme.
    ///
    /// Keys that were never set become [`Color::default`].
    #[must_use]
    pub fn build(self) -> Scheme {
        Scheme {
            colors: self.colors.map(Option::unwrap_or_default),
            theme: self.theme,
            theme_type: self.theme_type,
        }
    }
}

impl Default for SchemeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk shape of a scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SchemeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    theme_type: Option<ThemeType>,
    #[serde(default)]
    colors: IndexMap<String, Color>,
}

impl From<SchemeRepr> for Scheme {
    fn from(repr: SchemeRepr) -> Self {
        // Older or hand-edited files may lack keys; those fall back to DEFAULT.
        let mut builder = catalog::default_scheme().derive();

        if let Some(theme) = repr.theme {
            builder = builder.theme(theme);
        }
        if let Some(theme_type) = repr.theme_type {
            builder = builder.theme_type(theme_type);
        }

        for (id, color) in repr.colors {
            match ColorKey::from_id(&id) {
                Some(key) => builder = builder.set(key, color),
                None => tracing::warn!("Ignoring unknown color key '{}' in scheme", id),
            }
        }

        builder.build()
    }
}

impl From<Scheme> for SchemeRepr {
    fn from(scheme: Scheme) -> Self {
        Self {
            colors: scheme
                .colors()
                .map(|(key, color)| (key.id().to_string(), color))
                .collect(),
            theme: Some(scheme.theme),
            theme_type: Some(scheme.theme_type),
        }
    }
}
