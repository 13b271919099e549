//! RGBA color handling with hex parsing and serialization.

// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for color math
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Brightness factor applied by [`Color::darker`].
const DARKER_FACTOR: f32 = 0.7;

/// RGBA color value with hex string representation.
///
/// Serialized as `#RRGGBB` when fully opaque and `#RRGGBBAA` otherwise, so
/// hand-edited settings files stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Medium gray (128).
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    /// Light gray (192).
    pub const LIGHT_GRAY: Self = Self::rgb(192, 192, 192);
    /// Pure red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Cyan.
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    /// Yellow.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);

    /// Creates a fully opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns true if the alpha channel is 255.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parses a `Color` from a hex string.
    ///
    /// Supports formats: "#RRGGBB", "RRGGBB", "#RRGGBBAA", "RRGGBBAA" in
    /// either case. Six digits produce an opaque color.
    ///
    /// # Examples
    ///
    /// ```
    /// use digital_prefs::models::Color;
    ///
    /// let color = Color::from_hex("#FF0000").unwrap();
    /// assert_eq!(color, Color::rgb(255, 0, 0));
    ///
    /// let color = Color::from_hex("B4FFB4C8").unwrap();
    /// assert_eq!(color, Color::rgba(180, 255, 180, 200));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color format.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);

        if (hex.len() != 6 && hex.len() != 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            anyhow::bail!(
                "Invalid hex color format '{hex}'. Expected 6 or 8 hex digits (RRGGBB or RRGGBBAA)"
            );
        }

        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&hex[range], 16)
                .context(format!("Invalid {name} channel in hex color '{hex}'"))
        };

        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            255
        };

        Ok(Self::rgba(r, g, b, a))
    }

    /// Converts the color to an uppercase hex string.
    ///
    /// Opaque colors use "#RRGGBB"; translucent ones append the alpha byte.
    ///
    /// ```
    /// use digital_prefs::models::Color;
    ///
    /// assert_eq!(Color::rgb(0, 128, 255).to_hex(), "#0080FF");
    /// assert_eq!(Color::rgba(255, 180, 180, 200).to_hex(), "#FFB4B4C8");
    /// ```
    #[must_use]
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Returns a darker version of this color.
    ///
    /// Each color channel is scaled by 0.7 and truncated; alpha is kept.
    /// `Color::BLUE.darker()` is `(0, 0, 178)`.
    #[must_use]
    pub fn darker(&self) -> Self {
        let scale = |c: u8| (f32::from(c) * DARKER_FACTOR) as u8;
        Self::rgba(scale(self.r), scale(self.g), scale(self.b), self.a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Color {
    /// Default color is opaque black, the value of any unset scheme entry.
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}
