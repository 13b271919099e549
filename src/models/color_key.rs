//! Semantic color roles used to index a scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A semantic color role.
///
/// The enumeration is closed; the declaration order is the storage index used
/// by [`crate::scheme::Scheme`], so new variants must only ever be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorKey {
    /// Canvas background
    Background,
    /// Main foreground (component outlines, text)
    Main,
    /// Selection fill
    Selected,
    /// Wire with no simulated value
    Wire,
    /// Wire carrying a low value
    WireLow,
    /// Wire carrying a high value
    WireHigh,
    /// Wire driven by an output
    WireOut,
    /// Multi-bit value labels on wires
    WireValue,
    /// High-impedance wire
    WireZ,
    /// Component pins
    Pins,
    /// Highlighted elements
    Highlight,
    /// Editor grid
    Grid,
    /// Passed test markers
    Passed,
    /// Error markers
    Error,
    /// Disabled elements
    Disabled,
    /// Test case overlay tint
    Testcase,
    /// Asynchronous mode overlay tint
    Async,
}

impl ColorKey {
    /// Number of color keys.
    pub const COUNT: usize = Self::ALL.len();

    /// Every key in storage order.
    pub const ALL: [Self; 17] = [
        Self::Background,
        Self::Main,
        Self::Selected,
        Self::Wire,
        Self::WireLow,
        Self::WireHigh,
        Self::WireOut,
        Self::WireValue,
        Self::WireZ,
        Self::Pins,
        Self::Highlight,
        Self::Grid,
        Self::Passed,
        Self::Error,
        Self::Disabled,
        Self::Testcase,
        Self::Async,
    ];

    /// Storage index of this key.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable identifier used in settings files and on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Main => "main",
            Self::Selected => "selected",
            Self::Wire => "wire",
            Self::WireLow => "wire_low",
            Self::WireHigh => "wire_high",
            Self::WireOut => "wire_out",
            Self::WireValue => "wire_value",
            Self::WireZ => "wire_z",
            Self::Pins => "pins",
            Self::Highlight => "highlight",
            Self::Grid => "grid",
            Self::Passed => "passed",
            Self::Error => "error",
            Self::Disabled => "disabled",
            Self::Testcase => "testcase",
            Self::Async => "async",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Background => "Background",
            Self::Main => "Main",
            Self::Selected => "Selected",
            Self::Wire => "Wire",
            Self::WireLow => "Wire low",
            Self::WireHigh => "Wire high",
            Self::WireOut => "Wire output",
            Self::WireValue => "Wire value",
            Self::WireZ => "Wire high-Z",
            Self::Pins => "Pins",
            Self::Highlight => "Highlight",
            Self::Grid => "Grid",
            Self::Passed => "Test passed",
            Self::Error => "Error",
            Self::Disabled => "Disabled",
            Self::Testcase => "Test case",
            Self::Async => "Async mode",
        }
    }

    /// Looks up a key by its [`id`](Self::id).
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.id() == id)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ColorKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::from_id(&normalized).ok_or_else(|| {
            let valid: Vec<&str> = Self::ALL.iter().map(|key| key.id()).collect();
            anyhow::anyhow!("Unknown color key '{s}'. Valid keys: {}", valid.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (position, key) in ColorKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), position);
        }
        assert_eq!(ColorKey::COUNT, 17);
    }

    #[test]
    fn test_id_roundtrip() {
        for key in ColorKey::ALL {
            assert_eq!(ColorKey::from_id(key.id()), Some(key));
        }
        assert_eq!(ColorKey::from_id("nope"), None);
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("Wire-Low".parse::<ColorKey>().unwrap(), ColorKey::WireLow);
        assert_eq!(" GRID ".parse::<ColorKey>().unwrap(), ColorKey::Grid);

        let err = "purple".parse::<ColorKey>().unwrap_err();
        assert!(err.to_string().contains("background"));
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&ColorKey::WireZ).unwrap();
        assert_eq!(json, "\"wire_z\"");
    }
}
