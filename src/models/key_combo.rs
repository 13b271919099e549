//! Key combination descriptor stored in the key-binding file.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Textual prefix marking the Shift modifier.
pub const SHIFT_PREFIX: &str = "Shift+";

/// A base key token plus an optional Shift modifier.
///
/// Stored as `KEY` or `Shift+KEY`. Parsing never fails and never validates the
/// token, so whatever a file contains survives a load/save cycle verbatim;
/// validation happens only on the edit path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct KeyCombo {
    /// Base key token (e.g. "R", "F5")
    pub key: String,
    /// Whether Shift must be held
    pub shift: bool,
}

impl KeyCombo {
    /// Creates a combination from its parts.
    #[must_use]
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    /// Parses the stored text form.
    ///
    /// ```
    /// use digital_prefs::models::KeyCombo;
    ///
    /// let combo = KeyCombo::parse("Shift+D");
    /// assert!(combo.shift);
    /// assert_eq!(combo.key, "D");
    /// assert_eq!(combo.to_string(), "Shift+D");
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix(SHIFT_PREFIX) {
            Some(key) => Self::new(key, true),
            None => Self::new(text, false),
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            f.write_str(SHIFT_PREFIX)?;
        }
        f.write_str(&self.key)
    }
}

impl FromStr for KeyCombo {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for KeyCombo {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<KeyCombo> for String {
    fn from(combo: KeyCombo) -> Self {
        combo.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_key() {
        let combo = KeyCombo::parse("R");
        assert_eq!(combo, KeyCombo::new("R", false));
        assert_eq!(combo.to_string(), "R");
    }

    #[test]
    fn test_parse_shift_key() {
        let combo = KeyCombo::parse("Shift+F12");
        assert_eq!(combo, KeyCombo::new("F12", true));
        assert_eq!(combo.to_string(), "Shift+F12");
    }

    #[test]
    fn test_unknown_text_survives_verbatim() {
        for text in ["Ctrl+X", "shift+d", "", "Shift+"] {
            assert_eq!(KeyCombo::parse(text).to_string(), text);
        }
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&KeyCombo::new("D", true)).unwrap();
        assert_eq!(json, "\"Shift+D\"");

        let combo: KeyCombo = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(combo, KeyCombo::new("7", false));
    }
}
