//! Conditions reported by the key-binding store.

use std::path::PathBuf;
use thiserror::Error;

/// A non-fatal problem reported by [`super::KeyBindStore`].
///
/// None of these abort the process; the store keeps a consistent in-memory
/// mapping and hands the condition to the caller to display.
#[derive(Error, Debug)]
pub enum KeyBindError {
    /// No local file and no bundled defaults to seed one from.
    #[error("Default key bindings are missing")]
    DefaultsUnavailable,

    /// A key-binding document could not be read or parsed.
    #[error("Failed to load key bindings from {location}: {message}")]
    LoadFailed {
        /// File or resource that failed
        location: String,
        /// Human-readable cause
        message: String,
    },

    /// The local file could not be written.
    #[error("Failed to save key bindings to {}: {source}", path.display())]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Bindings could not be serialized.
    #[error("Failed to serialize key bindings: {0}")]
    Serialize(#[from] serde_json::Error),

    /// One or more proposed keys were rejected; nothing was applied.
    #[error("Invalid key for {}", actions.join(", "))]
    InvalidKeys {
        /// Offending action names, in edit order
        actions: Vec<String>,
    },
}

impl KeyBindError {
    pub(crate) fn load_failed(location: impl ToString, message: impl ToString) -> Self {
        Self::LoadFailed {
            location: location.to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            KeyBindError::DefaultsUnavailable.to_string(),
            "Default key bindings are missing"
        );

        let err = KeyBindError::load_failed("kb.json", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Failed to load key bindings from kb.json: expected value at line 1 column 1"
        );

        let err = KeyBindError::InvalidKeys {
            actions: vec!["Delete".to_string(), "Wire".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid key for Delete, Wire");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = KeyBindError::io("/tmp/kb.json", io_err);
        assert!(matches!(err, KeyBindError::Io { .. }));
        assert!(err.to_string().contains("read-only"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
