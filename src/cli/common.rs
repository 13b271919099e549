//! Shared CLI plumbing: error type, exit codes and store access.

use crate::keybinds::{KeyBindError, KeyBindStore};
use crate::settings::SettingsStore;
use std::sync::Arc;
use thiserror::Error;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input: unknown name, invalid key or color
    ValidationError = 1,
    /// A file could not be read or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code passed to `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Error, Debug)]
pub enum CliError {
    /// Rejected input
    #[error("{0}")]
    Validation(String),
    /// File system failure
    #[error("{0}")]
    Io(String),
}

impl CliError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Validation(_) => ExitCode::ValidationError,
            Self::Io(_) => ExitCode::IoError,
        }
    }
}

impl From<KeyBindError> for CliError {
    fn from(err: KeyBindError) -> Self {
        match err {
            KeyBindError::InvalidKeys { .. } => Self::validation(err.to_string()),
            _ => Self::io(err.to_string()),
        }
    }
}

/// Result type of CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Opens the settings file at its default location.
pub fn open_settings() -> CliResult<Arc<SettingsStore>> {
    SettingsStore::open_default()
        .map(Arc::new)
        .map_err(|e| CliError::io(format!("Failed to load settings: {e:#}")))
}

/// Saves the settings file.
pub fn save_settings(settings: &SettingsStore) -> CliResult<()> {
    settings
        .save()
        .map_err(|e| CliError::io(format!("Failed to save settings: {e:#}")))
}

/// Opens and loads the key-binding file, reporting any load problems.
///
/// A store that could not load anything is an error; problems that still
/// left bindings in memory (such as failing to write the seeded file) are
/// printed as warnings.
pub fn load_keybinds() -> CliResult<KeyBindStore> {
    let mut store = KeyBindStore::open_default();
    let report = store.load();

    if report.origin.is_none() {
        let message = report
            .problems
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CliError::io(message));
    }
    for problem in &report.problems {
        eprintln!("Warning: {problem}");
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ExitCode::Success.code(), 0);
        assert_eq!(CliError::validation("bad").exit_code().code(), 1);
        assert_eq!(CliError::io("disk").exit_code().code(), 2);
    }

    #[test]
    fn test_keybind_error_mapping() {
        let invalid = KeyBindError::InvalidKeys {
            actions: vec!["Wire".to_string()],
        };
        assert_eq!(CliError::from(invalid).exit_code(), ExitCode::ValidationError);
        assert_eq!(
            CliError::from(KeyBindError::DefaultsUnavailable).exit_code(),
            ExitCode::IoError
        );
    }
}
