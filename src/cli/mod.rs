//! CLI command handlers for digital-prefs.
//!
//! This module provides headless, scriptable access to the color scheme
//! settings and the key-binding file.

pub mod common;
pub mod keybinds;
pub mod scheme;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use keybinds::KeybindsArgs;
pub use scheme::SchemeArgs;
