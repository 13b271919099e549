//! Digital Preferences Library
//!
//! Color schemes and key bindings for the Digital circuit simulator: the
//! immutable scheme model and its named catalog, the cached active scheme
//! kept in step with the settings store, and the key-binding file with its
//! validated edit path.

// Module declarations
pub mod cli;
pub mod constants;
pub mod keybinds;
pub mod models;
pub mod scheme;
pub mod settings;
