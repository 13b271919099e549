//! Data models for colors, color roles and key combinations.
//!
//! Models are plain values with no I/O; the scheme registry and the key-binding
//! store build on them.

pub mod color;
pub mod color_key;
pub mod key_combo;

// Re-export all model types
pub use color::Color;
pub use color_key::ColorKey;
pub use key_combo::KeyCombo;
