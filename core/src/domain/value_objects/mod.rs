//! Value objects representing immutable domain concepts.

pub mod identity;

// Re-export commonly used types
pub use identity::{NormalizedIdentity, MAX_KEY_LENGTH, PLACEHOLDER};
