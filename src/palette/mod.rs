//! Palette generation

/// Harmony-driven palette synthesis with the mud guard
pub mod synthesis;
