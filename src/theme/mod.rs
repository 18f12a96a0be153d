//! Theme catalog and batch scheduling

/// Theme presets, palette specs and harmony strategies
pub mod registry;
/// Quota schedule and weighted fallback selection
pub mod scheduler;
