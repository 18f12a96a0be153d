//! Variant assembly and batch orchestration

/// Batch requests, generation and rerolls
pub mod batch;
/// Single and tiled variant rendering
pub mod variant;
