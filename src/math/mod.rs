//! Numeric building blocks shared by the pipeline stages

/// RGB/HSL color values, conversions and hue naming
pub mod color;
/// Seeded and entropy-backed random sources
pub mod random;
