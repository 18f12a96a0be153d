//! Pixel storage

/// Owned RGBA surfaces
pub mod surface;

pub use surface::Surface;
