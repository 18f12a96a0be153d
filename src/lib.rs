//! Seeded batch generation of dithered image variants
//!
//! A source image is pre-processed, quantized to a synthesized palette with
//! jittered error diffusion, and optionally channel-shifted. Each variant is
//! assigned a theme by a quota schedule, and a single numeric seed makes the
//! whole batch reproducible byte for byte.

#![forbid(unsafe_code)]

/// Variant rendering, grid composition and batch orchestration
pub mod assembly;
/// Pre-processing, error-diffusion dithering and misprint effects
pub mod effects;
/// Input/output operations and error handling
pub mod io;
/// Random sources and color math
pub mod math;
/// Theme-driven palette synthesis
pub mod palette;
/// RGBA pixel buffers
pub mod raster;
/// Theme catalog and quota scheduling
pub mod theme;

pub use assembly::batch::{BatchGenerator, BatchRequest, BatchState};
pub use io::error::{ForgeError, Result};
pub use math::random::Seed;
pub use raster::surface::Surface;
