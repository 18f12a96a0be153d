//! Generation constants and runtime configuration defaults

// Batch limits
/// Largest batch accepted at the request boundary
pub const MAX_BATCH_SIZE: usize = 1000;
/// Batch size used when none is given
pub const DEFAULT_BATCH_SIZE: usize = 10;
/// Number of tiles composited in tiled mode (2x2)
pub const TILES_PER_GRID: usize = 4;

// Palette synthesis
/// Smallest palette any theme may produce
pub const MIN_PALETTE_COLORS: usize = 2;
/// Largest palette any theme may produce
pub const MAX_PALETTE_COLORS: usize = 12;
/// Attempts made to avoid a muddy color before accepting the last candidate
pub const MUD_RETRY_LIMIT: usize = 10;
/// Saturation and lightness (percent) below which a color counts as muddy
pub const MUD_THRESHOLD: f64 = 40.0;
/// Saturation range (percent) for themes that do not specify one
pub const DEFAULT_SATURATION: (f64, f64) = (40.0, 100.0);
/// Lightness range (percent) for themes that do not specify one
pub const DEFAULT_LIGHTNESS: (f64, f64) = (30.0, 80.0);

// Pre-processing
/// Maximum absolute hue rotation in degrees
pub const HUE_ROTATION_RANGE: f64 = 20.0;
/// Maximum absolute sub-pixel translation per axis
pub const PHASE_SHIFT_RANGE: f64 = 2.0;
/// Chance of inverting the working copy
pub const INVERT_PROBABILITY: f64 = 0.33;
/// Maximum absolute brightness offset on normalized channels
pub const BRIGHTNESS_JITTER: f64 = 0.15;
/// Maximum deviation of the contrast scale from 1.0
pub const CONTRAST_JITTER: f64 = 0.15;
/// Peak-to-peak grain amplitude in channel units
pub const GRAIN_INTENSITY: f64 = 15.0;

// Dithering and post-effects
/// Maximum deviation of the per-tap diffusion scale from 1.0
pub const DITHER_JITTER: f64 = 0.02;
/// Chance of applying the channel misregistration effect
pub const MISPRINT_PROBABILITY: f64 = 0.15;
/// Horizontal red/blue offset in pixels
pub const MISPRINT_OFFSET: usize = 2;

// Output settings
/// Prefix for exported variant files
pub const OUTPUT_PREFIX: &str = "dither-variant-";
/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "variants";
/// File name of the exported variant manifest
pub const MANIFEST_FILE: &str = "variants-metadata.json";
