//! Pixel stages: pre-processing, dithering and post-effects

/// Error-diffusion quantization
pub mod dither;
/// Channel misregistration post-effect
pub mod misprint;
/// Hue, registration, inversion, tone and grain transforms
pub mod preprocess;
