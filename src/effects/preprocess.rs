//! Global pixel transforms applied to a fresh copy of the source before quantization

use crate::io::configuration::{
    BRIGHTNESS_JITTER, CONTRAST_JITTER, GRAIN_INTENSITY, HUE_ROTATION_RANGE, INVERT_PROBABILITY,
    PHASE_SHIFT_RANGE,
};
use crate::math::color::Hsl;
use crate::math::random::RandomSource;
use crate::raster::surface::{ALPHA, Surface};

/// Per-image pre-processing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessParams {
    /// Hue rotation in degrees
    pub hue_rotation: f64,
    /// Horizontal sub-pixel translation
    pub offset_x: f64,
    /// Vertical sub-pixel translation
    pub offset_y: f64,
    /// Whether RGB channels are inverted
    pub invert: bool,
    /// Offset added to normalized channels
    pub brightness: f64,
    /// Scale applied to normalized channels around mid-gray
    pub contrast: f64,
}

impl PreprocessParams {
    /// Parameters that leave the image untouched
    pub const IDENTITY: Self = Self {
        hue_rotation: 0.0,
        offset_x: 0.0,
        offset_y: 0.0,
        invert: false,
        brightness: 0.0,
        contrast: 1.0,
    };

    /// Draw a fresh set of parameters
    pub fn sample(rng: &mut dyn RandomSource) -> Self {
        let hue_rotation = rng.symmetric(HUE_ROTATION_RANGE);
        let offset_x = rng.symmetric(PHASE_SHIFT_RANGE);
        let offset_y = rng.symmetric(PHASE_SHIFT_RANGE);
        let invert = rng.chance(INVERT_PROBABILITY);
        let brightness = rng.symmetric(BRIGHTNESS_JITTER);
        let contrast = 1.0 + rng.symmetric(CONTRAST_JITTER);

        Self {
            hue_rotation,
            offset_x,
            offset_y,
            invert,
            brightness,
            contrast,
        }
    }
}

/// Draw parameters and apply them, with grain from the same source
pub fn preprocess(source: &Surface, rng: &mut dyn RandomSource) -> (Surface, PreprocessParams) {
    let params = PreprocessParams::sample(rng);
    let surface = apply(source, &params, Some(rng));
    (surface, params)
}

/// Resample `source` through the transforms described by `params`
///
/// Per pixel: hue rotation, translation, inversion, brightness/contrast, then
/// grain when a random source is supplied. Alpha is resampled but otherwise
/// untouched. Every channel is clamped to 0..=255.
pub fn apply(
    source: &Surface,
    params: &PreprocessParams,
    mut grain: Option<&mut dyn RandomSource>,
) -> Surface {
    let (width, height) = source.dimensions();
    let mut output = Surface::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let sampled = sample_bilinear(
                source,
                x as f64 - params.offset_x,
                y as f64 - params.offset_y,
            );
            let rgb = rotate_hue([sampled[0], sampled[1], sampled[2]], params.hue_rotation);

            let mut adjusted = rgb.map(|channel| {
                let channel = if params.invert { 255.0 - channel } else { channel };
                tone(channel, params.brightness, params.contrast)
            });

            if let Some(rng) = grain.as_mut() {
                for channel in &mut adjusted {
                    *channel += grain_sample(&mut **rng);
                }
            }

            let [r, g, b] = adjusted.map(to_channel);
            output.set_pixel(x, y, [r, g, b, to_channel(sampled[ALPHA])]);
        }
    }

    output
}

/// Rotate the hue of a color given in 0..=255 channels
pub fn rotate_hue(rgb: [f64; 3], degrees: f64) -> [f64; 3] {
    if degrees.abs() < f64::EPSILON {
        return rgb;
    }
    let hsl = Hsl::from_rgb_f64(rgb);
    Hsl { h: (hsl.h + degrees).rem_euclid(360.0), ..hsl }.to_rgb_f64()
}

/// Brightness offset and contrast scale on a channel normalized to [0, 1]
pub fn tone(channel: f64, brightness: f64, contrast: f64) -> f64 {
    let normalized = channel / 255.0;
    let toned = (normalized - 0.5).mul_add(contrast, 0.5) + brightness;
    toned * 255.0
}

/// Bell-shaped grain: mean of three uniform draws, centered and scaled
pub fn grain_sample(rng: &mut dyn RandomSource) -> f64 {
    let mean = (rng.next_f64() + rng.next_f64() + rng.next_f64()) / 3.0;
    (mean - 0.5) * GRAIN_INTENSITY
}

// Edge-clamped bilinear lookup
fn sample_bilinear(source: &Surface, x: f64, y: f64) -> [f64; 4] {
    let max_x = source.width().saturating_sub(1) as f64;
    let max_y = source.height().saturating_sub(1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let x1 = (x0 + 1.0).min(max_x);
    let y1 = (y0 + 1.0).min(max_y);

    let fetch = |px: f64, py: f64| -> [f64; 4] {
        source
            .pixel(px as usize, py as usize)
            .unwrap_or_default()
            .map(f64::from)
    };

    let top_left = fetch(x0, y0);
    let top_right = fetch(x1, y0);
    let bottom_left = fetch(x0, y1);
    let bottom_right = fetch(x1, y1);

    let mut result = [0.0; 4];
    for (channel, value) in result.iter_mut().enumerate() {
        let pick = |corner: &[f64; 4]| corner.get(channel).copied().unwrap_or_default();
        let top = (pick(&top_right) - pick(&top_left)).mul_add(fx, pick(&top_left));
        let bottom = (pick(&bottom_right) - pick(&bottom_left)).mul_add(fx, pick(&bottom_left));
        *value = (bottom - top).mul_add(fy, top);
    }
    result
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
