//! Error-diffusion dithering against a synthesized palette
//!
//! Pixels are visited strictly in raster order; diffusion only writes to
//! pixels later in that order, so a single owned buffer is mutated in place.

use crate::io::configuration::DITHER_JITTER;
use crate::math::color::Rgb;
use crate::math::random::RandomSource;
use crate::raster::surface::Surface;

/// Neighbour offsets (dx, dy) and weights; the weights sum to 1
pub const DIFFUSION_KERNEL: [(isize, isize, f64); 10] = [
    (1, 0, 5.0 / 32.0),
    (2, 0, 3.0 / 32.0),
    (-2, 1, 2.0 / 32.0),
    (-1, 1, 4.0 / 32.0),
    (0, 1, 5.0 / 32.0),
    (1, 1, 4.0 / 32.0),
    (2, 1, 2.0 / 32.0),
    (-1, 2, 2.0 / 32.0),
    (0, 2, 3.0 / 32.0),
    (1, 2, 2.0 / 32.0),
];

/// Stretch a channel around mid-gray and clamp to 0..=255
pub fn adjust_contrast(value: u8, contrast: f64) -> f64 {
    (f64::from(value) - 128.0)
        .mul_add(contrast, 128.0)
        .clamp(0.0, 255.0)
}

/// Closest palette entry by Euclidean RGB distance, earliest entry on ties
pub fn nearest_color(palette: &[Rgb], point: [f64; 3]) -> Option<Rgb> {
    let mut best: Option<(Rgb, f64)> = None;
    for &color in palette {
        let distance = color.distance_squared(point);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((color, distance));
        }
    }
    best.map(|(color, _)| color)
}

/// Quantize a surface to `palette`, diffusing the error forward
///
/// With `jitter`, each diffused delta is scaled by an independent factor in
/// [0.98, 1.02]. Alpha is left untouched. An empty palette returns the
/// surface unchanged.
pub fn dither(
    mut surface: Surface,
    palette: &[Rgb],
    contrast: f64,
    mut jitter: Option<&mut dyn RandomSource>,
) -> Surface {
    if palette.is_empty() {
        return surface;
    }

    let (width, height) = surface.dimensions();
    for y in 0..height {
        for x in 0..width {
            let Some([r, g, b, _]) = surface.pixel(x, y) else {
                continue;
            };
            let adjusted = [r, g, b].map(|channel| adjust_contrast(channel, contrast));
            let Some(chosen) = nearest_color(palette, adjusted) else {
                continue;
            };

            let target = chosen.to_f64();
            let error = [
                adjusted[0] - target[0],
                adjusted[1] - target[1],
                adjusted[2] - target[2],
            ];

            for (channel, value) in [chosen.r, chosen.g, chosen.b].into_iter().enumerate() {
                if let Some(slot) = surface.channel_mut(x, y, channel) {
                    *slot = value;
                }
            }

            diffuse(&mut surface, x, y, error, &mut jitter);
        }
    }

    surface
}

fn diffuse(
    surface: &mut Surface,
    x: usize,
    y: usize,
    error: [f64; 3],
    jitter: &mut Option<&mut dyn RandomSource>,
) {
    let (width, height) = surface.dimensions();

    for &(dx, dy, weight) in &DIFFUSION_KERNEL {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if nx >= width || ny >= height {
            continue;
        }

        for (channel, channel_error) in error.into_iter().enumerate() {
            let mut delta = channel_error * weight;
            if let Some(rng) = jitter.as_mut() {
                delta *= 1.0 + rng.symmetric(DITHER_JITTER);
            }
            if let Some(slot) = surface.channel_mut(nx, ny, channel) {
                *slot = (f64::from(*slot) + delta).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
}
