//! Red/blue channel misregistration ("Misprint")

use crate::io::configuration::{MISPRINT_OFFSET, MISPRINT_PROBABILITY};
use crate::math::random::RandomSource;
use crate::raster::surface::Surface;

/// Shift red left-to-right and blue right-to-left by `offset` pixels
///
/// Each output pixel reads red from `x - offset` and blue from `x + offset`,
/// clamped to the row, keeps its own green, and becomes fully opaque.
pub fn channel_shift(source: Surface, offset: usize) -> Surface {
    let (width, height) = source.dimensions();
    let last = width.saturating_sub(1);
    let mut output = source.clone();

    for y in 0..height {
        for x in 0..width {
            let red = source.channel(x.saturating_sub(offset), y, 0);
            let green = source.channel(x, y, 1);
            let blue = source.channel(x.saturating_add(offset).min(last), y, 2);

            if let (Some(r), Some(g), Some(b)) = (red, green, blue) {
                output.set_pixel(x, y, [r, g, b, u8::MAX]);
            }
        }
    }

    output
}

/// Roll the misprint chance and apply the fixed offset when it hits
pub fn maybe_misprint(surface: Surface, rng: &mut dyn RandomSource) -> (Surface, bool) {
    if rng.chance(MISPRINT_PROBABILITY) {
        (channel_shift(surface, MISPRINT_OFFSET), true)
    } else {
        (surface, false)
    }
}
