//! RGBA pixel surfaces passed between pipeline stages

use crate::io::error::{ForgeError, Result, invalid_parameter};
use ndarray::Array3;

/// Bytes per pixel
pub const CHANNELS: usize = 4;
/// Index of the alpha channel
pub const ALPHA: usize = 3;

/// Row-major RGBA grid stored as (height, width, channel)
///
/// Each stage takes a surface by value and hands back a new one, so a buffer
/// is only ever mutated by the stage holding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pixels: Array3<u8>,
}

impl Surface {
    /// Transparent black surface
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array3::zeros((height, width, CHANNELS)),
        }
    }

    /// Surface filled with one RGBA value
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        Self {
            pixels: Array3::from_shape_fn((height, width, CHANNELS), |(_, _, channel)| {
                rgba.get(channel).copied().unwrap_or_default()
            }),
        }
    }

    /// Wrap decoded RGBA bytes
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The byte count does not equal `width * height * 4`
    pub fn from_rgba(width: usize, height: usize, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ForgeError::NoSource {
                reason: format!("image has no pixels ({width}x{height})"),
            });
        }

        let expected = width * height * CHANNELS;
        let actual = bytes.len();
        let pixels = Array3::from_shape_vec((height, width, CHANNELS), bytes).map_err(|e| {
            invalid_parameter(
                "bytes",
                &actual,
                &format!("expected {expected} RGBA bytes for {width}x{height}: {e}"),
            )
        })?;

        Ok(Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Whether the surface holds no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGBA value at a position
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        Some([
            self.channel(x, y, 0)?,
            self.channel(x, y, 1)?,
            self.channel(x, y, 2)?,
            self.channel(x, y, ALPHA)?,
        ])
    }

    /// Overwrite the RGBA value at a position; out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        for (channel, value) in rgba.into_iter().enumerate() {
            if let Some(slot) = self.pixels.get_mut((y, x, channel)) {
                *slot = value;
            }
        }
    }

    /// One channel at a position
    pub fn channel(&self, x: usize, y: usize, channel: usize) -> Option<u8> {
        self.pixels.get((y, x, channel)).copied()
    }

    /// Mutable access to one channel
    pub fn channel_mut(&mut self, x: usize, y: usize, channel: usize) -> Option<&mut u8> {
        self.pixels.get_mut((y, x, channel))
    }

    /// Copy another surface in with its top-left corner at (`x`, `y`), cropping at the edges
    pub fn blit(&mut self, tile: &Self, x: usize, y: usize) {
        for ty in 0..tile.height() {
            for tx in 0..tile.width() {
                if let Some(rgba) = tile.pixel(tx, ty) {
                    self.set_pixel(x + tx, y + ty, rgba);
                }
            }
        }
    }

    /// Underlying (height, width, channel) array
    pub const fn pixels(&self) -> &Array3<u8> {
        &self.pixels
    }

    /// Row-major RGBA bytes
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().copied().collect()
    }
}
