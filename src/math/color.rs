//! RGB and HSL color values with the conversions the pipeline needs

use std::fmt;

/// Upper hue bound (exclusive) and display name for each naming bucket
///
/// Hues are shifted by [`HUE_NAME_SHIFT`] first so red does not straddle 0°.
const HUE_BUCKETS: [(f64, &str); 8] = [
    (40.0, "Red"),
    (70.0, "Orange"),
    (95.0, "Yellow"),
    (185.0, "Green"),
    (225.0, "Cyan"),
    (285.0, "Blue"),
    (315.0, "Purple"),
    (360.0, "Magenta"),
];
const HUE_NAME_SHIFT: f64 = 25.0;

/// An opaque 8-bit color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Pure black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in 0..=255
    pub fn to_f64(self) -> [f64; 3] {
        [f64::from(self.r), f64::from(self.g), f64::from(self.b)]
    }

    /// Squared Euclidean distance to a point in RGB space
    pub fn distance_squared(self, point: [f64; 3]) -> f64 {
        let [r, g, b] = self.to_f64();
        let dr = point[0] - r;
        let dg = point[1] - g;
        let db = point[2] - b;
        db.mul_add(db, dr.mul_add(dr, dg * dg))
    }

    /// Lowercase `#rrggbb` notation
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Hue in degrees, saturation and lightness in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, normalized to [0, 360)
    pub h: f64,
    /// Saturation in percent
    pub s: f64,
    /// Lightness in percent
    pub l: f64,
}

impl Hsl {
    /// Create a color, wrapping the hue into [0, 360)
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s,
            l,
        }
    }

    /// Convert channels in 0..=255 to HSL
    pub fn from_rgb_f64(rgb: [f64; 3]) -> Self {
        let [r, g, b] = rgb.map(|channel| channel / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if (max - min).abs() < f64::EPSILON {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let delta = max - min;
        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let sector = if (max - r).abs() < f64::EPSILON {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        Self::new(sector * 60.0, s * 100.0, l * 100.0)
    }

    /// Convert to channels in 0..=255 without rounding
    pub fn to_rgb_f64(self) -> [f64; 3] {
        let h = self.h / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        if s <= 0.0 {
            return [l * 255.0; 3];
        }

        let q = if l < 0.5 {
            l * (1.0 + s)
        } else {
            l.mul_add(-s, l + s)
        };
        let p = 2.0f64.mul_add(l, -q);

        [h + 1.0 / 3.0, h, h - 1.0 / 3.0].map(|t| hue_to_channel(p, q, t) * 255.0)
    }

    /// Convert to an 8-bit color, rounding each channel
    pub fn to_rgb(self) -> Rgb {
        let [r, g, b] = self.to_rgb_f64().map(|channel| channel.round().clamp(0.0, 255.0) as u8);
        Rgb::new(r, g, b)
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

/// Name the hue family a degree value belongs to
pub fn hue_name(hue: f64) -> &'static str {
    let shifted = (hue + HUE_NAME_SHIFT).rem_euclid(360.0);
    HUE_BUCKETS
        .iter()
        .find(|&&(upper, _)| shifted < upper)
        .map_or("Red", |&(_, name)| name)
}
