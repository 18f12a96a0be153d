//! Palette synthesis from a theme's harmony rules
//!
//! A key hue is drawn, a harmony strategy spreads it into N hues, and each
//! color samples saturation/lightness from the theme's ranges. Muddy
//! candidates (low saturation and low lightness) are redrawn a bounded number
//! of times; after that the last candidate is kept.

use crate::io::configuration::{MUD_RETRY_LIMIT, MUD_THRESHOLD};
use crate::math::color::{Hsl, Rgb, hue_name};
use crate::math::random::RandomSource;
use crate::theme::registry::{HarmonyStrategy, PaletteSpec, ValueRange};
use tracing::trace;

/// Hues a `use_key_colors` theme snaps its key hue to
const KEY_HUES: [f64; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];
const KEY_HUE_JITTER: f64 = 10.0;

const COMPLEMENTARY_JITTER: f64 = 15.0;
const HARMONY_JITTER: f64 = 10.0;
const RANDOM_SPREAD: f64 = 30.0;
const ANALOGOUS_STEP: f64 = 30.0;
const TRIADIC_OFFSETS: [f64; 3] = [0.0, 120.0, 240.0];
const SPLIT_COMPLEMENTARY_OFFSETS: [f64; 5] = [0.0, 150.0, 210.0, 0.0, 150.0];

const SATURATION_VARIANCE: f64 = 10.0;
const LIGHTNESS_VARIANCE: f64 = 5.0;

/// Grayscale lightness anchors for mono-plus ramps: near-white, near-black, mid-gray
const GRAY_ANCHORS: [f64; 3] = [95.0, 8.0, 50.0];

/// Ordered colors plus the diagnostics recorded as traits
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
    key_hue: f64,
    strategy: HarmonyStrategy,
}

impl Palette {
    /// Assemble a palette from explicit colors
    pub const fn new(colors: Vec<Rgb>, key_hue: f64, strategy: HarmonyStrategy) -> Self {
        Self {
            colors,
            key_hue,
            strategy,
        }
    }

    /// Colors in generation order
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of colors
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette holds no colors
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Key hue in degrees
    pub const fn key_hue(&self) -> f64 {
        self.key_hue
    }

    /// Strategy the hues were derived with
    pub const fn strategy(&self) -> HarmonyStrategy {
        self.strategy
    }

    /// Name of the dominant hue family
    pub fn hue_name(&self) -> &'static str {
        hue_name(self.key_hue)
    }

    /// Space separated `#rrggbb` list
    pub fn to_hex_list(&self) -> String {
        self.colors
            .iter()
            .map(|color| color.to_hex())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Generate a palette for a theme's palette spec
pub fn synthesize(spec: &PaletteSpec, rng: &mut dyn RandomSource) -> Palette {
    let count = color_count(spec, rng);
    let key_hue = draw_key_hue(spec, rng);
    let strategy = spec.resolve_strategy(rng);

    let colors = if strategy == HarmonyStrategy::MonoPlus {
        mono_plus_colors(spec, key_hue, count, rng)
    } else {
        (0..count)
            .map(|index| harmonized_color(spec, strategy, key_hue, index, count, rng))
            .collect()
    };

    Palette::new(colors, key_hue, strategy)
}

/// Draw a color count within the spec's bounds
pub fn color_count(spec: &PaletteSpec, rng: &mut dyn RandomSource) -> usize {
    let span = spec.max_colors.saturating_sub(spec.min_colors) + 1;
    let count = spec.min_colors + (rng.next_f64() * span as f64) as usize;
    count.min(spec.max_colors)
}

fn draw_key_hue(spec: &PaletteSpec, rng: &mut dyn RandomSource) -> f64 {
    if spec.flags.use_key_colors {
        let anchor = KEY_HUES
            .get(rng.index(KEY_HUES.len()))
            .copied()
            .unwrap_or_default();
        (anchor + rng.symmetric(KEY_HUE_JITTER)).rem_euclid(360.0)
    } else {
        rng.next_f64() * 360.0
    }
}

/// Hue for color `index` of `count` under a strategy
pub fn strategy_hue(
    strategy: HarmonyStrategy,
    key_hue: f64,
    index: usize,
    count: usize,
    rng: &mut dyn RandomSource,
) -> f64 {
    let offset = match strategy {
        HarmonyStrategy::Spread => index as f64 * 360.0 / count.max(1) as f64,
        HarmonyStrategy::Complementary => {
            let base = if index % 2 == 0 { 0.0 } else { 180.0 };
            base + rng.symmetric(COMPLEMENTARY_JITTER)
        }
        HarmonyStrategy::Triadic => {
            cycled(&TRIADIC_OFFSETS, index) + rng.symmetric(HARMONY_JITTER)
        }
        HarmonyStrategy::Analogous => {
            let centered = index as f64 - count.saturating_sub(1) as f64 / 2.0;
            centered.mul_add(ANALOGOUS_STEP, rng.symmetric(HARMONY_JITTER))
        }
        HarmonyStrategy::SplitComplementary => {
            cycled(&SPLIT_COMPLEMENTARY_OFFSETS, index) + rng.symmetric(HARMONY_JITTER)
        }
        HarmonyStrategy::Random => rng.symmetric(RANDOM_SPREAD),
        HarmonyStrategy::MonoPlus => 0.0,
    };

    (key_hue + offset).rem_euclid(360.0)
}

fn cycled(offsets: &[f64], index: usize) -> f64 {
    offsets
        .get(index % offsets.len().max(1))
        .copied()
        .unwrap_or_default()
}

/// Whether a candidate is both undersaturated and dark
pub fn is_muddy(color: &Hsl) -> bool {
    color.s < MUD_THRESHOLD && color.l < MUD_THRESHOLD
}

fn harmonized_color(
    spec: &PaletteSpec,
    strategy: HarmonyStrategy,
    key_hue: f64,
    index: usize,
    count: usize,
    rng: &mut dyn RandomSource,
) -> Rgb {
    let mut candidate = candidate_color(spec, strategy, key_hue, index, count, rng);
    let mut attempts = 1;

    while is_muddy(&candidate) && attempts < MUD_RETRY_LIMIT {
        trace!(index, attempts, s = candidate.s, l = candidate.l, "rejecting muddy color");
        candidate = candidate_color(spec, strategy, key_hue, index, count, rng);
        attempts += 1;
    }

    candidate.to_rgb()
}

fn candidate_color(
    spec: &PaletteSpec,
    strategy: HarmonyStrategy,
    key_hue: f64,
    index: usize,
    count: usize,
    rng: &mut dyn RandomSource,
) -> Hsl {
    let hue = strategy_hue(strategy, key_hue, index, count, rng);
    let (saturation, lightness) = if spec.flags.variance {
        (
            jittered(spec.saturation_range(), SATURATION_VARIANCE, rng),
            jittered(spec.lightness_range(), LIGHTNESS_VARIANCE, rng),
        )
    } else {
        (spec.saturation_range(), spec.lightness_range())
    };

    let s = saturation.sample(rng);
    let l = lightness.sample(rng);
    Hsl::new(hue, s, l)
}

/// Move both bounds by up to `amount`, keeping them ordered and within 0..=100
pub fn jittered(range: ValueRange, amount: f64, rng: &mut dyn RandomSource) -> ValueRange {
    let low = (range.min + rng.symmetric(amount)).clamp(0.0, 100.0);
    let high = (range.max + rng.symmetric(amount)).clamp(0.0, 100.0);
    ValueRange::new(low.min(high), low.max(high))
}

// Grays bypass the mud guard
fn mono_plus_colors(
    spec: &PaletteSpec,
    key_hue: f64,
    count: usize,
    rng: &mut dyn RandomSource,
) -> Vec<Rgb> {
    let listed_order = rng.chance(0.5);
    let accent = Hsl::new(
        key_hue,
        spec.saturation_range().sample(rng),
        spec.lightness_range().sample(rng),
    );

    let mut colors = Vec::with_capacity(count);
    colors.push(accent.to_rgb());

    for step in 0..count.saturating_sub(1) {
        let position = step % GRAY_ANCHORS.len();
        let anchor = if listed_order {
            position
        } else {
            GRAY_ANCHORS.len() - 1 - position
        };
        let lightness = GRAY_ANCHORS.get(anchor).copied().unwrap_or(50.0);
        colors.push(Hsl::new(key_hue, 0.0, lightness).to_rgb());
    }

    colors
}
