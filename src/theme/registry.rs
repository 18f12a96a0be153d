//! Theme catalog: named presets bundling palette rules and a contrast range

use crate::io::configuration::{
    DEFAULT_LIGHTNESS, DEFAULT_SATURATION, MAX_PALETTE_COLORS, MIN_PALETTE_COLORS,
};
use crate::io::error::{Result, invalid_theme};
use crate::math::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Rule for deriving a set of hues from one key hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonyStrategy {
    /// Evenly divide the color wheel
    Spread,
    /// Alternate between the key hue and its opposite
    Complementary,
    /// Three hues 120° apart
    Triadic,
    /// Neighbouring hues in 30° steps around the key
    Analogous,
    /// Key hue plus the two neighbours of its complement
    SplitComplementary,
    /// One saturated accent over a grayscale ramp
    MonoPlus,
    /// Loose scatter around the key hue
    Random,
}

impl HarmonyStrategy {
    /// Strategies a `variance` theme picks from
    pub const VARIANCE_POOL: [Self; 5] = [
        Self::Spread,
        Self::Triadic,
        Self::Analogous,
        Self::SplitComplementary,
        Self::Random,
    ];

    /// Stable snake-case label used in traits and manifests
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spread => "spread",
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Analogous => "analogous",
            Self::SplitComplementary => "split_complementary",
            Self::MonoPlus => "mono_plus",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for HarmonyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed numeric interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ValueRange {
    /// Create a range from its bounds
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from the range
    pub fn sample(self, rng: &mut dyn RandomSource) -> f64 {
        rng.range(self.min, self.max)
    }

    /// Whether `min <= max` and both bounds lie within `[floor, ceiling]`
    pub fn is_within(self, floor: f64, ceiling: f64) -> bool {
        self.min <= self.max && self.min >= floor && self.max <= ceiling
    }
}

/// Style switches consulted when a theme has no explicit strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
// Each flag is an independent theme property
#[allow(clippy::struct_excessive_bools)]
pub struct PaletteFlags {
    /// Favor strongly opposed hues
    pub high_contrast: bool,
    /// Snap the key hue to primary/secondary hues
    pub use_key_colors: bool,
    /// Jitter the saturation/lightness ranges per color
    pub variance: bool,
    /// Accent color over grayscale
    pub mono_plus: bool,
}

/// Palette generation parameters for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteSpec {
    /// Smallest color count
    pub min_colors: usize,
    /// Largest color count
    pub max_colors: usize,
    /// Saturation bounds in percent
    pub saturation: Option<ValueRange>,
    /// Lightness bounds in percent
    pub lightness: Option<ValueRange>,
    /// Explicit harmony strategy, overriding the flags
    pub strategy: Option<HarmonyStrategy>,
    /// Style switches
    pub flags: PaletteFlags,
}

impl PaletteSpec {
    /// Palette of `min_colors..=max_colors` colors with default ranges and no flags
    pub const fn new(min_colors: usize, max_colors: usize) -> Self {
        Self {
            min_colors,
            max_colors,
            saturation: None,
            lightness: None,
            strategy: None,
            flags: PaletteFlags {
                high_contrast: false,
                use_key_colors: false,
                variance: false,
                mono_plus: false,
            },
        }
    }

    /// Set the saturation bounds
    pub const fn with_saturation(mut self, min: f64, max: f64) -> Self {
        self.saturation = Some(ValueRange::new(min, max));
        self
    }

    /// Set the lightness bounds
    pub const fn with_lightness(mut self, min: f64, max: f64) -> Self {
        self.lightness = Some(ValueRange::new(min, max));
        self
    }

    /// Set an explicit strategy
    pub const fn with_strategy(mut self, strategy: HarmonyStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Replace the style switches
    pub const fn with_flags(mut self, flags: PaletteFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Saturation bounds, falling back to the default range
    pub fn saturation_range(&self) -> ValueRange {
        self.saturation
            .unwrap_or(ValueRange::new(DEFAULT_SATURATION.0, DEFAULT_SATURATION.1))
    }

    /// Lightness bounds, falling back to the default range
    pub fn lightness_range(&self) -> ValueRange {
        self.lightness
            .unwrap_or(ValueRange::new(DEFAULT_LIGHTNESS.0, DEFAULT_LIGHTNESS.1))
    }

    /// Decide which harmony strategy a palette uses
    ///
    /// An explicit strategy wins; otherwise flags are checked in priority order.
    /// Only the `variance` branch consumes a random draw.
    pub fn resolve_strategy(&self, rng: &mut dyn RandomSource) -> HarmonyStrategy {
        if let Some(strategy) = self.strategy {
            return strategy;
        }

        let flags = self.flags;
        if flags.mono_plus {
            HarmonyStrategy::MonoPlus
        } else if flags.high_contrast {
            HarmonyStrategy::Complementary
        } else if flags.use_key_colors {
            HarmonyStrategy::Triadic
        } else if flags.variance {
            let pick = rng.index(HarmonyStrategy::VARIANCE_POOL.len());
            HarmonyStrategy::VARIANCE_POOL
                .get(pick)
                .copied()
                .unwrap_or(HarmonyStrategy::Random)
        } else {
            HarmonyStrategy::Random
        }
    }
}

/// A named preset with a selection weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Stable identifier
    pub key: &'static str,
    /// Human readable name
    pub name: &'static str,
    /// Quota units used by the scheduler
    pub weight: u32,
    /// Palette generation parameters
    pub palette: PaletteSpec,
    /// Contrast scalar bounds used by the ditherer
    pub contrast: ValueRange,
}

const NO_FLAGS: PaletteFlags = PaletteFlags {
    high_contrast: false,
    use_key_colors: false,
    variance: false,
    mono_plus: false,
};

/// Built-in catalog covering every strategy and flag
pub const BUILTIN_THEMES: [Theme; 8] = [
    Theme {
        key: "neon_spread",
        name: "Neon Spread",
        weight: 4,
        palette: PaletteSpec::new(4, 8)
            .with_saturation(80.0, 100.0)
            .with_lightness(45.0, 65.0)
            .with_strategy(HarmonyStrategy::Spread),
        contrast: ValueRange::new(1.0, 1.6),
    },
    Theme {
        key: "hi_fi",
        name: "Hi-Fi Contrast",
        weight: 3,
        palette: PaletteSpec::new(2, 4).with_flags(PaletteFlags {
            high_contrast: true,
            ..NO_FLAGS
        }),
        contrast: ValueRange::new(1.3, 2.2),
    },
    Theme {
        key: "primary_press",
        name: "Primary Press",
        weight: 3,
        palette: PaletteSpec::new(3, 6)
            .with_saturation(75.0, 100.0)
            .with_lightness(40.0, 60.0)
            .with_flags(PaletteFlags {
                use_key_colors: true,
                ..NO_FLAGS
            }),
        contrast: ValueRange::new(0.9, 1.5),
    },
    Theme {
        key: "drift",
        name: "Drift",
        weight: 3,
        palette: PaletteSpec::new(3, 7)
            .with_saturation(45.0, 90.0)
            .with_lightness(35.0, 75.0)
            .with_flags(PaletteFlags {
                variance: true,
                ..NO_FLAGS
            }),
        contrast: ValueRange::new(0.7, 1.4),
    },
    Theme {
        key: "monolith",
        name: "Monolith",
        weight: 2,
        palette: PaletteSpec::new(3, 4)
            .with_saturation(85.0, 100.0)
            .with_lightness(45.0, 55.0)
            .with_flags(PaletteFlags {
                mono_plus: true,
                ..NO_FLAGS
            }),
        contrast: ValueRange::new(1.1, 1.8),
    },
    Theme {
        key: "sunset_fade",
        name: "Sunset Fade",
        weight: 3,
        palette: PaletteSpec::new(4, 7)
            .with_saturation(55.0, 95.0)
            .with_lightness(35.0, 80.0)
            .with_strategy(HarmonyStrategy::Analogous),
        contrast: ValueRange::new(0.8, 1.3),
    },
    Theme {
        key: "split_signal",
        name: "Split Signal",
        weight: 2,
        palette: PaletteSpec::new(3, 5)
            .with_saturation(60.0, 100.0)
            .with_lightness(40.0, 70.0)
            .with_strategy(HarmonyStrategy::SplitComplementary),
        contrast: ValueRange::new(1.0, 1.7),
    },
    Theme {
        key: "wildcard",
        name: "Wildcard",
        weight: 2,
        palette: PaletteSpec::new(2, 12),
        contrast: ValueRange::new(0.6, 2.2),
    },
];

/// Validated, immutable list of themes
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ThemeRegistry {
    /// The built-in catalog
    pub fn builtin() -> Self {
        Self {
            themes: BUILTIN_THEMES.to_vec(),
        }
    }

    /// Build a registry from a custom catalog
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog is empty or contains duplicate keys
    /// - A weight is zero
    /// - Color counts fall outside 2..=12 or are inverted
    /// - Saturation/lightness bounds leave 0..=100 or are inverted
    /// - The contrast range is inverted or not positive
    pub fn new(themes: Vec<Theme>) -> Result<Self> {
        if themes.is_empty() {
            return Err(invalid_theme("<catalog>", &"at least one theme is required"));
        }

        let mut seen = HashSet::new();
        for theme in &themes {
            if !seen.insert(theme.key) {
                return Err(invalid_theme(theme.key, &"duplicate theme key"));
            }
            validate_theme(theme)?;
        }

        Ok(Self { themes })
    }

    /// Themes in catalog order
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Theme at a catalog position
    pub fn get(&self, index: usize) -> Option<&Theme> {
        self.themes.get(index)
    }

    /// Look a theme up by key
    pub fn find(&self, key: &str) -> Option<&Theme> {
        self.themes.iter().find(|theme| theme.key == key)
    }

    /// Number of themes
    pub const fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the catalog is empty
    pub const fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }
}

fn validate_theme(theme: &Theme) -> Result<()> {
    let spec = &theme.palette;

    if theme.weight == 0 {
        return Err(invalid_theme(theme.key, &"weight must be at least 1"));
    }
    if spec.min_colors < MIN_PALETTE_COLORS
        || spec.max_colors > MAX_PALETTE_COLORS
        || spec.min_colors > spec.max_colors
    {
        return Err(invalid_theme(
            theme.key,
            &format!(
                "color count {}..={} must lie within {MIN_PALETTE_COLORS}..={MAX_PALETTE_COLORS}",
                spec.min_colors, spec.max_colors
            ),
        ));
    }
    if !spec.saturation_range().is_within(0.0, 100.0) {
        return Err(invalid_theme(theme.key, &"saturation bounds must lie within 0..=100"));
    }
    if !spec.lightness_range().is_within(0.0, 100.0) {
        return Err(invalid_theme(theme.key, &"lightness bounds must lie within 0..=100"));
    }
    if !theme.contrast.is_within(f64::MIN_POSITIVE, f64::MAX) {
        return Err(invalid_theme(theme.key, &"contrast range must be positive and ordered"));
    }

    Ok(())
}
