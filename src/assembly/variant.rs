//! Rendering a single variant: one image or a 2x2 grid of independent tiles

use crate::effects::dither::dither;
use crate::effects::misprint::maybe_misprint;
use crate::effects::preprocess::{PreprocessParams, preprocess};
use crate::io::configuration::TILES_PER_GRID;
use crate::math::random::RandomSource;
use crate::palette::synthesis::{Palette, synthesize};
use crate::raster::surface::Surface;
use crate::theme::registry::Theme;
use std::collections::BTreeMap;
use tracing::debug;

/// Trait name to value, ordered for stable export
pub type Traits = BTreeMap<String, String>;

/// Knobs shared by every variant of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Scale diffused error by a small random factor
    pub jitter: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { jitter: true }
    }
}

/// One generated image with its metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// Position in the batch, starting at 1
    pub id: usize,
    /// Final pixels
    pub surface: Surface,
    /// Whether this is a 2x2 grid
    pub tiled: bool,
    /// Key of the theme it was generated with
    pub theme_key: String,
    /// Display name of that theme
    pub theme_name: String,
    /// Descriptive traits for export
    pub traits: Traits,
}

impl Variant {
    /// (width, height) of the final image
    pub fn dimensions(&self) -> (usize, usize) {
        self.surface.dimensions()
    }

    /// `WIDTHxHEIGHT` label
    pub fn dimensions_label(&self) -> String {
        let (width, height) = self.dimensions();
        format!("{width}x{height}")
    }
}

/// A fully processed image plus the values that shaped it
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTile {
    /// Final pixels
    pub surface: Surface,
    /// Palette used for quantization
    pub palette: Palette,
    /// Contrast scalar used by the ditherer
    pub contrast: f64,
    /// Pre-processing parameters
    pub preprocess: PreprocessParams,
    /// Whether the channel shift was applied
    pub misprinted: bool,
}

/// Palette, contrast, pre-process, dither and misprint for one image
pub fn render_tile(
    source: &Surface,
    theme: &Theme,
    config: GenerationConfig,
    rng: &mut dyn RandomSource,
) -> RenderedTile {
    let palette = synthesize(&theme.palette, rng);
    let contrast = theme.contrast.sample(rng);
    let (working, params) = preprocess(source, rng);

    let jitter: Option<&mut dyn RandomSource> = if config.jitter {
        Some(&mut *rng)
    } else {
        None
    };
    let dithered = dither(working, palette.colors(), contrast, jitter);
    let (surface, misprinted) = maybe_misprint(dithered, rng);

    debug!(
        theme = theme.key,
        colors = palette.len(),
        strategy = %palette.strategy(),
        contrast,
        misprinted,
        "rendered tile"
    );

    RenderedTile {
        surface,
        palette,
        contrast,
        preprocess: params,
        misprinted,
    }
}

/// Render a variant in single or tiled mode
///
/// `on_tile` is called after each finished tile in tiled mode.
pub fn render_variant(
    id: usize,
    source: &Surface,
    theme: &Theme,
    tiled: bool,
    config: GenerationConfig,
    rng: &mut dyn RandomSource,
    on_tile: &mut dyn FnMut(usize),
) -> Variant {
    let (surface, traits) = if tiled {
        let tiles: Vec<RenderedTile> = (0..TILES_PER_GRID)
            .map(|tile| {
                let rendered = render_tile(source, theme, config, rng);
                on_tile(tile);
                rendered
            })
            .collect();
        (compose_grid(source.dimensions(), &tiles), tiled_traits(theme, &tiles))
    } else {
        let rendered = render_tile(source, theme, config, rng);
        let traits = single_traits(theme, &rendered);
        (rendered.surface, traits)
    };

    Variant {
        id,
        surface,
        tiled,
        theme_key: theme.key.to_string(),
        theme_name: theme.name.to_string(),
        traits,
    }
}

/// Place tile `i` at column `i % 2`, row `i / 2` of a grid twice the tile size
pub fn compose_grid(tile_dimensions: (usize, usize), tiles: &[RenderedTile]) -> Surface {
    let (width, height) = tile_dimensions;
    let mut grid = Surface::new(width * 2, height * 2);
    for (index, tile) in tiles.iter().enumerate() {
        grid.blit(&tile.surface, (index % 2) * width, (index / 2) * height);
    }
    grid
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

fn single_traits(theme: &Theme, tile: &RenderedTile) -> Traits {
    let mut traits = Traits::new();
    traits.insert("Theme".into(), theme.name.to_string());
    traits.insert("Layout".into(), "Single".into());
    traits.insert("Harmony".into(), tile.palette.strategy().to_string());
    traits.insert("Palette Size".into(), tile.palette.len().to_string());
    traits.insert("Palette".into(), tile.palette.to_hex_list());
    traits.insert("Dominant Hue".into(), tile.palette.hue_name().to_string());
    traits.insert("Contrast".into(), format!("{:.2}", tile.contrast));
    traits.insert("Hue Shift".into(), format!("{:+.1}", tile.preprocess.hue_rotation));
    traits.insert("Inverted".into(), yes_no(tile.preprocess.invert));
    traits.insert("Misprint".into(), yes_no(tile.misprinted));
    traits
}

fn tiled_traits(theme: &Theme, tiles: &[RenderedTile]) -> Traits {
    let mut traits = Traits::new();
    traits.insert("Theme".into(), theme.name.to_string());
    traits.insert("Layout".into(), "2x2 Grid".into());
    traits.insert(
        "Harmony".into(),
        joined(tiles, |tile| tile.palette.strategy().to_string()),
    );
    traits.insert(
        "Palette Size".into(),
        joined(tiles, |tile| tile.palette.len().to_string()),
    );
    traits.insert(
        "Dominant Hue".into(),
        joined(tiles, |tile| tile.palette.hue_name().to_string()),
    );
    traits.insert(
        "Contrast".into(),
        joined(tiles, |tile| format!("{:.2}", tile.contrast)),
    );
    traits.insert("Inverted".into(), tally(tiles, |tile| tile.preprocess.invert));
    traits.insert("Misprint".into(), tally(tiles, |tile| tile.misprinted));
    traits
}

// Per-tile values in grid order
fn joined(tiles: &[RenderedTile], field: impl Fn(&RenderedTile) -> String) -> String {
    tiles.iter().map(field).collect::<Vec<_>>().join(" / ")
}

fn tally(tiles: &[RenderedTile], field: impl Fn(&RenderedTile) -> bool) -> String {
    let hits = tiles.iter().filter(|tile| field(tile)).count();
    format!("{hits}/{}", tiles.len())
}
