//! Batch orchestration: seed, schedule, per-slot rendering and rerolls
//!
//! A batch threads one [`SeededRandom`] strictly sequentially through the
//! schedule and every variant, so the seed determines every output byte.
//! Rerolls use [`EntropyRandom`] and are never reproducible.

use crate::assembly::variant::{GenerationConfig, Variant, render_variant};
use crate::io::configuration::MAX_BATCH_SIZE;
use crate::io::error::{ForgeError, Result};
use crate::math::random::{EntropyRandom, RandomSource, Seed, SeededRandom};
use crate::raster::surface::Surface;
use crate::theme::registry::ThemeRegistry;
use crate::theme::scheduler::ThemeSchedule;
use tracing::{info, info_span, warn};

/// What to generate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    /// Seed source
    pub seed: Seed,
    /// Number of variants
    pub batch_size: usize,
    /// Produce 2x2 grids instead of single images
    pub tiled: bool,
}

impl BatchRequest {
    /// Create a request
    pub const fn new(seed: Seed, batch_size: usize, tiled: bool) -> Self {
        Self {
            seed,
            batch_size,
            tiled,
        }
    }

    /// Check the batch size against the accepted range
    ///
    /// # Errors
    ///
    /// Returns an error if the batch size is zero or above [`MAX_BATCH_SIZE`]
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(ForgeError::InvalidBatchSize {
                requested: self.batch_size,
                max: MAX_BATCH_SIZE,
            });
        }
        Ok(())
    }
}

/// Progress notifications, emitted only between tiles and variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationEvent {
    /// A tile of a tiled variant is done
    TileFinished {
        /// Variant id
        variant: usize,
        /// Tile index, 0..4
        tile: usize,
    },
    /// A whole variant is done
    VariantFinished {
        /// Variant id
        variant: usize,
        /// Batch size
        total: usize,
    },
}

/// Produces batches from a theme catalog
#[derive(Debug, Clone, Default)]
pub struct BatchGenerator {
    registry: ThemeRegistry,
    config: GenerationConfig,
}

impl BatchGenerator {
    /// Create a generator over a catalog
    pub const fn new(registry: ThemeRegistry, config: GenerationConfig) -> Self {
        Self { registry, config }
    }

    /// Theme catalog in use
    pub const fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    /// Generate a full batch
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source surface has no pixels
    /// - The batch size is out of range
    pub fn generate(&self, source: Surface, request: &BatchRequest) -> Result<BatchState> {
        self.generate_with_progress(source, request, |_| {})
    }

    /// Generate a full batch, reporting progress at tile and variant boundaries
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source surface has no pixels
    /// - The batch size is out of range
    pub fn generate_with_progress(
        &self,
        source: Surface,
        request: &BatchRequest,
        mut on_event: impl FnMut(GenerationEvent),
    ) -> Result<BatchState> {
        if source.is_empty() {
            return Err(ForgeError::NoSource {
                reason: "source surface is empty".to_string(),
            });
        }
        request.validate()?;

        let seed = request.seed.resolve();
        let _span = info_span!("batch", seed, size = request.batch_size, tiled = request.tiled)
            .entered();
        info!("generating batch");

        let mut rng = SeededRandom::new(seed);
        let schedule = ThemeSchedule::build(self.registry.themes(), request.batch_size, &mut rng);

        let mut variants = Vec::with_capacity(request.batch_size);
        for (slot, &theme_index) in schedule.slots().iter().enumerate() {
            let Some(theme) = self.registry.get(theme_index) else {
                continue;
            };
            let id = slot + 1;
            let variant = render_variant(
                id,
                &source,
                theme,
                request.tiled,
                self.config,
                &mut rng,
                &mut |tile| on_event(GenerationEvent::TileFinished { variant: id, tile }),
            );
            variants.push(variant);
            on_event(GenerationEvent::VariantFinished {
                variant: id,
                total: request.batch_size,
            });
        }

        info!(variants = variants.len(), "batch complete");

        Ok(BatchState {
            seed,
            tiled: request.tiled,
            source,
            registry: self.registry.clone(),
            config: self.config,
            schedule,
            variants,
        })
    }
}

/// A generated batch, owned by the caller
#[derive(Debug, Clone)]
pub struct BatchState {
    seed: u32,
    tiled: bool,
    source: Surface,
    registry: ThemeRegistry,
    config: GenerationConfig,
    schedule: ThemeSchedule,
    variants: Vec<Variant>,
}

impl BatchState {
    /// Numeric seed the batch was generated from
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Whether variants are 2x2 grids
    pub const fn tiled(&self) -> bool {
        self.tiled
    }

    /// Theme assignment per slot
    pub const fn schedule(&self) -> &ThemeSchedule {
        &self.schedule
    }

    /// Variants in id order
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Look a variant up by id
    pub fn variant(&self, id: usize) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    /// Number of variants
    pub const fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether the batch holds no variants
    pub const fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Regenerate one variant with fresh, non-reproducible randomness
    ///
    /// # Errors
    ///
    /// Returns an error if no variant has the given id; the batch is unchanged
    pub fn reroll(&mut self, id: usize) -> Result<&Variant> {
        let mut rng = EntropyRandom::new();
        self.reroll_with(id, &mut rng)
    }

    /// Regenerate one variant drawing from the supplied source
    ///
    /// Keeps the variant's id, theme and tiling mode.
    ///
    /// # Errors
    ///
    /// Returns an error if no variant has the given id; the batch is unchanged
    pub fn reroll_with(&mut self, id: usize, rng: &mut dyn RandomSource) -> Result<&Variant> {
        let unknown = ForgeError::UnknownVariant {
            id,
            batch_size: self.variants.len(),
        };

        let Some(position) = self.variants.iter().position(|variant| variant.id == id) else {
            warn!(id, "reroll requested for unknown variant");
            return Err(unknown);
        };
        let Some(theme) = id
            .checked_sub(1)
            .and_then(|slot| self.schedule.theme_at(slot))
            .and_then(|index| self.registry.get(index))
        else {
            return Err(unknown);
        };

        info!(id, theme = theme.key, "rerolling variant");
        let replacement = render_variant(
            id,
            &self.source,
            theme,
            self.tiled,
            self.config,
            rng,
            &mut |_| {},
        );

        let slot = self.variants.get_mut(position).ok_or(unknown)?;
        *slot = replacement;
        Ok(slot)
    }
}
