//! Terminal progress for batch generation

use crate::assembly::batch::GenerationEvent;
use crate::io::configuration::TILES_PER_GRID;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Variants: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {pos}/{len} tiles")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the variant bar and, in tiled mode, a per-variant tile bar
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    tile_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            tile_bar: None,
        }
    }

    /// Create the bars for a batch
    pub fn initialize(&mut self, variant_count: usize, tiled: bool) {
        let batch_bar = ProgressBar::new(variant_count as u64);
        batch_bar.set_style(BATCH_STYLE.clone());
        self.batch_bar = Some(self.multi_progress.add(batch_bar));

        if tiled {
            let tile_bar = ProgressBar::new(TILES_PER_GRID as u64);
            tile_bar.set_style(TILE_STYLE.clone());
            self.tile_bar = Some(self.multi_progress.add(tile_bar));
        }
    }

    /// Advance the bars for one generation event
    pub fn handle(&self, event: GenerationEvent) {
        match event {
            GenerationEvent::TileFinished { variant, tile } => {
                if let Some(ref bar) = self.tile_bar {
                    bar.set_prefix(format!("#{variant}"));
                    bar.set_position(tile as u64 + 1);
                }
            }
            GenerationEvent::VariantFinished { variant, total } => {
                if let Some(ref bar) = self.batch_bar {
                    bar.set_position(variant as u64);
                    bar.set_message(format!("#{variant} of {total}"));
                }
                if let Some(ref bar) = self.tile_bar {
                    bar.set_position(0);
                }
            }
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All variants generated");
        }
        if let Some(ref tile_bar) = self.tile_bar {
            tile_bar.finish_and_clear();
        }
        let _ = self.multi_progress.clear();
    }
}
