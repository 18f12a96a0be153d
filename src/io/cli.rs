//! Command-line interface for generating a batch of dithered variants

use crate::assembly::batch::{BatchGenerator, BatchRequest, BatchState};
use crate::assembly::variant::GenerationConfig;
use crate::io::configuration::{DEFAULT_BATCH_SIZE, DEFAULT_OUTPUT_DIR, MANIFEST_FILE, OUTPUT_PREFIX};
use crate::io::error::Result;
use crate::io::image::{export_surface_as_png, load_surface};
use crate::io::manifest::BatchManifest;
use crate::io::progress::ProgressManager;
use crate::math::random::Seed;
use crate::theme::registry::ThemeRegistry;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ditherforge")]
#[command(
    author,
    version,
    about = "Generate a seeded batch of themed, dithered image variants"
)]
/// Command-line arguments for the variant generator
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image to dither
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory the variants and manifest are written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out: PathBuf,

    /// Number of variants to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub count: usize,

    /// Seed phrase; its character codes are summed (clock-seeded when omitted)
    #[arg(short, long, conflicts_with = "seed_value")]
    pub seed: Option<String>,

    /// Numeric seed used as-is
    #[arg(long)]
    pub seed_value: Option<u32>,

    /// Compose each variant from four independently dithered tiles
    #[arg(short, long)]
    pub tiled: bool,

    /// Disable the random scaling of diffused error
    #[arg(long)]
    pub no_jitter: bool,

    /// Regenerate the given variant ids with fresh randomness after the batch
    #[arg(short, long = "reroll", value_name = "ID")]
    pub reroll: Vec<usize>,

    /// Skip writing the JSON manifest
    #[arg(long)]
    pub no_manifest: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log per-variant details
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the seed arguments
    pub fn seed(&self) -> Seed {
        self.seed_value
            .map_or_else(|| Seed::from_text(self.seed.as_deref()), Seed::Value)
    }

    /// Build the batch request described by the arguments
    pub fn batch_request(&self) -> BatchRequest {
        BatchRequest::new(self.seed(), self.count, self.tiled)
    }

    /// Generation settings described by the arguments
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            jitter: !self.no_jitter,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Install the stderr log subscriber; later calls are ignored
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.log_level()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

/// Runs one batch end to end: load, generate, reroll, export
pub struct BatchProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl BatchProcessor {
    /// Create a new processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Generate and export the batch described by the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The source image is missing or cannot be decoded
    /// - The requested count is out of range
    /// - A variant or the manifest cannot be written
    pub fn process(&mut self) -> Result<BatchState> {
        let start_time = Instant::now();
        let source = load_surface(&self.cli.source)?;
        let request = self.cli.batch_request();
        request.validate()?;

        let generator = BatchGenerator::new(ThemeRegistry::builtin(), self.cli.generation_config());

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(request.batch_size, request.tiled);
        }

        let progress = self.progress_manager.as_ref();
        let mut batch = generator.generate_with_progress(source, &request, |event| {
            if let Some(pm) = progress {
                pm.handle(event);
            }
        })?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        for &id in &self.cli.reroll {
            if let Err(e) = batch.reroll(id) {
                warn!("{e}");
            }
        }

        self.export(&batch)?;

        info!(
            seed = batch.seed(),
            variants = batch.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "batch written to {}",
            self.cli.out.display()
        );

        Ok(batch)
    }

    fn export(&self, batch: &BatchState) -> Result<()> {
        for variant in batch.variants() {
            export_surface_as_png(&variant.surface, &Self::variant_path(&self.cli.out, variant.id))?;
        }

        if !self.cli.no_manifest {
            BatchManifest::from_batch(batch).write(&self.cli.out.join(MANIFEST_FILE))?;
        }

        Ok(())
    }

    /// Output path for a variant id
    pub fn variant_path(out_dir: &Path, id: usize) -> PathBuf {
        out_dir.join(format!("{OUTPUT_PREFIX}{id}.png"))
    }
}
