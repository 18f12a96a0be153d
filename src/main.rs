//! CLI entry point for seeded dither variant generation

use clap::Parser;
use ditherforge::io::cli::{BatchProcessor, Cli};

fn main() -> ditherforge::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let mut processor = BatchProcessor::new(cli);
    processor.process().map(|_| ())
}
