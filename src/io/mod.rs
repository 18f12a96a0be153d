//! Input/output: command line, files, logging surfaces and errors

/// Command-line parsing and the end-to-end batch processor
pub mod cli;
/// Tunable constants
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Image decoding and PNG export
pub mod image;
/// JSON batch manifest
pub mod manifest;
/// Terminal progress bars
pub mod progress;
