//! Error types and context management for generation operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all generation operations
#[derive(Debug, Error)]
pub enum ForgeError {
    /// Failed to load source image from filesystem
    #[error("Failed to load image '{}': {source}", path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// No usable source image was supplied
    ///
    /// Raised before any generation work starts, so no partial batch exists
    #[error("No source image: {reason}")]
    NoSource {
        /// Why the source was rejected
        reason: String,
    },

    /// Requested batch size is outside the accepted range
    #[error("Invalid batch size {requested}: must be between 1 and {max}")]
    InvalidBatchSize {
        /// The rejected batch size
        requested: usize,
        /// Largest accepted batch size
        max: usize,
    },

    /// Parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Theme catalog failed validation
    #[error("Invalid theme '{key}': {reason}")]
    InvalidTheme {
        /// Key of the offending theme
        key: String,
        /// Description of the violated constraint
        reason: String,
    },

    /// Reroll requested for a variant that is not part of the batch
    #[error("Unknown variant #{id} (batch holds {batch_size} variants)")]
    UnknownVariant {
        /// Requested variant id
        id: usize,
        /// Number of variants in the batch
        batch_size: usize,
    },

    /// Failed to save generated image to disk
    #[error("Failed to export image to '{}': {source}", path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Failed to serialize the variant manifest
    #[error("Failed to write manifest '{}': {source}", path.display())]
    Manifest {
        /// Path where the manifest was written
        path: PathBuf,
        /// Underlying serialization error
        source: serde_json::Error,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, ForgeError>;

impl From<std::io::Error> for ForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ForgeError {
    ForgeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid theme error
pub fn invalid_theme(key: &str, reason: &impl ToString) -> ForgeError {
    ForgeError::InvalidTheme {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
