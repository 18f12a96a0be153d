//! JSON manifest describing every variant of a batch

use crate::assembly::batch::BatchState;
use crate::assembly::variant::{Traits, Variant};
use crate::io::error::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exported metadata for one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Position in the batch, starting at 1
    pub id: usize,
    /// Whether the variant is a 2x2 grid
    pub tiled: bool,
    /// `WIDTHxHEIGHT`
    pub dimensions: String,
    /// Theme key
    pub theme_key: String,
    /// Theme display name
    pub theme: String,
    /// Trait name to value
    pub traits: Traits,
}

impl From<&Variant> for VariantRecord {
    fn from(variant: &Variant) -> Self {
        Self {
            id: variant.id,
            tiled: variant.tiled,
            dimensions: variant.dimensions_label(),
            theme_key: variant.theme_key.clone(),
            theme: variant.theme_name.clone(),
            traits: variant.traits.clone(),
        }
    }
}

/// Exported metadata for a whole batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchManifest {
    /// Numeric seed the batch was generated from
    pub seed: u32,
    /// Whether variants are 2x2 grids
    pub tiled: bool,
    /// One record per variant, in id order
    pub variants: Vec<VariantRecord>,
}

impl BatchManifest {
    /// Describe a generated batch
    pub fn from_batch(batch: &BatchState) -> Self {
        Self {
            seed: batch.seed(),
            tiled: batch.tiled(),
            variants: batch.variants().iter().map(VariantRecord::from).collect(),
        }
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the manifest to a file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json().map_err(|e| ForgeError::Manifest {
            path: path.to_path_buf(),
            source: e,
        })?;

        std::fs::write(path, json).map_err(|e| ForgeError::FileSystem {
            path: path.to_path_buf(),
            operation: "write manifest",
            source: e,
        })
    }
}
