//! Decoding source images into surfaces and exporting variants as PNG

use crate::io::error::{ForgeError, Result, invalid_parameter};
use crate::raster::surface::Surface;
use image::RgbaImage;
use std::path::Path;

/// Load any supported image file as an RGBA surface
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist (reported as a missing source)
/// - The file cannot be decoded
/// - The decoded image has no pixels
pub fn load_surface(path: &Path) -> Result<Surface> {
    if !path.is_file() {
        return Err(ForgeError::NoSource {
            reason: format!("'{}' is not a readable file", path.display()),
        });
    }

    let decoded = image::open(path).map_err(|e| ForgeError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    surface_from_image(&decoded.to_rgba8())
}

/// Copy an RGBA image into a surface
///
/// # Errors
///
/// Returns an error if the image has no pixels
pub fn surface_from_image(image: &RgbaImage) -> Result<Surface> {
    Surface::from_rgba(
        image.width() as usize,
        image.height() as usize,
        image.as_raw().clone(),
    )
}

/// Copy a surface into an RGBA image
///
/// # Errors
///
/// Returns an error if the surface dimensions exceed the image size limits
pub fn surface_to_image(surface: &Surface) -> Result<RgbaImage> {
    let (width, height) = surface.dimensions();
    let width = u32::try_from(width).map_err(|e| invalid_parameter("width", &width, &e))?;
    let height = u32::try_from(height).map_err(|e| invalid_parameter("height", &height, &e))?;

    RgbaImage::from_raw(width, height, surface.to_rgba_bytes()).ok_or_else(|| {
        invalid_parameter(
            "dimensions",
            &format!("{width}x{height}"),
            &"pixel buffer does not match dimensions",
        )
    })
}

/// Export a surface as a PNG file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The surface cannot be converted to an image
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_surface_as_png(surface: &Surface, output_path: &Path) -> Result<()> {
    let img = surface_to_image(surface)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ForgeError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| ForgeError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
