// downsize/src/processors/loader.rs
use super::MAX_DIMENSION;
use crate::core::{ResizeError, Result};
use image::{DynamicImage, ImageReader};
use std::path::Path;

#[derive(Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| ResizeError::ProcessingError(format!("Failed to decode image: {}", e)))?;

        let (width, height) = (image.width(), image.height());
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ResizeError::ProcessingError(format!(
                "Image dimensions {}x{} exceed maximum {}x{}",
                width, height, MAX_DIMENSION, MAX_DIMENSION
            )));
        }

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    /// Reads only the header, without decoding pixels.
    pub fn get_dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let dimensions = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;

        Ok(dimensions)
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ResizeError::ProcessingError(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(ResizeError::ProcessingError(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}
