// downsize/src/processors/resizer.rs
use crate::core::{ResizeAlgorithm, ResizeError, Result, ScaleFactor};
use image::{imageops::FilterType, DynamicImage};

/// Largest side accepted for a resized image.
pub const MAX_DIMENSION: u32 = 100_000;

#[derive(Debug, Clone, Copy)]
pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Dimensions the image will have after scaling, or an error when the
    /// factor cannot produce a usable image.
    pub fn calculate_dimensions(
        &self,
        width: u32,
        height: u32,
        scale: ScaleFactor,
    ) -> Result<(u32, u32)> {
        if !scale.is_valid() {
            return Err(ResizeError::ProcessingError(format!(
                "Invalid scale factor {}",
                scale.value()
            )));
        }

        let (new_width, new_height) = scale.apply(width, height);
        if new_width > MAX_DIMENSION || new_height > MAX_DIMENSION {
            return Err(ResizeError::ProcessingError(format!(
                "Resized dimensions {}x{} exceed maximum {}x{}",
                new_width, new_height, MAX_DIMENSION, MAX_DIMENSION
            )));
        }

        Ok((new_width, new_height))
    }

    pub fn resize_exact(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return image.clone();
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            width,
            height
        );

        image.resize_exact(width, height, self.filter_type())
    }

    pub fn scale(&self, image: &DynamicImage, scale: ScaleFactor) -> Result<DynamicImage> {
        let (width, height) = self.calculate_dimensions(image.width(), image.height(), scale)?;
        Ok(self.resize_exact(image, width, height))
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::default())
    }
}
