//! Image access capability used by the processor.
//!
//! [`ImageAccessor`] is the only way the core touches pixels: open a file,
//! read its dimensions, scale it, write it back. [`RasterAccessor`] is the
//! production implementation on top of the `image` crate; tests substitute a
//! recording double.

use super::{Compressor, Loader, Resizer};
use crate::core::{ResizeAlgorithm, Result, ScaleFactor};
use image::DynamicImage;
use std::path::Path;

pub trait ImageAccessor: Sync {
    /// Decoded image owned by one processing step.
    type Image;

    fn open(&self, path: &Path) -> Result<Self::Image>;

    fn dimensions(&self, image: &Self::Image) -> (u32, u32);

    fn scale(&self, image: &Self::Image, scale: ScaleFactor) -> Result<Self::Image>;

    /// Writes the image and returns the number of bytes persisted. Must not
    /// create missing directories.
    fn persist(&self, image: &Self::Image, path: &Path) -> Result<u64>;
}

pub struct RasterAccessor {
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
}

impl RasterAccessor {
    pub fn new(algorithm: ResizeAlgorithm, quality: u8) -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::new(algorithm),
            compressor: Compressor::new(quality),
        }
    }
}

impl Default for RasterAccessor {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::default(), 85)
    }
}

impl ImageAccessor for RasterAccessor {
    type Image = DynamicImage;

    fn open(&self, path: &Path) -> Result<DynamicImage> {
        self.loader.load(path)
    }

    fn dimensions(&self, image: &DynamicImage) -> (u32, u32) {
        (image.width(), image.height())
    }

    fn scale(&self, image: &DynamicImage, scale: ScaleFactor) -> Result<DynamicImage> {
        self.resizer.scale(image, scale)
    }

    fn persist(&self, image: &DynamicImage, path: &Path) -> Result<u64> {
        self.compressor.save(image, path)
    }
}
