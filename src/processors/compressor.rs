// downsize/src/processors/compressor.rs
use crate::core::{ResizeError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageFormat};
use std::fs::{File, Permissions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Encodes by destination extension and returns the number of bytes on disk.
    pub fn save(&self, image: &DynamicImage, path: &Path) -> Result<u64> {
        let format = self.detect_format(path);
        self.save_with_format(image, path, format)
    }

    pub fn save_with_format(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: ImageFormat,
    ) -> Result<u64> {
        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        match format {
            ImageFormat::Jpeg => self.save_jpeg(image, path)?,
            _ => self.save_generic(image, path, format)?,
        }

        self.log_save_result(path)
    }

    fn save_jpeg(&self, image: &DynamicImage, path: &Path) -> Result<()> {
        let quality = self.quality;
        write_replacing(path, |writer| {
            let encoder = JpegEncoder::new_with_quality(writer, quality);
            match image.color() {
                ColorType::L8 | ColorType::Rgb8 => image.write_with_encoder(encoder)?,
                // JPEG has no alpha channel and no 16-bit samples.
                _ => DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?,
            }
            Ok(())
        })
    }

    fn save_generic(&self, image: &DynamicImage, path: &Path, format: ImageFormat) -> Result<()> {
        write_replacing(path, |writer| {
            image.write_to(writer, format).map_err(|e| {
                ResizeError::ProcessingError(format!("Failed to encode {:?}: {}", format, e))
            })
        })
    }

    fn detect_format(&self, path: &Path) -> ImageFormat {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            Some("png") => ImageFormat::Png,
            Some("gif") => ImageFormat::Gif,
            Some("bmp") => ImageFormat::Bmp,
            Some("webp") => ImageFormat::WebP,
            Some("tiff") | Some("tif") => ImageFormat::Tiff,
            _ => ImageFormat::Jpeg,
        }
    }

    fn log_save_result(&self, path: &Path) -> Result<u64> {
        let file_size = std::fs::metadata(path)?.len();
        log::info!("Saved image: {} ({} bytes)", path.display(), file_size);
        Ok(file_size)
    }
}

/// Encodes into a temporary file next to `path` and renames it into place,
/// so a failed encode leaves any existing file at `path` untouched.
fn write_replacing<F>(path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut File>) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode(&mut writer)?;
        writer.flush()?;
    }

    let permissions = match std::fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => new_file_permissions(),
    };
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }

    tmp.persist(path).map_err(|e| ResizeError::Io(e.error))?;
    Ok(())
}

// Temporary files start out owner-only.
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(85)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    #[test]
    fn writes_jpeg_from_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 6));

        let written = Compressor::new(90).save(&image, &path).unwrap();

        assert!(written > 0);
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }

    #[test]
    fn picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.PNG");
        let image = DynamicImage::ImageRgb8(RgbImage::new(3, 3));

        Compressor::default().save(&image, &path).unwrap();

        assert_eq!(image::ImageFormat::from_path(&path).unwrap(), ImageFormat::Png);
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("out.jpg");
        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

        assert!(Compressor::default().save(&image, &path).is_err());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn failed_encode_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        std::fs::write(&path, b"precious").unwrap();
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 4));

        // No DDS encoder exists, so encoding fails after the write has started.
        let result = Compressor::default().save_with_format(&image, &path, ImageFormat::Dds);

        assert!(result.is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"precious");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        std::fs::write(&path, b"old").unwrap();
        let image = DynamicImage::ImageRgb8(RgbImage::new(5, 4));

        Compressor::default().save(&image, &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 4));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));

        Compressor::default().save(&image, &path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
