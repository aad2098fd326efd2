// downsize/src/utils/mod.rs
use crate::core::{ResizeError, Result, Selection};
use crate::processors::Loader;
use std::path::Path;
use walkdir::WalkDir;

/// Name check used by the selection: the name must end in `jpg` or `jpeg`.
/// Case is not folded.
pub fn is_jpeg_name(filename: &str) -> bool {
    filename.ends_with("jpg") || filename.ends_with("jpeg")
}

/// True when the smaller side is strictly greater than `threshold`.
pub fn exceeds_threshold(width: u32, height: u32, threshold: u32) -> bool {
    width.min(height) > threshold
}

/// Builds the selection from the files directly inside `dir`, sorted by name.
///
/// Candidates whose header cannot be read are skipped with a warning.
pub fn collect_selection(dir: &Path, threshold: u32) -> Result<Selection> {
    if !dir.is_dir() {
        return Err(ResizeError::Configuration(format!(
            "Input path is not a directory: {}",
            dir.display()
        )));
    }

    let loader = Loader::new();
    let mut filenames = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(filename) = entry.file_name().to_str() else {
            log::warn!("Skipping non UTF-8 file name: {}", entry.path().display());
            continue;
        };

        if !is_jpeg_name(filename) {
            continue;
        }

        match loader.get_dimensions(entry.path()) {
            Ok((width, height)) if exceeds_threshold(width, height, threshold) => {
                filenames.push(filename.to_string());
            }
            Ok((width, height)) => {
                log::debug!("{}: {}x{} is too small, skipping", filename, width, height);
            }
            Err(e) => log::warn!("Skipping {}: {}", filename, e),
        }
    }

    log::info!(
        "Selected {} images in {} (smaller side > {} px)",
        filenames.len(),
        dir.display(),
        threshold
    );

    Ok(Selection::new(filenames))
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn jpeg_names_are_case_sensitive() {
        assert!(is_jpeg_name("photo.jpg"));
        assert!(is_jpeg_name("photo.jpeg"));
        assert!(!is_jpeg_name("photo.JPG"));
        assert!(!is_jpeg_name("photo.png"));
    }

    #[test]
    fn threshold_is_strict() {
        assert!(exceeds_threshold(3000, 2201, 2200));
        assert!(!exceeds_threshold(3000, 2200, 2200));
        assert!(!exceeds_threshold(2200, 9000, 2200));
    }

    #[test]
    fn selection_keeps_large_jpegs_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::new(40, 30).save(dir.path().join("c.jpg")).unwrap();
        RgbImage::new(40, 30).save(dir.path().join("a.jpeg")).unwrap();
        RgbImage::new(40, 10).save(dir.path().join("b.jpg")).unwrap();
        RgbImage::new(40, 30).save(dir.path().join("d.png")).unwrap();
        std::fs::write(dir.path().join("e.jpg"), b"garbage").unwrap();
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let selection = collect_selection(dir.path(), 20).unwrap();

        assert_eq!(selection.as_slice(), ["a.jpeg", "c.jpg"]);
    }

    #[test]
    fn selection_requires_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.jpg");
        std::fs::write(&file, b"x").unwrap();

        assert!(collect_selection(&file, 0).is_err());
    }

    #[test]
    fn formats_file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.00 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.00 MB");
    }
}
