// downsize/src/core/mod.rs
pub mod processor;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Smaller-side threshold used when none is given.
pub const DEFAULT_THRESHOLD: u32 = 2200;
/// Target size used when none is given.
pub const DEFAULT_TARGET: u32 = 1000;
pub const DEFAULT_SUBFOLDER: &str = "converted";
pub const DEFAULT_PREFIX: &str = "sml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    #[default]
    Lanczos3,
}

/// How the scale factor is derived from an image's dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    Smart,
    NaiveSmallerSide,
    NaiveBiggerSide,
}

/// Where resized images end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementKind {
    Subfolder(String),
    Prefix(String),
    Overwrite { make_copy: bool },
}

impl Default for PlacementKind {
    fn default() -> Self {
        PlacementKind::Subfolder(DEFAULT_SUBFOLDER.to_string())
    }
}

/// Target dimension in pixels. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget(u32);

impl ResizeTarget {
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(ResizeError::Configuration(
                "Target size must be greater than zero".to_string(),
            ));
        }
        Ok(Self(size))
    }

    pub fn size(&self) -> u32 {
        self.0
    }
}

impl Default for ResizeTarget {
    fn default() -> Self {
        Self(DEFAULT_TARGET)
    }
}

/// Uniform ratio applied to both sides of an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Scaled dimensions, rounded and never below 1x1.
    pub fn apply(&self, width: u32, height: u32) -> (u32, u32) {
        let new_width = (width as f64 * self.0).round() as u32;
        let new_height = (height as f64 * self.0).round() as u32;
        (new_width.max(1), new_height.max(1))
    }
}

/// Ordered list of filenames to process, relative to the run's root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    filenames: Vec<String>,
}

impl Selection {
    pub fn new<I, S>(filenames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filenames: filenames.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.filenames.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.filenames
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub target: ResizeTarget,
    pub strategy: StrategyKind,
    pub placement: PlacementKind,
    /// Answer to "the subfolder already exists, replace files?".
    pub confirm_existing: bool,
    pub algorithm: ResizeAlgorithm,
    pub quality: u8,
    /// 0 runs on rayon's global pool.
    pub threads: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            target: ResizeTarget::default(),
            strategy: StrategyKind::default(),
            placement: PlacementKind::default(),
            confirm_existing: false,
            algorithm: ResizeAlgorithm::default(),
            quality: 85,
            threads: 0,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ResizeError::Configuration(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        match &self.placement {
            PlacementKind::Subfolder(name) => {
                if name.trim().is_empty() || name == "." {
                    return Err(ResizeError::Configuration(
                        "Subfolder name must not be empty".to_string(),
                    ));
                }
                if name.contains("..") {
                    return Err(ResizeError::Configuration(
                        "Path traversal detected in subfolder name".to_string(),
                    ));
                }
                if Path::new(name).has_root() {
                    return Err(ResizeError::Configuration(format!(
                        "Subfolder name must be relative to the input directory: {}",
                        name
                    )));
                }
            }
            PlacementKind::Prefix(prefix) => {
                if prefix.is_empty() {
                    return Err(ResizeError::Configuration(
                        "Prefix must not be empty".to_string(),
                    ));
                }
                if prefix.contains('/') || prefix.contains('\\') || prefix.contains("..") {
                    return Err(ResizeError::Configuration(format!(
                        "Prefix must be a plain file name fragment: {}",
                        prefix
                    )));
                }
            }
            PlacementKind::Overwrite { .. } => {}
        }

        Ok(())
    }
}

/// Result of one selection entry.
#[derive(Debug)]
pub enum ProcessingOutcome {
    Success {
        source: PathBuf,
        destination: PathBuf,
        original: (u32, u32),
        resized: (u32, u32),
        bytes_written: u64,
    },
    Failure {
        source: PathBuf,
        error: ResizeError,
    },
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingOutcome::Success { .. })
    }

    pub fn source(&self) -> &PathBuf {
        match self {
            ProcessingOutcome::Success { source, .. } => source,
            ProcessingOutcome::Failure { source, .. } => source,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub succeeded: usize,
    pub failed: usize,
    pub bytes_written: u64,
}

impl ProcessingStats {
    pub fn from_outcomes(outcomes: &[ProcessingOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut stats, outcome| {
                match outcome {
                    ProcessingOutcome::Success { bytes_written, .. } => {
                        stats.succeeded += 1;
                        stats.bytes_written += bytes_written;
                    }
                    ProcessingOutcome::Failure { .. } => stats.failed += 1,
                }
                stats
            })
    }
}

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Cannot read {}: {reason}", .path.display())]
    ItemRead { path: PathBuf, reason: String },

    #[error("Cannot resize {}: {reason}", .path.display())]
    ItemTransform { path: PathBuf, reason: String },

    #[error("Cannot write {}: {reason}", .path.display())]
    ItemWrite { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, ResizeError>;
