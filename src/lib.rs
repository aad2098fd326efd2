mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{Algorithm, Cli, Commands, ResizeOptions, SaveMode, Strategy};
pub use crate::core::processor::ImageProcessor;
pub use crate::core::{
    BatchConfig, PlacementKind, ProcessingOutcome, ProcessingStats, ResizeAlgorithm, ResizeError, ResizeTarget, Result, ScaleFactor, Selection, StrategyKind,
    DEFAULT_PREFIX, DEFAULT_SUBFOLDER, DEFAULT_TARGET, DEFAULT_THRESHOLD,
};
pub use crate::processors::{
    BatchProcessor, Compressor, Destination, ImageAccessor, Loader, OutputPlacement,
    RasterAccessor, Resizer, ResizingStrategy, BACKUP_DIR, MAX_DIMENSION,
};
pub use crate::utils::{collect_selection, exceeds_threshold, format_file_size, is_jpeg_name};

