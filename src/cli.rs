// downsize/src/cli.rs
use crate::core::{
    BatchConfig, PlacementKind, ResizeAlgorithm, ResizeTarget, Result, StrategyKind,
    DEFAULT_PREFIX, DEFAULT_SUBFOLDER, DEFAULT_TARGET, DEFAULT_THRESHOLD,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "downsize", version, about = "Batch downsizer for large JPEG photos")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the images that would be resized
    Select {
        /// Directory holding the photos
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Smaller side must be strictly greater than this (pixels)
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,
    },

    /// Resize every selected image
    Resize {
        /// Directory holding the photos
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Smaller side must be strictly greater than this (pixels)
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: u32,

        /// Target size in pixels for the side picked by the strategy
        #[arg(long, default_value_t = DEFAULT_TARGET)]
        target: u32,

        #[arg(short, long, value_enum, default_value_t = Strategy::Smart)]
        strategy: Strategy,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,

        /// JPEG quality (1-100)
        #[arg(short, long, default_value_t = 85)]
        quality: u8,

        /// Where resized images are written
        #[arg(long, value_enum, default_value_t = SaveMode::Subfolder)]
        save: SaveMode,

        /// Subfolder name for `--save subfolder`
        #[arg(long, default_value = DEFAULT_SUBFOLDER)]
        subfolder: String,

        /// File name prefix for `--save prefix`
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        /// With `--save overwrite`, keep untouched copies in `original/`
        #[arg(long)]
        copy_originals: bool,

        /// Replace files in an existing subfolder without refusing
        #[arg(short, long)]
        yes: bool,

        /// Worker threads (0 = one per core)
        #[arg(short = 'j', long, default_value_t = 0)]
        threads: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    Smart,
    SmallerSide,
    BiggerSide,
}

impl From<Strategy> for StrategyKind {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Smart => StrategyKind::Smart,
            Strategy::SmallerSide => StrategyKind::NaiveSmallerSide,
            Strategy::BiggerSide => StrategyKind::NaiveBiggerSide,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SaveMode {
    Subfolder,
    Prefix,
    Overwrite,
}

/// Options of `resize` that make up a batch configuration.
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    pub target: u32,
    pub strategy: Strategy,
    pub algorithm: Algorithm,
    pub quality: u8,
    pub save: SaveMode,
    pub subfolder: String,
    pub prefix: String,
    pub copy_originals: bool,
    pub yes: bool,
    pub threads: usize,
}

impl ResizeOptions {
    pub fn into_config(self) -> Result<BatchConfig> {
        let placement = match self.save {
            SaveMode::Subfolder => PlacementKind::Subfolder(self.subfolder),
            SaveMode::Prefix => PlacementKind::Prefix(self.prefix),
            SaveMode::Overwrite => PlacementKind::Overwrite {
                make_copy: self.copy_originals,
            },
        };

        let config = BatchConfig {
            target: ResizeTarget::new(self.target)?,
            strategy: self.strategy.into(),
            placement,
            confirm_existing: self.yes,
            algorithm: self.algorithm.into(),
            quality: self.quality,
            threads: self.threads,
        };
        config.validate()?;

        Ok(config)
    }
}
