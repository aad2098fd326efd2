// downsize/src/processors/batch.rs
use super::{ImageAccessor, OutputPlacement, RasterAccessor};
use crate::core::processor::ImageProcessor;
use crate::core::{BatchConfig, ProcessingOutcome, ResizeError, Result, Selection};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Runs the processor over a selection, one outcome per entry.
pub struct BatchProcessor<A = RasterAccessor> {
    root: PathBuf,
    placement: OutputPlacement,
    processor: ImageProcessor<A>,
    thread_pool: Option<rayon::ThreadPool>,
    show_progress: bool,
}

impl BatchProcessor<RasterAccessor> {
    pub fn new(root: impl Into<PathBuf>, config: BatchConfig) -> Result<Self> {
        let accessor = RasterAccessor::new(config.algorithm, config.quality);
        Self::with_accessor(root, config, accessor)
    }
}

impl<A: ImageAccessor> BatchProcessor<A> {
    pub fn with_accessor(root: impl Into<PathBuf>, config: BatchConfig, accessor: A) -> Result<Self> {
        config.validate()?;

        let root = root.into();
        let thread_pool = if config.threads > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map_err(|e| {
                    ResizeError::Configuration(format!("Failed to create thread pool: {}", e))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self {
            placement: OutputPlacement::new(root.clone(), config.placement, config.confirm_existing),
            processor: ImageProcessor::new(accessor, config.strategy, config.target),
            root,
            thread_pool,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn processor(&self) -> &ImageProcessor<A> {
        &self.processor
    }

    /// Prepares the output location, then processes every entry in order.
    ///
    /// Only placement failures abort the run; item errors are reported as
    /// `Failure` outcomes at the entry's index.
    pub fn run(&self, selection: &Selection) -> Result<Vec<ProcessingOutcome>> {
        self.placement.prepare()?;

        if selection.is_empty() {
            log::warn!("Nothing to process in {}", self.root.display());
            return Ok(Vec::new());
        }

        log::info!(
            "Processing {} images from {}",
            selection.len(),
            self.root.display()
        );

        let pb = self.create_progress_bar(selection.len());
        let process = |filename: &String| self.process_item(filename);

        // Indexed collect keeps outcomes aligned with the selection.
        let outcomes: Vec<ProcessingOutcome> = if let Some(pool) = &self.thread_pool {
            pool.install(|| {
                selection
                    .as_slice()
                    .par_iter()
                    .progress_with(pb.clone())
                    .map(process)
                    .collect()
            })
        } else {
            selection
                .as_slice()
                .par_iter()
                .progress_with(pb.clone())
                .map(process)
                .collect()
        };

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        pb.finish_with_message(format!(
            "Processed {} images ({} failed)",
            outcomes.len() - failed,
            failed
        ));

        Ok(outcomes)
    }

    fn process_item(&self, filename: &str) -> ProcessingOutcome {
        let source = self.root.join(filename);
        let destination = self.placement.destination_for(filename);

        if let Err(error) = self.placement.check_collision(&destination) {
            log::warn!("{}", error);
            return ProcessingOutcome::Failure { source, error };
        }

        if let Some(backup) = &destination.backup {
            if let Err(error) = backup_original(&source, backup) {
                log::warn!("{}", error);
                return ProcessingOutcome::Failure { source, error };
            }
        }

        self.processor.process(&source, &destination.output)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

/// Copies the untouched source aside. An existing backup is never replaced.
fn backup_original(source: &Path, backup: &Path) -> Result<()> {
    if backup.exists() {
        return Err(ResizeError::ItemWrite {
            path: backup.to_path_buf(),
            reason: "Backup already exists".to_string(),
        });
    }

    log::debug!("Copying {} to {}", source.display(), backup.display());
    std::fs::copy(source, backup).map_err(|e| ResizeError::ItemWrite {
        path: backup.to_path_buf(),
        reason: format!("Failed to copy original: {}", e),
    })?;

    Ok(())
}
