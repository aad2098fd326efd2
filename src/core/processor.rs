// downsize/src/core/processor.rs
use super::{ProcessingOutcome, ResizeError, ResizeTarget, StrategyKind};
use crate::processors::{ImageAccessor, RasterAccessor, ResizingStrategy};
use std::path::Path;

/// Loads, scales and persists a single image.
pub struct ImageProcessor<A = RasterAccessor> {
    accessor: A,
    strategy: ResizingStrategy,
    target: ResizeTarget,
}

impl<A: ImageAccessor> ImageProcessor<A> {
    pub fn new(accessor: A, strategy: StrategyKind, target: ResizeTarget) -> Self {
        Self {
            accessor,
            strategy: ResizingStrategy::new(strategy),
            target,
        }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Never fails outright: every error becomes a `Failure` outcome for `source`.
    pub fn process(&self, source: &Path, destination: &Path) -> ProcessingOutcome {
        match self.process_single(source, destination) {
            Ok(outcome) => outcome,
            Err(error) => {
                log::warn!("{}", error);
                ProcessingOutcome::Failure {
                    source: source.to_path_buf(),
                    error,
                }
            }
        }
    }

    fn process_single(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<ProcessingOutcome, ResizeError> {
        let image = self
            .accessor
            .open(source)
            .map_err(|e| ResizeError::ItemRead {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;

        let (width, height) = self.accessor.dimensions(&image);
        if width == 0 || height == 0 {
            return Err(ResizeError::ItemRead {
                path: source.to_path_buf(),
                reason: format!("Image has no pixels ({}x{})", width, height),
            });
        }

        let scale = self.strategy.compute_scale_factor(width, height, self.target);
        log::debug!(
            "{}: {}x{} scaled by {:.4} ({:?})",
            source.display(),
            width,
            height,
            scale.value(),
            self.strategy.kind()
        );

        let resized = self
            .accessor
            .scale(&image, scale)
            .map_err(|e| ResizeError::ItemTransform {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;
        drop(image);

        let bytes_written = self
            .accessor
            .persist(&resized, destination)
            .map_err(|e| ResizeError::ItemWrite {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(ProcessingOutcome::Success {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            original: (width, height),
            resized: self.accessor.dimensions(&resized),
            bytes_written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResizeAlgorithm;
    use image::RgbImage;

    fn processor(strategy: StrategyKind, target: u32) -> ImageProcessor {
        ImageProcessor::new(
            RasterAccessor::new(ResizeAlgorithm::Bilinear, 85),
            strategy,
            ResizeTarget::new(target).unwrap(),
        )
    }

    #[test]
    fn resizes_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.jpg");
        let destination = dir.path().join("out.jpg");
        RgbImage::new(80, 60).save(&source).unwrap();

        let outcome = processor(StrategyKind::NaiveBiggerSide, 40).process(&source, &destination);

        match outcome {
            ProcessingOutcome::Success {
                original, resized, bytes_written, ..
            } => {
                assert_eq!(original, (80, 60));
                assert_eq!(resized, (40, 30));
                assert!(bytes_written > 0);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        let written = image::open(&destination).unwrap();
        assert_eq!((written.width(), written.height()), (40, 30));
    }

    #[test]
    fn unreadable_source_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("corrupt.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let outcome = processor(StrategyKind::Smart, 10).process(&source, &dir.path().join("out.jpg"));

        assert!(matches!(
            outcome,
            ProcessingOutcome::Failure {
                error: ResizeError::ItemRead { .. },
                ..
            }
        ));
    }

    #[test]
    fn oversized_result_is_a_transform_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("tiny.jpg");
        RgbImage::new(2, 1).save(&source).unwrap();

        let outcome = processor(StrategyKind::NaiveSmallerSide, 90_000).process(&source, &dir.path().join("out.jpg"));

        assert!(matches!(
            outcome,
            ProcessingOutcome::Failure {
                error: ResizeError::ItemTransform { .. },
                ..
            }
        ));
    }

    #[test]
    fn missing_destination_dir_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.jpg");
        RgbImage::new(20, 20).save(&source).unwrap();
        let destination = dir.path().join("nowhere").join("out.jpg");

        let outcome = processor(StrategyKind::Smart, 10).process(&source, &destination);

        match outcome {
            ProcessingOutcome::Failure {
                error: ResizeError::ItemWrite { path, .. },
                ..
            } => assert_eq!(path, destination),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!dir.path().join("nowhere").exists());
    }
}
