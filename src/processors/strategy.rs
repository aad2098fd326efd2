// downsize/src/processors/strategy.rs
use crate::core::{ResizeTarget, ScaleFactor, StrategyKind};

/// Computes the uniform scale factor for one image.
#[derive(Debug, Clone, Copy)]
pub struct ResizingStrategy {
    kind: StrategyKind,
}

impl ResizingStrategy {
    pub fn new(kind: StrategyKind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// `width` and `height` must be positive.
    pub fn compute_scale_factor(&self, width: u32, height: u32, target: ResizeTarget) -> ScaleFactor {
        let side = match self.kind {
            // Smart currently scales by the smaller side, same as NaiveSmallerSide.
            StrategyKind::Smart | StrategyKind::NaiveSmallerSide => width.min(height),
            StrategyKind::NaiveBiggerSide => width.max(height),
        };

        ScaleFactor::new(target.size() as f64 / side as f64)
    }

    pub fn target_dimensions(&self, width: u32, height: u32, target: ResizeTarget) -> (u32, u32) {
        self.compute_scale_factor(width, height, target)
            .apply(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(size: u32) -> ResizeTarget {
        ResizeTarget::new(size).unwrap()
    }

    #[test]
    fn smaller_side_landscape() {
        let strategy = ResizingStrategy::new(StrategyKind::NaiveSmallerSide);
        let scale = strategy.compute_scale_factor(4000, 3000, target(2000));

        assert!((scale.value() - 2000.0 / 3000.0).abs() < 1e-12);
        assert_eq!(strategy.target_dimensions(4000, 3000, target(2000)), (2667, 2000));
    }

    #[test]
    fn bigger_side_landscape() {
        let strategy = ResizingStrategy::new(StrategyKind::NaiveBiggerSide);
        let scale = strategy.compute_scale_factor(4000, 3000, target(2000));

        assert_eq!(scale.value(), 0.5);
        assert_eq!(strategy.target_dimensions(4000, 3000, target(2000)), (2000, 1500));
    }

    #[test]
    fn portrait_uses_correct_side() {
        let smaller = ResizingStrategy::new(StrategyKind::NaiveSmallerSide);
        let bigger = ResizingStrategy::new(StrategyKind::NaiveBiggerSide);

        assert_eq!(smaller.target_dimensions(3000, 4000, target(2000)), (2000, 2667));
        assert_eq!(bigger.target_dimensions(3000, 4000, target(2000)), (1500, 2000));
    }

    #[test]
    fn square_images_agree_across_naive_strategies() {
        let smaller = ResizingStrategy::new(StrategyKind::NaiveSmallerSide);
        let bigger = ResizingStrategy::new(StrategyKind::NaiveBiggerSide);

        for side in [1, 7, 999, 2200, 3001, 8000] {
            for size in [1, 500, 1000, 2048, 9000] {
                assert_eq!(
                    smaller.target_dimensions(side, side, target(size)),
                    bigger.target_dimensions(side, side, target(size)),
                    "side {} target {}",
                    side,
                    size
                );
            }
        }
    }

    #[test]
    fn smaller_side_lands_on_target() {
        let strategy = ResizingStrategy::new(StrategyKind::NaiveSmallerSide);

        for (w, h) in [(4000, 3000), (3000, 4000), (6016, 4016), (2201, 9999), (1234, 1233)] {
            for size in [1, 333, 1000, 2000, 4500] {
                let (nw, nh) = strategy.target_dimensions(w, h, target(size));
                let smaller = nw.min(nh) as i64;
                assert!(
                    (smaller - size as i64).abs() <= 1,
                    "{}x{} -> {}x{} for target {}",
                    w,
                    h,
                    nw,
                    nh,
                    size
                );
            }
        }
    }

    #[test]
    fn already_sized_image_is_a_no_op() {
        let strategy = ResizingStrategy::new(StrategyKind::NaiveSmallerSide);
        let scale = strategy.compute_scale_factor(1500, 1000, target(1000));

        assert_eq!(scale.value(), 1.0);
        assert_eq!(scale.apply(1500, 1000), (1500, 1000));
    }

    #[test]
    fn smart_matches_smaller_side() {
        let smart = ResizingStrategy::new(StrategyKind::Smart);
        let smaller = ResizingStrategy::new(StrategyKind::NaiveSmallerSide);

        for (w, h) in [(4000, 3000), (3000, 4000), (10000, 2500), (2500, 2500)] {
            assert_eq!(
                smart.compute_scale_factor(w, h, target(1000)),
                smaller.compute_scale_factor(w, h, target(1000))
            );
        }
    }
}
