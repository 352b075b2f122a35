//! Core types shared by the Harris / ANMS corner pipeline.
//!
//! Everything here is plain data: images, convolution kernels, candidate
//! points and the configuration of the suppression stage. The numerical
//! pipeline itself lives in `anms-harris`.

mod image;
mod kernel;
mod points;

pub use image::Image;
pub use kernel::Kernel;
pub use points::{CandidatePoint, Corners, RankedPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape violations detected while constructing an [`Image`] or [`Kernel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    DataLength { expected_len: usize, actual_len: usize },
    EvenKernelSide(usize),
    EmptyKernel,
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::DataLength { expected_len, actual_len } => {
                write!(f, "Sample count mismatch: expected {}, got {}", expected_len, actual_len)
            }
            ShapeError::EvenKernelSide(side) => {
                write!(f, "Kernel side must be odd, got {}", side)
            }
            ShapeError::EmptyKernel => write!(f, "Kernel must have at least one weight"),
        }
    }
}

impl std::error::Error for ShapeError {}

/// How suppression radii are computed during ANMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RankingStrategy {
    /// Compare every candidate against every other one.
    BruteForce,
    /// Progressive nearest-neighbor search over a k-d tree.
    #[default]
    SpatialIndex,
}

impl std::fmt::Display for RankingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingStrategy::BruteForce => write!(f, "brute_force"),
            RankingStrategy::SpatialIndex => write!(f, "spatial_index"),
        }
    }
}

/// Parameters of the adaptive non-maximal suppression stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnmsConfig {
    /// Number of corners to return.
    pub n_corners: usize,
    /// A neighbor suppresses a candidate when `score < ratio * neighbor_score`.
    pub suppression_ratio: f64,
    /// Use `mean + std` of the response as candidate threshold instead of its minimum.
    pub use_threshold: bool,
    /// Margin trimmed from each side before the spatial-index search.
    pub edge: usize,
    pub strategy: RankingStrategy,
    pub n_threads: usize,
}

impl Default for AnmsConfig {
    fn default() -> Self {
        Self {
            n_corners: 100,
            suppression_ratio: 0.9,
            use_threshold: true,
            edge: 10,
            strategy: RankingStrategy::default(),
            n_threads: num_cpus::get().max(1),
        }
    }
}

/// Initialize Rayon thread pool with the specified number of threads
pub fn init_thread_pool(n_threads: usize) -> Result<(), rayon::ThreadPoolBuildError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n_threads)
        .build_global()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AnmsConfig::default();
        assert_eq!(cfg.n_corners, 100);
        assert!((cfg.suppression_ratio - 0.9).abs() < 1e-12);
        assert!(cfg.use_threshold);
        assert_eq!(cfg.edge, 10);
        assert_eq!(cfg.strategy, RankingStrategy::SpatialIndex);
        assert!(cfg.n_threads >= 1);
    }

    #[test]
    fn test_shape_error_messages() {
        let err = ShapeError::DataLength { expected_len: 9, actual_len: 4 };
        assert_eq!(err.to_string(), "Sample count mismatch: expected 9, got 4");
        assert!(ShapeError::EvenKernelSide(4).to_string().contains("odd"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_strategy_serialization() {
        let json = serde_json::to_string(&RankingStrategy::BruteForce).unwrap();
        assert_eq!(json, "\"brute_force\"");
        let back: RankingStrategy = serde_json::from_str("\"spatial_index\"").unwrap();
        assert_eq!(back, RankingStrategy::SpatialIndex);
    }
}
