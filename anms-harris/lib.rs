//! Harris corner detection with adaptive non-maximal suppression.
//!
//! The pipeline runs in three stages:
//!
//! 1. [`Convolution::convolve2d`] with one of the [`BoundaryMode`]s, used for
//!    the Sobel gradients and the Gaussian window of [`HarrisResponse`]
//! 2. [`MaximaExtractor::local_maxima`] picks strict 8-neighborhood peaks of
//!    the response above a threshold
//! 3. [`AnmsSelector`] ranks the peaks by suppression radius, either by an
//!    all-pairs [`LinearScan`] or a [`SpatialIndexSearch`] over a [`KdTree`]
//!
//! [`CornerDetector`] ties the stages together for a fixed image shape;
//! [`DetectorBuilder`] and [`DetectorConfig`] configure it fluently or from
//! JSON/TOML (feature `serde`).

pub mod anms;
pub mod builder;
pub mod config;
pub mod configured_detector;
pub mod convolution;
pub mod detector;
pub mod error;
pub mod harris;
pub mod kernel;
pub mod maxima;
pub mod spatial_index;
pub mod types;

pub use anms::{AnmsSelector, LinearScan, NeighborRanking, SpatialIndexSearch};
pub use builder::DetectorBuilder;
pub use config::DetectorConfig;
pub use configured_detector::ConfiguredDetector;
pub use convolution::Convolution;
pub use detector::CornerDetector;
pub use error::{HarrisError, HarrisResult};
pub use harris::{HarrisResponse, StructureTensor};
pub use kernel::KernelBuilder;
pub use maxima::MaximaExtractor;
pub use spatial_index::{KdTree, Neighbor};
pub use types::{BoundaryMode, Detection};

pub use anms_core::{AnmsConfig, CandidatePoint, Corners, Image, Kernel, RankedPoint, RankingStrategy};
