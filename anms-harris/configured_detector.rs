use anms_core::{Corners, Image};
use crate::builder::DetectorBuilder;
use crate::detector::CornerDetector;
use crate::error::HarrisResult;
use crate::types::Detection;

/// A corner detector that has been configured with a specific builder.
///
/// This struct holds a `CornerDetector` and the `DetectorBuilder` that
/// produced it, so the configuration can be reported or re-exported.
#[derive(Debug, Clone)]
pub struct ConfiguredDetector {
    pub(crate) detector: CornerDetector,
    pub(crate) config: DetectorBuilder,
}

impl ConfiguredDetector {
    /// Detect corners in the given image.
    ///
    /// # Arguments
    /// * `img` - A single-channel image of the configured shape.
    pub fn detect(&self, img: &Image) -> HarrisResult<Corners> {
        self.detector.detect(img)
    }

    /// Detect corners and return the Harris response alongside them.
    pub fn detect_with_response(&self, img: &Image) -> HarrisResult<Detection> {
        self.detector.detect_with_response(img)
    }

    /// Get a reference to the underlying `CornerDetector`.
    pub fn detector(&self) -> &CornerDetector {
        &self.detector
    }

    /// Get a summary of the detector's configuration.
    pub fn config_summary(&self) -> String {
        self.config.summary()
    }

    /// Get the image dimensions (rows, cols) the detector is configured for.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.config.rows(), self.config.cols())
    }
}
