use anms_core::{AnmsConfig, Corners, Image, RankingStrategy};
use log::debug;
use crate::anms::AnmsSelector;
use crate::error::{HarrisError, HarrisResult};
use crate::harris::HarrisResponse;
use crate::types::{BoundaryMode, Detection};

/// Harris response followed by ANMS selection, for images of a fixed shape.
#[derive(Debug, Clone)]
pub struct CornerDetector {
    cfg: AnmsConfig,
    conv_mode: BoundaryMode,
    rows: usize,
    cols: usize,
}

impl CornerDetector {
    /// Creates a new detector with validation
    pub fn new(cfg: AnmsConfig, conv_mode: BoundaryMode, rows: usize, cols: usize) -> HarrisResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(HarrisError::InvalidImageSize { rows, cols });
        }

        let ratio = cfg.suppression_ratio;
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(HarrisError::InvalidSuppressionRatio(ratio));
        }

        // The trim only applies to the spatial-index variant.
        if cfg.strategy == RankingStrategy::SpatialIndex
            && (cfg.edge >= rows.div_ceil(2) || cfg.edge >= cols.div_ceil(2))
        {
            return Err(HarrisError::EdgeTooLarge { edge: cfg.edge, rows, cols });
        }

        if let BoundaryMode::Fill(value) = conv_mode {
            if !value.is_finite() {
                return Err(HarrisError::InvalidBoundaryMode(conv_mode.to_string()));
            }
        }

        Ok(Self { cfg, conv_mode, rows, cols })
    }

    fn validate_image(&self, img: &Image) -> HarrisResult<()> {
        if img.shape() != (self.rows, self.cols) {
            return Err(HarrisError::ImageShapeMismatch {
                expected: (self.rows, self.cols),
                actual: img.shape(),
            });
        }
        Ok(())
    }

    /// Harris cornerness map of `img`.
    pub fn response(&self, img: &Image) -> HarrisResult<Image> {
        self.validate_image(img)?;
        HarrisResponse::compute(img, self.conv_mode)
    }

    /// Detect corners, strongest suppression radius first.
    pub fn detect(&self, img: &Image) -> HarrisResult<Corners> {
        Ok(self.detect_with_response(img)?.corners)
    }

    /// Detect corners and keep the response map for diagnostics.
    pub fn detect_with_response(&self, img: &Image) -> HarrisResult<Detection> {
        let response = self.response(img)?;
        let corners = AnmsSelector::select(&response, &self.cfg)?;
        debug!(
            "detected {} corners ({}, {}, n={})",
            corners.len(),
            self.cfg.strategy,
            self.conv_mode,
            self.cfg.n_corners
        );
        Ok(Detection { response, corners })
    }

    /// Get detector configuration
    pub fn config(&self) -> &AnmsConfig {
        &self.cfg
    }

    pub fn conv_mode(&self) -> BoundaryMode {
        self.conv_mode
    }

    /// Image dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}
