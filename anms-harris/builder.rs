use anms_core::{AnmsConfig, RankingStrategy};
use crate::config::DetectorConfig;
use crate::configured_detector::ConfiguredDetector;
use crate::detector::CornerDetector;
use crate::error::HarrisResult;
use crate::types::BoundaryMode;

/// Builder for creating a `ConfiguredDetector`
#[derive(Debug, Clone)]
pub struct DetectorBuilder {
    config: AnmsConfig,
    rows: usize,
    cols: usize,
    conv_mode: BoundaryMode,
}

impl DetectorBuilder {
    /// Create a new builder with default settings
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            config: AnmsConfig::default(),
            rows,
            cols,
            conv_mode: BoundaryMode::default(),
        }
    }

    /// Set the number of corners to select
    pub fn n_corners(mut self, n: usize) -> Self {
        self.config.n_corners = n;
        self
    }

    /// Set the suppression ratio `c`
    pub fn suppression_ratio(mut self, ratio: f64) -> Self {
        self.config.suppression_ratio = ratio;
        self
    }

    /// Use `mean + std` of the response as candidate threshold
    pub fn use_threshold(mut self, enable: bool) -> Self {
        self.config.use_threshold = enable;
        self
    }

    /// Set the border margin trimmed before spatial-index ranking
    pub fn edge(mut self, edge: usize) -> Self {
        self.config.edge = edge;
        self
    }

    pub fn strategy(mut self, strategy: RankingStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the number of threads for parallel processing
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.n_threads = n_threads;
        self
    }

    /// Set the convolution boundary mode
    pub fn conv_mode(mut self, mode: BoundaryMode) -> Self {
        self.conv_mode = mode;
        self
    }

    /// Apply the exact (brute-force) preset
    pub fn preset_exact(self) -> Self {
        let preset = DetectorConfig::exact_preset(self.rows, self.cols);
        self.apply_preset(preset)
    }

    /// Apply the sparse preset
    pub fn preset_sparse(self) -> Self {
        let preset = DetectorConfig::sparse_preset(self.rows, self.cols);
        self.apply_preset(preset)
    }

    /// Apply the dense preset
    pub fn preset_dense(self) -> Self {
        let preset = DetectorConfig::dense_preset(self.rows, self.cols);
        self.apply_preset(preset)
    }

    fn apply_preset(mut self, preset: DetectorConfig) -> Self {
        let n_threads = self.config.n_threads;
        self.config = preset.anms;
        self.config.n_threads = n_threads;
        self.conv_mode = preset.conv_mode;
        self
    }

    /// Build the `ConfiguredDetector`
    pub fn build(self) -> HarrisResult<ConfiguredDetector> {
        let detector = CornerDetector::new(self.config.clone(), self.conv_mode, self.rows, self.cols)?;
        Ok(ConfiguredDetector {
            detector,
            config: self,
        })
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.clone().to_config().summary()
    }

    /// Create a builder from an existing `DetectorConfig`
    pub fn from_config(config: DetectorConfig) -> Self {
        Self {
            config: config.anms,
            rows: config.rows,
            cols: config.cols,
            conv_mode: config.conv_mode,
        }
    }

    /// Convert the builder into a `DetectorConfig`
    pub fn to_config(self) -> DetectorConfig {
        DetectorConfig {
            anms: self.config,
            rows: self.rows,
            cols: self.cols,
            conv_mode: self.conv_mode,
            name: None,
            description: None,
            version: None,
        }
    }

    pub fn anms_config(&self) -> &AnmsConfig {
        &self.config
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}
