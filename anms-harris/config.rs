use anms_core::{AnmsConfig, RankingStrategy};
use crate::builder::DetectorBuilder;
use crate::detector::CornerDetector;
use crate::error::HarrisResult;
use crate::types::BoundaryMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete detector configuration with all settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorConfig {
    /// Suppression stage settings
    pub anms: AnmsConfig,
    /// Image dimensions
    pub rows: usize,
    pub cols: usize,
    /// Boundary handling for every convolution of the Harris stage
    #[cfg_attr(feature = "serde", serde(default))]
    pub conv_mode: BoundaryMode,
    /// Metadata
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub version: Option<String>,
}

impl DetectorConfig {
    /// Create new configuration with default settings
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            anms: AnmsConfig::default(),
            rows,
            cols,
            conv_mode: BoundaryMode::Valid,
            name: None,
            description: None,
            version: None,
        }
    }

    /// All-pairs ranking over the untrimmed map; every candidate gets a radius.
    pub fn exact_preset(rows: usize, cols: usize) -> Self {
        Self {
            anms: AnmsConfig {
                strategy: RankingStrategy::BruteForce,
                edge: 0,
                ..AnmsConfig::default()
            },
            rows,
            cols,
            conv_mode: BoundaryMode::Valid,
            name: Some("Exact".to_string()),
            description: Some("Brute-force suppression radii over the full response map".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Few, well-separated corners through the spatial index.
    pub fn sparse_preset(rows: usize, cols: usize) -> Self {
        Self {
            anms: AnmsConfig {
                n_corners: 50,
                suppression_ratio: 0.9,
                use_threshold: true,
                edge: 10,
                strategy: RankingStrategy::SpatialIndex,
                ..AnmsConfig::default()
            },
            rows,
            cols,
            conv_mode: BoundaryMode::Valid,
            name: Some("Sparse".to_string()),
            description: Some("Small, evenly spread corner set".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Many corners: every local maximum is a candidate and borders are
    /// padded by reflection so corners near the edge are scored too.
    pub fn dense_preset(rows: usize, cols: usize) -> Self {
        Self {
            anms: AnmsConfig {
                n_corners: 500,
                suppression_ratio: 0.9,
                use_threshold: false,
                edge: 4,
                strategy: RankingStrategy::SpatialIndex,
                ..AnmsConfig::default()
            },
            rows,
            cols,
            conv_mode: BoundaryMode::Mirror,
            name: Some("Dense".to_string()),
            description: Some("Large corner budget including near-border corners".to_string()),
            version: Some("1.0".to_string()),
        }
    }

    /// Add metadata to configuration
    pub fn with_metadata(mut self, name: &str, description: &str) -> Self {
        self.name = Some(name.to_string());
        self.description = Some(description.to_string());
        self.version = Some("1.0".to_string());
        self
    }

    /// Convert to DetectorBuilder for further customization
    pub fn to_builder(self) -> DetectorBuilder {
        DetectorBuilder::from_config(self)
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "DetectorConfig: {}x{}, mode={}, n={}, ratio={:.2}, threshold={}, strategy={}, edge={}, threads={}",
            self.rows,
            self.cols,
            self.conv_mode,
            self.anms.n_corners,
            self.anms.suppression_ratio,
            self.anms.use_threshold,
            self.anms.strategy,
            self.anms.edge,
            self.anms.n_threads
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> HarrisResult<()> {
        CornerDetector::new(self.anms.clone(), self.conv_mode, self.rows, self.cols).map(|_| ())
    }

    /// Save configuration to JSON file
    #[cfg(feature = "serde")]
    pub fn save_json<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load configuration from JSON file
    #[cfg(feature = "serde")]
    pub fn load_json<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save configuration to TOML file
    #[cfg(feature = "serde")]
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let toml = toml::to_string_pretty(self)?;
        std::fs::write(path, toml)?;
        Ok(())
    }

    /// Load configuration from TOML file
    #[cfg(feature = "serde")]
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Serialize to JSON string
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    #[cfg(feature = "serde")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from TOML string
    #[cfg(feature = "serde")]
    pub fn from_toml(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarrisError;

    #[test]
    fn test_presets_validate() {
        for cfg in [
            DetectorConfig::new(240, 320),
            DetectorConfig::exact_preset(240, 320),
            DetectorConfig::sparse_preset(240, 320),
            DetectorConfig::dense_preset(240, 320),
        ] {
            assert!(cfg.validate().is_ok(), "{}", cfg.summary());
        }
        assert_eq!(DetectorConfig::exact_preset(8, 8).anms.strategy, RankingStrategy::BruteForce);
        assert_eq!(DetectorConfig::dense_preset(8, 8).conv_mode, BoundaryMode::Mirror);
    }

    #[test]
    fn test_validate_reports_detector_errors() {
        let mut cfg = DetectorConfig::new(15, 100);
        assert_eq!(
            cfg.validate().unwrap_err(),
            HarrisError::EdgeTooLarge { edge: 10, rows: 15, cols: 100 }
        );
        cfg.rows = 0;
        assert!(matches!(cfg.validate(), Err(HarrisError::InvalidImageSize { .. })));
    }

    #[test]
    fn test_summary_and_metadata() {
        let cfg = DetectorConfig::new(48, 64).with_metadata("lab", "bench camera");
        assert_eq!(cfg.name.as_deref(), Some("lab"));
        assert_eq!(cfg.version.as_deref(), Some("1.0"));
        let summary = cfg.summary();
        assert!(summary.contains("48x64"));
        assert!(summary.contains("strategy=spatial_index"));
        assert!(summary.contains("mode=valid"));
    }

    #[test]
    fn test_builder_round_trip() {
        let cfg = DetectorConfig::dense_preset(120, 160);
        let back = cfg.clone().to_builder().to_config();
        assert_eq!(back.anms, cfg.anms);
        assert_eq!(back.conv_mode, cfg.conv_mode);
        assert_eq!((back.rows, back.cols), (120, 160));
        assert!(back.name.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip() {
        let mut cfg = DetectorConfig::sparse_preset(100, 200);
        cfg.conv_mode = BoundaryMode::Fill(7.5);
        let json = cfg.to_json().unwrap();
        assert!(json.contains("\"spatial_index\""));
        let back = DetectorConfig::from_json(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_toml_round_trip() {
        let cfg = DetectorConfig::exact_preset(64, 64);
        let text = cfg.to_toml().unwrap();
        let back = DetectorConfig::from_toml(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_invalid_file_config_rejected() {
        let json = r#"{
            "anms": {
                "n_corners": 10,
                "suppression_ratio": -1.0,
                "use_threshold": true,
                "edge": 0,
                "strategy": "brute_force",
                "n_threads": 1
            },
            "rows": 32,
            "cols": 32
        }"#;
        assert!(DetectorConfig::from_json(json).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_file_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("anms-config-{}.toml", std::process::id()));
        let cfg = DetectorConfig::new(90, 90).with_metadata("saved", "file round trip");
        cfg.save_toml(&path).unwrap();
        let back = DetectorConfig::load_toml(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(back, cfg);
    }
}
