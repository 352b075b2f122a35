use anms_core::{Corners, Image};
use crate::error::{HarrisError, HarrisResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Policy for synthesizing samples outside the image when a kernel overhangs
/// the border.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BoundaryMode {
    /// Only compute where the kernel fully overlaps; the border band stays zero.
    #[default]
    Valid,
    /// Pad with a constant.
    Fill(f64),
    /// Replicate the nearest edge sample.
    Extend,
    /// Reflect across the border without repeating the edge sample.
    Mirror,
    /// Wrap around to the opposite edge.
    Wrap,
}

impl BoundaryMode {
    /// Parse a mode name; `fill` picks up `fill_value`.
    pub fn from_name(name: &str, fill_value: f64) -> HarrisResult<Self> {
        match name {
            "valid" => Ok(BoundaryMode::Valid),
            "fill" => Ok(BoundaryMode::Fill(fill_value)),
            "extend" => Ok(BoundaryMode::Extend),
            "mirror" => Ok(BoundaryMode::Mirror),
            "wrap" => Ok(BoundaryMode::Wrap),
            other => Err(HarrisError::InvalidBoundaryMode(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BoundaryMode::Valid => "valid",
            BoundaryMode::Fill(_) => "fill",
            BoundaryMode::Extend => "extend",
            BoundaryMode::Mirror => "mirror",
            BoundaryMode::Wrap => "wrap",
        }
    }
}

impl std::str::FromStr for BoundaryMode {
    type Err = HarrisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s, 0.0)
    }
}

impl std::fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryMode::Fill(value) => write!(f, "fill({})", value),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Output of a full detection run: the response map kept for diagnostics plus
/// the selected corners.
#[derive(Debug, Clone)]
pub struct Detection {
    pub response: Image,
    pub corners: Corners,
}
