use anms_core::ShapeError;

/// Errors raised by the Harris / ANMS pipeline.
///
/// `InvalidBoundaryMode`, `EvenKernelSize`, `InvalidSigma`,
/// `InvalidSuppressionRatio` and `EdgeTooLarge` are configuration errors:
/// they are returned immediately and never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum HarrisError {
    InvalidBoundaryMode(String),
    EvenKernelSize(usize),
    InvalidSigma(f64),
    InvalidSuppressionRatio(f64),
    EdgeTooLarge { edge: usize, rows: usize, cols: usize },
    InvalidImageSize { rows: usize, cols: usize },
    ImageShapeMismatch { expected: (usize, usize), actual: (usize, usize) },
    Shape(ShapeError),
}

impl HarrisError {
    /// True for errors caused by a bad parameter rather than bad image data.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            HarrisError::InvalidBoundaryMode(_)
                | HarrisError::EvenKernelSize(_)
                | HarrisError::InvalidSigma(_)
                | HarrisError::InvalidSuppressionRatio(_)
                | HarrisError::EdgeTooLarge { .. }
        )
    }
}

impl std::fmt::Display for HarrisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HarrisError::InvalidBoundaryMode(mode) => {
                write!(f, "Invalid boundary mode: {} (expected valid|fill|extend|mirror|wrap)", mode)
            }
            HarrisError::EvenKernelSize(n) => {
                write!(f, "Kernel size must be odd: {}", n)
            }
            HarrisError::InvalidSigma(sigma) => {
                write!(f, "Invalid Gaussian sigma: {} (must be finite and > 0)", sigma)
            }
            HarrisError::InvalidSuppressionRatio(c) => {
                write!(f, "Invalid suppression ratio: {} (must be finite and > 0)", c)
            }
            HarrisError::EdgeTooLarge { edge, rows, cols } => {
                write!(f, "Edge margin {} leaves nothing of a {}x{} response map", edge, rows, cols)
            }
            HarrisError::InvalidImageSize { rows, cols } => {
                write!(f, "Invalid image dimensions: {}x{} (must be > 0)", rows, cols)
            }
            HarrisError::ImageShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Image shape mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            HarrisError::Shape(e) => write!(f, "Shape error: {}", e),
        }
    }
}

impl std::error::Error for HarrisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HarrisError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for HarrisError {
    fn from(err: ShapeError) -> Self {
        match err {
            ShapeError::EvenKernelSide(n) => HarrisError::EvenKernelSize(n),
            other => HarrisError::Shape(other),
        }
    }
}

pub type HarrisResult<T> = Result<T, HarrisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_kernel_maps_to_parameter_error() {
        let err: HarrisError = ShapeError::EvenKernelSide(4).into();
        assert_eq!(err, HarrisError::EvenKernelSize(4));
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_shape_errors_are_not_parameter_errors() {
        let err: HarrisError = ShapeError::DataLength { expected_len: 4, actual_len: 3 }.into();
        assert!(!err.is_invalid_parameter());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_boundary_mode_message() {
        let err = HarrisError::InvalidBoundaryMode("reflect".to_string());
        assert!(err.to_string().starts_with("Invalid boundary mode: reflect"));
    }
}
