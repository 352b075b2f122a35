//! Harris cornerness from windowed image gradients.
//!
//! 1. Sobel gradients `Iu`, `Iv`
//! 2. Gaussian-windowed products `Iuu`, `Ivv`, `Iuv` (the structure tensor)
//! 3. `H = det / (trace + eps)` at every pixel

use anms_core::Image;
use log::debug;
use crate::convolution::Convolution;
use crate::error::HarrisResult;
use crate::kernel::KernelBuilder;
use crate::types::BoundaryMode;

/// Windowed second-moment terms for every pixel.
#[derive(Debug, Clone)]
pub struct StructureTensor {
    pub iuu: Image,
    pub ivv: Image,
    pub iuv: Image,
}

impl StructureTensor {
    /// Determinant over trace, regularized by `epsilon`.
    pub fn score(&self, epsilon: f64) -> Image {
        let det = self.iuu.zip_map(&self.ivv, |a, b| a * b);
        let det = det.zip_map(&self.iuv, |d, c| d - c * c);
        let trace = self.iuu.zip_map(&self.ivv, |a, b| a + b);
        det.zip_map(&trace, |d, t| d / (t + epsilon))
    }
}

/// Harris response computation.
pub struct HarrisResponse;

impl HarrisResponse {
    /// Guards the score against a vanishing trace in flat regions.
    pub const EPSILON: f64 = 1e-10;
    /// Sigma of the Gaussian aggregation window.
    pub const WINDOW_SIGMA: f64 = 2.0;

    /// Cornerness map with the same shape as `image`.
    ///
    /// Under [`BoundaryMode::Valid`] the border band (gradient radius plus
    /// window radius) scores zero; downstream maxima extraction skips it.
    pub fn compute(image: &Image, mode: BoundaryMode) -> HarrisResult<Image> {
        let (iu, iv) = Self::gradients(image, mode)?;
        let tensor = Self::structure_tensor(&iu, &iv, mode)?;
        let response = tensor.score(Self::EPSILON);
        debug!(
            "harris response {}x{} ({}): min={:.3e} max={:.3e}",
            response.rows(),
            response.cols(),
            mode,
            response.min(),
            response.max()
        );
        Ok(response)
    }

    /// Horizontal and vertical Sobel gradients.
    pub fn gradients(image: &Image, mode: BoundaryMode) -> HarrisResult<(Image, Image)> {
        let su = KernelBuilder::sobel_u()?;
        let sv = KernelBuilder::sobel_v()?;
        let iu = Convolution::convolve2d(image, &su, mode);
        let iv = Convolution::convolve2d(image, &sv, mode);
        Ok((iu, iv))
    }

    /// Aggregate gradient products over a Gaussian window of
    /// [`HarrisResponse::WINDOW_SIGMA`].
    pub fn structure_tensor(iu: &Image, iv: &Image, mode: BoundaryMode) -> HarrisResult<StructureTensor> {
        let window = KernelBuilder::gaussian(Self::WINDOW_SIGMA)?;
        let uu = iu.zip_map(iu, |a, b| a * b);
        let vv = iv.zip_map(iv, |a, b| a * b);
        let uv = iu.zip_map(iv, |a, b| a * b);
        Ok(StructureTensor {
            iuu: Convolution::convolve2d(&uu, &window, mode),
            ivv: Convolution::convolve2d(&vv, &window, mode),
            iuv: Convolution::convolve2d(&uv, &window, mode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: usize, top_left: (usize, usize), side: usize, value: f64) -> Image {
        Image::from_fn(size, size, |r, c| {
            let inside = (top_left.0..top_left.0 + side).contains(&r)
                && (top_left.1..top_left.1 + side).contains(&c);
            if inside { value } else { 0.0 }
        })
    }

    fn argmax(img: &Image) -> (usize, usize) {
        let mut best = (0, 0);
        for r in 0..img.rows() {
            for c in 0..img.cols() {
                if img.get(r, c) > img.get(best.0, best.1) {
                    best = (r, c);
                }
            }
        }
        best
    }

    #[test]
    fn test_gradient_signs() {
        // Intensity rising to the right. True convolution flips the Sobel
        // kernel, so the gradient comes out negative.
        let img = Image::from_fn(8, 8, |_, c| c as f64);
        let (iu, iv) = HarrisResponse::gradients(&img, BoundaryMode::Valid).unwrap();
        assert_eq!(iu.get(4, 4), -8.0);
        assert_eq!(iv.get(4, 4), 0.0);
    }

    #[test]
    fn test_score_is_det_over_trace() {
        let tensor = StructureTensor {
            iuu: Image::from_vec(1, 3, vec![4.0, 1.0, 0.0]).unwrap(),
            ivv: Image::from_vec(1, 3, vec![9.0, -1.0, 0.0]).unwrap(),
            iuv: Image::from_vec(1, 3, vec![2.0, 0.0, 0.0]).unwrap(),
        };
        let h = tensor.score(HarrisResponse::EPSILON);
        // (4 * 9 - 2^2) / (4 + 9)
        assert!((h.get(0, 0) - 32.0 / 13.0).abs() < 1e-12);
        // Zero trace leaves only epsilon in the denominator.
        assert_eq!(h.get(0, 1), -1.0 / HarrisResponse::EPSILON);
        assert_eq!(h.get(0, 2), 0.0);
    }

    #[test]
    fn test_flat_image_scores_zero() {
        let img = Image::filled(30, 30, 128.0);
        let h = HarrisResponse::compute(&img, BoundaryMode::Valid).unwrap();
        assert_eq!(h.shape(), (30, 30));
        assert!(h.as_slice().iter().all(|&v| v.abs() < 1e-9));
    }

    #[test]
    fn test_straight_edge_scores_low() {
        let img = Image::from_fn(40, 40, |_, c| if c < 20 { 50.0 } else { 200.0 });
        let h = HarrisResponse::compute(&img, BoundaryMode::Extend).unwrap();
        // det vanishes on a pure edge: gradient has one direction only.
        for r in 10..30 {
            assert!(h.get(r, 20).abs() < 1e-6, "edge response at row {r}: {}", h.get(r, 20));
        }
    }

    #[test]
    fn test_small_blob_peaks_at_center() {
        let img = square(40, (18, 13), 5, 255.0);
        let h = HarrisResponse::compute(&img, BoundaryMode::Valid).unwrap();
        assert_eq!(argmax(&h), (20, 15));
        assert!(h.get(20, 15) > 0.0);
    }

    #[test]
    fn test_valid_mode_border_band_is_zero() {
        let img = Image::from_fn(30, 30, |r, c| ((r * 7 + c * 13) % 17) as f64);
        let h = HarrisResponse::compute(&img, BoundaryMode::Valid).unwrap();
        // Sobel radius 1 plus window radius 5.
        for i in 0..30 {
            for b in 0..5 {
                assert_eq!(h.get(b, i), 0.0);
                assert_eq!(h.get(i, b), 0.0);
                assert_eq!(h.get(29 - b, i), 0.0);
                assert_eq!(h.get(i, 29 - b), 0.0);
            }
        }
    }

    #[test]
    fn test_response_non_negative() {
        let img = Image::from_fn(32, 32, |r, c| ((r / 8 + c / 8) % 2) as f64 * 200.0);
        let h = HarrisResponse::compute(&img, BoundaryMode::Mirror).unwrap();
        assert!(h.as_slice().iter().all(|&v| v > -1e-6));
        assert!(h.max() > 0.0);
    }
}
