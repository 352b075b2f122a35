use anms_core::Kernel;
use crate::error::{HarrisError, HarrisResult};

/// Kernel synthesis: Gaussian windows and the Sobel gradient pair.
pub struct KernelBuilder;

impl KernelBuilder {
    /// Kernel side spans this many sigmas.
    pub const SIGMA_SPAN: f64 = 5.0;

    const SOBEL_U: [[f64; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

    /// Side length for a Gaussian of the given sigma: the smallest odd integer
    /// that is at least `5 * sigma`.
    pub fn gaussian_side(sigma: f64) -> HarrisResult<usize> {
        Self::check_sigma(sigma)?;
        let span = Self::SIGMA_SPAN * sigma;
        // Snap products like 5 * 0.6 = 3.0000000000000004 back to the integer.
        let rounded = span.round();
        let side = if (span - rounded).abs() < 1e-9 {
            rounded as usize
        } else {
            span.ceil() as usize
        };
        Ok(if side % 2 == 0 { side + 1 } else { side })
    }

    /// Normalized Gaussian whose side follows [`KernelBuilder::gaussian_side`].
    pub fn gaussian(sigma: f64) -> HarrisResult<Kernel> {
        let side = Self::gaussian_side(sigma)?;
        Self::gaussian_sized(side, sigma)
    }

    /// Normalized `side × side` Gaussian centered at `side / 2`.
    pub fn gaussian_sized(side: usize, sigma: f64) -> HarrisResult<Kernel> {
        if side % 2 == 0 {
            return Err(HarrisError::EvenKernelSize(side));
        }
        Self::check_sigma(sigma)?;

        let mean = (side / 2) as f64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                let dc = col as f64 - mean;
                let dr = row as f64 - mean;
                weights.push((-(dc * dc + dr * dr) / two_sigma_sq).exp());
            }
        }

        let sum: f64 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Ok(Kernel::from_vec(side, weights)?)
    }

    /// Horizontal Sobel kernel `[[-1,0,1],[-2,0,2],[-1,0,1]]`.
    pub fn sobel_u() -> HarrisResult<Kernel> {
        Ok(Kernel::from_array(Self::SOBEL_U)?)
    }

    /// Vertical Sobel kernel, the transpose of [`KernelBuilder::sobel_u`].
    pub fn sobel_v() -> HarrisResult<Kernel> {
        Ok(Self::sobel_u()?.transpose())
    }

    /// Identity impulse of the given odd side.
    pub fn impulse(side: usize) -> HarrisResult<Kernel> {
        Ok(Kernel::identity(side)?)
    }

    fn check_sigma(sigma: f64) -> HarrisResult<()> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(HarrisError::InvalidSigma(sigma));
        }
        Ok(())
    }
}
