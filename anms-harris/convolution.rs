//! Boundary-aware 2D convolution.
//!
//! `convolve2d` is a true convolution: the kernel is rotated by 180° before
//! the window sum, so
//! `out[v, u] = Σ image[v - dv, u - du] * kernel[dv + r, du + r]` with
//! `r = side / 2`. For every mode except `Valid` the input is first padded by
//! `r` on each side according to the boundary policy, convolved over the
//! interior and cropped back, so the output always has the input's shape.

use anms_core::{Image, Kernel};
use crate::types::BoundaryMode;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Convolution engine.
pub struct Convolution;

impl Convolution {
    /// Convolve `image` with `kernel` under the given boundary policy.
    ///
    /// With [`BoundaryMode::Valid`] the band of width `kernel.radius()` along
    /// every border is left at zero and carries no meaning.
    pub fn convolve2d(image: &Image, kernel: &Kernel, mode: BoundaryMode) -> Image {
        let r = kernel.radius();
        let flipped = kernel.flipped();

        if image.is_empty() {
            return image.clone();
        }

        match Self::pad(image, r, mode) {
            Some(padded) => Self::correlate(&padded, &flipped),
            None => {
                let interior = Self::correlate(image, &flipped);
                let mut out = Image::new(image.rows(), image.cols());
                for row in 0..interior.rows() {
                    let dst = (row + r) * image.cols() + r;
                    out.as_mut_slice()[dst..dst + interior.cols()].copy_from_slice(interior.row(row));
                }
                out
            }
        }
    }

    /// Extend `image` by `radius` samples on every side.
    ///
    /// Returns `None` for [`BoundaryMode::Valid`], which never pads.
    pub fn pad(image: &Image, radius: usize, mode: BoundaryMode) -> Option<Image> {
        if mode == BoundaryMode::Valid {
            return None;
        }
        let (rows, cols) = image.shape();
        let fill = match mode {
            BoundaryMode::Fill(value) => value,
            _ => 0.0,
        };

        // Resolve each padded row/column to a source index once.
        let row_src: Vec<Option<usize>> = (0..rows + 2 * radius)
            .map(|p| Self::source_index(p as isize - radius as isize, rows, mode))
            .collect();
        let col_src: Vec<Option<usize>> = (0..cols + 2 * radius)
            .map(|p| Self::source_index(p as isize - radius as isize, cols, mode))
            .collect();

        Some(Image::from_fn(row_src.len(), col_src.len(), |pr, pc| {
            match (row_src[pr], col_src[pc]) {
                (Some(r), Some(c)) => image.get(r, c),
                _ => fill,
            }
        }))
    }

    /// Map a possibly out-of-range index along an axis of length `len` to the
    /// sample it borrows from. `None` means "use the fill value".
    pub fn source_index(i: isize, len: usize, mode: BoundaryMode) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match mode {
            BoundaryMode::Valid | BoundaryMode::Fill(_) => None,
            BoundaryMode::Extend => Some(i.clamp(0, n - 1) as usize),
            BoundaryMode::Mirror => {
                if n == 1 {
                    return Some(0);
                }
                let period = 2 * (n - 1);
                let folded = i.rem_euclid(period);
                Some(if folded >= n { period - folded } else { folded } as usize)
            }
            BoundaryMode::Wrap => Some(i.rem_euclid(n) as usize),
        }
    }

    /// Window sum of `input` against `kernel` wherever the kernel fits
    /// entirely; the result is `side - 1` smaller along both axes.
    fn correlate(input: &Image, kernel: &Kernel) -> Image {
        let n = kernel.side();
        let out_rows = input.rows().saturating_sub(n - 1);
        let out_cols = input.cols().saturating_sub(n - 1);
        let mut out = Image::new(out_rows, out_cols);
        if out_rows == 0 || out_cols == 0 {
            return out;
        }

        let src = input.as_slice();
        let stride = input.cols();
        let weights = kernel.weights();

        let fill_row = |v: usize, row: &mut [f64]| {
            for (u, px) in row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (i, taps) in weights.chunks_exact(n).enumerate() {
                    let base = (v + i) * stride + u;
                    acc += src[base..base + n]
                        .iter()
                        .zip(taps)
                        .map(|(a, b)| a * b)
                        .sum::<f64>();
                }
                *px = acc;
            }
        };

        #[cfg(feature = "parallel")]
        out.as_mut_slice()
            .par_chunks_mut(out_cols)
            .enumerate()
            .for_each(|(v, row)| fill_row(v, row));

        #[cfg(not(feature = "parallel"))]
        out.as_mut_slice()
            .chunks_mut(out_cols)
            .enumerate()
            .for_each(|(v, row)| fill_row(v, row));

        out
    }
}
