use crate::ShapeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major single-channel image of real-valued samples.
///
/// Every transform in the pipeline produces a new `Image`; inputs are never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Image {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Image {
    /// Zero-filled image.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Wrap a row-major buffer, checking that it holds exactly `rows * cols` samples.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, ShapeError> {
        let expected_len = rows * cols;
        if data.len() != expected_len {
            return Err(ShapeError::DataLength {
                expected_len,
                actual_len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build an image by evaluating `f(row, col)` for every cell.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Apply `f` to every sample.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two images of identical shape sample by sample.
    ///
    /// # Panics
    /// Panics if the shapes differ.
    pub fn zip_map<F>(&self, other: &Image, f: F) -> Self
    where
        F: Fn(f64, f64) -> f64,
    {
        assert_eq!(
            self.shape(),
            other.shape(),
            "zip_map requires images of identical shape"
        );
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |row, col| self.get(col, row))
    }

    /// Drop `margin` rows/columns from every side.
    ///
    /// Returns `None` when nothing would remain.
    pub fn crop(&self, margin: usize) -> Option<Self> {
        let both_sides = margin.checked_mul(2)?;
        let rows = self.rows.checked_sub(both_sides).filter(|&r| r > 0)?;
        let cols = self.cols.checked_sub(both_sides).filter(|&c| c > 0)?;
        Some(Self::from_fn(rows, cols, |row, col| {
            self.get(row + margin, col + margin)
        }))
    }

    /// Arithmetic mean; NaN for an empty image.
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }

    /// Population standard deviation (divides by N); NaN for an empty image.
    pub fn std(&self) -> f64 {
        let mean = self.mean();
        let var = self
            .data
            .iter()
            .map(|&v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.data.len() as f64;
        var.sqrt()
    }

    /// Smallest sample; `+inf` for an empty image.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Largest sample; `-inf` for an empty image.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(rows: usize, cols: usize) -> Image {
        Image::from_fn(rows, cols, |r, c| (r * cols + c) as f64)
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Image::from_vec(2, 3, vec![0.0; 6]).is_ok());
        let err = Image::from_vec(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::DataLength {
                expected_len: 6,
                actual_len: 5
            }
        );
    }

    #[test]
    fn test_row_major_layout() {
        let img = ramp(3, 4);
        assert_eq!(img.shape(), (3, 4));
        assert_eq!(img.get(1, 2), 6.0);
        assert_eq!(img.row(2), &[8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_transpose() {
        let img = ramp(2, 3);
        let t = img.transpose();
        assert_eq!(t.shape(), (3, 2));
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(img.get(r, c), t.get(c, r));
            }
        }
    }

    #[test]
    fn test_crop() {
        let img = ramp(6, 5);
        let cropped = img.crop(1).unwrap();
        assert_eq!(cropped.shape(), (4, 3));
        assert_eq!(cropped.get(0, 0), img.get(1, 1));
        assert_eq!(cropped.get(3, 2), img.get(4, 3));

        assert_eq!(img.crop(0).unwrap(), img);
        assert!(img.crop(3).is_none());
        assert!(img.crop(usize::MAX / 2 + 1).is_none());
        assert!(img.crop(usize::MAX).is_none());
    }

    #[test]
    fn test_statistics() {
        let img = Image::from_vec(1, 4, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((img.mean() - 2.5).abs() < 1e-12);
        // Population std of 1..4 is sqrt(1.25)
        assert!((img.std() - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(img.min(), 1.0);
        assert_eq!(img.max(), 4.0);
    }

    #[test]
    fn test_elementwise() {
        let a = ramp(2, 2);
        let b = a.map(|v| v * 2.0);
        let prod = a.zip_map(&b, |x, y| x * y);
        assert_eq!(prod.as_slice(), &[0.0, 2.0, 8.0, 18.0]);
    }

    #[test]
    #[should_panic(expected = "identical shape")]
    fn test_zip_map_shape_mismatch() {
        let a = Image::new(2, 2);
        let b = Image::new(3, 2);
        a.zip_map(&b, |x, y| x + y);
    }
}
