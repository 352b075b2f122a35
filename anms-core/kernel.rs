use crate::ShapeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Square convolution kernel with an odd side, so `side / 2` is its center.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Kernel {
    side: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Row-major `side × side` weights.
    pub fn from_vec(side: usize, weights: Vec<f64>) -> Result<Self, ShapeError> {
        if side == 0 {
            return Err(ShapeError::EmptyKernel);
        }
        if side % 2 == 0 {
            return Err(ShapeError::EvenKernelSide(side));
        }
        if weights.len() != side * side {
            return Err(ShapeError::DataLength {
                expected_len: side * side,
                actual_len: weights.len(),
            });
        }
        Ok(Self { side, weights })
    }

    pub fn from_array<const N: usize>(rows: [[f64; N]; N]) -> Result<Self, ShapeError> {
        Self::from_vec(N, rows.iter().flatten().copied().collect())
    }

    /// All zeros except a 1 at the center.
    pub fn identity(side: usize) -> Result<Self, ShapeError> {
        let mut weights = vec![0.0; side * side];
        if let Some(center) = weights.get_mut((side * side) / 2) {
            *center = 1.0;
        }
        Self::from_vec(side, weights)
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Distance from the center to the kernel border.
    #[inline]
    pub fn radius(&self) -> usize {
        self.side / 2
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.weights[row * self.side + col]
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Kernel rotated by 180°.
    pub fn flipped(&self) -> Self {
        Self {
            side: self.side,
            weights: self.weights.iter().rev().copied().collect(),
        }
    }

    pub fn transpose(&self) -> Self {
        let n = self.side;
        let mut weights = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                weights.push(self.get(col, row));
            }
        }
        Self { side: n, weights }
    }
}
