#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Local maximum of a response map: column `u`, row `v` and its score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidatePoint {
    pub u: usize,
    pub v: usize,
    pub score: f64,
}

impl CandidatePoint {
    pub fn new(u: usize, v: usize, score: f64) -> Self {
        Self { u, v, score }
    }

    /// Euclidean pixel distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &CandidatePoint) -> f64 {
        let du = self.u as f64 - other.u as f64;
        let dv = self.v as f64 - other.v as f64;
        (du * du + dv * dv).sqrt()
    }

    /// Same point shifted by `offset` along both axes.
    pub fn offset(self, offset: usize) -> Self {
        Self {
            u: self.u + offset,
            v: self.v + offset,
            score: self.score,
        }
    }
}

/// Candidate annotated with its suppression radius: the distance to the
/// nearest significantly stronger candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedPoint {
    pub point: CandidatePoint,
    pub radius: f64,
}

/// Corners selected by ANMS, strongest suppression radius first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corners {
    points: Vec<RankedPoint>,
}

impl Corners {
    pub fn new(points: Vec<RankedPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[RankedPoint] {
        &self.points
    }

    /// x-coordinates (columns)
    pub fn xs(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.point.u).collect()
    }

    /// y-coordinates (rows)
    pub fn ys(&self) -> Vec<usize> {
        self.points.iter().map(|p| p.point.v).collect()
    }

    /// Two parallel coordinate sequences `(xs, ys)`.
    pub fn to_uv(&self) -> (Vec<usize>, Vec<usize>) {
        (self.xs(), self.ys())
    }

    /// One `(x, y)` pair per corner.
    pub fn to_pairs(&self) -> Vec<(usize, usize)> {
        self.points.iter().map(|p| (p.point.u, p.point.v)).collect()
    }

    pub fn into_vec(self) -> Vec<RankedPoint> {
        self.points
    }
}

impl IntoIterator for Corners {
    type Item = RankedPoint;
    type IntoIter = std::vec::IntoIter<RankedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Corners {
    type Item = &'a RankedPoint;
    type IntoIter = std::slice::Iter<'a, RankedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(u: usize, v: usize, radius: f64) -> RankedPoint {
        RankedPoint {
            point: CandidatePoint::new(u, v, 1.0),
            radius,
        }
    }

    #[test]
    fn test_distance() {
        let a = CandidatePoint::new(0, 0, 1.0);
        let b = CandidatePoint::new(3, 4, 2.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_offset() {
        let p = CandidatePoint::new(2, 5, 7.0).offset(10);
        assert_eq!((p.u, p.v, p.score), (12, 15, 7.0));
    }

    #[test]
    fn test_coordinate_formats() {
        let corners = Corners::new(vec![ranked(1, 2, 9.0), ranked(7, 3, 4.0)]);
        assert_eq!(corners.to_uv(), (vec![1, 7], vec![2, 3]));
        assert_eq!(corners.to_pairs(), vec![(1, 2), (7, 3)]);
        assert_eq!(corners.len(), 2);
    }
}
