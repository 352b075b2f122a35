use anms_core::{CandidatePoint, Image};

/// Strict 8-neighborhood peak search over a response map.
pub struct MaximaExtractor;

impl MaximaExtractor {
    /// Interior samples that reach `threshold` and are strictly greater than
    /// all eight neighbors.
    ///
    /// The outermost ring is never reported. Plateaus of equal values produce
    /// no maximum. Without `sort` the points come out in row-major scan order;
    /// with it they are ordered by descending score, ties keeping scan order.
    pub fn local_maxima(map: &Image, threshold: f64, sort: bool) -> Vec<CandidatePoint> {
        let (rows, cols) = map.shape();
        let mut points = Vec::new();

        for v in 1..rows.saturating_sub(1) {
            for u in 1..cols.saturating_sub(1) {
                let score = map.get(v, u);
                if score < threshold {
                    continue;
                }
                if Self::is_strict_peak(map, u, v, score) {
                    points.push(CandidatePoint::new(u, v, score));
                }
            }
        }

        if sort {
            points.sort_by(|a, b| b.score.total_cmp(&a.score));
        }
        points
    }

    #[inline]
    fn is_strict_peak(map: &Image, u: usize, v: usize, score: f64) -> bool {
        for nv in v - 1..=v + 1 {
            for nu in u - 1..=u + 1 {
                if (nv, nu) != (v, u) && !(score > map.get(nv, nu)) {
                    return false;
                }
            }
        }
        true
    }
}
