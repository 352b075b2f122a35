//! Adaptive non-maximal suppression.
//!
//! Every candidate gets a suppression radius: the distance to the nearest
//! candidate that is significantly stronger (`score < ratio * other`).
//! Candidates are then ranked by radius, largest first, which spreads the
//! selection across the image instead of clustering it on the strongest
//! region.

use anms_core::{AnmsConfig, CandidatePoint, Corners, Image, RankedPoint, RankingStrategy};
use log::{debug, trace, warn};
use crate::error::{HarrisError, HarrisResult};
use crate::maxima::MaximaExtractor;
use crate::spatial_index::KdTree;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Computes suppression radii for a candidate set.
///
/// The returned entries keep the relative order of `candidates`.
pub trait NeighborRanking {
    fn rank(&self, candidates: &[CandidatePoint], ratio: f64) -> Vec<RankedPoint>;
}

/// All-pairs comparison.
///
/// Candidates without a stronger neighbor get `unresolved_radius`, which
/// ranks them ahead of everything else.
#[derive(Debug, Clone, Copy)]
pub struct LinearScan {
    pub unresolved_radius: f64,
}

impl LinearScan {
    fn radius_of(&self, candidates: &[CandidatePoint], i: usize, ratio: f64) -> f64 {
        let p = &candidates[i];
        candidates
            .iter()
            .enumerate()
            .filter(|&(k, other)| k != i && p.score < ratio * other.score)
            .map(|(_, other)| p.distance_to(other))
            .fold(self.unresolved_radius, f64::min)
    }
}

impl NeighborRanking for LinearScan {
    fn rank(&self, candidates: &[CandidatePoint], ratio: f64) -> Vec<RankedPoint> {
        let ranked = |i: usize| RankedPoint {
            point: candidates[i],
            radius: self.radius_of(candidates, i, ratio),
        };

        #[cfg(feature = "parallel")]
        {
            (0..candidates.len()).into_par_iter().map(ranked).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..candidates.len()).map(ranked).collect()
        }
    }
}

/// Progressive nearest-neighbor search over a [`KdTree`].
///
/// Neighbors are visited in (distance, index) order, skipping the candidate
/// itself, and the first significantly stronger one fixes the radius. The
/// visit stops before the farthest candidate, and a candidate that never meets
/// a stronger neighbor yields no entry at all. Both behaviors are kept for
/// compatibility with existing selections.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialIndexSearch;

impl SpatialIndexSearch {
    fn resolve(
        tree: &KdTree,
        candidates: &[CandidatePoint],
        i: usize,
        ratio: f64,
    ) -> Option<RankedPoint> {
        let point = candidates[i];
        let query = [point.u as f64, point.v as f64];
        // Query sizes run up to total - 1, self included.
        let limit = candidates.len().saturating_sub(1);

        // The query grows geometrically; hits are a prefix of one fixed
        // order, so the first stronger neighbor is the one a single-step
        // search would find.
        let mut k = 2;
        let mut checked = 1;
        while k <= limit {
            let hits = tree.nearest(query, k);
            for hit in hits.iter().skip(checked) {
                if point.score < ratio * candidates[hit.index].score {
                    return Some(RankedPoint {
                        point,
                        radius: hit.distance,
                    });
                }
            }
            checked = hits.len();
            if k == limit {
                break;
            }
            k = (k * 2).min(limit);
        }
        None
    }
}

impl NeighborRanking for SpatialIndexSearch {
    fn rank(&self, candidates: &[CandidatePoint], ratio: f64) -> Vec<RankedPoint> {
        let coords: Vec<[f64; 2]> = candidates
            .iter()
            .map(|p| [p.u as f64, p.v as f64])
            .collect();
        let tree = KdTree::build(&coords);
        let resolve = |i: usize| Self::resolve(&tree, candidates, i, ratio);

        #[cfg(feature = "parallel")]
        {
            (0..candidates.len()).into_par_iter().filter_map(resolve).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            (0..candidates.len()).filter_map(resolve).collect()
        }
    }
}

/// Threshold, candidate extraction and ranking glue shared by both ANMS
/// variants.
pub struct AnmsSelector;

impl AnmsSelector {
    /// `mean + std` of the map when `use_threshold`, otherwise its minimum.
    pub fn threshold(map: &Image, use_threshold: bool) -> f64 {
        if use_threshold {
            map.mean() + map.std()
        } else {
            map.min()
        }
    }

    /// All-pairs ANMS over the full map.
    ///
    /// Unsuppressed candidates get a radius of `max(rows, cols)^2`.
    pub fn brute_force(
        map: &Image,
        n: usize,
        ratio: f64,
        use_threshold: bool,
    ) -> HarrisResult<Corners> {
        Self::check_ratio(ratio)?;
        let longest = map.rows().max(map.cols()) as f64;
        let ranking = LinearScan {
            unresolved_radius: longest * longest,
        };
        let candidates = Self::candidates(map, use_threshold);
        Ok(Self::finish(ranking.rank(&candidates, ratio), n))
    }

    /// ANMS through [`SpatialIndexSearch`] on the map with `edge` pixels trimmed
    /// from every side. Returned coordinates are in the untrimmed frame.
    pub fn indexed(
        map: &Image,
        n: usize,
        ratio: f64,
        edge: usize,
        use_threshold: bool,
    ) -> HarrisResult<Corners> {
        Self::check_ratio(ratio)?;
        let trimmed;
        let inner = if edge == 0 {
            map
        } else {
            trimmed = map.crop(edge).ok_or(HarrisError::EdgeTooLarge {
                edge,
                rows: map.rows(),
                cols: map.cols(),
            })?;
            &trimmed
        };

        let candidates = Self::candidates(inner, use_threshold);
        let ranked = SpatialIndexSearch
            .rank(&candidates, ratio)
            .into_iter()
            .map(|r| RankedPoint {
                point: r.point.offset(edge),
                radius: r.radius,
            })
            .collect();
        Ok(Self::finish(ranked, n))
    }

    /// Run the variant chosen by `config.strategy`.
    pub fn select(map: &Image, config: &AnmsConfig) -> HarrisResult<Corners> {
        match config.strategy {
            RankingStrategy::BruteForce => Self::brute_force(
                map,
                config.n_corners,
                config.suppression_ratio,
                config.use_threshold,
            ),
            RankingStrategy::SpatialIndex => Self::indexed(
                map,
                config.n_corners,
                config.suppression_ratio,
                config.edge,
                config.use_threshold,
            ),
        }
    }

    fn candidates(map: &Image, use_threshold: bool) -> Vec<CandidatePoint> {
        let threshold = Self::threshold(map, use_threshold);
        let candidates = MaximaExtractor::local_maxima(map, threshold, false);
        debug!(
            "anms: {} candidates above {:.3e} in {}x{} map",
            candidates.len(),
            threshold,
            map.rows(),
            map.cols()
        );
        if candidates.is_empty() {
            warn!("anms: no local maxima in {}x{} response map", map.rows(), map.cols());
        }
        candidates
    }

    fn finish(mut ranked: Vec<RankedPoint>, n: usize) -> Corners {
        let resolved = ranked.len();
        ranked.sort_by(|a, b| b.radius.total_cmp(&a.radius));
        ranked.truncate(n);
        trace!("anms: kept {} of {} ranked points", ranked.len(), resolved);
        for r in &ranked {
            trace!(
                "anms: ({}, {}) score={:.3e} radius={:.3}",
                r.point.u,
                r.point.v,
                r.point.score,
                r.radius
            );
        }
        Corners::new(ranked)
    }

    fn check_ratio(ratio: f64) -> HarrisResult<()> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(HarrisError::InvalidSuppressionRatio(ratio));
        }
        Ok(())
    }
}
