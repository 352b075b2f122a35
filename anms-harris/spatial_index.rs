//! Static 2-D k-d tree for nearest-neighbor queries over candidate
//! coordinates.
//!
//! The tree is built once from a point slice and only read afterwards, so it
//! can be shared across Rayon workers without locking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A query hit: position of the point in the build slice and its Euclidean
/// distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

#[derive(Debug, Clone)]
struct Node {
    point: [f64; 2],
    index: usize,
    axis: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Max-heap entry ordered by squared distance, then by index.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist_sq: f64,
    index: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then_with(|| self.index.cmp(&other.index))
    }
}

#[derive(Debug, Clone)]
pub struct KdTree {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl KdTree {
    /// Median-split build on alternating axes.
    pub fn build(points: &[[f64; 2]]) -> Self {
        let mut order: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        let root = Self::build_recursive(points, &mut order, 0, &mut nodes);
        Self { nodes, root }
    }

    fn build_recursive(
        points: &[[f64; 2]],
        order: &mut [usize],
        depth: usize,
        nodes: &mut Vec<Node>,
    ) -> Option<usize> {
        if order.is_empty() {
            return None;
        }
        let axis = depth % 2;
        let mid = order.len() / 2;
        order.select_nth_unstable_by(mid, |&a, &b| {
            points[a][axis]
                .total_cmp(&points[b][axis])
                .then_with(|| a.cmp(&b))
        });

        let index = order[mid];
        let slot = nodes.len();
        nodes.push(Node {
            point: points[index],
            index,
            axis,
            left: None,
            right: None,
        });

        let (lower, upper) = order.split_at_mut(mid);
        let left = Self::build_recursive(points, lower, depth + 1, nodes);
        let right = Self::build_recursive(points, &mut upper[1..], depth + 1, nodes);
        nodes[slot].left = left;
        nodes[slot].right = right;
        Some(slot)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The `k` points closest to `query`, nearest first.
    ///
    /// A point located exactly at `query` is included. Equal distances are
    /// ordered by build index, so every query returns a prefix of the same
    /// total order.
    pub fn nearest(&self, query: [f64; 2], k: usize) -> Vec<Neighbor> {
        if k == 0 {
            return Vec::new();
        }
        let mut heap = BinaryHeap::with_capacity(k + 1);
        if let Some(root) = self.root {
            self.search(root, query, k, &mut heap);
        }
        heap.into_sorted_vec()
            .into_iter()
            .map(|e| Neighbor {
                index: e.index,
                distance: e.dist_sq.sqrt(),
            })
            .collect()
    }

    fn search(&self, slot: usize, query: [f64; 2], k: usize, heap: &mut BinaryHeap<HeapEntry>) {
        let node = &self.nodes[slot];
        let du = node.point[0] - query[0];
        let dv = node.point[1] - query[1];
        let entry = HeapEntry {
            dist_sq: du * du + dv * dv,
            index: node.index,
        };
        if heap.len() < k {
            heap.push(entry);
        } else if heap.peek().is_some_and(|worst| entry < *worst) {
            heap.pop();
            heap.push(entry);
        }

        let diff = query[node.axis] - node.point[node.axis];
        let (near, far) = if diff < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };

        if let Some(near) = near {
            self.search(near, query, k, heap);
        }
        if let Some(far) = far {
            // Equal split distances may still hold a lower-index tie.
            let worth_visiting = heap.len() < k
                || heap.peek().is_some_and(|worst| diff * diff <= worst.dist_sq);
            if worth_visiting {
                self.search(far, query, k, heap);
            }
        }
    }
}
