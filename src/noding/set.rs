use geograph::Edge;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

use crate::noding::SegmentIntersector;

/// Finds all segment intersections within one set of edges, or between two
/// sets, feeding every candidate pair to a [`SegmentIntersector`].
pub trait EdgeSetIntersector {
    /// Intersects the edges of one set with each other.  Unless
    /// `test_all_segments` is set, segments of the same edge are not tested
    /// against each other.
    fn compute_self(&self, edges: &mut [Edge], si: &mut SegmentIntersector, test_all_segments: bool);

    /// Intersects every edge of `edges0` with every edge of `edges1`.
    fn compute_mutual(&self, edges0: &mut [Edge], edges1: &mut [Edge], si: &mut SegmentIntersector);
}

/// Tests every pair of segments.  Quadratic, but free of indexing overhead
/// on tiny inputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleEdgeSetIntersector;

impl EdgeSetIntersector for SimpleEdgeSetIntersector {
    fn compute_self(&self, edges: &mut [Edge], si: &mut SegmentIntersector, test_all_segments: bool) {
        for i in 0..edges.len() {
            for j in i..edges.len() {
                if i == j && !test_all_segments { continue }
                let (n0, n1) = (edges[i].max_segment_index(), edges[j].max_segment_index());
                for s0 in 0..n0 {
                    let first = if i == j { s0 + 1 } else { 0 };
                    for s1 in first..n1 {
                        si.add_intersections_at(edges, i, s0, j, s1);
                    }
                }
            }
        }
    }

    fn compute_mutual(&self, edges0: &mut [Edge], edges1: &mut [Edge], si: &mut SegmentIntersector) {
        for e0 in edges0.iter_mut() {
            for e1 in edges1.iter_mut() {
                for s0 in 0..e0.max_segment_index() {
                    for s1 in 0..e1.max_segment_index() {
                        si.add_intersections(e0, s0, e1, s1);
                    }
                }
            }
        }
    }
}

/// A segment envelope tagged with `(edge index, segment index)`.
type SegmentEntry = GeomWithData<Rectangle<[f64; 2]>, (usize, usize)>;

/// Finds candidate segment pairs through an R-tree of segment envelopes.
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexedEdgeSetIntersector;

impl IndexedEdgeSetIntersector {
    fn segment_tree(edges: &[Edge]) -> RTree<SegmentEntry> {
        RTree::bulk_load(
            edges.iter().enumerate()
                .flat_map(|(i, e)| {
                    e.coords.windows(2).enumerate().map(move |(s, w)| {
                        GeomWithData::new(Rectangle::from_corners(w[0].into(), w[1].into()), (i, s))
                    })
                })
                .collect()
        )
    }

    /// Candidate pairs `(i, s0, j, s1)` whose segment envelopes overlap.
    fn candidates(edges0: &[Edge], tree: &RTree<SegmentEntry>) -> Vec<(usize, usize, usize, usize)> {
        let mut pairs = Vec::new();
        for (i, e) in edges0.iter().enumerate() {
            for (s0, w) in e.coords.windows(2).enumerate() {
                let env = AABB::from_corners(w[0].into(), w[1].into());
                for cand in tree.locate_in_envelope_intersecting(&env) {
                    let (j, s1) = cand.data;
                    pairs.push((i, s0, j, s1));
                }
            }
        }
        pairs
    }
}

impl EdgeSetIntersector for IndexedEdgeSetIntersector {
    fn compute_self(&self, edges: &mut [Edge], si: &mut SegmentIntersector, test_all_segments: bool) {
        let tree = Self::segment_tree(edges);
        let pairs = Self::candidates(edges, &tree);
        for (i, s0, j, s1) in pairs {
            // each unordered pair once
            if (j, s1) <= (i, s0) { continue }
            if i == j && !test_all_segments { continue }
            si.add_intersections_at(edges, i, s0, j, s1);
        }
    }

    fn compute_mutual(&self, edges0: &mut [Edge], edges1: &mut [Edge], si: &mut SegmentIntersector) {
        let tree = Self::segment_tree(edges1);
        let pairs = Self::candidates(edges0, &tree);
        for (i, s0, j, s1) in pairs {
            si.add_intersections(&mut edges0[i], s0, &mut edges1[j], s1);
        }
    }
}
