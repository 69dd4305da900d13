use geograph::{Edge, TopologyError};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{AABB, RTree};

use crate::algorithm::LineIntersector;

/// Checks that a set of split edges is fully noded: no two segments meet
/// anywhere except at shared end points.
///
/// A failure means noding was not robust for this input; the overlay is then
/// unreliable and a snapping retry is the usual remedy.
pub fn check_noding(edges: &[Edge]) -> Result<(), TopologyError> {
    let tree: RTree<GeomWithData<Rectangle<[f64; 2]>, (usize, usize)>> = RTree::bulk_load(
        edges.iter().enumerate()
            .flat_map(|(i, e)| {
                e.coords.windows(2).enumerate().map(move |(s, w)| {
                    GeomWithData::new(Rectangle::from_corners(w[0].into(), w[1].into()), (i, s))
                })
            })
            .collect()
    );

    let mut li = LineIntersector::new();
    for (i, e) in edges.iter().enumerate() {
        for (s0, w) in e.coords.windows(2).enumerate() {
            let env = AABB::from_corners(w[0].into(), w[1].into());
            for cand in tree.locate_in_envelope_intersecting(&env) {
                let (j, s1) = cand.data;
                if (j, s1) <= (i, s0) { continue }
                let other = &edges[j].coords;
                li.compute(w[0], w[1], other[s1], other[s1 + 1]);
                if li.has_intersection() && li.is_interior_intersection() {
                    return Err(TopologyError::NonNodedIntersection(li.point(0)));
                }
            }
        }
    }
    Ok(())
}
