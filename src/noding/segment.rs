use geo::Coord;
use geograph::Edge;

use crate::algorithm::LineIntersector;

/// Intersects pairs of edge segments and records the intersections on the
/// edges.
///
/// Besides adding intersection points, it keeps track of whether a proper
/// intersection was found, and whether one was found that is not a boundary
/// node of either input geometry (a *proper interior* intersection).
#[derive(Debug)]
pub struct SegmentIntersector {
    li:                  LineIntersector,
    include_proper:      bool,
    record_isolated:     bool,
    boundary_nodes:      Option<[Vec<Coord<f64>>; 2]>,
    has_intersection:    bool,
    has_proper:          bool,
    has_proper_interior: bool,
    proper_point:        Option<Coord<f64>>,
    num_tests:           usize,
}

impl SegmentIntersector {
    /// `include_proper` controls whether proper intersections are recorded
    /// on the edges; `record_isolated` clears the isolation flag of edges
    /// found to intersect.
    pub fn new(include_proper: bool, record_isolated: bool) -> Self {
        Self {
            li: LineIntersector::new(),
            include_proper,
            record_isolated,
            boundary_nodes: None,
            has_intersection: false,
            has_proper: false,
            has_proper_interior: false,
            proper_point: None,
            num_tests: 0,
        }
    }

    /// Boundary nodes of both geometries, used to tell proper interior
    /// intersections from proper intersections at a boundary.
    pub fn with_boundary_nodes(mut self, nodes0: Vec<Coord<f64>>, nodes1: Vec<Coord<f64>>) -> Self {
        self.boundary_nodes = Some([nodes0, nodes1]);
        self
    }

    /// True if any non-trivial intersection was found.
    #[inline] pub fn has_intersection(&self) -> bool { self.has_intersection }
    #[inline] pub fn has_proper_intersection(&self) -> bool { self.has_proper }
    #[inline] pub fn has_proper_interior_intersection(&self) -> bool { self.has_proper_interior }
    #[inline] pub fn proper_intersection_point(&self) -> Option<Coord<f64>> { self.proper_point }
    #[inline] pub fn num_tests(&self) -> usize { self.num_tests }

    /// Intersects segment `s0` of `e0` with segment `s1` of a different edge
    /// `e1`.
    pub fn add_intersections(&mut self, e0: &mut Edge, s0: usize, e1: &mut Edge, s1: usize) {
        self.num_tests += 1;
        self.li.compute(e0.coords[s0], e0.coords[s0 + 1], e1.coords[s1], e1.coords[s1 + 1]);
        if !self.li.has_intersection() { return }

        if self.record_isolated {
            e0.is_isolated = false;
            e1.is_isolated = false;
        }
        if !self.record() { return }
        for &p in self.li.points() {
            e0.add_intersection(p, s0);
            e1.add_intersection(p, s1);
        }
    }

    /// Intersects two segments of the same edge.
    pub fn add_self_intersections(&mut self, e: &mut Edge, s0: usize, s1: usize) {
        if s0 == s1 { return }
        self.num_tests += 1;
        self.li.compute(e.coords[s0], e.coords[s0 + 1], e.coords[s1], e.coords[s1 + 1]);
        if !self.li.has_intersection() { return }

        if self.record_isolated { e.is_isolated = false }
        if self.is_trivial(e, s0, s1) { return }
        if !self.record() { return }
        for &p in self.li.points() {
            e.add_intersection(p, s0);
            e.add_intersection(p, s1);
        }
    }

    /// Intersects segment `s0` of `edges[i]` with segment `s1` of `edges[j]`,
    /// which may be the same edge.
    pub fn add_intersections_at(&mut self, edges: &mut [Edge], i: usize, s0: usize, j: usize, s1: usize) {
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => self.add_self_intersections(&mut edges[i], s0, s1),
            std::cmp::Ordering::Less => {
                let (lo, hi) = edges.split_at_mut(j);
                self.add_intersections(&mut lo[i], s0, &mut hi[0], s1);
            }
            std::cmp::Ordering::Greater => {
                let (lo, hi) = edges.split_at_mut(i);
                self.add_intersections(&mut hi[0], s0, &mut lo[j], s1);
            }
        }
    }

    /// A single intersection point shared by adjacent segments of one edge
    /// (including the closing segments of a ring) is just the common vertex.
    fn is_trivial(&self, e: &Edge, s0: usize, s1: usize) -> bool {
        if self.li.num_points() != 1 { return false }
        if s0.abs_diff(s1) == 1 { return true }
        if e.is_closed() {
            let max = e.num_points() - 1;
            if (s0 == 0 && s1 == max - 1) || (s1 == 0 && s0 == max - 1) { return true }
        }
        false
    }

    /// Notes a non-trivial intersection; returns whether its points should
    /// be recorded on the edges.
    fn record(&mut self) -> bool {
        self.has_intersection = true;
        if self.li.is_proper() {
            self.proper_point = Some(self.li.point(0));
            self.has_proper = true;
            if !self.is_boundary_point() { self.has_proper_interior = true }
        }
        self.include_proper || !self.li.is_proper()
    }

    fn is_boundary_point(&self) -> bool {
        let Some(nodes) = &self.boundary_nodes else { return false };
        nodes.iter().flatten().any(|&p| self.li.is_intersection(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;
    use geograph::{Label, Location};

    fn line(coords: &[(f64, f64)]) -> Edge {
        let pts = coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect();
        Edge::new(pts, Label::line(0, Location::Interior))
    }

    #[test]
    fn records_crossings_on_both_edges() {
        let mut a = line(&[(0.0, 0.0), (2.0, 2.0)]);
        let mut b = line(&[(0.0, 2.0), (2.0, 0.0)]);
        let mut si = SegmentIntersector::new(true, true);
        si.add_intersections(&mut a, 0, &mut b, 0);

        assert!(si.has_proper_intersection());
        assert!(si.has_proper_interior_intersection());
        assert_eq!(a.intersections.len(), 1);
        assert_eq!(b.intersections.len(), 1);
        assert!(!a.is_isolated && !b.is_isolated);
    }

    #[test]
    fn proper_intersections_can_be_left_out() {
        let mut a = line(&[(0.0, 0.0), (2.0, 2.0)]);
        let mut b = line(&[(0.0, 2.0), (2.0, 0.0)]);
        let mut si = SegmentIntersector::new(false, true)
            .with_boundary_nodes(vec![coord! { x: 1.0, y: 1.0 }], vec![]);
        si.add_intersections(&mut a, 0, &mut b, 0);

        assert!(si.has_proper_intersection());
        assert!(!si.has_proper_interior_intersection());
        assert!(a.intersections.is_empty());
    }

    #[test]
    fn adjacent_segments_are_trivial() {
        let mut ring = line(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let mut si = SegmentIntersector::new(true, false);
        si.add_self_intersections(&mut ring, 0, 1);
        si.add_self_intersections(&mut ring, 0, 2);
        assert!(!si.has_intersection());
        assert!(ring.intersections.is_empty());
    }

    #[test]
    fn self_crossing_line_is_noded() {
        let mut bowtie = line(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        let mut si = SegmentIntersector::new(true, false);
        si.add_self_intersections(&mut bowtie, 0, 2);
        assert!(si.has_intersection());
        // the crossing point is recorded once per segment
        assert_eq!(bowtie.intersections.len(), 2);
    }
}
