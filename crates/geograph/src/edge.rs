//! Graph edges and the intersections recorded along them.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use geo::{Coord, Rect};
use serde::Serialize;

use crate::depth::Depth;
use crate::label::Label;

// ---------------------------------------------------------------------------
// Edge distance
// ---------------------------------------------------------------------------

/// An ordering distance of `p` along the segment `p0 -> p1`.
///
/// This is not the Euclidean distance; it is the offset along the dominant
/// axis of the segment, which orders points along the segment exactly and is
/// cheap to compute.  It is zero only when `p == p0`.
pub fn edge_distance(p: Coord<f64>, p0: Coord<f64>, p1: Coord<f64>) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if p == p0 { return 0.0 }
    if p == p1 { return dx.max(dy) }

    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };
    // non-endpoints always get a non-zero distance
    if dist == 0.0 { pdx.max(pdy) } else { dist }
}

// ---------------------------------------------------------------------------
// EdgeIntersectionList
// ---------------------------------------------------------------------------

/// A point where an edge is intersected, located by segment and distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeIntersection {
    pub coord:         Coord<f64>,
    /// Index of the segment containing the point.
    pub segment_index: usize,
    /// Edge distance from the start of the segment.
    pub dist:          f64,
}

#[derive(Clone, Copy, Debug)]
struct IntersectionKey(usize, f64);

impl PartialEq for IntersectionKey {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}
impl Eq for IntersectionKey {}
impl PartialOrd for IntersectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}
impl Ord for IntersectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0).then_with(|| self.1.total_cmp(&other.1))
    }
}

/// The intersections of an edge, ordered along the edge and free of
/// duplicates.
#[derive(Clone, Debug, Default)]
pub struct EdgeIntersectionList {
    map: BTreeMap<IntersectionKey, EdgeIntersection>,
}

impl EdgeIntersectionList {
    /// Adds an intersection unless one already exists at the same position.
    pub fn add(&mut self, coord: Coord<f64>, segment_index: usize, dist: f64) -> EdgeIntersection {
        *self.map
            .entry(IntersectionKey(segment_index, dist + 0.0))
            .or_insert(EdgeIntersection { coord, segment_index, dist })
    }

    pub fn len(&self) -> usize { self.map.len() }
    pub fn is_empty(&self) -> bool { self.map.is_empty() }

    /// Intersections in order along the edge.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> + '_ {
        self.map.values()
    }
}

// ---------------------------------------------------------------------------
// Edge
// ---------------------------------------------------------------------------

/// A polyline of the planar graph with its topological label.
#[derive(Clone, Debug)]
pub struct Edge {
    pub coords:        Vec<Coord<f64>>,
    pub label:         Label,
    pub intersections: EdgeIntersectionList,
    pub depth:         Depth,
    /// True until the edge is found to intersect another edge.
    pub is_isolated:   bool,
    pub in_result:     bool,
    /// Whether a line edge lies inside a result area; `None` until known.
    pub covered:       Option<bool>,
}

impl Edge {
    pub fn new(coords: Vec<Coord<f64>>, label: Label) -> Self {
        debug_assert!(coords.len() >= 2, "an edge needs at least two coordinates");
        Self {
            coords,
            label,
            intersections: EdgeIntersectionList::default(),
            depth: Depth::new(),
            is_isolated: true,
            in_result: false,
            covered: None,
        }
    }

    #[inline] pub fn num_points(&self) -> usize { self.coords.len() }
    #[inline] pub fn coord(&self, i: usize) -> Coord<f64> { self.coords[i] }
    #[inline] pub fn first(&self) -> Coord<f64> { self.coords[0] }
    #[inline] pub fn last(&self) -> Coord<f64> { self.coords[self.coords.len() - 1] }
    #[inline] pub fn max_segment_index(&self) -> usize { self.coords.len() - 1 }

    pub fn is_closed(&self) -> bool { self.first() == self.last() }

    /// Bounding rectangle of the edge's coordinates.
    pub fn envelope(&self) -> Rect<f64> {
        let mut min = self.coords[0];
        let mut max = self.coords[0];
        for c in &self.coords[1..] {
            min.x = min.x.min(c.x);
            min.y = min.y.min(c.y);
            max.x = max.x.max(c.x);
            max.y = max.y.max(c.y);
        }
        Rect::new(min, max)
    }

    /// Records an intersection at `coord` on segment `segment_index`.
    ///
    /// A point equal to the segment's end point is normalized to the start
    /// of the next segment, so every intersection has a unique position.
    pub fn add_intersection(&mut self, coord: Coord<f64>, segment_index: usize) {
        let next = segment_index + 1;
        let (segment_index, dist) = if next < self.coords.len() && coord == self.coords[next] {
            (next, 0.0)
        } else {
            let p1 = self.coords.get(next).copied().unwrap_or(self.coords[segment_index]);
            (segment_index, edge_distance(coord, self.coords[segment_index], p1))
        };
        self.intersections.add(coord, segment_index, dist);
    }

    /// Records both end points as intersections.
    pub fn add_endpoints(&mut self) {
        let last = self.max_segment_index();
        let (first_pt, last_pt) = (self.first(), self.last());
        self.intersections.add(first_pt, 0, 0.0);
        self.intersections.add(last_pt, last, 0.0);
    }

    /// Splits the edge at every recorded intersection (end points included).
    ///
    /// Each piece carries a copy of this edge's label.
    pub fn split(&mut self) -> Vec<Edge> {
        self.add_endpoints();
        let nodes: Vec<EdgeIntersection> = self.intersections.iter().copied().collect();
        nodes.windows(2).map(|w| self.split_edge(&w[0], &w[1])).collect()
    }

    fn split_edge(&self, ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Edge {
        let last_seg_start = self.coords[ei1.segment_index];
        // the last intersection may coincide with a vertex already copied
        let use_ei1 = ei1.dist > 0.0 || ei1.coord != last_seg_start;

        let mut pts = Vec::with_capacity(ei1.segment_index - ei0.segment_index + 2);
        pts.push(ei0.coord);
        pts.extend_from_slice(&self.coords[ei0.segment_index + 1..=ei1.segment_index]);
        if use_ei1 { pts.push(ei1.coord) }
        Edge::new(pts, self.label)
    }

    /// True for a three-point area edge that folds back onto itself.
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.coords.len() == 3 && self.coords[0] == self.coords[2]
    }

    /// The two-point line edge replacing a collapsed edge.
    pub fn collapsed_edge(&self) -> Edge {
        Edge::new(self.coords[..2].to_vec(), Label::to_line_label(&self.label))
    }

    /// True if both edges have the same coordinates in the same order.
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.coords == other.coords
    }

    /// True if both edges have the same coordinates in either order.
    pub fn is_equal_ignoring_direction(&self, other: &Edge) -> bool {
        self.coords.len() == other.coords.len()
            && (self.coords == other.coords
                || self.coords.iter().eq(other.coords.iter().rev()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use geo::coord;

    fn line(coords: &[(f64, f64)]) -> Edge {
        let pts = coords.iter().map(|&(x, y)| coord! { x: x, y: y }).collect();
        Edge::new(pts, Label::line(0, Location::Interior))
    }

    #[test]
    fn edge_distance_orders_along_segment() {
        let p0 = coord! { x: 0.0, y: 0.0 };
        let p1 = coord! { x: 10.0, y: 2.0 };
        assert_eq!(edge_distance(p0, p0, p1), 0.0);
        assert_eq!(edge_distance(p1, p0, p1), 10.0);
        assert_eq!(edge_distance(coord! { x: 5.0, y: 1.0 }, p0, p1), 5.0);
        // a point off the dominant axis still gets a positive distance
        assert!(edge_distance(coord! { x: 0.0, y: 1.0 }, p0, p1) > 0.0);
    }

    #[test]
    fn intersections_are_unique_and_ordered() {
        let mut e = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        e.add_intersection(coord! { x: 10.0, y: 5.0 }, 1);
        e.add_intersection(coord! { x: 5.0, y: 0.0 }, 0);
        e.add_intersection(coord! { x: 5.0, y: 0.0 }, 0);
        // end point of segment 0 normalizes to segment 1
        e.add_intersection(coord! { x: 10.0, y: 0.0 }, 0);
        let ei: Vec<_> = e.intersections.iter().map(|ei| (ei.segment_index, ei.coord.x, ei.coord.y)).collect();
        assert_eq!(ei, vec![(0, 5.0, 0.0), (1, 10.0, 0.0), (1, 10.0, 5.0)]);
    }

    #[test]
    fn split_at_intersections() {
        let mut e = line(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        e.add_intersection(coord! { x: 5.0, y: 0.0 }, 0);
        e.add_intersection(coord! { x: 10.0, y: 0.0 }, 0);
        let parts = e.split();
        let coords: Vec<Vec<(f64, f64)>> = parts.iter()
            .map(|p| p.coords.iter().map(|c| (c.x, c.y)).collect())
            .collect();
        assert_eq!(coords, vec![
            vec![(0.0, 0.0), (5.0, 0.0)],
            vec![(5.0, 0.0), (10.0, 0.0)],
            vec![(10.0, 0.0), (10.0, 10.0)],
        ]);
        assert!(parts.iter().all(|p| p.label == e.label));
    }

    #[test]
    fn collapsed_edges() {
        let mut e = line(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]);
        assert!(!e.is_collapsed());
        e.label = Label::area(0, Location::Boundary, Location::Exterior, Location::Interior);
        assert!(e.is_collapsed());
        let c = e.collapsed_edge();
        assert_eq!(c.num_points(), 2);
        assert!(c.label.is_line(0));
        assert_eq!(c.label.location(0), Some(Location::Boundary));
    }

    #[test]
    fn equality_ignoring_direction() {
        let a = line(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let b = line(&[(2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert!(a.is_equal_ignoring_direction(&b));
        assert!(!a.is_pointwise_equal(&b));
        assert!(a.is_pointwise_equal(&a.clone()));
    }
}
