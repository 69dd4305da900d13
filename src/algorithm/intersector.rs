use geo::algorithm::line_intersection::{LineIntersection, line_intersection};
use geo::{Coord, Line};
use geograph::edge::edge_distance;
use smallvec::SmallVec;

/// Computes the intersection of two segments and remembers the result for
/// inspection.
///
/// Two segments meet in nothing, a single point, or (when collinear) a
/// segment given by its two end points.  An intersection is *proper* if it
/// is a single point interior to both segments.
#[derive(Clone, Debug, Default)]
pub struct LineIntersector {
    input:     [[Coord<f64>; 2]; 2],
    points:    SmallVec<[Coord<f64>; 2]>,
    proper:    bool,
    collinear: bool,
}

impl LineIntersector {
    pub fn new() -> Self { Self::default() }

    /// Intersects segment `p1 -> p2` with segment `q1 -> q2`.
    pub fn compute(&mut self, p1: Coord<f64>, p2: Coord<f64>, q1: Coord<f64>, q2: Coord<f64>) {
        self.input = [[p1, p2], [q1, q2]];
        self.points.clear();
        self.proper = false;
        self.collinear = false;

        match line_intersection(Line::new(p1, p2), Line::new(q1, q2)) {
            None => {}
            Some(LineIntersection::SinglePoint { intersection, is_proper }) => {
                self.points.push(intersection);
                self.proper = is_proper;
            }
            Some(LineIntersection::Collinear { intersection }) => {
                self.collinear = true;
                self.points.push(intersection.start);
                if intersection.end != intersection.start { self.points.push(intersection.end) }
            }
        }
    }

    #[inline] pub fn has_intersection(&self) -> bool { !self.points.is_empty() }
    #[inline] pub fn num_points(&self) -> usize { self.points.len() }
    #[inline] pub fn point(&self, i: usize) -> Coord<f64> { self.points[i] }
    #[inline] pub fn points(&self) -> &[Coord<f64>] { &self.points }
    #[inline] pub fn is_proper(&self) -> bool { self.proper }
    #[inline] pub fn is_collinear(&self) -> bool { self.collinear }

    /// True if `p` is one of the intersection points.
    pub fn is_intersection(&self, p: Coord<f64>) -> bool {
        self.points.contains(&p)
    }

    /// True if some intersection point is not an end point of either input
    /// segment.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// True if some intersection point is not an end point of input segment
    /// `input_index`.
    pub fn is_interior_intersection_of(&self, input_index: usize) -> bool {
        let [a, b] = self.input[input_index];
        self.points.iter().any(|&p| p != a && p != b)
    }

    /// Edge distance of intersection point `point_index` along input segment
    /// `input_index`.
    pub fn edge_distance(&self, input_index: usize, point_index: usize) -> f64 {
        let [a, b] = self.input[input_index];
        edge_distance(self.points[point_index], a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn crossing_segments_intersect_properly() {
        let mut li = LineIntersector::new();
        li.compute(
            coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 2.0 },
            coord! { x: 0.0, y: 2.0 }, coord! { x: 2.0, y: 0.0 },
        );
        assert_eq!(li.points(), &[coord! { x: 1.0, y: 1.0 }]);
        assert!(li.is_proper());
        assert!(li.is_interior_intersection());
        assert_eq!(li.edge_distance(0, 0), 1.0);
    }

    #[test]
    fn touching_segments_are_not_proper() {
        let mut li = LineIntersector::new();
        li.compute(
            coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 }, coord! { x: 3.0, y: 5.0 },
        );
        assert_eq!(li.num_points(), 1);
        assert!(!li.is_proper());
        assert!(!li.is_interior_intersection());
    }

    #[test]
    fn collinear_overlap_has_two_points() {
        let mut li = LineIntersector::new();
        li.compute(
            coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 0.0 },
            coord! { x: 2.0, y: 0.0 }, coord! { x: 6.0, y: 0.0 },
        );
        assert!(li.is_collinear());
        assert_eq!(li.num_points(), 2);
        assert!(li.is_intersection(coord! { x: 2.0, y: 0.0 }));
        assert!(li.is_intersection(coord! { x: 4.0, y: 0.0 }));
        assert!(li.is_interior_intersection_of(0));
    }

    #[test]
    fn disjoint_segments() {
        let mut li = LineIntersector::new();
        li.compute(
            coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 },
            coord! { x: 0.0, y: 1.0 }, coord! { x: 1.0, y: 1.0 },
        );
        assert!(!li.has_intersection());
    }
}
