//! Angular ordering of edge ends around a node.
//!
//! Edge ends are sorted counter-clockwise starting from the positive x-axis:
//! first by quadrant, then by orientation within a quadrant.

use std::cmp::Ordering;

use geo::Coord;
use geo::kernels::{Kernel, Orientation, RobustKernel};

/// Quadrant of a direction vector.
///
/// `dx >= 0 && dy >= 0` is `NorthEast`, `dx < 0 && dy >= 0` is
/// `NorthWest`, `dx < 0 && dy < 0` is `SouthWest`, anything else is
/// `SouthEast`.  Directions along an axis fall in the quadrant that starts
/// at that axis, except the negative y-axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quadrant {
    NorthEast = 0,
    NorthWest = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    /// Quadrant of the vector `(dx, dy)`.  The zero vector has no direction.
    pub fn of(dx: f64, dy: f64) -> Option<Quadrant> {
        if dx == 0.0 && dy == 0.0 { return None }
        Some(match (dx >= 0.0, dy >= 0.0) {
            (true, true) => Quadrant::NorthEast,
            (true, false) => Quadrant::SouthEast,
            (false, true) => Quadrant::NorthWest,
            (false, false) => Quadrant::SouthWest,
        })
    }

    /// Quadrant of the direction from `p0` to `p1`.
    pub fn between(p0: Coord<f64>, p1: Coord<f64>) -> Option<Quadrant> {
        Quadrant::of(p1.x - p0.x, p1.y - p0.y)
    }

    /// True for the two quadrants above the x-axis.
    #[inline]
    pub fn is_northern(self) -> bool {
        matches!(self, Quadrant::NorthEast | Quadrant::NorthWest)
    }
}

/// Orientation of `r` relative to the directed line `p -> q`.
#[inline]
pub fn orientation(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> Orientation {
    RobustKernel::orient2d(p, q, r)
}

/// Compares the direction of `a0 -> a1` against `b0 -> b1`.
///
/// Directions are ordered counter-clockwise from the positive x-axis.
/// Identical direction vectors compare equal, as do collinear directions in
/// the same quadrant.
pub fn compare_direction(
    a0: Coord<f64>, a1: Coord<f64>, a_quad: Quadrant,
    b0: Coord<f64>, b1: Coord<f64>, b_quad: Quadrant,
) -> Ordering {
    let (adx, ady) = (a1.x - a0.x, a1.y - a0.y);
    let (bdx, bdy) = (b1.x - b0.x, b1.y - b0.y);
    if adx == bdx && ady == bdy { return Ordering::Equal }

    match a_quad.cmp(&b_quad) {
        Ordering::Equal => {}
        ord => return ord,
    }
    match orientation(b0, b1, a1) {
        Orientation::CounterClockwise => Ordering::Greater,
        Orientation::Clockwise => Ordering::Less,
        Orientation::Collinear => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn quadrants() {
        assert_eq!(Quadrant::of(1.0, 0.0), Some(Quadrant::NorthEast));
        assert_eq!(Quadrant::of(0.0, 1.0), Some(Quadrant::NorthEast));
        assert_eq!(Quadrant::of(-1.0, 0.0), Some(Quadrant::NorthWest));
        assert_eq!(Quadrant::of(-1.0, -1.0), Some(Quadrant::SouthWest));
        assert_eq!(Quadrant::of(0.0, -1.0), Some(Quadrant::SouthEast));
        assert_eq!(Quadrant::of(0.0, 0.0), None);
    }

    #[test]
    fn directions_sort_counter_clockwise() {
        let o = coord! { x: 0.0, y: 0.0 };
        let ends = [
            coord! { x: 1.0, y: -1.0 },
            coord! { x: -1.0, y: 1.0 },
            coord! { x: 1.0, y: 2.0 },
            coord! { x: 2.0, y: 1.0 },
        ];
        let mut sorted = ends.to_vec();
        sorted.sort_by(|&a, &b| {
            let qa = Quadrant::between(o, a).unwrap();
            let qb = Quadrant::between(o, b).unwrap();
            compare_direction(o, a, qa, o, b, qb)
        });
        assert_eq!(sorted, vec![ends[3], ends[2], ends[1], ends[0]]);
    }
}
