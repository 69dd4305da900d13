//! Dimensionally extended nine-intersection relationships.

pub mod bundle;
mod computer;
mod matrix;

use geo::Geometry;

pub use computer::RelateComputer;
pub use matrix::IntersectionMatrix;

use crate::algorithm::BoundaryNodeRule;
use crate::error::{Error, Result};
use crate::graph::GeometryGraph;

/// The spatial relationship between two geometries.
///
/// ```
/// use geo::polygon;
/// use geoverlay::relate::RelateOp;
///
/// let a = polygon![(x: 0., y: 0.), (x: 2., y: 0.), (x: 2., y: 2.), (x: 0., y: 2.)];
/// let b = polygon![(x: 1., y: 1.), (x: 3., y: 1.), (x: 3., y: 3.), (x: 1., y: 3.)];
/// let im = RelateOp::new(&a.into(), &b.into()).unwrap().compute().unwrap();
/// assert_eq!(im.to_string(), "212101212");
/// ```
#[derive(Clone, Debug)]
pub struct RelateOp {
    a:    Geometry<f64>,
    b:    Geometry<f64>,
    rule: BoundaryNodeRule,
}

fn is_collection(geom: &Geometry<f64>) -> bool {
    matches!(geom, Geometry::GeometryCollection(_))
}

impl RelateOp {
    /// Fails if either argument is a geometry collection.
    pub fn new(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Self> {
        if is_collection(a) || is_collection(b) {
            return Err(Error::GeometryCollectionUnsupported("relate"));
        }
        Ok(Self { a: a.clone(), b: b.clone(), rule: BoundaryNodeRule::default() })
    }

    /// Uses `rule` to decide which line end points are boundary points.
    pub fn with_boundary_rule(mut self, rule: BoundaryNodeRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn compute(self) -> Result<IntersectionMatrix> {
        let args = [
            GeometryGraph::with_boundary_rule(0, &self.a, self.rule),
            GeometryGraph::with_boundary_rule(1, &self.b, self.rule),
        ];
        RelateComputer::new(args, self.rule).compute_im()
    }
}

/// The intersection matrix of `a` and `b` under the mod-2 boundary rule.
pub fn relate(a: &Geometry<f64>, b: &Geometry<f64>) -> Result<IntersectionMatrix> {
    RelateOp::new(a, b)?.compute()
}

/// Whether the relationship of `a` and `b` matches a nine-symbol pattern.
pub fn relate_pattern(a: &Geometry<f64>, b: &Geometry<f64>, pattern: &str) -> Result<bool> {
    Ok(relate(a, b)?.matches(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{GeometryCollection, line_string, point, polygon};

    fn square(x: f64, y: f64, size: f64) -> Geometry<f64> {
        polygon![(x: x, y: y), (x: x + size, y: y), (x: x + size, y: y + size), (x: x, y: y + size)].into()
    }

    #[test]
    fn overlapping_squares() {
        let im = relate(&square(0.0, 0.0, 10.0), &square(5.0, 5.0, 10.0)).unwrap();
        assert_eq!(im.to_string(), "212101212");
        assert!(im.is_overlaps(crate::geom::Dimension::Area, crate::geom::Dimension::Area));
    }

    #[test]
    fn disjoint_squares() {
        let im = relate(&square(0.0, 0.0, 1.0), &square(5.0, 5.0, 1.0)).unwrap();
        assert_eq!(im.to_string(), "FF2FF1212");
        assert!(im.is_disjoint());
    }

    #[test]
    fn nested_squares() {
        let im = relate(&square(2.0, 2.0, 2.0), &square(0.0, 0.0, 10.0)).unwrap();
        assert_eq!(im.to_string(), "2FF1FF212");
        assert!(relate_pattern(&square(0.0, 0.0, 10.0), &square(2.0, 2.0, 2.0), "T*****FF*").unwrap());
    }

    #[test]
    fn squares_sharing_an_edge() {
        let im = relate(&square(0.0, 0.0, 1.0), &square(1.0, 0.0, 1.0)).unwrap();
        assert_eq!(im.to_string(), "FF2F11212");
    }

    #[test]
    fn point_in_polygon() {
        let im = relate(&point!(x: 1.0, y: 1.0).into(), &square(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(im.to_string(), "0FFFFF212");
        let im = relate(&point!(x: 0.0, y: 2.0).into(), &square(0.0, 0.0, 4.0)).unwrap();
        assert_eq!(im.to_string(), "F0FFFF212");
    }

    #[test]
    fn crossing_lines() {
        let a: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)].into();
        let b: Geometry<f64> = line_string![(x: 0.0, y: 2.0), (x: 2.0, y: 0.0)].into();
        let im = relate(&a, &b).unwrap();
        assert_eq!(im.to_string(), "0F1FF0102");
        assert!(im.is_crosses(crate::geom::Dimension::Line, crate::geom::Dimension::Line));
    }

    #[test]
    fn closed_line_has_no_boundary_under_mod2() {
        let ring: Geometry<f64> = line_string![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)
        ].into();
        let far: Geometry<f64> = point!(x: 5.0, y: 5.0).into();
        assert_eq!(relate(&ring, &far).unwrap().to_string(), "FF1FFF0F2");

        // the closing vertex is an interior point of the ring
        let start: Geometry<f64> = point!(x: 0.0, y: 0.0).into();
        assert_eq!(relate(&ring, &start).unwrap().to_string(), "0F1FFFFF2");
    }

    #[test]
    fn collections_are_rejected() {
        let gc: Geometry<f64> = Geometry::GeometryCollection(GeometryCollection::default());
        assert_eq!(
            relate(&gc, &square(0.0, 0.0, 1.0)).unwrap_err(),
            Error::GeometryCollectionUnsupported("relate")
        );
    }
}
