use std::fmt;

use geo::{Geometry, HasDimensions, LineString};

/// Topological dimension of a geometry or of an intersection matrix entry.
///
/// `False` is the dimension of the empty set; the variants are ordered so
/// that `max` and `min` behave as expected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    False,
    Point,
    Line,
    Area,
}

impl Dimension {
    /// Matrix symbol: `F`, `0`, `1` or `2`.
    pub fn symbol(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::Point => '0',
            Dimension::Line  => '1',
            Dimension::Area  => '2',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'F' | 'f' => Some(Dimension::False),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Line),
            '2' => Some(Dimension::Area),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Dimension of a geometry's type, regardless of emptiness.
///
/// A collection has the largest dimension of its members; an empty
/// collection has none.
pub fn dimension(geom: &Geometry<f64>) -> Dimension {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
        Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => Dimension::Line,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => Dimension::Area,
        Geometry::GeometryCollection(gc) => gc.iter().map(dimension).max().unwrap_or(Dimension::False),
    }
}

/// Dimension of a geometry's boundary.
///
/// Points have no boundary; lines have end points unless every component is
/// closed; areas are bounded by lines.
pub fn boundary_dimension(geom: &Geometry<f64>) -> Dimension {
    if geom.is_empty() { return Dimension::False }
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::False,
        Geometry::Line(l) => if l.start == l.end { Dimension::False } else { Dimension::Point },
        Geometry::LineString(ls) => lines_boundary(std::iter::once(ls)),
        Geometry::MultiLineString(mls) => lines_boundary(mls.iter()),
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => Dimension::Line,
        Geometry::GeometryCollection(gc) => gc.iter().map(boundary_dimension).max().unwrap_or(Dimension::False),
    }
}

fn lines_boundary<'a>(mut lines: impl Iterator<Item = &'a LineString<f64>>) -> Dimension {
    if lines.all(|ls| ls.is_empty() || ls.is_closed()) { Dimension::False } else { Dimension::Point }
}
