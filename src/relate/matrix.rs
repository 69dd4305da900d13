use std::fmt;

use geograph::Location;

use crate::geom::Dimension;

/// A dimensionally extended nine-intersection matrix (DE-9IM).
///
/// Entry `(a, b)` is the dimension of the intersection of location `a` of
/// the first geometry with location `b` of the second.  Rows and columns
/// are ordered interior, boundary, exterior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntersectionMatrix {
    matrix: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self { matrix: [[Dimension::False; 3]; 3] }
    }
}

#[inline]
fn index(loc: Location) -> usize {
    match loc {
        Location::Interior => 0,
        Location::Boundary => 1,
        Location::Exterior => 2,
    }
}

/// True if an entry of dimension `actual` satisfies pattern symbol `c`.
fn matches_symbol(actual: Dimension, c: char) -> bool {
    match c.to_ascii_uppercase() {
        '*' => true,
        'T' => actual != Dimension::False,
        c => Dimension::from_symbol(c) == Some(actual),
    }
}

impl IntersectionMatrix {
    pub fn new() -> Self { Self::default() }

    /// A matrix read from nine symbols such as `"212101212"`.  Symbols that
    /// are not dimensions leave the entry `F`.
    pub fn from_pattern(pattern: &str) -> Self {
        let mut im = Self::new();
        im.set_at_least_pattern(pattern);
        im
    }

    #[inline]
    pub fn get(&self, row: Location, col: Location) -> Dimension {
        self.matrix[index(row)][index(col)]
    }

    #[inline]
    pub fn set(&mut self, row: Location, col: Location, dim: Dimension) {
        self.matrix[index(row)][index(col)] = dim;
    }

    /// Raises an entry to `dim` if it is lower.
    pub fn set_at_least(&mut self, row: Location, col: Location, dim: Dimension) {
        let entry = &mut self.matrix[index(row)][index(col)];
        if *entry < dim { *entry = dim }
    }

    /// Like [`set_at_least`](Self::set_at_least), ignoring unset locations.
    pub fn set_at_least_if_valid(&mut self, row: Option<Location>, col: Option<Location>, dim: Dimension) {
        if let (Some(row), Some(col)) = (row, col) {
            self.set_at_least(row, col, dim);
        }
    }

    /// Raises every entry to the dimension given by the pattern symbol at
    /// its position.  `T`, `F` and `*` raise nothing.
    pub fn set_at_least_pattern(&mut self, pattern: &str) {
        for (i, c) in pattern.chars().take(9).enumerate() {
            if let Some(dim) = Dimension::from_symbol(c) {
                let entry = &mut self.matrix[i / 3][i % 3];
                if *entry < dim { *entry = dim }
            }
        }
    }

    /// Tests the matrix against a nine-symbol pattern of `T`, `F`, `*`,
    /// `0`, `1` and `2`.  Patterns of any other length never match.
    pub fn matches(&self, pattern: &str) -> bool {
        if pattern.chars().count() != 9 { return false }
        pattern.chars().enumerate().all(|(i, c)| matches_symbol(self.matrix[i / 3][i % 3], c))
    }

    fn is_true(&self, row: Location, col: Location) -> bool {
        self.get(row, col) != Dimension::False
    }

    fn is_false(&self, row: Location, col: Location) -> bool {
        self.get(row, col) == Dimension::False
    }

    pub fn is_disjoint(&self) -> bool {
        use Location::*;
        self.is_false(Interior, Interior)
            && self.is_false(Interior, Boundary)
            && self.is_false(Boundary, Interior)
            && self.is_false(Boundary, Boundary)
    }

    pub fn is_intersects(&self) -> bool { !self.is_disjoint() }

    /// Whether the geometries touch, given their dimensions.  Two points
    /// never touch.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        if dim_a > dim_b { return self.is_touches(dim_b, dim_a) }
        let applies = matches!(
            (dim_a, dim_b),
            (Dimension::Area, Dimension::Area)
                | (Dimension::Line, Dimension::Line)
                | (Dimension::Line, Dimension::Area)
                | (Dimension::Point, Dimension::Area)
                | (Dimension::Point, Dimension::Line)
        );
        applies
            && self.is_false(Interior, Interior)
            && (self.is_true(Interior, Boundary) || self.is_true(Boundary, Interior) || self.is_true(Boundary, Boundary))
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::{Area, Line, Point};
        use Location::*;
        match (dim_a, dim_b) {
            (Point, Line) | (Point, Area) | (Line, Area) => {
                self.is_true(Interior, Interior) && self.is_true(Interior, Exterior)
            }
            (Line, Point) | (Area, Point) | (Area, Line) => {
                self.is_true(Interior, Interior) && self.is_true(Exterior, Interior)
            }
            (Line, Line) => self.get(Interior, Interior) == Point,
            _ => false,
        }
    }

    pub fn is_within(&self) -> bool {
        use Location::*;
        self.is_true(Interior, Interior) && self.is_false(Interior, Exterior) && self.is_false(Boundary, Exterior)
    }

    pub fn is_contains(&self) -> bool {
        use Location::*;
        self.is_true(Interior, Interior) && self.is_false(Exterior, Interior) && self.is_false(Exterior, Boundary)
    }

    fn has_point_in_common(&self) -> bool {
        use Location::*;
        self.is_true(Interior, Interior)
            || self.is_true(Interior, Boundary)
            || self.is_true(Boundary, Interior)
            || self.is_true(Boundary, Boundary)
    }

    pub fn is_covers(&self) -> bool {
        use Location::*;
        self.has_point_in_common() && self.is_false(Exterior, Interior) && self.is_false(Exterior, Boundary)
    }

    pub fn is_covered_by(&self) -> bool {
        use Location::*;
        self.has_point_in_common() && self.is_false(Interior, Exterior) && self.is_false(Boundary, Exterior)
    }

    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        let exteriors = self.is_true(Interior, Exterior) && self.is_true(Exterior, Interior);
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point) | (Dimension::Area, Dimension::Area) => {
                self.is_true(Interior, Interior) && exteriors
            }
            (Dimension::Line, Dimension::Line) => self.get(Interior, Interior) == Dimension::Line && exteriors,
            _ => false,
        }
    }

    /// Topological equality of geometries of the given dimensions.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Location::*;
        dim_a == dim_b
            && self.is_true(Interior, Interior)
            && self.is_false(Interior, Exterior)
            && self.is_false(Boundary, Exterior)
            && self.is_false(Exterior, Interior)
            && self.is_false(Exterior, Boundary)
    }

    /// The matrix of the geometries in swapped order.
    pub fn transposed(&self) -> Self {
        let mut t = Self::new();
        for (r, row) in self.matrix.iter().enumerate() {
            for (c, &dim) in row.iter().enumerate() {
                t.matrix[c][r] = dim;
            }
        }
        t
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.matrix {
            for dim in row {
                write!(f, "{}", dim.symbol())?;
            }
        }
        Ok(())
    }
}
