use std::fmt;

use serde::Serialize;

/// Topological location of a point relative to a geometry.
///
/// An unset location is represented as `None` wherever an
/// `Option<Location>` appears.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Location {
    Interior,
    Boundary,
    Exterior,
}

impl Location {
    /// Single-character code used in debug output (`i`, `b`, `e`).
    pub fn symbol(self) -> char {
        match self {
            Location::Interior => 'i',
            Location::Boundary => 'b',
            Location::Exterior => 'e',
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Symbol for an optional location; `-` when unset.
pub fn symbol(loc: Option<Location>) -> char {
    loc.map_or('-', Location::symbol)
}

/// A position relative to a directed edge.
///
/// `On` is the edge itself; `Left` and `Right` are the sides when walking
/// the edge in its own direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Position {
    On = 0,
    Left = 1,
    Right = 2,
}

impl Position {
    /// Swaps `Left` and `Right`; `On` is its own opposite.
    pub fn opposite(self) -> Self {
        match self {
            Position::On => Position::On,
            Position::Left => Position::Right,
            Position::Right => Position::Left,
        }
    }

    #[inline] pub(crate) fn index(self) -> usize { self as usize }
}
