use serde::Serialize;

use crate::label::Label;
use crate::location::{Location, Position};

/// Per-geometry, per-side depth counters for an edge.
///
/// A depth counts how many coincident area boundaries put the side inside
/// the geometry.  Depths are accumulated while duplicate edges are folded
/// and are then normalized to 0/1 to resolve the side locations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Depth {
    depth: [[Option<i32>; 3]; 2],
}

/// The depth contributed by a single location; `None` for `Boundary`.
pub fn depth_at_location(loc: Location) -> Option<i32> {
    match loc {
        Location::Exterior => Some(0),
        Location::Interior => Some(1),
        Location::Boundary => None,
    }
}

impl Depth {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn get(&self, geom_index: usize, pos: Position) -> Option<i32> {
        self.depth[geom_index][pos.index()]
    }

    #[inline]
    pub fn set(&mut self, geom_index: usize, pos: Position, depth: i32) {
        self.depth[geom_index][pos.index()] = Some(depth);
    }

    /// True when no side of either geometry carries a depth.
    pub fn is_null(&self) -> bool {
        self.depth.iter().all(|g| g.iter().all(Option::is_none))
    }

    /// True when geometry `geom_index` has no depth on its left side.
    #[inline] pub fn is_null_at(&self, geom_index: usize) -> bool { self.depth[geom_index][1].is_none() }

    /// `Exterior` for a depth of zero or less, `Interior` otherwise.
    ///
    /// An unset depth reads as `Exterior`.
    pub fn location(&self, geom_index: usize, pos: Position) -> Location {
        match self.get(geom_index, pos) {
            Some(d) if d > 0 => Location::Interior,
            _ => Location::Exterior,
        }
    }

    /// Adds one unit of depth if `loc` is `Interior`.
    pub fn add_location(&mut self, geom_index: usize, pos: Position, loc: Location) {
        if loc == Location::Interior {
            let slot = &mut self.depth[geom_index][pos.index()];
            *slot = Some(slot.unwrap_or(0) + 1);
        }
    }

    /// Accumulates the side locations of `label`.
    ///
    /// Unset slots are initialised from the location's depth; set slots have
    /// it added.  `Boundary` and unset side locations contribute nothing.
    pub fn add_label(&mut self, label: &Label) {
        for i in 0..2 {
            for pos in [Position::Left, Position::Right] {
                let Some(loc) = label.location_at(i, pos) else { continue };
                let Some(d) = depth_at_location(loc) else { continue };
                let slot = &mut self.depth[i][pos.index()];
                *slot = Some(slot.map_or(d, |cur| cur + d));
            }
        }
    }

    /// Right depth minus left depth for geometry `geom_index`.
    pub fn delta(&self, geom_index: usize) -> i32 {
        self.get(geom_index, Position::Right).unwrap_or(0)
            - self.get(geom_index, Position::Left).unwrap_or(0)
    }

    /// Reduces each geometry's side depths to 0 or 1 relative to their
    /// minimum.  The minimum is clamped at zero, so a side that only ever
    /// saw exterior contributions stays exterior.
    pub fn normalize(&mut self) {
        for i in 0..2 {
            if self.is_null_at(i) { continue }
            let left = self.depth[i][1].unwrap_or(0);
            let right = self.depth[i][2].unwrap_or(0);
            let min = left.min(right).max(0);
            self.depth[i][1] = Some(i32::from(left > min));
            self.depth[i][2] = Some(i32::from(right > min));
        }
    }
}
