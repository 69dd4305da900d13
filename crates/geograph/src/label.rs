//! Topological labels for edges and nodes.
//!
//! A [`Label`] records, for each of the two input geometries of an overlay
//! or relate operation, where a graph component lies relative to that
//! geometry.  Area-derived labels also carry the locations on either side
//! of the component; line-derived labels only carry the location `On` it.
//!
//! Labels are small `Copy` values.  Every directed edge owns its own copy,
//! so flipping or merging one never leaks into another.

use std::fmt;

use serde::Serialize;

use crate::location::{self, Location, Position};

// ---------------------------------------------------------------------------
// TopologyLocation
// ---------------------------------------------------------------------------

/// Locations of a component relative to a single geometry.
///
/// The line form only uses `On`; the area form uses `On`, `Left` and
/// `Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TopologyLocation {
    locs: [Option<Location>; 3],
    area: bool,
}

impl TopologyLocation {
    /// A line-form location with only `On` set.
    pub fn line(on: Option<Location>) -> Self {
        Self { locs: [on, None, None], area: false }
    }

    /// An area-form location.
    pub fn area(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self { locs: [on, left, right], area: true }
    }

    #[inline] pub fn is_area(&self) -> bool { self.area }
    #[inline] pub fn is_line(&self) -> bool { !self.area }

    #[inline]
    fn positions(&self) -> &[Option<Location>] {
        if self.area { &self.locs } else { &self.locs[..1] }
    }

    /// Location at `pos`; side positions of a line-form location are unset.
    #[inline]
    pub fn get(&self, pos: Position) -> Option<Location> {
        if !self.area && pos != Position::On { return None }
        self.locs[pos.index()]
    }

    /// Sets the location at `pos`, promoting a line form to an area form
    /// when a side is assigned.
    pub fn set(&mut self, pos: Position, loc: Option<Location>) {
        if pos != Position::On && !self.area {
            self.area = true;
            self.locs[1] = None;
            self.locs[2] = None;
        }
        self.locs[pos.index()] = loc;
    }

    /// True if no position has been assigned.
    pub fn is_null(&self) -> bool {
        self.positions().iter().all(Option::is_none)
    }

    /// True if any position is still unassigned.
    pub fn is_any_null(&self) -> bool {
        self.positions().iter().any(Option::is_none)
    }

    /// True if every used position equals `loc`.
    pub fn all_positions_equal(&self, loc: Location) -> bool {
        self.positions().iter().all(|&l| l == Some(loc))
    }

    pub fn set_all(&mut self, loc: Option<Location>) {
        let n = self.positions().len();
        self.locs[..n].iter_mut().for_each(|l| *l = loc);
    }

    pub fn set_all_if_null(&mut self, loc: Option<Location>) {
        let n = self.positions().len();
        self.locs[..n].iter_mut().filter(|l| l.is_none()).for_each(|l| *l = loc);
    }

    /// Swaps the side locations.  A no-op on line forms.
    pub fn flip(&mut self) {
        if self.area { self.locs.swap(1, 2) }
    }

    /// Fills unset positions from `other`.  Assigned positions are kept.
    ///
    /// An area-form `other` promotes a line form to an area form first.
    pub fn merge(&mut self, other: &TopologyLocation) {
        if other.area && !self.area {
            self.area = true;
            self.locs[1] = None;
            self.locs[2] = None;
        }
        let n = self.positions().len().min(other.positions().len());
        for i in 0..n {
            if self.locs[i].is_none() { self.locs[i] = other.locs[i] }
        }
    }

    /// Demotes to a line form keeping only `On`.
    pub fn to_line(&mut self) {
        *self = Self::line(self.locs[0]);
    }

    /// True if the locations on `pos` agree.
    pub fn is_equal_on_side(&self, other: &TopologyLocation, pos: Position) -> bool {
        self.get(pos) == other.get(pos)
    }
}

impl fmt::Display for TopologyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.area {
            write!(f, "{}{}{}",
                location::symbol(self.locs[1]),
                location::symbol(self.locs[0]),
                location::symbol(self.locs[2]))
        } else {
            write!(f, "{}", location::symbol(self.locs[0]))
        }
    }
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

/// Topological relationship of a graph component to both input geometries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Label {
    elt: [TopologyLocation; 2],
}

impl Default for Label {
    fn default() -> Self { Self::line_all(None) }
}

impl Label {
    /// A line label with the same `On` location for both geometries.
    pub fn line_all(on: Option<Location>) -> Self {
        Self { elt: [TopologyLocation::line(on); 2] }
    }

    /// An area label with the same locations for both geometries.
    pub fn area_all(on: Option<Location>, left: Option<Location>, right: Option<Location>) -> Self {
        Self { elt: [TopologyLocation::area(on, left, right); 2] }
    }

    /// A line label for geometry `geom_index`; the other geometry is unset.
    pub fn line(geom_index: usize, on: Location) -> Self {
        let mut label = Self::line_all(None);
        label.elt[geom_index].set(Position::On, Some(on));
        label
    }

    /// An area label for geometry `geom_index`; the other geometry is unset
    /// but also in area form.
    pub fn area(geom_index: usize, on: Location, left: Location, right: Location) -> Self {
        let mut label = Self::area_all(None, None, None);
        label.elt[geom_index] = TopologyLocation::area(Some(on), Some(left), Some(right));
        label
    }

    /// A line label carrying only the `On` locations of `label`.
    pub fn to_line_label(label: &Label) -> Self {
        let mut line = Self::line_all(None);
        for i in 0..2 {
            line.set_location(i, label.location(i));
        }
        line
    }

    #[inline] pub fn topology(&self, geom_index: usize) -> &TopologyLocation { &self.elt[geom_index] }

    /// Location `On` the component for geometry `geom_index`.
    #[inline] pub fn location(&self, geom_index: usize) -> Option<Location> { self.elt[geom_index].get(Position::On) }

    #[inline]
    pub fn location_at(&self, geom_index: usize, pos: Position) -> Option<Location> {
        self.elt[geom_index].get(pos)
    }

    #[inline]
    pub fn set_location(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set(Position::On, loc);
    }

    #[inline]
    pub fn set_location_at(&mut self, geom_index: usize, pos: Position, loc: Option<Location>) {
        self.elt[geom_index].set(pos, loc);
    }

    pub fn set_all_locations(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set_all(loc);
    }

    pub fn set_all_locations_if_null(&mut self, geom_index: usize, loc: Option<Location>) {
        self.elt[geom_index].set_all_if_null(loc);
    }

    /// Swaps `Left` and `Right` for both geometries.
    pub fn flip(&mut self) {
        self.elt.iter_mut().for_each(TopologyLocation::flip);
    }

    /// A copy of this label with the sides swapped.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.flip();
        self
    }

    /// Fills every unset position from `other`.
    ///
    /// Assigned positions are never overwritten and never cleared.
    pub fn merge(&mut self, other: &Label) {
        for i in 0..2 {
            self.elt[i].merge(&other.elt[i]);
        }
    }

    /// A copy of this label merged with `other`.
    #[must_use]
    pub fn merged(mut self, other: &Label) -> Self {
        self.merge(other);
        self
    }

    /// Number of geometries for which this label carries any location.
    pub fn geometry_count(&self) -> usize {
        self.elt.iter().filter(|tl| !tl.is_null()).count()
    }

    #[inline] pub fn is_null(&self, geom_index: usize) -> bool { self.elt[geom_index].is_null() }
    #[inline] pub fn is_any_null(&self, geom_index: usize) -> bool { self.elt[geom_index].is_any_null() }

    /// True if either geometry's location is in area form.
    #[inline] pub fn is_area(&self) -> bool { self.elt[0].is_area() || self.elt[1].is_area() }
    #[inline] pub fn is_area_at(&self, geom_index: usize) -> bool { self.elt[geom_index].is_area() }
    #[inline] pub fn is_line(&self, geom_index: usize) -> bool { self.elt[geom_index].is_line() }

    pub fn is_equal_on_side(&self, other: &Label, pos: Position) -> bool {
        self.elt[0].is_equal_on_side(&other.elt[0], pos)
            && self.elt[1].is_equal_on_side(&other.elt[1], pos)
    }

    pub fn all_positions_equal(&self, geom_index: usize, loc: Location) -> bool {
        self.elt[geom_index].all_positions_equal(loc)
    }

    /// Demotes geometry `geom_index` to a line form (dimensional collapse).
    pub fn to_line(&mut self, geom_index: usize) {
        if self.elt[geom_index].is_area() { self.elt[geom_index].to_line() }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A:{} B:{}", self.elt[0], self.elt[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Location::*;

    #[test]
    fn area_label_for_one_geometry() {
        let label = Label::area(0, Boundary, Exterior, Interior);
        assert!(label.is_area());
        assert!(label.is_area_at(1));
        assert!(label.is_null(1));
        assert_eq!(label.location(0), Some(Boundary));
        assert_eq!(label.location_at(0, Position::Right), Some(Interior));
        assert_eq!(label.geometry_count(), 1);
        assert_eq!(label.to_string(), "A:ebi B:---");
    }

    #[test]
    fn flip_swaps_sides_of_area_labels() {
        let label = Label::area(1, Boundary, Exterior, Interior).flipped();
        assert_eq!(label.location_at(1, Position::Left), Some(Interior));
        assert_eq!(label.location_at(1, Position::Right), Some(Exterior));
        assert_eq!(label.location(1), Some(Boundary));

        let line = Label::line(0, Interior);
        assert_eq!(line.flipped(), line);
    }

    #[test]
    fn merge_fills_only_unset_positions() {
        let a = Label::area(0, Boundary, Exterior, Interior);
        let b = Label::area(1, Boundary, Interior, Exterior);
        let m = a.merged(&b);
        assert_eq!(m.location_at(0, Position::Left), Some(Exterior));
        assert_eq!(m.location_at(1, Position::Left), Some(Interior));
        assert_eq!(m.geometry_count(), 2);

        // conflicting sides keep the existing values
        let c = a.merged(&a.flipped());
        assert_eq!(c, a);
    }

    #[test]
    fn merge_promotes_line_to_area() {
        let line = Label::line(0, Interior);
        let area = Label::area(1, Boundary, Exterior, Interior);
        let m = line.merged(&area);
        assert!(m.is_area_at(0));
        assert_eq!(m.location(0), Some(Interior));
        assert_eq!(m.location_at(0, Position::Left), None);
        assert_eq!(m.location_at(1, Position::Right), Some(Interior));
    }

    #[test]
    fn to_line_keeps_on_location() {
        let mut label = Label::area(0, Boundary, Interior, Interior);
        label.to_line(0);
        assert!(label.is_line(0));
        assert_eq!(label.location(0), Some(Boundary));
        assert_eq!(label.location_at(0, Position::Left), None);
    }

    #[test]
    fn set_all_if_null_respects_assigned_positions() {
        let mut label = Label::area_all(None, None, None);
        label.set_location_at(0, Position::Left, Some(Interior));
        label.set_all_locations_if_null(0, Some(Exterior));
        assert_eq!(label.location_at(0, Position::Left), Some(Interior));
        assert_eq!(label.location(0), Some(Exterior));
        assert!(!label.is_any_null(0));
        assert!(label.is_null(1));
    }
}
