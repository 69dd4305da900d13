use std::cmp::Ordering;

use geo::Coord;
use geograph::direction::compare_direction;
use geograph::{Edge, EdgeIntersection, Label, Location, Position, Quadrant, star};

use crate::algorithm::BoundaryNodeRule;
use crate::error::Result;
use crate::geom::Dimension;
use crate::relate::IntersectionMatrix;

/// The start of an edge at a node, pointing along the edge.
#[derive(Clone, Copy, Debug)]
pub struct EdgeEnd {
    pub p0:       Coord<f64>,
    pub p1:       Coord<f64>,
    pub quadrant: Quadrant,
    pub label:    Label,
}

impl EdgeEnd {
    /// `None` if `p0` and `p1` coincide.
    pub fn new(p0: Coord<f64>, p1: Coord<f64>, label: Label) -> Option<Self> {
        let quadrant = Quadrant::between(p0, p1)?;
        Some(Self { p0, p1, quadrant, label })
    }

    fn compare_direction(&self, other: &EdgeEnd) -> Ordering {
        compare_direction(self.p0, self.p1, self.quadrant, other.p0, other.p1, other.quadrant)
    }
}

/// The edge ends of an edge: one on each side of every intersection, the
/// end pointing backwards carrying the flipped label.
pub fn edge_ends(edge: &mut Edge) -> Vec<EdgeEnd> {
    edge.add_endpoints();
    let nodes: Vec<EdgeIntersection> = edge.intersections.iter().copied().collect();
    let mut ends = Vec::with_capacity(nodes.len() * 2);
    for (k, curr) in nodes.iter().enumerate() {
        let prev = k.checked_sub(1).map(|k| &nodes[k]);
        let next = nodes.get(k + 1);
        ends.extend(edge_end_for_prev(edge, curr, prev));
        ends.extend(edge_end_for_next(edge, curr, next));
    }
    ends
}

fn edge_end_for_prev(edge: &Edge, curr: &EdgeIntersection, prev: Option<&EdgeIntersection>) -> Option<EdgeEnd> {
    let mut i = curr.segment_index;
    if curr.dist == 0.0 {
        // at the start of the edge there is nothing behind
        if i == 0 { return None }
        i -= 1;
    }
    let p = match prev {
        Some(prev) if prev.segment_index >= i => prev.coord,
        _ => edge.coord(i),
    };
    EdgeEnd::new(curr.coord, p, edge.label.flipped())
}

fn edge_end_for_next(edge: &Edge, curr: &EdgeIntersection, next: Option<&EdgeIntersection>) -> Option<EdgeEnd> {
    let i = curr.segment_index + 1;
    let p = match next {
        Some(next) if next.segment_index == curr.segment_index || i >= edge.num_points() => next.coord,
        Some(_) => edge.coord(i),
        None if i < edge.num_points() => edge.coord(i),
        None => return None,
    };
    EdgeEnd::new(curr.coord, p, edge.label)
}

/// The edge ends leaving a node in the same direction.
#[derive(Clone, Debug)]
pub struct EdgeEndBundle {
    ends:  Vec<EdgeEnd>,
    label: Label,
}

impl EdgeEndBundle {
    fn new(end: EdgeEnd) -> Self {
        Self { label: end.label, ends: vec![end] }
    }

    fn direction(&self) -> &EdgeEnd { &self.ends[0] }

    #[inline] pub fn label(&self) -> &Label { &self.label }
    #[inline] pub fn len(&self) -> usize { self.ends.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.ends.is_empty() }

    /// Combines the labels of the bundled ends.
    ///
    /// The `On` location is `Boundary` or `Interior` as the boundary rule
    /// decides for the number of ends on a boundary; otherwise `Interior` if
    /// any end is interior.  A side is `Interior` if any area end has it
    /// inside, else `Exterior` if any area end has it outside.
    fn compute_label(&mut self, rule: BoundaryNodeRule) {
        let is_area = self.ends.iter().any(|e| e.label.is_area());
        self.label = if is_area {
            Label::area_all(None, None, None)
        } else {
            Label::line_all(None)
        };
        for i in 0..2 {
            self.compute_label_on(i, rule);
            if is_area {
                self.compute_label_side(i, Position::Left);
                self.compute_label_side(i, Position::Right);
            }
        }
    }

    fn compute_label_on(&mut self, geom_index: usize, rule: BoundaryNodeRule) {
        let boundary_count = self.ends.iter()
            .filter(|e| e.label.location(geom_index) == Some(Location::Boundary))
            .count();
        let found_interior = self.ends.iter().any(|e| e.label.location(geom_index) == Some(Location::Interior));

        let loc = if boundary_count > 0 {
            Some(if rule.is_in_boundary(boundary_count) { Location::Boundary } else { Location::Interior })
        } else if found_interior {
            Some(Location::Interior)
        } else {
            None
        };
        self.label.set_location(geom_index, loc);
    }

    fn compute_label_side(&mut self, geom_index: usize, side: Position) {
        for e in self.ends.iter().filter(|e| e.label.is_area()) {
            match e.label.location_at(geom_index, side) {
                Some(Location::Interior) => {
                    self.label.set_location_at(geom_index, side, Some(Location::Interior));
                    return;
                }
                Some(Location::Exterior) => {
                    self.label.set_location_at(geom_index, side, Some(Location::Exterior));
                }
                _ => {}
            }
        }
    }

    /// Adds the contribution of this bundle's edge to `im`.
    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        update_im(&self.label, im);
    }
}

/// Adds the contribution of an edge with label `label`: its `On` locations
/// meet in a line, and the locations on each side of an area edge meet in
/// an area.
pub fn update_im(label: &Label, im: &mut IntersectionMatrix) {
    im.set_at_least_if_valid(label.location(0), label.location(1), Dimension::Line);
    if label.is_area() {
        for pos in [Position::Left, Position::Right] {
            im.set_at_least_if_valid(label.location_at(0, pos), label.location_at(1, pos), Dimension::Area);
        }
    }
}

/// The bundles leaving one node, sorted counter-clockwise by direction.
#[derive(Clone, Debug, Default)]
pub struct EdgeEndBundleStar {
    bundles: Vec<EdgeEndBundle>,
}

impl EdgeEndBundleStar {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.bundles.len() }
    pub fn is_empty(&self) -> bool { self.bundles.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, EdgeEndBundle> { self.bundles.iter() }

    /// Adds an edge end to the bundle with its direction, creating the
    /// bundle if needed.
    pub fn insert(&mut self, end: EdgeEnd) {
        match self.bundles.binary_search_by(|b| b.direction().compare_direction(&end)) {
            Ok(i) => self.bundles[i].ends.push(end),
            Err(i) => self.bundles.insert(i, EdgeEndBundle::new(end)),
        }
    }

    /// Labels every bundle, then completes the labels around the node.
    /// `locate(i)` gives the location of the node in the area of geometry
    /// `i`.
    pub fn compute_labelling(
        &mut self,
        at:     Coord<f64>,
        rule:   BoundaryNodeRule,
        locate: impl FnMut(usize) -> Location,
    ) -> Result<()> {
        for bundle in &mut self.bundles {
            bundle.compute_label(rule);
        }
        let mut labels: Vec<Label> = self.bundles.iter().map(|b| b.label).collect();
        star::compute_labelling(&mut labels, at, locate)?;
        for (bundle, label) in self.bundles.iter_mut().zip(labels) {
            bundle.label = label;
        }
        Ok(())
    }

    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        self.bundles.iter().for_each(|b| b.update_im(im));
    }
}
