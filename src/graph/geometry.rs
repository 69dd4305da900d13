use geo::{Coord, Geometry, HasDimensions, LineString, Polygon, RemoveRepeatedPoints};
use geograph::{Edge, Label, Location, NodeMap};
use tracing::debug;

use crate::algorithm::{BoundaryNodeRule, is_ccw};
use crate::geom::normalize;
use crate::noding::{EdgeSetIntersector, SegmentIntersector};

/// The edges and nodes of a single input geometry, labelled with their
/// topological role in that geometry.
///
/// Polygon rings become area edges labelled with the location on each side;
/// line strings become line edges; points and line end points become nodes.
/// `arg_index` tells which of the two overlay or relate arguments this is.
#[derive(Clone, Debug)]
pub struct GeometryGraph {
    arg_index: usize,
    geom:      Geometry<f64>,
    rule:      BoundaryNodeRule,
    /// Cleared for multipolygons, whose boundary nodes are never lines.
    use_boundary_rule: bool,
    pub(crate) nodes: NodeMap,
    pub(crate) edges: Vec<Edge>,
}

impl GeometryGraph {
    pub fn new(arg_index: usize, geom: &Geometry<f64>) -> Self {
        Self::with_boundary_rule(arg_index, geom, BoundaryNodeRule::default())
    }

    pub fn with_boundary_rule(arg_index: usize, geom: &Geometry<f64>, rule: BoundaryNodeRule) -> Self {
        let geom = normalize(geom.clone());
        let mut graph = Self {
            arg_index,
            geom: Geometry::GeometryCollection(Default::default()),
            rule,
            use_boundary_rule: true,
            nodes: NodeMap::new(),
            edges: Vec::new(),
        };
        graph.add(&geom);
        graph.geom = geom;
        graph
    }

    #[inline] pub fn geometry(&self) -> &Geometry<f64> { &self.geom }
    #[inline] pub fn arg_index(&self) -> usize { self.arg_index }
    #[inline] pub fn boundary_rule(&self) -> BoundaryNodeRule { self.rule }
    #[inline] pub fn edges(&self) -> &[Edge] { &self.edges }
    #[inline] pub fn nodes(&self) -> &NodeMap { &self.nodes }

    /// Coordinates of the nodes on the boundary of this geometry.
    pub fn boundary_nodes(&self) -> Vec<Coord<f64>> {
        self.nodes.boundary_nodes(self.arg_index).map(|n| n.coord).collect()
    }

    fn add(&mut self, geom: &Geometry<f64>) {
        if geom.is_empty() { return }
        match geom {
            Geometry::Point(p) => self.insert_point(p.0, Location::Interior),
            Geometry::MultiPoint(mp) => mp.iter().for_each(|p| self.insert_point(p.0, Location::Interior)),
            Geometry::LineString(ls) => self.add_line_string(ls),
            Geometry::MultiLineString(mls) => mls.iter().for_each(|ls| self.add_line_string(ls)),
            Geometry::Polygon(poly) => self.add_polygon(poly),
            Geometry::MultiPolygon(mp) => {
                self.use_boundary_rule = false;
                mp.iter().for_each(|poly| self.add_polygon(poly));
            }
            Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| self.add(g)),
            other => self.add(&normalize(other.clone())),
        }
    }

    fn add_polygon(&mut self, poly: &Polygon<f64>) {
        self.add_polygon_ring(poly.exterior(), Location::Exterior, Location::Interior);
        for hole in poly.interiors() {
            // holes have their interior on the opposite side
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior);
        }
    }

    /// Adds a ring whose clockwise orientation has `cw_left` on its left
    /// and `cw_right` on its right.
    fn add_polygon_ring(&mut self, ring: &LineString<f64>, cw_left: Location, cw_right: Location) {
        if ring.0.is_empty() { return }
        let coords = ring.remove_repeated_points().0;
        if coords.len() < 4 {
            debug!("skipping ring with too few points at {:?}", coords[0]);
            return;
        }
        let (left, right) = if is_ccw(&coords) { (cw_right, cw_left) } else { (cw_left, cw_right) };
        let start = coords[0];
        self.edges.push(Edge::new(coords, Label::area(self.arg_index, Location::Boundary, left, right)));
        self.insert_point(start, Location::Boundary);
    }

    fn add_line_string(&mut self, ls: &LineString<f64>) {
        let coords = ls.remove_repeated_points().0;
        if coords.len() < 2 {
            debug!("skipping line with too few points at {:?}", coords.first());
            return;
        }
        let (first, last) = (coords[0], coords[coords.len() - 1]);
        self.edges.push(Edge::new(coords, Label::line(self.arg_index, Location::Interior)));
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
    }

    fn insert_point(&mut self, coord: Coord<f64>, loc: Location) {
        let id = self.nodes.add_node(coord);
        self.nodes.node_mut(id).set_location(self.arg_index, loc);
    }

    /// Adds a line end point, counting how many line ends meet there.
    fn insert_boundary_point(&mut self, coord: Coord<f64>) {
        let id = self.nodes.add_node(coord);
        let node = self.nodes.node_mut(id);
        let count = if node.label.location(self.arg_index) == Some(Location::Boundary) { 2 } else { 1 };
        let loc = if self.rule.is_in_boundary(count) { Location::Boundary } else { Location::Interior };
        node.set_location(self.arg_index, loc);
    }

    fn is_boundary_node(&self, coord: Coord<f64>) -> bool {
        self.nodes.find(coord)
            .is_some_and(|id| self.nodes.node(id).label.location(self.arg_index) == Some(Location::Boundary))
    }

    /// Nodes this geometry against itself, recording the intersections on
    /// its edges and adding a node for each.
    ///
    /// Polygonal rings are assumed simple unless `compute_ring_self_nodes`
    /// is set, so their segments are only tested against other rings.
    pub fn compute_self_nodes(
        &mut self,
        esi: &dyn EdgeSetIntersector,
        compute_ring_self_nodes: bool,
    ) -> SegmentIntersector {
        let mut si = SegmentIntersector::new(true, false);
        let is_rings = matches!(self.geom, Geometry::Polygon(_) | Geometry::MultiPolygon(_));
        let test_all_segments = compute_ring_self_nodes || !is_rings;
        esi.compute_self(&mut self.edges, &mut si, test_all_segments);
        self.add_self_intersection_nodes();
        si
    }

    fn add_self_intersection_nodes(&mut self) {
        let mut found = Vec::new();
        for e in &self.edges {
            let loc = e.label.location(self.arg_index);
            found.extend(e.intersections.iter().map(|ei| (ei.coord, loc)));
        }
        for (coord, loc) in found {
            if self.is_boundary_node(coord) { continue }
            match loc {
                Some(Location::Boundary) if self.use_boundary_rule => self.insert_boundary_point(coord),
                Some(loc) => self.insert_point(coord, loc),
                None => {}
            }
        }
    }

    /// Intersects the edges of this geometry with those of `other`,
    /// recording the intersections on both.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph,
        esi: &dyn EdgeSetIntersector,
        include_proper: bool,
    ) -> SegmentIntersector {
        let mut si = SegmentIntersector::new(include_proper, true)
            .with_boundary_nodes(self.boundary_nodes(), other.boundary_nodes());
        esi.compute_mutual(&mut self.edges, &mut other.edges, &mut si);
        si
    }

    /// Splits every edge at its recorded intersections.
    pub fn split_edges(&mut self) -> Vec<Edge> {
        self.edges.iter_mut().flat_map(|e| e.split()).collect()
    }
}
