use geo::{Coord, HasDimensions, Intersects};
use geograph::{Label, Location, NodeId, NodeMap};
use tracing::{debug, trace};

use crate::algorithm::{BoundaryNodeRule, PointLocator, locate_in_area};
use crate::error::Result;
use crate::geom::envelope::envelope;
use crate::geom::{Dimension, boundary_dimension, dimension};
use crate::graph::GeometryGraph;
use crate::noding::{EdgeSetIntersector, IndexedEdgeSetIntersector, SegmentIntersector};
use crate::relate::IntersectionMatrix;
use crate::relate::bundle::{EdgeEndBundleStar, edge_ends, update_im};

/// Computes the intersection matrix of two geometry graphs.
///
/// Only the nodes of the two graphs are materialised: the edges are never
/// merged into a planar graph.  Each node keeps the edge ends leaving it,
/// bundled by direction, and the matrix is read off the labels of the nodes,
/// the bundles and the edges that meet nothing.
pub struct RelateComputer {
    args:     [GeometryGraph; 2],
    rule:     BoundaryNodeRule,
    locator:  PointLocator,
    esi:      Box<dyn EdgeSetIntersector>,
    nodes:    NodeMap,
    /// Bundled edge ends, indexed like `nodes`.
    stars:    Vec<EdgeEndBundleStar>,
    isolated: Vec<Label>,
}

impl RelateComputer {
    pub fn new(args: [GeometryGraph; 2], rule: BoundaryNodeRule) -> Self {
        Self {
            args,
            rule,
            locator: PointLocator::new(rule),
            esi: Box::new(IndexedEdgeSetIntersector),
            nodes: NodeMap::new(),
            stars: Vec::new(),
            isolated: Vec::new(),
        }
    }

    pub fn compute_im(mut self) -> Result<IntersectionMatrix> {
        let mut im = IntersectionMatrix::new();
        // the exteriors of two bounded geometries always share an area
        im.set(Location::Exterior, Location::Exterior, Dimension::Area);

        let env0 = envelope(self.args[0].geometry());
        let env1 = envelope(self.args[1].geometry());
        if !matches!((env0, env1), (Some(e0), Some(e1)) if e0.intersects(&e1)) {
            self.compute_disjoint_im(&mut im);
            return Ok(im);
        }

        self.args[0].compute_self_nodes(self.esi.as_ref(), false);
        self.args[1].compute_self_nodes(self.esi.as_ref(), false);
        let [arg0, arg1] = &mut self.args;
        let si = arg0.compute_edge_intersections(arg1, self.esi.as_ref(), false);

        self.compute_intersection_nodes(0);
        self.compute_intersection_nodes(1);
        self.copy_nodes_and_labels(0);
        self.copy_nodes_and_labels(1);
        self.label_isolated_nodes();
        self.compute_proper_intersection_im(&si, &mut im);

        self.insert_edge_ends(0);
        self.insert_edge_ends(1);
        debug!(nodes = self.nodes.len(), tests = si.num_tests(), "relate graph built");

        self.label_node_edges()?;
        self.label_isolated_edges(0, 1);
        self.label_isolated_edges(1, 0);
        self.update_im(&mut im);
        trace!("intersection matrix {im}");
        Ok(im)
    }

    /// Disjoint geometries meet only in exterior locations.
    fn compute_disjoint_im(&self, im: &mut IntersectionMatrix) {
        let a = self.args[0].geometry();
        if !a.is_empty() {
            im.set(Location::Interior, Location::Exterior, dimension(a));
            im.set(Location::Boundary, Location::Exterior, boundary_dimension(a));
        }
        let b = self.args[1].geometry();
        if !b.is_empty() {
            im.set(Location::Exterior, Location::Interior, dimension(b));
            im.set(Location::Exterior, Location::Boundary, boundary_dimension(b));
        }
    }

    fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        let id = self.nodes.add_node(coord);
        if self.stars.len() <= id.0 {
            self.stars.resize_with(id.0 + 1, EdgeEndBundleStar::new);
        }
        id
    }

    /// Adds a node at every intersection found on the edges of geometry
    /// `arg_index`.  Intersections on a boundary toggle the node between
    /// boundary and interior.
    fn compute_intersection_nodes(&mut self, arg_index: usize) {
        let found: Vec<(Coord<f64>, Option<Location>)> = self.args[arg_index].edges().iter()
            .flat_map(|e| {
                let loc = e.label.location(arg_index);
                e.intersections.iter().map(move |ei| (ei.coord, loc))
            })
            .collect();
        for (coord, loc) in found {
            let id = self.add_node(coord);
            let node = self.nodes.node_mut(id);
            if loc == Some(Location::Boundary) {
                node.set_label_boundary(arg_index);
            } else if node.label.is_null(arg_index) {
                node.set_location(arg_index, Location::Interior);
            }
        }
    }

    /// Copies the nodes of an input graph, whose labels are authoritative.
    fn copy_nodes_and_labels(&mut self, arg_index: usize) {
        let nodes: Vec<_> = self.args[arg_index].nodes().iter()
            .map(|n| (n.coord, n.label.location(arg_index)))
            .collect();
        for (coord, loc) in nodes {
            let id = self.add_node(coord);
            if let Some(loc) = loc {
                self.nodes.node_mut(id).set_location(arg_index, loc);
            }
        }
    }

    /// Locates the nodes known to one geometry only in the other one.
    fn label_isolated_nodes(&mut self) {
        let ids: Vec<NodeId> = self.nodes.ids().collect();
        for id in ids {
            let node = self.nodes.node(id);
            if !node.is_isolated() { continue }
            let target = if node.label.is_null(0) { 0 } else { 1 };
            let loc = self.locator.locate(node.coord, self.args[target].geometry());
            self.nodes.node_mut(id).label.set_all_locations(target, Some(loc));
        }
    }

    /// A proper intersection fixes several entries at once, depending on the
    /// dimensions of the inputs.
    fn compute_proper_intersection_im(&self, si: &SegmentIntersector, im: &mut IntersectionMatrix) {
        let dim_a = dimension(self.args[0].geometry());
        let dim_b = dimension(self.args[1].geometry());
        let proper = si.has_proper_intersection();
        let proper_interior = si.has_proper_interior_intersection();

        use Dimension::{Area, Line};
        match (dim_a, dim_b) {
            (Area, Area) => {
                if proper { im.set_at_least_pattern("212101212") }
            }
            (Area, Line) => {
                if proper { im.set_at_least_pattern("FFF0FFFF2") }
                if proper_interior { im.set_at_least_pattern("1FFFFF1FF") }
            }
            (Line, Area) => {
                if proper { im.set_at_least_pattern("F0FFFFFF2") }
                if proper_interior { im.set_at_least_pattern("1F1FFFFFF") }
            }
            (Line, Line) => {
                if proper_interior { im.set_at_least_pattern("0FFFFFFFF") }
            }
            _ => {}
        }
    }

    fn insert_edge_ends(&mut self, arg_index: usize) {
        let ends: Vec<_> = self.args[arg_index].edges.iter_mut().flat_map(edge_ends).collect();
        for end in ends {
            let id = self.add_node(end.p0);
            self.stars[id.0].insert(end);
        }
    }

    fn label_node_edges(&mut self) -> Result<()> {
        let args = &self.args;
        for id in self.nodes.ids() {
            let at = self.nodes.node(id).coord;
            self.stars[id.0].compute_labelling(at, self.rule, |i| locate_in_area(at, args[i].geometry()))?;
        }
        Ok(())
    }

    /// Labels the edges of geometry `this` that meet no edge of `target`
    /// with their location in `target`.
    fn label_isolated_edges(&mut self, this: usize, target: usize) {
        let target_geom = self.args[target].geometry();
        let is_point = dimension(target_geom) <= Dimension::Point;
        for e in self.args[this].edges().iter().filter(|e| e.is_isolated) {
            let loc = if is_point {
                Location::Exterior
            } else {
                self.locator.locate(e.first(), target_geom)
            };
            let mut label = e.label;
            label.set_all_locations(target, Some(loc));
            self.isolated.push(label);
        }
    }

    fn update_im(&self, im: &mut IntersectionMatrix) {
        for label in &self.isolated {
            update_im(label, im);
        }
        for id in self.nodes.ids() {
            let label = &self.nodes.node(id).label;
            im.set_at_least_if_valid(label.location(0), label.location(1), Dimension::Point);
            self.stars[id.0].update_im(im);
        }
    }
}
