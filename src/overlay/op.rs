use std::fmt;
use std::str::FromStr;

use geo::Geometry;
use geograph::{DirEdgeId, Edge, EdgeList, Location, PlanarGraph, Position};
use tracing::{debug, trace};

use crate::algorithm::{PointLocator, locate_in_area};
use crate::error::Result;
use crate::geom::{Dimension, build_geometry, dimension, empty_of_dimension};
use crate::graph::GeometryGraph;
use crate::noding::{EdgeSetIntersector, IndexedEdgeSetIntersector, check_noding};
use crate::overlay::{LineBuilder, PointBuilder, PolygonBuilder};

/// A boolean set operation on two geometries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpCode {
    Intersection,
    Union,
    Difference,
    SymDifference,
}

impl OpCode {
    /// Whether a point with locations `loc0` in the first geometry and
    /// `loc1` in the second belongs to the result.  Boundaries count as
    /// interior.
    pub fn is_result(self, loc0: Option<Location>, loc1: Option<Location>) -> bool {
        let inside = |loc| matches!(loc, Some(Location::Interior | Location::Boundary));
        let (a, b) = (inside(loc0), inside(loc1));
        match self {
            OpCode::Intersection  => a && b,
            OpCode::Union         => a || b,
            OpCode::Difference    => a && !b,
            OpCode::SymDifference => a != b,
        }
    }

    /// Dimension of the empty result of this operation.
    fn empty_dimension(self, dim0: Dimension, dim1: Dimension) -> Dimension {
        match self {
            OpCode::Intersection => dim0.min(dim1),
            OpCode::Union | OpCode::SymDifference => dim0.max(dim1),
            OpCode::Difference => dim0,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpCode::Intersection  => "intersection",
            OpCode::Union         => "union",
            OpCode::Difference    => "difference",
            OpCode::SymDifference => "symdifference",
        })
    }
}

impl FromStr for OpCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intersection" => Ok(OpCode::Intersection),
            "union" => Ok(OpCode::Union),
            "difference" => Ok(OpCode::Difference),
            "symdifference" | "sym_difference" | "xor" => Ok(OpCode::SymDifference),
            other => Err(format!("unknown overlay operation: {other}")),
        }
    }
}

/// Computes a boolean overlay of two geometries.
///
/// Both inputs are noded against themselves and each other, the split edges
/// are merged into one labelled planar graph, and the result is assembled
/// from the edges and nodes whose labels satisfy the [`OpCode`].
///
/// The operation is consumed by [`OverlayOp::result`].
pub struct OverlayOp {
    args:      [GeometryGraph; 2],
    graph:     PlanarGraph,
    edge_list: EdgeList,
    esi:       Box<dyn EdgeSetIntersector>,
    locator:   PointLocator,
}

impl OverlayOp {
    pub fn new(a: &Geometry<f64>, b: &Geometry<f64>) -> Self {
        Self {
            args: [GeometryGraph::new(0, a), GeometryGraph::new(1, b)],
            graph: PlanarGraph::new(),
            edge_list: EdgeList::new(),
            esi: Box::new(IndexedEdgeSetIntersector),
            locator: PointLocator::default(),
        }
    }

    /// Uses `esi` to find segment intersections.
    pub fn with_intersector(mut self, esi: impl EdgeSetIntersector + 'static) -> Self {
        self.esi = Box::new(esi);
        self
    }

    pub fn result(mut self, op: OpCode) -> Result<Geometry<f64>> {
        debug!("computing {op} overlay");
        self.copy_points(0);
        self.copy_points(1);

        // node the input geometries
        self.args[0].compute_self_nodes(self.esi.as_ref(), false);
        self.args[1].compute_self_nodes(self.esi.as_ref(), false);
        let [arg0, arg1] = &mut self.args;
        arg1.compute_edge_intersections(arg0, self.esi.as_ref(), true);

        let mut split = self.args[0].split_edges();
        split.extend(self.args[1].split_edges());
        self.insert_unique_edges(split);
        self.compute_labels_from_depths();
        self.edge_list.replace_collapsed();

        let edges = std::mem::take(&mut self.edge_list).into_vec();
        check_noding(&edges)?;
        self.graph.add_edges(edges);
        debug!(nodes = self.graph.num_nodes(), edges = self.graph.num_edges(), "overlay graph built");

        let args = &self.args;
        self.graph.compute_labelling(|p, i| locate_in_area(p, args[i].geometry()))?;
        self.label_incomplete_nodes();
        trace!("labelled overlay graph: {}", self.graph.to_json());

        self.find_result_area_edges(op);
        self.cancel_duplicate_result_edges();

        let polygons = PolygonBuilder::new(&mut self.graph).build()?;
        let lines = LineBuilder::new(&mut self.graph, op, &polygons).build();
        let points = PointBuilder::new(&self.graph, op, &polygons, &lines).build();

        let parts: Vec<Geometry<f64>> = points.into_iter().map(Geometry::Point)
            .chain(lines.into_iter().map(Geometry::LineString))
            .chain(polygons.into_iter().map(Geometry::Polygon))
            .collect();

        if parts.is_empty() {
            let (dim0, dim1) = (dimension(self.args[0].geometry()), dimension(self.args[1].geometry()));
            return Ok(empty_of_dimension(op.empty_dimension(dim0, dim1)));
        }
        Ok(build_geometry(parts))
    }

    /// Seeds the graph with the nodes of an input, keeping their labels.
    fn copy_points(&mut self, arg_index: usize) {
        let nodes: Vec<_> = self.args[arg_index].nodes().iter()
            .map(|n| (n.coord, n.label.location(arg_index)))
            .collect();
        for (coord, loc) in nodes {
            let id = self.graph.add_node(coord);
            if let Some(loc) = loc {
                self.graph.node_mut(id).set_location(arg_index, loc);
            }
        }
    }

    /// Adds split edges to the edge list, folding duplicates into the edge
    /// already present and accumulating their side depths.
    fn insert_unique_edges(&mut self, edges: Vec<Edge>) {
        for e in edges {
            let Some(i) = self.edge_list.find_equal_edge(&e) else {
                self.edge_list.add(e);
                continue;
            };
            let existing = self.edge_list.get_mut(i);
            let to_merge = if existing.is_pointwise_equal(&e) { e.label } else { e.label.flipped() };
            if existing.depth.is_null() {
                let label = existing.label;
                existing.depth.add_label(&label);
            }
            existing.depth.add_label(&to_merge);
            existing.label.merge(&to_merge);
        }
    }

    /// Resolves the side locations of folded edges from their depths.  An
    /// edge with equal depth on both sides of a geometry has collapsed to a
    /// line in that geometry.
    fn compute_labels_from_depths(&mut self) {
        for e in self.edge_list.iter_mut() {
            if e.depth.is_null() { continue }
            e.depth.normalize();
            for i in 0..2 {
                if e.label.is_null(i) || !e.label.is_area() || e.depth.is_null_at(i) { continue }
                if e.depth.delta(i) == 0 {
                    e.label.to_line(i);
                } else {
                    for pos in [Position::Left, Position::Right] {
                        e.label.set_location_at(i, pos, Some(e.depth.location(i, pos)));
                    }
                }
            }
        }
    }

    /// Locates the nodes labelled for one geometry only in the other one,
    /// then completes the labels of their stars.
    fn label_incomplete_nodes(&mut self) {
        let ids: Vec<_> = self.graph.nodes.ids().collect();
        for id in ids {
            let node = self.graph.node(id);
            if node.is_isolated() {
                let target = if node.label.is_null(0) { 0 } else { 1 };
                let loc = self.locator.locate(node.coord, self.args[target].geometry());
                self.graph.node_mut(id).set_location(target, loc);
            }
            self.graph.update_star_labelling(id);
        }
    }

    /// Marks the area edges whose right side is in the result.
    fn find_result_area_edges(&mut self, op: OpCode) {
        for de in self.graph.dir_edges.iter_mut() {
            let label = &de.label;
            let in_result = label.is_area()
                && !de.is_interior_area_edge()
                && op.is_result(label.location_at(0, Position::Right), label.location_at(1, Position::Right));
            if in_result { de.in_result = true }
        }
    }

    /// Unmarks both directions of any edge that is in the result on both
    /// sides.
    fn cancel_duplicate_result_edges(&mut self) {
        let ids: Vec<DirEdgeId> = self.graph.dir_edge_ids().collect();
        for de in ids {
            let sym = self.graph.sym(de);
            if self.graph.dir_edge(de).in_result && self.graph.dir_edge(sym).in_result {
                self.graph.dir_edge_mut(de).in_result = false;
                self.graph.dir_edge_mut(sym).in_result = false;
            }
        }
    }
}

/// Computes `op` on `a` and `b`.
pub fn overlay(a: &Geometry<f64>, b: &Geometry<f64>, op: OpCode) -> Result<Geometry<f64>> {
    OverlayOp::new(a, b).result(op)
}
