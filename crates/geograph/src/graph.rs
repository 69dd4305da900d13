//! Labelled planar graph used to compute overlays.
//!
//! # Structure
//!
//! Every undirected [`Edge`] is represented by a pair of [`DirectedEdge`]s
//! (syms).  Each directed edge carries:
//!
//! * `edge`: the underlying edge
//! * `origin`: the node it leaves from
//! * `sym`: the directed edge of the same edge in the opposite direction
//! * `label`: its own copy of the edge label, flipped if it runs against
//!   the edge's coordinate order
//! * result-assembly state (`in_result`, `visited`, ring membership and the
//!   `next` / `next_min` links used to trace result rings)
//!
//! Each [`Node`] keeps the directed edges leaving it (its *star*) sorted
//! counter-clockwise by direction.
//!
//! # Indexing
//!
//! All elements are stored in flat `Vec`s and addressed by strongly-typed
//! index wrappers (`NodeId`, `EdgeId`, `DirEdgeId`).  Nodes are additionally
//! indexed by coordinate, so there is at most one node per coordinate, and
//! node iteration follows coordinate order.

use std::collections::BTreeMap;
use std::fmt;

use geo::Coord;
use serde_json::{Value, json};

use crate::coord::CoordKey;
use crate::direction::{Quadrant, compare_direction};
use crate::edge::Edge;
use crate::error::{Result, TopologyError};
use crate::label::Label;
use crate::location::{Location, Position};
use crate::star;

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

macro_rules! idx {
    ($name:ident) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

idx!(NodeId);
idx!(EdgeId);
idx!(DirEdgeId);
idx!(RingId);

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A graph node: a unique coordinate with a label and its outgoing edges.
#[derive(Clone, Debug)]
pub struct Node {
    pub coord: Coord<f64>,
    pub label: Label,
    /// Outgoing directed edges, sorted counter-clockwise by direction.
    pub star:  Vec<DirEdgeId>,
}

impl Node {
    fn new(coord: Coord<f64>) -> Self {
        Self { coord, label: Label::default(), star: Vec::new() }
    }

    /// Sets the `On` location of geometry `geom_index`.
    pub fn set_location(&mut self, geom_index: usize, loc: Location) {
        self.label.set_location(geom_index, Some(loc));
    }

    /// Marks the node as a boundary point of geometry `geom_index` under the
    /// mod-2 rule: a node that already was boundary becomes interior.
    pub fn set_label_boundary(&mut self, geom_index: usize) {
        let loc = match self.label.location(geom_index) {
            Some(Location::Boundary) => Location::Interior,
            _ => Location::Boundary,
        };
        self.label.set_location(geom_index, Some(loc));
    }

    /// A node is isolated if it is labelled for one geometry only.
    pub fn is_isolated(&self) -> bool { self.label.geometry_count() == 1 }
}

/// One direction of an edge.
#[derive(Clone, Debug)]
pub struct DirectedEdge {
    pub edge:          EdgeId,
    /// True if this runs in the edge's coordinate order.
    pub forward:       bool,
    pub origin:        NodeId,
    pub sym:           DirEdgeId,
    /// First point (the origin coordinate).
    pub p0:            Coord<f64>,
    /// Next distinct point along the edge; fixes the direction.
    pub p1:            Coord<f64>,
    pub quadrant:      Quadrant,
    pub label:         Label,
    pub in_result:     bool,
    pub visited:       bool,
    /// Maximal result ring containing this edge.
    pub edge_ring:     Option<RingId>,
    /// Minimal result ring containing this edge.
    pub min_edge_ring: Option<RingId>,
    /// Next edge of the maximal ring.
    pub next:          Option<DirEdgeId>,
    /// Next edge of the minimal ring.
    pub next_min:      Option<DirEdgeId>,
}

impl DirectedEdge {
    #[inline] pub fn coordinate(&self) -> Coord<f64> { self.p0 }

    /// True for an edge that is a line of at least one geometry and lies in
    /// the exterior of every area it borders.
    pub fn is_line_edge(&self) -> bool {
        let label = &self.label;
        let is_line = label.is_line(0) || label.is_line(1);
        let exterior_if_area = |i: usize| !label.is_area_at(i) || label.all_positions_equal(i, Location::Exterior);
        is_line && exterior_if_area(0) && exterior_if_area(1)
    }

    /// True for an edge that has the interior of both geometries on both
    /// sides.
    pub fn is_interior_area_edge(&self) -> bool {
        (0..2).all(|i| {
            self.label.is_area_at(i)
                && self.label.location_at(i, Position::Left) == Some(Location::Interior)
                && self.label.location_at(i, Position::Right) == Some(Location::Interior)
        })
    }
}

// ---------------------------------------------------------------------------
// NodeMap
// ---------------------------------------------------------------------------

/// Nodes keyed by coordinate.
#[derive(Clone, Debug, Default)]
pub struct NodeMap {
    nodes: Vec<Node>,
    index: BTreeMap<CoordKey, NodeId>,
}

impl NodeMap {
    pub fn new() -> Self { Self::default() }

    /// The node at `coord`, created if absent.
    pub fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        let next = NodeId(self.nodes.len());
        let id = *self.index.entry(CoordKey(coord)).or_insert(next);
        if id == next { self.nodes.push(Node::new(coord)) }
        id
    }

    pub fn find(&self, coord: Coord<f64>) -> Option<NodeId> {
        self.index.get(&CoordKey(coord)).copied()
    }

    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    #[inline] pub fn node(&self, id: NodeId) -> &Node { &self.nodes[id.0] }
    #[inline] pub fn node_mut(&mut self, id: NodeId) -> &mut Node { &mut self.nodes[id.0] }

    /// Node ids in coordinate order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Nodes in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.index.values().map(|&id| &self.nodes[id.0])
    }

    /// Nodes labelled `Boundary` for geometry `geom_index`.
    pub fn boundary_nodes(&self, geom_index: usize) -> impl Iterator<Item = &Node> + '_ {
        self.iter().filter(move |n| n.label.location(geom_index) == Some(Location::Boundary))
    }
}

// ---------------------------------------------------------------------------
// PlanarGraph
// ---------------------------------------------------------------------------

/// Nodes, edges and directed edges of an overlay.
#[derive(Clone, Debug, Default)]
pub struct PlanarGraph {
    pub nodes:     NodeMap,
    pub edges:     Vec<Edge>,
    pub dir_edges: Vec<DirectedEdge>,
}

impl PlanarGraph {
    pub fn new() -> Self { Self::default() }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn num_nodes(&self)     -> usize { self.nodes.len() }
    pub fn num_edges(&self)     -> usize { self.edges.len() }
    pub fn num_dir_edges(&self) -> usize { self.dir_edges.len() }

    #[inline] pub fn node(&self, id: NodeId) -> &Node { self.nodes.node(id) }
    #[inline] pub fn node_mut(&mut self, id: NodeId) -> &mut Node { self.nodes.node_mut(id) }

    #[inline] pub fn edge(&self, id: EdgeId) -> &Edge { &self.edges[id.0] }
    #[inline] pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge { &mut self.edges[id.0] }

    #[inline] pub fn dir_edge(&self, id: DirEdgeId) -> &DirectedEdge { &self.dir_edges[id.0] }
    #[inline] pub fn dir_edge_mut(&mut self, id: DirEdgeId) -> &mut DirectedEdge { &mut self.dir_edges[id.0] }

    #[inline] pub fn sym(&self, id: DirEdgeId) -> DirEdgeId { self.dir_edges[id.0].sym }

    /// The edge underlying a directed edge.
    #[inline] pub fn edge_of(&self, id: DirEdgeId) -> &Edge { &self.edges[self.dir_edges[id.0].edge.0] }

    /// The node a directed edge leaves from.
    #[inline] pub fn origin(&self, id: DirEdgeId) -> &Node { self.nodes.node(self.dir_edges[id.0].origin) }

    /// The node a directed edge points to.
    #[inline] pub fn dest(&self, id: DirEdgeId) -> NodeId { self.dir_edges[self.sym(id).0].origin }

    pub fn dir_edge_ids(&self) -> impl Iterator<Item = DirEdgeId> + use<> {
        (0..self.dir_edges.len()).map(DirEdgeId)
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// The node at `coord`, created if absent.
    pub fn add_node(&mut self, coord: Coord<f64>) -> NodeId {
        self.nodes.add_node(coord)
    }

    /// Adds edges together with their pair of directed edges, inserting the
    /// directed edges into the stars of their origin nodes.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = Edge>) {
        for edge in edges {
            let e = EdgeId(self.edges.len());
            let fwd = DirEdgeId(self.dir_edges.len());
            let rev = DirEdgeId(self.dir_edges.len() + 1);

            let pts = &edge.coords;
            let n = pts.len();
            let fwd_p1 = pts.iter().skip(1).copied().find(|&c| c != pts[0]).unwrap_or(pts[1]);
            let rev_p1 = pts.iter().rev().skip(1).copied().find(|&c| c != pts[n - 1]).unwrap_or(pts[n - 2]);

            let a = self.nodes.add_node(pts[0]);
            let b = self.nodes.add_node(pts[n - 1]);
            let de_fwd = directed(e, true, a, rev, pts[0], fwd_p1, edge.label);
            let de_rev = directed(e, false, b, fwd, pts[n - 1], rev_p1, edge.label.flipped());

            self.edges.push(edge);
            self.dir_edges.push(de_fwd);
            self.dir_edges.push(de_rev);
            self.insert_into_star(a, fwd);
            self.insert_into_star(b, rev);
        }
    }

    /// Inserts `de` into the sorted star of `node`.  A directed edge with an
    /// identical direction replaces the existing one.
    fn insert_into_star(&mut self, node: NodeId, de: DirEdgeId) {
        let dir_edges = &self.dir_edges;
        let star = &mut self.nodes.nodes[node.0].star;
        let d = &dir_edges[de.0];
        let pos = star.binary_search_by(|&other| {
            let o = &dir_edges[other.0];
            compare_direction(o.p0, o.p1, o.quadrant, d.p0, d.p1, d.quadrant)
        });
        match pos {
            Ok(i) => star[i] = de,
            Err(i) => star.insert(i, de),
        }
    }

    // -----------------------------------------------------------------------
    // Labelling
    // -----------------------------------------------------------------------

    /// Labels every node star, merges each directed edge's label with its
    /// sym, and merges the star-derived labels into the node labels.
    ///
    /// `locate(coord, geom_index)` gives the location of a node inside the
    /// area of geometry `geom_index`.
    pub fn compute_labelling(
        &mut self,
        mut locate: impl FnMut(Coord<f64>, usize) -> Location,
    ) -> Result<()> {
        let ids: Vec<NodeId> = self.nodes.ids().collect();
        let mut star_labels = Vec::with_capacity(ids.len());
        for &id in &ids {
            let coord = self.nodes.node(id).coord;
            let mut labels = self.star_labels(id);
            let node_label = star::compute_labelling(&mut labels, coord, |i| locate(coord, i))?;
            self.set_star_labels(id, &labels);
            star_labels.push(node_label);
        }
        self.merge_sym_labels();
        for (&id, node_label) in ids.iter().zip(&star_labels) {
            self.nodes.node_mut(id).label.merge(node_label);
        }
        Ok(())
    }

    /// Merges the label of every directed edge's sym into its own.
    pub fn merge_sym_labels(&mut self) {
        let ids: Vec<NodeId> = self.nodes.ids().collect();
        for id in ids {
            for k in 0..self.nodes.node(id).star.len() {
                let de = self.nodes.node(id).star[k];
                let sym_label = self.dir_edges[self.sym(de).0].label;
                self.dir_edges[de.0].label.merge(&sym_label);
            }
        }
    }

    /// Fills unset positions of the star labels of `node` from its label.
    pub fn update_star_labelling(&mut self, node: NodeId) {
        let node_label = self.nodes.node(node).label;
        let mut labels = self.star_labels(node);
        star::update_labelling(&mut labels, &node_label);
        self.set_star_labels(node, &labels);
    }

    fn star_labels(&self, node: NodeId) -> Vec<Label> {
        self.nodes.node(node).star.iter().map(|de| self.dir_edges[de.0].label).collect()
    }

    fn set_star_labels(&mut self, node: NodeId, labels: &[Label]) {
        for (k, label) in labels.iter().enumerate() {
            let de = self.nodes.node(node).star[k];
            self.dir_edges[de.0].label = *label;
        }
    }

    // -----------------------------------------------------------------------
    // Result assembly
    // -----------------------------------------------------------------------

    /// Marks a directed edge and its sym as visited.
    pub fn set_visited_edge(&mut self, de: DirEdgeId, visited: bool) {
        let sym = self.sym(de);
        self.dir_edges[de.0].visited = visited;
        self.dir_edges[sym.0].visited = visited;
    }

    /// Directed edges of the star of `node` where either direction is in the
    /// result, in star order.
    pub fn result_area_edges(&self, node: NodeId) -> Vec<DirEdgeId> {
        self.nodes.node(node).star.iter().copied()
            .filter(|&de| self.dir_edges[de.0].in_result || self.dir_edges[self.sym(de).0].in_result)
            .collect()
    }

    /// Links the incoming and outgoing result area edges of every node so
    /// that `next` traces maximal result rings.
    pub fn link_result_directed_edges(&mut self) -> Result<()> {
        let ids: Vec<NodeId> = self.nodes.ids().collect();
        for id in ids {
            self.link_result_directed_edges_at(id)?;
        }
        Ok(())
    }

    fn link_result_directed_edges_at(&mut self, node: NodeId) -> Result<()> {
        let result_edges = self.result_area_edges(node);
        let mut first_out = None;
        let mut incoming: Option<DirEdgeId> = None;

        for &next_out in &result_edges {
            let next_in = self.sym(next_out);
            if !self.dir_edges[next_out.0].label.is_area() { continue }

            let out_in_result = self.dir_edges[next_out.0].in_result;
            if first_out.is_none() && out_in_result { first_out = Some(next_out) }

            match incoming {
                None => {
                    if self.dir_edges[next_in.0].in_result { incoming = Some(next_in) }
                }
                Some(inc) => {
                    if out_in_result {
                        self.dir_edges[inc.0].next = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let first = first_out.ok_or(TopologyError::MissingOutgoingEdge(self.nodes.node(node).coord))?;
            self.dir_edges[inc.0].next = Some(first);
        }
        Ok(())
    }

    /// Links the edges of maximal ring `ring` at `node` so that `next_min`
    /// traces the minimal rings it decomposes into.
    ///
    /// The star is scanned clockwise, so each incoming edge links to the
    /// first outgoing ring edge clockwise of it.
    pub fn link_minimal_directed_edges(&mut self, node: NodeId, ring: RingId) -> Result<()> {
        let result_edges = self.result_area_edges(node);
        let mut first_out = None;
        let mut incoming: Option<DirEdgeId> = None;

        for &next_out in result_edges.iter().rev() {
            let next_in = self.sym(next_out);
            let out_in_ring = self.dir_edges[next_out.0].edge_ring == Some(ring);
            if first_out.is_none() && out_in_ring { first_out = Some(next_out) }

            match incoming {
                None => {
                    if self.dir_edges[next_in.0].edge_ring == Some(ring) { incoming = Some(next_in) }
                }
                Some(inc) => {
                    if out_in_ring {
                        self.dir_edges[inc.0].next_min = Some(next_out);
                        incoming = None;
                    }
                }
            }
        }

        if let Some(inc) = incoming {
            let first = first_out.ok_or(TopologyError::MissingOutgoingEdge(self.nodes.node(node).coord))?;
            self.dir_edges[inc.0].next_min = Some(first);
        }
        Ok(())
    }

    /// Number of outgoing edges of `node` that belong to maximal ring `ring`.
    pub fn outgoing_degree_in_ring(&self, node: NodeId, ring: RingId) -> usize {
        self.nodes.node(node).star.iter()
            .filter(|de| self.dir_edges[de.0].edge_ring == Some(ring))
            .count()
    }

    /// Number of outgoing edges of `node` in the result.
    pub fn outgoing_result_degree(&self, node: NodeId) -> usize {
        self.nodes.node(node).star.iter()
            .filter(|de| self.dir_edges[de.0].in_result)
            .count()
    }

    /// Marks every line edge at every node as covered or not by the result
    /// area, by walking each star between result area edges.
    pub fn find_covered_line_edges(&mut self) {
        let ids: Vec<NodeId> = self.nodes.ids().collect();
        for id in ids {
            self.find_covered_line_edges_at(id);
        }
    }

    fn find_covered_line_edges_at(&mut self, node: NodeId) {
        let star = self.nodes.node(node).star.clone();

        let mut start = None;
        for &de in &star {
            if self.dir_edges[de.0].is_line_edge() { continue }
            if self.dir_edges[de.0].in_result { start = Some(Location::Interior); break }
            if self.dir_edges[self.sym(de).0].in_result { start = Some(Location::Exterior); break }
        }
        let Some(mut current) = start else { return };

        for &de in &star {
            let d = &self.dir_edges[de.0];
            if d.is_line_edge() {
                let e = d.edge;
                self.edges[e.0].covered = Some(current == Location::Interior);
            } else {
                if d.in_result { current = Location::Exterior }
                if self.dir_edges[self.sym(de).0].in_result { current = Location::Interior }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Debugging
    // -----------------------------------------------------------------------

    /// A JSON dump of nodes and edges with their labels.
    pub fn to_json(&self) -> Value {
        let nodes: Vec<Value> = self.nodes.iter().map(|n| json!({
            "coord": [n.coord.x, n.coord.y],
            "label": n.label.to_string(),
            "degree": n.star.len(),
        })).collect();
        let edges: Vec<Value> = self.edges.iter().map(|e| json!({
            "coords": e.coords.iter().map(|c| [c.x, c.y]).collect::<Vec<_>>(),
            "label": e.label.to_string(),
            "depth": e.depth,
            "in_result": e.in_result,
        })).collect();
        json!({ "nodes": nodes, "edges": edges })
    }
}

fn directed(
    edge: EdgeId, forward: bool, origin: NodeId, sym: DirEdgeId,
    p0: Coord<f64>, p1: Coord<f64>, label: Label,
) -> DirectedEdge {
    DirectedEdge {
        edge,
        forward,
        origin,
        sym,
        p0,
        p1,
        quadrant: Quadrant::between(p0, p1).unwrap_or(Quadrant::NorthEast),
        label,
        in_result: false,
        visited: false,
        edge_ring: None,
        min_edge_ring: None,
        next: None,
        next_min: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    /// Build a single triangle ring and verify the directed-edge linkage.
    #[test]
    fn triangle() {
        let mut graph = PlanarGraph::new();
        let label = Label::area(0, Location::Boundary, Location::Exterior, Location::Interior);
        let a = coord! { x: 0.0, y: 0.0 };
        let b = coord! { x: 1.0, y: 0.0 };
        let c = coord! { x: 0.5, y: 1.0 };
        graph.add_edges([
            Edge::new(vec![a, b], label),
            Edge::new(vec![b, c], label),
            Edge::new(vec![c, a], label),
        ]);

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 3);
        assert_eq!(graph.num_dir_edges(), 6);

        let na = graph.nodes.find(a).unwrap();
        assert_eq!(graph.node(na).star.len(), 2);
        for de in graph.dir_edge_ids() {
            assert_eq!(graph.sym(graph.sym(de)), de);
            assert_eq!(graph.dest(de), graph.dir_edge(graph.sym(de)).origin);
        }

        let rev = graph.dir_edge(DirEdgeId(1));
        assert!(!rev.forward);
        assert_eq!(rev.label.location_at(0, Position::Left), Some(Location::Interior));
    }

    #[test]
    fn node_map_is_unique_and_ordered() {
        let mut nodes = NodeMap::new();
        let b = nodes.add_node(coord! { x: 1.0, y: 0.0 });
        let a = nodes.add_node(coord! { x: 0.0, y: 5.0 });
        assert_eq!(nodes.add_node(coord! { x: 1.0, y: 0.0 }), b);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes.ids().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn boundary_toggles_under_mod2() {
        let mut nodes = NodeMap::new();
        let n = nodes.add_node(coord! { x: 0.0, y: 0.0 });
        nodes.node_mut(n).set_label_boundary(0);
        assert_eq!(nodes.node(n).label.location(0), Some(Location::Boundary));
        nodes.node_mut(n).set_label_boundary(0);
        assert_eq!(nodes.node(n).label.location(0), Some(Location::Interior));
        assert!(nodes.node(n).is_isolated());
    }
}
