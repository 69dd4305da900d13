use geo::{Coord, LineString, Polygon};
use geograph::{DirEdgeId, EdgeId, Location, PlanarGraph};

use crate::algorithm::locate_in_polygon;
use crate::overlay::OpCode;

/// Collects the result line edges: edges that are lines in at least one
/// input, plus (for intersections) area boundaries that touch without
/// overlapping.  Line edges covered by a result polygon are left out.
pub struct LineBuilder<'g> {
    graph:    &'g mut PlanarGraph,
    op:       OpCode,
    polygons: &'g [Polygon<f64>],
    edges:    Vec<EdgeId>,
}

impl<'g> LineBuilder<'g> {
    pub fn new(graph: &'g mut PlanarGraph, op: OpCode, polygons: &'g [Polygon<f64>]) -> Self {
        Self { graph, op, polygons, edges: Vec::new() }
    }

    pub fn build(mut self) -> Vec<LineString<f64>> {
        self.find_covered_line_edges();
        let ids: Vec<DirEdgeId> = self.graph.dir_edge_ids().collect();
        for de in ids {
            self.collect_line_edge(de);
            self.collect_boundary_touch_edge(de);
        }
        self.edges.iter()
            .map(|&e| {
                let edge = self.graph.edge_mut(e);
                edge.in_result = true;
                LineString::new(edge.coords.clone())
            })
            .collect()
    }

    /// Decides for every line edge whether the result area covers it.
    /// Edges at nodes without result area edges are located directly.
    fn find_covered_line_edges(&mut self) {
        self.graph.find_covered_line_edges();
        let ids: Vec<DirEdgeId> = self.graph.dir_edge_ids().collect();
        for de in ids {
            let d = self.graph.dir_edge(de);
            let e = d.edge;
            if !d.is_line_edge() || self.graph.edge(e).covered.is_some() { continue }
            let covered = is_covered(d.coordinate(), self.polygons);
            self.graph.edge_mut(e).covered = Some(covered);
        }
    }

    fn collect_line_edge(&mut self, de: DirEdgeId) {
        let d = self.graph.dir_edge(de);
        if !d.is_line_edge() || d.visited { return }
        let label = d.label;
        if self.op.is_result(label.location(0), label.location(1))
            && self.graph.edge(d.edge).covered != Some(true)
        {
            self.edges.push(d.edge);
            self.graph.set_visited_edge(de, true);
        }
    }

    /// Area boundaries that are in the intersection without bounding any
    /// result area: the two inputs touch along them.
    fn collect_boundary_touch_edge(&mut self, de: DirEdgeId) {
        if self.op != OpCode::Intersection { return }
        let d = self.graph.dir_edge(de);
        if d.is_line_edge() || d.visited || d.is_interior_area_edge() { return }
        if self.graph.edge(d.edge).in_result { return }

        let label = d.label;
        if self.op.is_result(label.location(0), label.location(1)) {
            self.edges.push(d.edge);
            self.graph.set_visited_edge(de, true);
        }
    }
}

pub(crate) fn is_covered(p: Coord<f64>, polygons: &[Polygon<f64>]) -> bool {
    polygons.iter().any(|poly| locate_in_polygon(p, poly) != Location::Exterior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, polygon};

    #[test]
    fn points_on_result_polygons_are_covered() {
        let polygons = [polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)]];
        assert!(is_covered(coord! { x: 1.0, y: 1.0 }, &polygons));
        assert!(is_covered(coord! { x: 2.0, y: 1.0 }, &polygons));
        assert!(!is_covered(coord! { x: 3.0, y: 1.0 }, &polygons));
        assert!(!is_covered(coord! { x: 3.0, y: 1.0 }, &[]));
    }
}
