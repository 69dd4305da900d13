use geo::{Coord, LineString, Point, Polygon};
use geograph::PlanarGraph;

use crate::algorithm::is_on_line;
use crate::overlay::OpCode;
use crate::overlay::line::is_covered;

/// Collects the result points: nodes in the result that no result edge
/// passes through and that no result line or polygon covers.
///
/// Only isolated nodes are candidates, except for intersections, where two
/// inputs touching at a single point also produce one.
pub struct PointBuilder<'g> {
    graph:    &'g PlanarGraph,
    op:       OpCode,
    polygons: &'g [Polygon<f64>],
    lines:    &'g [LineString<f64>],
}

impl<'g> PointBuilder<'g> {
    pub fn new(
        graph:    &'g PlanarGraph,
        op:       OpCode,
        polygons: &'g [Polygon<f64>],
        lines:    &'g [LineString<f64>],
    ) -> Self {
        Self { graph, op, polygons, lines }
    }

    pub fn build(self) -> Vec<Point<f64>> {
        let mut points = Vec::new();
        for node in self.graph.nodes.iter() {
            if node.star.iter().any(|&de| self.graph.edge_of(de).in_result) { continue }
            if !node.star.is_empty() && self.op != OpCode::Intersection { continue }
            if !self.op.is_result(node.label.location(0), node.label.location(1)) { continue }
            if !self.is_covered(node.coord) {
                points.push(Point(node.coord));
            }
        }
        points
    }

    fn is_covered(&self, p: Coord<f64>) -> bool {
        self.lines.iter().any(|l| is_on_line(p, &l.0)) || is_covered(p, self.polygons)
    }
}
