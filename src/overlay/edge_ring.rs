use geo::{BoundingRect, Contains, Coord, LineString, Polygon, Rect};
use geograph::{DirEdgeId, Location, PlanarGraph, RingId, TopologyError};

use crate::algorithm::{is_ccw, locate_point_in_ring};
use crate::error::Result;

/// Which `next` links a ring follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RingKind {
    /// Follows `next`; may touch itself at nodes of degree > 2.
    Maximal,
    /// Follows `next_min`; simple.
    Minimal,
}

/// A closed ring of result directed edges.
#[derive(Clone, Debug)]
pub(crate) struct EdgeRing {
    pub start:   DirEdgeId,
    pub kind:    RingKind,
    pub edges:   Vec<DirEdgeId>,
    pub ring:    LineString<f64>,
    pub is_hole: bool,
    pub shell:   Option<RingId>,
    pub holes:   Vec<RingId>,
}

impl EdgeRing {
    pub fn envelope(&self) -> Option<Rect<f64>> { self.ring.bounding_rect() }
}

/// Arena of the rings built while assembling result polygons.
#[derive(Clone, Debug, Default)]
pub(crate) struct EdgeRings {
    rings: Vec<EdgeRing>,
}

impl EdgeRings {
    #[inline] pub fn get(&self, id: RingId) -> &EdgeRing { &self.rings[id.0] }

    /// Walks the ring starting at `start`, assigning every directed edge on
    /// the way to the new ring.
    pub fn build(&mut self, graph: &mut PlanarGraph, start: DirEdgeId, kind: RingKind) -> Result<RingId> {
        let id = RingId(self.rings.len());
        let mut edges = Vec::new();
        let mut pts = Vec::new();
        let mut de = start;

        loop {
            let d = graph.dir_edge(de);
            let assigned = match kind {
                RingKind::Maximal => d.edge_ring,
                RingKind::Minimal => d.min_edge_ring,
            };
            if assigned == Some(id) {
                return Err(TopologyError::RingRevisit(d.coordinate()).into());
            }
            let next = match kind {
                RingKind::Maximal => d.next,
                RingKind::Minimal => d.next_min,
            };
            add_points(&mut pts, &graph.edge_of(de).coords, d.forward, edges.is_empty());
            let at = d.coordinate();
            edges.push(de);

            let d = graph.dir_edge_mut(de);
            match kind {
                RingKind::Maximal => d.edge_ring = Some(id),
                RingKind::Minimal => d.min_edge_ring = Some(id),
            }

            de = next.ok_or(TopologyError::MissingOutgoingEdge(at))?;
            if de == start { break }
        }

        let is_hole = is_ccw(&pts);
        let ring = LineString::new(pts);
        self.rings.push(EdgeRing { start, kind, edges, ring, is_hole, shell: None, holes: Vec::new() });
        Ok(id)
    }

    /// Twice the largest number of this ring's edges leaving one of its
    /// nodes.  Anything above 2 means the ring touches itself.
    pub fn max_node_degree(&self, graph: &PlanarGraph, id: RingId) -> usize {
        let ring = self.get(id);
        let max = ring.edges.iter()
            .map(|&de| graph.outgoing_degree_in_ring(graph.dir_edge(de).origin, id))
            .max()
            .unwrap_or(0);
        max * 2
    }

    /// Splits a self-touching maximal ring into its minimal rings.
    pub fn build_minimal_rings(&mut self, graph: &mut PlanarGraph, id: RingId) -> Result<Vec<RingId>> {
        let edges = self.get(id).edges.clone();
        for &de in &edges {
            let node = graph.dir_edge(de).origin;
            graph.link_minimal_directed_edges(node, id)?;
        }
        let mut minimal = Vec::new();
        for de in edges {
            if graph.dir_edge(de).min_edge_ring.is_none() {
                minimal.push(self.build(graph, de, RingKind::Minimal)?);
            }
        }
        Ok(minimal)
    }

    /// Marks the edges of a ring as part of the result.
    pub fn set_in_result(&self, graph: &mut PlanarGraph, id: RingId) {
        for &de in &self.get(id).edges {
            let e = graph.dir_edge(de).edge;
            graph.edge_mut(e).in_result = true;
        }
    }

    pub fn set_shell(&mut self, hole: RingId, shell: RingId) {
        self.rings[hole.0].shell = Some(shell);
        self.rings[shell.0].holes.push(hole);
    }

    /// The shell among `shells` with the smallest envelope that contains
    /// `hole`.
    ///
    /// Containment is decided by a hole vertex that does not lie on the
    /// candidate shell, so holes touching their shell at a vertex or along
    /// an edge are still placed.
    pub fn find_containing_shell(&self, hole: RingId, shells: &[RingId]) -> Option<RingId> {
        let test = self.get(hole);
        let test_env = test.envelope()?;
        let mut min: Option<(RingId, Rect<f64>)> = None;

        for &id in shells {
            let shell = self.get(id);
            let Some(env) = shell.envelope() else { continue };
            if !env.contains(&test_env) { continue }

            let located = test.ring.coords()
                .map(|&p| locate_point_in_ring(p, &shell.ring.0))
                .find(|&loc| loc != Location::Boundary);
            if located != Some(Location::Interior) { continue }

            if min.is_none_or(|(_, min_env)| min_env.contains(&env)) {
                min = Some((id, env));
            }
        }
        min.map(|(id, _)| id)
    }

    pub fn to_polygon(&self, shell: RingId) -> Polygon<f64> {
        let ring = self.get(shell);
        let holes = ring.holes.iter().map(|&h| self.get(h).ring.clone()).collect();
        Polygon::new(ring.ring.clone(), holes)
    }
}

/// Appends the points of an edge in the direction it is traversed.  Every
/// edge but the first skips its start point, which closed the previous one.
fn add_points(pts: &mut Vec<Coord<f64>>, coords: &[Coord<f64>], forward: bool, first: bool) {
    let skip = usize::from(!first);
    if forward {
        pts.extend(coords.iter().skip(skip).copied());
    } else {
        pts.extend(coords.iter().rev().skip(skip).copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn points_follow_traversal_direction() {
        let a = [coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
        let b = [coord! { x: 0.0, y: 1.0 }, coord! { x: 0.5, y: 0.5 }, coord! { x: 1.0, y: 0.0 }];
        let mut pts = Vec::new();
        add_points(&mut pts, &a, true, true);
        add_points(&mut pts, &b, false, false);
        assert_eq!(pts, vec![a[0], a[1], b[1], b[0]]);
    }
}
