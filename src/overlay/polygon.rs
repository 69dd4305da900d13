use geo::Polygon;
use geograph::{PlanarGraph, RingId, TopologyError};
use tracing::trace;

use crate::error::Result;
use crate::overlay::edge_ring::{EdgeRings, RingKind};

/// Assembles the result polygons from the area edges marked in-result.
///
/// Result edges are linked into maximal rings; maximal rings that touch
/// themselves are split into minimal rings.  Clockwise rings are shells,
/// counter-clockwise rings are holes.  A hole that comes from the same
/// maximal ring as a shell belongs to that shell; any other hole is
/// assigned to the smallest shell containing it.
pub struct PolygonBuilder<'g> {
    graph:      &'g mut PlanarGraph,
    rings:      EdgeRings,
    shells:     Vec<RingId>,
    free_holes: Vec<RingId>,
}

impl<'g> PolygonBuilder<'g> {
    pub fn new(graph: &'g mut PlanarGraph) -> Self {
        Self { graph, rings: EdgeRings::default(), shells: Vec::new(), free_holes: Vec::new() }
    }

    /// Builds the polygons, one per shell, in the order the shells were
    /// found.
    pub fn build(mut self) -> Result<Vec<Polygon<f64>>> {
        self.graph.link_result_directed_edges()?;
        let maximal = self.build_maximal_rings()?;
        let simple = self.build_minimal_rings(maximal)?;
        self.sort_shells_and_holes(simple);
        self.place_free_holes()?;
        Ok(self.shells.iter().map(|&shell| self.rings.to_polygon(shell)).collect())
    }

    fn build_maximal_rings(&mut self) -> Result<Vec<RingId>> {
        let mut maximal = Vec::new();
        let ids: Vec<_> = self.graph.dir_edge_ids().collect();
        for de in ids {
            let d = self.graph.dir_edge(de);
            if !d.in_result || !d.label.is_area() || d.edge_ring.is_some() { continue }
            let ring = self.rings.build(self.graph, de, RingKind::Maximal)?;
            self.rings.set_in_result(self.graph, ring);
            maximal.push(ring);
        }
        Ok(maximal)
    }

    /// Splits the self-touching maximal rings, returning the ones that
    /// needed no splitting.
    fn build_minimal_rings(&mut self, maximal: Vec<RingId>) -> Result<Vec<RingId>> {
        let mut simple = Vec::new();
        for ring in maximal {
            if self.rings.max_node_degree(self.graph, ring) <= 2 {
                simple.push(ring);
                continue;
            }
            let minimal = self.rings.build_minimal_rings(self.graph, ring)?;
            let edge_ring = self.rings.get(ring);
            trace!(start = %edge_ring.start, kind = ?edge_ring.kind, "split into {} minimal rings", minimal.len());

            match self.find_shell(&minimal)? {
                Some(shell) => {
                    let holes: Vec<_> = minimal.into_iter().filter(|&r| self.rings.get(r).is_hole).collect();
                    for hole in holes {
                        self.rings.set_shell(hole, shell);
                    }
                    self.shells.push(shell);
                }
                None => self.free_holes.extend(minimal),
            }
        }
        Ok(simple)
    }

    /// The single shell among a set of minimal rings, if any.
    fn find_shell(&self, minimal: &[RingId]) -> Result<Option<RingId>> {
        let mut shells = minimal.iter().copied().filter(|&r| !self.rings.get(r).is_hole);
        let shell = shells.next();
        if let Some(extra) = shells.next() {
            let at = self.rings.get(extra).ring.0[0];
            return Err(TopologyError::MultipleShells(at).into());
        }
        Ok(shell)
    }

    fn sort_shells_and_holes(&mut self, rings: Vec<RingId>) {
        for ring in rings {
            if self.rings.get(ring).is_hole {
                self.free_holes.push(ring);
            } else {
                self.shells.push(ring);
            }
        }
    }

    fn place_free_holes(&mut self) -> Result<()> {
        for &hole in &self.free_holes {
            if self.rings.get(hole).shell.is_some() { continue }
            let shell = self.rings.find_containing_shell(hole, &self.shells)
                .ok_or(TopologyError::UnassignedHole(self.rings.get(hole).ring.0[0]))?;
            self.rings.set_shell(hole, shell);
        }
        Ok(())
    }
}
