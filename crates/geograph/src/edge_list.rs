use ahash::AHashMap;

use crate::coord::coord_bits;
use crate::edge::Edge;

/// Orientation-independent key of an edge's coordinate sequence.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct EdgeKey(Vec<(u64, u64)>);

impl EdgeKey {
    fn of(edge: &Edge) -> Self {
        let fwd: Vec<_> = edge.coords.iter().map(|&c| coord_bits(c)).collect();
        let rev: Vec<_> = fwd.iter().rev().copied().collect();
        EdgeKey(fwd.min(rev))
    }
}

/// A list of edges with constant-time lookup of an existing edge that has
/// the same coordinates in either direction.
#[derive(Clone, Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
    index: AHashMap<EdgeKey, usize>,
}

impl EdgeList {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    pub fn add(&mut self, edge: Edge) -> usize {
        let i = self.edges.len();
        self.index.insert(EdgeKey::of(&edge), i);
        self.edges.push(edge);
        i
    }

    /// Index of an edge equal to `edge` ignoring direction, if any.
    pub fn find_equal_edge(&self, edge: &Edge) -> Option<usize> {
        self.index.get(&EdgeKey::of(edge)).copied()
    }

    #[inline] pub fn get(&self, i: usize) -> &Edge { &self.edges[i] }
    #[inline] pub fn get_mut(&mut self, i: usize) -> &mut Edge { &mut self.edges[i] }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> { self.edges.iter() }
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Edge> { self.edges.iter_mut() }

    /// Replaces every collapsed edge by its two-point line edge.
    pub fn replace_collapsed(&mut self) {
        let mut changed = false;
        for e in self.edges.iter_mut().filter(|e| e.is_collapsed()) {
            *e = e.collapsed_edge();
            changed = true;
        }
        if changed {
            self.index = self.edges.iter().enumerate().map(|(i, e)| (EdgeKey::of(e), i)).collect();
        }
    }

    pub fn into_vec(self) -> Vec<Edge> { self.edges }
}
