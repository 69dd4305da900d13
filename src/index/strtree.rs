use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::marker::PhantomData;

use geo::Rect;
use rstar::{AABB, Envelope, ParentNode, RStarInsertionStrategy, RTree, RTreeNode, RTreeObject, RTreeParams};

use super::bbox::BoundingBox;
use crate::geom::envelope::to_aabb;

/// Tree parameters with a node capacity of four.
///
/// Small nodes group items roughly two by two along each axis, which keeps
/// the unions of neighbouring groups small.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmallNodeParams;

impl RTreeParams for SmallNodeParams {
    const MIN_SIZE: usize = 2;
    const MAX_SIZE: usize = 4;
    const REINSERTION_COUNT: usize = 1;
    type DefaultInsertionStrategy = RStarInsertionStrategy;
}

/// A distance between two indexed items.  It must be a metric for nearest
/// neighbour searches to be exact.
pub trait ItemDistance<T> {
    fn distance(&self, a: &T, b: &T) -> f64;
}

impl<T, F> ItemDistance<T> for F
where
    F: Fn(&T, &T) -> f64,
{
    fn distance(&self, a: &T, b: &T) -> f64 { self(a, b) }
}

/// The items of a tree, grouped as the nodes of the tree group them.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemTree<T> {
    Item(T),
    Node(Vec<ItemTree<T>>),
}

impl<T> ItemTree<T> {
    /// Number of items below this node.
    pub fn len(&self) -> usize {
        match self {
            ItemTree::Item(_) => 1,
            ItemTree::Node(children) => children.iter().map(ItemTree::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The items in tree order.
    pub fn into_items(self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(self, out: &mut Vec<T>) {
        match self {
            ItemTree::Item(item) => out.push(item),
            ItemTree::Node(children) => children.into_iter().for_each(|c| c.collect_into(out)),
        }
    }
}

/// Collects items with their bounds before the tree is packed.
///
/// Building consumes the builder, so nothing can be inserted into a packed
/// tree.
#[derive(Debug)]
pub struct StrTreeBuilder<T, P: RTreeParams = SmallNodeParams> {
    entries: Vec<BoundingBox>,
    items:   Vec<T>,
    params:  PhantomData<P>,
}

impl<T, P: RTreeParams> Default for StrTreeBuilder<T, P> {
    fn default() -> Self {
        Self { entries: Vec::new(), items: Vec::new(), params: PhantomData }
    }
}

impl<T, P: RTreeParams> StrTreeBuilder<T, P> {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, bounds: Rect<f64>, item: T) {
        self.entries.push(BoundingBox::new(self.items.len(), bounds));
        self.items.push(item);
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Packs the collected items into a static tree.
    pub fn build(self) -> StrTree<T, P> {
        StrTree {
            tree: RTree::bulk_load_with_params(self.entries),
            items: self.items,
        }
    }
}

/// A packed, read-only R-tree over items with rectangular bounds.
#[derive(Debug)]
pub struct StrTree<T, P: RTreeParams = SmallNodeParams> {
    tree:  RTree<BoundingBox, P>,
    items: Vec<T>,
}

impl<T, P: RTreeParams> StrTree<T, P> {
    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Items whose bounds intersect `bounds`.
    pub fn query(&self, bounds: &Rect<f64>) -> impl Iterator<Item = &T> + '_ {
        self.tree.locate_in_envelope_intersecting(&to_aabb(bounds)).map(|b| &self.items[b.idx()])
    }

    pub fn items_tree(&self) -> ItemTree<&T> {
        index_tree(self.tree.root()).map_items(&mut |i| Some(&self.items[i]))
    }

    /// Like [`items_tree`](Self::items_tree), giving up the tree.
    pub fn into_items_tree(self) -> ItemTree<T> {
        let shape = index_tree(self.tree.root());
        let mut items: Vec<Option<T>> = self.items.into_iter().map(Some).collect();
        shape.map_items(&mut |i| items[i].take())
    }

    /// The closest pair of distinct items.
    pub fn nearest_neighbour(&self, distance: &impl ItemDistance<T>) -> Option<(&T, &T)> {
        let root = Bound::Node(self.tree.root());
        self.nearest_pair(root, root, distance)
    }

    /// The item closest to `item`, which has bounds `bounds` and need not
    /// be in the tree.
    pub fn nearest_to<'a>(
        &'a self,
        bounds:   &Rect<f64>,
        item:     &'a T,
        distance: &impl ItemDistance<T>,
    ) -> Option<&'a T> {
        let query = Bound::Item { item, idx: None, env: to_aabb(bounds) };
        self.nearest_pair(query, Bound::Node(self.tree.root()), distance).map(|(_, b)| b)
    }

    /// Branch and bound over pairs of nodes, closest envelopes first.
    fn nearest_pair<'a>(
        &'a self,
        a: Bound<'a, T>,
        b: Bound<'a, T>,
        distance: &impl ItemDistance<T>,
    ) -> Option<(&'a T, &'a T)> {
        let mut queue = BinaryHeap::new();
        queue.extend(Pair::new(a, b, distance).map(Reverse));

        let mut best = None;
        let mut best_distance = f64::INFINITY;
        while let Some(Reverse(pair)) = queue.pop() {
            if pair.distance >= best_distance { break }
            match (pair.a, pair.b) {
                (Bound::Item { item: ia, .. }, Bound::Item { item: ib, .. }) => {
                    best_distance = pair.distance;
                    best = Some((ia, ib));
                }
                _ => self.expand(&pair, &mut queue, best_distance, distance),
            }
        }
        best
    }

    /// Queues the pairs formed by the children of the larger node of `pair`
    /// with its other member.
    fn expand<'a>(
        &'a self,
        pair:     &Pair<'a, T>,
        queue:    &mut BinaryHeap<Reverse<Pair<'a, T>>>,
        best:     f64,
        distance: &impl ItemDistance<T>,
    ) {
        let expand_first = match (pair.a, pair.b) {
            (Bound::Node(na), Bound::Node(nb)) => na.envelope().area() > nb.envelope().area(),
            (Bound::Node(_), _) => true,
            _ => false,
        };
        let (node, other) = if expand_first { (pair.a, pair.b) } else { (pair.b, pair.a) };
        let Bound::Node(node) = node else { return };

        for child in node.children() {
            let child = match child {
                RTreeNode::Leaf(b) => Bound::Item { item: &self.items[b.idx()], idx: Some(b.idx()), env: b.envelope() },
                RTreeNode::Parent(p) => Bound::Node(p),
            };
            let next = if expand_first { Pair::new(child, other, distance) } else { Pair::new(other, child, distance) };
            if let Some(next) = next.filter(|p| p.distance < best) {
                queue.push(Reverse(next));
            }
        }
    }
}

impl<T> ItemTree<T> {
    fn map_items<U>(self, f: &mut impl FnMut(T) -> Option<U>) -> ItemTree<U> {
        match self {
            ItemTree::Item(item) => match f(item) {
                Some(u) => ItemTree::Item(u),
                None => ItemTree::Node(Vec::new()),
            },
            ItemTree::Node(children) => ItemTree::Node(children.into_iter().map(|c| c.map_items(f)).collect()),
        }
    }
}

fn index_tree(node: &ParentNode<BoundingBox>) -> ItemTree<usize> {
    ItemTree::Node(node.children().iter()
        .map(|child| match child {
            RTreeNode::Leaf(b) => ItemTree::Item(b.idx()),
            RTreeNode::Parent(p) => index_tree(p),
        })
        .collect())
}

/// A member of a candidate pair: an item or a tree node.
enum Bound<'a, T> {
    Item { item: &'a T, idx: Option<usize>, env: AABB<[f64; 2]> },
    Node(&'a ParentNode<BoundingBox>),
}

impl<T> Clone for Bound<'_, T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Bound<'_, T> {}

impl<T> Bound<'_, T> {
    fn envelope(&self) -> AABB<[f64; 2]> {
        match self {
            Bound::Item { env, .. } => *env,
            Bound::Node(node) => node.envelope(),
        }
    }
}

struct Pair<'a, T> {
    a:        Bound<'a, T>,
    b:        Bound<'a, T>,
    distance: f64,
}

impl<'a, T> Pair<'a, T> {
    /// `None` for an item paired with itself.
    fn new(a: Bound<'a, T>, b: Bound<'a, T>, distance: &impl ItemDistance<T>) -> Option<Self> {
        let d = match (a, b) {
            (Bound::Item { idx: Some(i), .. }, Bound::Item { idx: Some(j), .. }) if i == j => return None,
            (Bound::Item { item: ia, .. }, Bound::Item { item: ib, .. }) => distance.distance(ia, ib),
            _ => envelope_distance(&a.envelope(), &b.envelope()),
        };
        Some(Self { a, b, distance: d })
    }
}

impl<T> PartialEq for Pair<'_, T> {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl<T> Eq for Pair<'_, T> {}

impl<T> PartialOrd for Pair<'_, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<T> Ord for Pair<'_, T> {
    fn cmp(&self, other: &Self) -> Ordering { self.distance.total_cmp(&other.distance) }
}

/// Euclidean distance between two envelopes, zero if they intersect.
fn envelope_distance(a: &AABB<[f64; 2]>, b: &AABB<[f64; 2]>) -> f64 {
    let (al, au, bl, bu) = (a.lower(), a.upper(), b.lower(), b.upper());
    let dx = (bl[0] - au[0]).max(al[0] - bu[0]).max(0.0);
    let dy = (bl[1] - au[1]).max(al[1] - bu[1]).max(0.0);
    dx.hypot(dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Point, coord};

    fn point_tree(points: &[(f64, f64)]) -> StrTree<Point<f64>> {
        let mut builder = StrTreeBuilder::new();
        for &(x, y) in points {
            let c = coord! { x: x, y: y };
            builder.insert(Rect::new(c, c), Point(c));
        }
        builder.build()
    }

    fn euclidean(a: &Point<f64>, b: &Point<f64>) -> f64 {
        (a.x() - b.x()).hypot(a.y() - b.y())
    }

    fn grid(n: usize) -> Vec<(f64, f64)> {
        (0..n * n).map(|i| ((i % n) as f64 * 3.0, (i / n) as f64 * 3.0)).collect()
    }

    #[test]
    fn query_finds_intersecting_items() {
        let tree = point_tree(&grid(10));
        let window = Rect::new(coord! { x: 2.0, y: 2.0 }, coord! { x: 7.0, y: 7.0 });
        let mut found: Vec<_> = tree.query(&window).map(|p| (p.x(), p.y())).collect();
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(found, vec![(3.0, 3.0), (3.0, 6.0), (6.0, 3.0), (6.0, 6.0)]);
    }

    #[test]
    fn items_tree_holds_every_item() {
        let tree = point_tree(&grid(7));
        let items = tree.items_tree();
        assert_eq!(items.len(), 49);
        assert!(matches!(items, ItemTree::Node(ref children) if children.len() <= 4));
        assert_eq!(tree.into_items_tree().into_items().len(), 49);
    }

    #[test]
    fn empty_tree() {
        let tree = point_tree(&[]);
        assert!(tree.items_tree().is_empty());
        assert!(tree.nearest_neighbour(&euclidean).is_none());
    }

    #[test]
    fn nearest_neighbour_skips_self_pairs() {
        let mut points = grid(6);
        points.push((10.0, 10.5));
        let tree = point_tree(&points);
        let (a, b) = tree.nearest_neighbour(&euclidean).unwrap();
        // the extra point is closer to (9, 9) and (9, 12) than grid points are to each other
        assert_eq!(euclidean(a, b), 1.0_f64.hypot(1.5));
        assert!(a.x() == 10.0 || b.x() == 10.0);
    }

    #[test]
    fn nearest_to_an_outside_item() {
        let tree = point_tree(&grid(5));
        let q = coord! { x: 7.4, y: 5.1 };
        let query = Point(q);
        let nearest = tree.nearest_to(&Rect::new(q, q), &query, &euclidean).unwrap();
        assert_eq!((nearest.x(), nearest.y()), (6.0, 6.0));
    }
}
