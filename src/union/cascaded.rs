use geo::{BoundingRect, Geometry, Intersects, MultiPolygon, Polygon};
use tracing::{debug, trace};

use crate::error::Result;
use crate::geom::polygons;
use crate::index::{ItemTree, StrTreeBuilder};
use crate::union::{ClassicUnion, UnionStrategy};

/// Unions many polygons by merging spatial neighbours first.
///
/// The polygons are packed into an R-tree with small nodes; every node is
/// then reduced to one geometry by a balanced binary union of its children,
/// so each union works on nearby geometries of similar size.
///
/// ```
/// use geo::{Area, Polygon, Rect, coord};
/// use geoverlay::union::CascadedPolygonUnion;
///
/// let squares: Vec<Polygon<f64>> = (0..4)
///     .map(|i| Rect::new(coord! { x: i as f64, y: 0. }, coord! { x: i as f64 + 1.5, y: 1. }).to_polygon())
///     .collect();
/// let union = CascadedPolygonUnion::new(squares).union().unwrap();
/// assert_eq!(union.unsigned_area(), 4.5);
/// ```
pub struct CascadedPolygonUnion {
    polygons: Vec<Polygon<f64>>,
    strategy: Box<dyn UnionStrategy>,
}

impl CascadedPolygonUnion {
    pub fn new(polygons: Vec<Polygon<f64>>) -> Self {
        Self { polygons, strategy: Box::new(ClassicUnion) }
    }

    /// Uses `strategy` for every pairwise union.
    pub fn with_strategy(mut self, strategy: impl UnionStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// The union of all polygons: a polygon, a multipolygon, or an empty
    /// multipolygon if there was nothing to union.
    pub fn union(self) -> Result<Geometry<f64>> {
        let Self { polygons, strategy } = self;

        // the tree takes ownership of the input polygons
        let mut builder = StrTreeBuilder::<Polygon<f64>>::new();
        for poly in polygons {
            if let Some(bounds) = poly.bounding_rect() {
                builder.insert(bounds, poly);
            }
        }
        let total = builder.len();
        if total == 0 {
            return Ok(Geometry::MultiPolygon(MultiPolygon::new(vec![])));
        }
        debug!("cascaded union of {total} polygons");

        let tree = builder.build().into_items_tree();
        let mut unioner = Unioner { strategy: strategy.as_ref(), total, remaining: total };
        let result = unioner.union_tree(tree)?;
        Ok(result.map_or_else(|| Geometry::MultiPolygon(MultiPolygon::new(vec![])), restrict_to_polygons))
    }
}

struct Unioner<'s> {
    strategy:  &'s dyn UnionStrategy,
    total:     usize,
    remaining: usize,
}

impl Unioner<'_> {
    fn union_tree(&mut self, tree: ItemTree<Polygon<f64>>) -> Result<Option<Geometry<f64>>> {
        match tree {
            ItemTree::Item(poly) => Ok(Some(Geometry::Polygon(poly))),
            ItemTree::Node(children) => {
                let mut geoms = Vec::with_capacity(children.len());
                for child in children {
                    geoms.extend(self.union_tree(child)?);
                }
                self.binary_union(&mut geoms)
            }
        }
    }

    /// Unions the geometries by halving the list, so that both sides of
    /// every union have about the same number of inputs.
    fn binary_union(&mut self, geoms: &mut [Geometry<f64>]) -> Result<Option<Geometry<f64>>> {
        match geoms.len() {
            0 => Ok(None),
            1 => Ok(Some(std::mem::replace(&mut geoms[0], empty()))),
            n => {
                let (left, right) = geoms.split_at_mut(n / 2);
                let g0 = self.binary_union(left)?;
                let g1 = self.binary_union(right)?;
                self.union_optional(g0, g1)
            }
        }
    }

    fn union_optional(&mut self, g0: Option<Geometry<f64>>, g1: Option<Geometry<f64>>) -> Result<Option<Geometry<f64>>> {
        match (g0, g1) {
            (Some(g0), Some(g1)) => self.union_actual(&g0, &g1).map(Some),
            (g0, g1) => Ok(g0.or(g1)),
        }
    }

    fn union_actual(&mut self, g0: &Geometry<f64>, g1: &Geometry<f64>) -> Result<Geometry<f64>> {
        let disjoint = match (g0.bounding_rect(), g1.bounding_rect()) {
            (Some(e0), Some(e1)) => !e0.intersects(&e1),
            _ => true,
        };
        let union = if disjoint && self.strategy.is_floating_precision() {
            let mut parts = polygons(g0);
            parts.extend(polygons(g1));
            Geometry::MultiPolygon(MultiPolygon::new(parts))
        } else {
            self.strategy.union(g0, g1)?
        };

        self.remaining -= 1;
        trace!("remainder {} of {}", self.remaining, self.total);
        Ok(restrict_to_polygons(union))
    }
}

fn empty() -> Geometry<f64> {
    Geometry::MultiPolygon(MultiPolygon::new(vec![]))
}

/// Drops every non-polygonal component.
fn restrict_to_polygons(geom: Geometry<f64>) -> Geometry<f64> {
    let mut parts = polygons(&geom);
    if parts.len() == 1 {
        return Geometry::Polygon(parts.remove(0));
    }
    Geometry::MultiPolygon(MultiPolygon::new(parts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Area, Rect, coord};
    use std::cell::Cell;
    use std::rc::Rc;

    fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
        Rect::new(coord! { x: x, y: y }, coord! { x: x + size, y: y + size }).to_polygon()
    }

    struct Counting {
        calls: Rc<Cell<usize>>,
    }

    impl UnionStrategy for Counting {
        fn union(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Geometry<f64>> {
            self.calls.set(self.calls.get() + 1);
            ClassicUnion.union(a, b)
        }

        fn is_floating_precision(&self) -> bool { true }
    }

    #[test]
    fn overlapping_row_merges_into_one_polygon() {
        let squares = (0..10).map(|i| square(i as f64, 0.0, 1.5)).collect();
        let union = CascadedPolygonUnion::new(squares).union().unwrap();
        assert!(matches!(union, Geometry::Polygon(_)));
        assert!((union.unsigned_area() - 10.5 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn empty_input_gives_empty_multipolygon() {
        let union = CascadedPolygonUnion::new(vec![]).union().unwrap();
        assert_eq!(union, Geometry::MultiPolygon(MultiPolygon::new(vec![])));
    }

    #[test]
    fn disjoint_groups_skip_the_strategy() {
        let calls = Rc::new(Cell::new(0));
        let squares = (0..16).map(|i| square((i % 4) as f64 * 10.0, (i / 4) as f64 * 10.0, 1.0)).collect();
        let union = CascadedPolygonUnion::new(squares)
            .with_strategy(Counting { calls: calls.clone() })
            .union()
            .unwrap();
        assert_eq!(calls.get(), 0);
        assert!(matches!(&union, Geometry::MultiPolygon(mp) if mp.0.len() == 16));
        assert_eq!(union.unsigned_area(), 16.0);
    }

    #[test]
    fn overlapping_inputs_use_the_strategy() {
        let calls = Rc::new(Cell::new(0));
        let squares = vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)];
        CascadedPolygonUnion::new(squares)
            .with_strategy(Counting { calls: calls.clone() })
            .union()
            .unwrap();
        assert_eq!(calls.get(), 1);
    }
}
