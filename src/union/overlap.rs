use std::collections::BTreeSet;

use geo::{BoundingRect, Contains, Coord, Geometry, Intersects, Line, LinesIter, Polygon, Rect};
use geograph::CoordKey;
use tracing::trace;

use crate::error::Result;
use crate::geom::{build_geometry, components, polygons};
use crate::union::{ClassicUnion, UnionStrategy};

/// Unions two polygonal geometries by unioning only the components that
/// meet the overlap of their envelopes.
///
/// Components outside the overlap envelope are copied to the result as
/// they are.  That is only valid if the union leaves every segment crossing
/// the envelope border untouched, so those segments are compared before and
/// after; on any change the full union is computed instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlapUnion<S = ClassicUnion> {
    inner: S,
}

impl<S: UnionStrategy> OverlapUnion<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// The union, and whether the overlap shortcut could be used.
    pub fn union_checked(&self, g0: &Geometry<f64>, g1: &Geometry<f64>) -> Result<(Geometry<f64>, bool)> {
        let Some(env) = overlap_envelope(g0, g1) else {
            let mut parts = components(g0);
            parts.extend(components(g1));
            return Ok((build_geometry(parts), true));
        };

        let mut disjoint = Vec::new();
        let overlap0 = extract_by_envelope(&env, g0, &mut disjoint);
        let overlap1 = extract_by_envelope(&env, g1, &mut disjoint);
        let union = self.union_full(&overlap0, &overlap1)?;

        let mut before = border_segments(g0, &env);
        before.extend(border_segments(g1, &env));
        if !same_segments(&before, &border_segments(&union, &env)) {
            trace!("border segments changed, computing the full union");
            return Ok((self.union_full(g0, g1)?, false));
        }

        if disjoint.is_empty() { return Ok((union, true)) }
        disjoint.extend(components(&union));
        Ok((build_geometry(disjoint), true))
    }

    fn union_full(&self, g0: &Geometry<f64>, g1: &Geometry<f64>) -> Result<Geometry<f64>> {
        if components(g0).is_empty() && components(g1).is_empty() {
            return Ok(g0.clone());
        }
        self.inner.union(g0, g1)
    }
}

impl<S: UnionStrategy> UnionStrategy for OverlapUnion<S> {
    fn union(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Geometry<f64>> {
        self.union_checked(a, b).map(|(union, _)| union)
    }

    fn is_floating_precision(&self) -> bool { self.inner.is_floating_precision() }
}

fn overlap_envelope(g0: &Geometry<f64>, g1: &Geometry<f64>) -> Option<Rect<f64>> {
    let (e0, e1) = (g0.bounding_rect()?, g1.bounding_rect()?);
    if !e0.intersects(&e1) { return None }
    let min = Coord { x: e0.min().x.max(e1.min().x), y: e0.min().y.max(e1.min().y) };
    let max = Coord { x: e0.max().x.min(e1.max().x), y: e0.max().y.min(e1.max().y) };
    Some(Rect::new(min, max))
}

/// The components of `geom` whose envelope meets `env`; the others go to
/// `disjoint`.
fn extract_by_envelope(env: &Rect<f64>, geom: &Geometry<f64>, disjoint: &mut Vec<Geometry<f64>>) -> Geometry<f64> {
    let (near, far): (Vec<_>, Vec<_>) = components(geom).into_iter()
        .partition(|g| g.bounding_rect().is_some_and(|e| e.intersects(env)));
    disjoint.extend(far);
    build_geometry(near)
}

/// A segment with its end points in coordinate order, so that rings of
/// either orientation compare equal.
type Segment = (CoordKey, CoordKey);

fn segment(seg: &Line<f64>) -> Segment {
    let (a, b) = (CoordKey(seg.start), CoordKey(seg.end));
    if a <= b { (a, b) } else { (b, a) }
}

/// Segments with an end point on or in `env` that are not properly inside
/// it.
fn border_segments(geom: &Geometry<f64>, env: &Rect<f64>) -> Vec<Segment> {
    polygons(geom).iter()
        .flat_map(Polygon::lines_iter)
        .filter(|seg| is_border(env, seg))
        .map(|seg| segment(&seg))
        .collect()
}

fn is_border(env: &Rect<f64>, seg: &Line<f64>) -> bool {
    let touches = env.intersects(&seg.start) || env.intersects(&seg.end);
    let inside = env.contains(&seg.start) && env.contains(&seg.end);
    touches && !inside
}

fn same_segments(before: &[Segment], after: &[Segment]) -> bool {
    if before.len() != after.len() { return false }
    let index: BTreeSet<&Segment> = before.iter().collect();
    after.iter().all(|seg| index.contains(seg))
}
