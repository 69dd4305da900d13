use geo::{BooleanOps, Geometry, MultiPolygon};
use tracing::warn;

use crate::error::{Error, Result};
use crate::geom::{Dimension, dimension, polygons};
use crate::overlay::{OpCode, overlay_snap_if_needed};

/// Computes the union of two geometries for a cascaded union.
pub trait UnionStrategy {
    fn union(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Geometry<f64>>;

    /// Whether inputs with disjoint envelopes may be combined into one
    /// geometry without noding them against each other.
    fn is_floating_precision(&self) -> bool;
}

impl UnionStrategy for Box<dyn UnionStrategy> {
    fn union(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Geometry<f64>> { (**self).union(a, b) }
    fn is_floating_precision(&self) -> bool { (**self).is_floating_precision() }
}

/// Unions with the overlay engine, snapping the inputs if noding fails.
///
/// If two polygonal inputs still cannot be unioned, the polygon clipping
/// of `geo` takes over.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicUnion;

impl UnionStrategy for ClassicUnion {
    fn union(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> Result<Geometry<f64>> {
        match overlay_snap_if_needed(a, b, OpCode::Union) {
            Err(Error::Topology(err)) if dimension(a) == Dimension::Area && dimension(b) == Dimension::Area => {
                warn!("polygon union failed ({err}); falling back to polygon clipping");
                Ok(Geometry::MultiPolygon(clipping_union(a, b)))
            }
            other => other,
        }
    }

    fn is_floating_precision(&self) -> bool { true }
}

fn clipping_union(a: &Geometry<f64>, b: &Geometry<f64>) -> MultiPolygon<f64> {
    let a = MultiPolygon::new(polygons(a));
    let b = MultiPolygon::new(polygons(b));
    a.union(&b)
}
