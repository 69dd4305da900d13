use std::collections::BTreeSet;

use geo::{Coord, CoordsIter, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use geograph::CoordKey;
use geograph::snap::snap_line;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geom::envelope::envelope;
use crate::overlay::{OpCode, overlay};

/// Relative size of the snap tolerance used when an overlay fails.
const SNAP_PRECISION_FACTOR: f64 = 1e-9;

/// Snaps the vertices and segments of a geometry to the vertices of another
/// one, closing the tiny gaps and slivers that make noding fail.
#[derive(Clone, Copy, Debug)]
pub struct GeometrySnapper {
    tolerance: f64,
}

impl GeometrySnapper {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    #[inline] pub fn tolerance(&self) -> f64 { self.tolerance }

    /// `geom` with every coordinate sequence snapped to the vertices of
    /// `target`.
    pub fn snap_to(&self, geom: &Geometry<f64>, target: &Geometry<f64>) -> Geometry<f64> {
        let mut keys = BTreeSet::new();
        collect_coords(target, &mut keys);
        let targets: Vec<Coord<f64>> = keys.into_iter().map(|k| k.coord()).collect();
        self.snap_geometry(geom, &targets)
    }

    /// Snaps each geometry to the other: `a` to `b`, then `b` to the snapped
    /// `a`.
    pub fn snap_pair(&self, a: &Geometry<f64>, b: &Geometry<f64>) -> (Geometry<f64>, Geometry<f64>) {
        let a = self.snap_to(a, b);
        let b = self.snap_to(b, &a);
        (a, b)
    }

    fn snap_geometry(&self, geom: &Geometry<f64>, targets: &[Coord<f64>]) -> Geometry<f64> {
        let line = |ls: &LineString<f64>| LineString::new(snap_line(&ls.0, targets, self.tolerance));
        let polygon = |p: &Polygon<f64>| Polygon::new(line(p.exterior()), p.interiors().iter().map(line).collect());
        match geom {
            Geometry::LineString(ls) => Geometry::LineString(line(ls)),
            Geometry::MultiLineString(mls) => Geometry::MultiLineString(MultiLineString::new(mls.iter().map(line).collect())),
            Geometry::Polygon(p) => Geometry::Polygon(polygon(p)),
            Geometry::MultiPolygon(mp) => Geometry::MultiPolygon(MultiPolygon::new(mp.iter().map(polygon).collect())),
            Geometry::GeometryCollection(gc) => Geometry::GeometryCollection(
                gc.iter().map(|g| self.snap_geometry(g, targets)).collect()
            ),
            Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => {
                self.snap_geometry(&crate::geom::normalize(geom.clone()), targets)
            }
            // points are left alone
            Geometry::Point(_) | Geometry::MultiPoint(_) => geom.clone(),
        }
    }
}

fn collect_coords(geom: &Geometry<f64>, keys: &mut BTreeSet<CoordKey>) {
    keys.extend(geom.coords_iter().map(CoordKey));
}

/// A snap tolerance proportional to the smaller side of the envelope.
pub fn size_based_tolerance(geom: &Geometry<f64>) -> f64 {
    envelope(geom).map_or(0.0, |env| env.width().min(env.height()) * SNAP_PRECISION_FACTOR)
}

/// The snap tolerance for overlaying `a` and `b`.
pub fn overlay_tolerance(a: &Geometry<f64>, b: &Geometry<f64>) -> f64 {
    size_based_tolerance(a).min(size_based_tolerance(b))
}

/// Computes an overlay, retrying with the inputs snapped to each other if
/// the first attempt fails with a topology error.
///
/// If the snapped retry fails too, the error of the first attempt is
/// returned.
pub fn overlay_snap_if_needed(a: &Geometry<f64>, b: &Geometry<f64>, op: OpCode) -> Result<Geometry<f64>> {
    let err = match overlay(a, b, op) {
        Err(err @ Error::Topology(_)) => err,
        other => return other,
    };
    let tolerance = overlay_tolerance(a, b);
    warn!("{op} overlay failed ({err}); retrying with snap tolerance {tolerance:e}");

    let (a, b) = GeometrySnapper::with_tolerance(tolerance).snap_pair(a, b);
    overlay(&a, &b, op).map_err(|retry| {
        debug!("snapped {op} overlay failed too: {retry}");
        err
    })
}
