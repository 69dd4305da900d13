use geo::{BoundingRect, Geometry, Rect};
use rstar::AABB;

/// Bounding rectangle of a geometry, `None` if it is empty.
#[inline]
pub fn envelope(geom: &Geometry<f64>) -> Option<Rect<f64>> {
    geom.bounding_rect()
}

/// The rectangle as an R-tree envelope.
#[inline]
pub fn to_aabb(r: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(r.min().into(), r.max().into())
}
