use geo::{Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, Point, Polygon};
use tracing::debug;

use crate::algorithm::PointLocator;
use crate::error::Result;
use crate::geom::{build_geometry, components};
use crate::overlay::{OpCode, overlay_snap_if_needed};
use crate::union::{CascadedPolygonUnion, UnionStrategy};

/// Unions all components of a geometry into a geometry with no overlaps.
///
/// Each dimension is unioned on its own: polygons by a cascaded union,
/// lines by noding them against each other, and points by removing
/// duplicates.  Lines inside the polygons and points on the lines or
/// polygons are then dropped.
pub fn unary_union(geom: &Geometry<f64>) -> Result<Geometry<f64>> {
    UnaryUnionOp::new([geom]).union()
}

/// [`unary_union`] over several geometries at once.
pub fn unary_union_all<'a>(geoms: impl IntoIterator<Item = &'a Geometry<f64>>) -> Result<Geometry<f64>> {
    UnaryUnionOp::new(geoms).union()
}

/// The components of one or more geometries, grouped by dimension.
pub struct UnaryUnionOp {
    points:   Vec<Point<f64>>,
    lines:    Vec<LineString<f64>>,
    polygons: Vec<Polygon<f64>>,
    strategy: Option<Box<dyn UnionStrategy>>,
}

impl UnaryUnionOp {
    pub fn new<'a>(geoms: impl IntoIterator<Item = &'a Geometry<f64>>) -> Self {
        let mut op = Self { points: Vec::new(), lines: Vec::new(), polygons: Vec::new(), strategy: None };
        for part in geoms.into_iter().flat_map(components) {
            match part {
                Geometry::Point(p) => op.points.push(p),
                Geometry::LineString(ls) => op.lines.push(ls),
                Geometry::Polygon(poly) => op.polygons.push(poly),
                _ => {}
            }
        }
        op
    }

    /// Uses `strategy` for the pairwise polygon unions.
    pub fn with_strategy(mut self, strategy: impl UnionStrategy + 'static) -> Self {
        self.strategy = Some(Box::new(strategy));
        self
    }

    pub fn union(self) -> Result<Geometry<f64>> {
        debug!(points = self.points.len(), lines = self.lines.len(), polygons = self.polygons.len(), "unary union");

        let points = if self.points.is_empty() {
            None
        } else {
            Some(union_alone(MultiPoint::new(self.points).into(), MultiPoint::new(vec![]).into())?)
        };
        let lines = if self.lines.is_empty() {
            None
        } else {
            Some(union_alone(MultiLineString::new(self.lines).into(), LineString::new(vec![]).into())?)
        };
        let polygons = if self.polygons.is_empty() {
            None
        } else {
            let mut cascaded = CascadedPolygonUnion::new(self.polygons);
            if let Some(strategy) = self.strategy {
                cascaded = cascaded.with_strategy(strategy);
            }
            Some(cascaded.union()?)
        };

        let lines_and_polygons = match (lines, polygons) {
            (Some(l), Some(p)) => Some(overlay_snap_if_needed(&l, &p, OpCode::Union)?),
            (l, p) => l.or(p),
        };

        match (points, lines_and_polygons) {
            (None, None) => Ok(Geometry::GeometryCollection(GeometryCollection::default())),
            (Some(g), None) | (None, Some(g)) => Ok(g),
            (Some(points), Some(other)) => Ok(union_points_into(&points, other)),
        }
    }
}

/// Nodes and de-duplicates a geometry by overlaying it with an empty one.
fn union_alone(geom: Geometry<f64>, empty: Geometry<f64>) -> Result<Geometry<f64>> {
    overlay_snap_if_needed(&geom, &empty, OpCode::Union)
}

/// Adds the points lying outside `other` to it.
fn union_points_into(points: &Geometry<f64>, other: Geometry<f64>) -> Geometry<f64> {
    let locator = PointLocator::default();
    let exterior: Vec<Geometry<f64>> = components(points).into_iter()
        .filter(|p| match p {
            Geometry::Point(p) => !locator.intersects(p.0, &other),
            _ => false,
        })
        .collect();
    if exterior.is_empty() { return other }
    let mut parts = exterior;
    parts.extend(components(&other));
    build_geometry(parts)
}
