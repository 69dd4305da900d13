use geo::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

use crate::geom::Dimension;

/// Rewrites the `geo` shorthand variants into the forms the overlay engine
/// understands: `Line` becomes a `LineString`, `Rect` and `Triangle` become
/// `Polygon`s.  Collections are normalized recursively.
pub fn normalize(geom: Geometry<f64>) -> Geometry<f64> {
    match geom {
        Geometry::Line(l) => Geometry::LineString(LineString::new(vec![l.start, l.end])),
        Geometry::Rect(r) => Geometry::Polygon(r.to_polygon()),
        Geometry::Triangle(t) => Geometry::Polygon(t.to_polygon()),
        Geometry::GeometryCollection(gc) => {
            Geometry::GeometryCollection(GeometryCollection::new_from(gc.into_iter().map(normalize).collect()))
        }
        other => other,
    }
}

/// The empty atomic geometry of a dimension.
///
/// `geo` has no empty `Point`; an empty `MultiPoint` stands in for it.
pub fn empty_of_dimension(dim: Dimension) -> Geometry<f64> {
    match dim {
        Dimension::False => Geometry::GeometryCollection(GeometryCollection::default()),
        Dimension::Point => Geometry::MultiPoint(MultiPoint::new(vec![])),
        Dimension::Line  => Geometry::LineString(LineString::new(vec![])),
        Dimension::Area  => Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![])),
    }
}

/// Builds the most specific geometry holding the given parts.
///
/// A single part is returned as is; several parts of one atomic type make
/// the matching multi-geometry; anything else becomes a collection.
pub fn build_geometry(mut parts: Vec<Geometry<f64>>) -> Geometry<f64> {
    if parts.len() == 1 { return parts.remove(0) }

    if parts.iter().all(|g| matches!(g, Geometry::Point(_))) && !parts.is_empty() {
        let points = parts.into_iter().filter_map(|g| Point::try_from(g).ok()).collect();
        return Geometry::MultiPoint(MultiPoint::new(points));
    }
    if parts.iter().all(|g| matches!(g, Geometry::LineString(_))) && !parts.is_empty() {
        let lines = parts.into_iter().filter_map(|g| LineString::try_from(g).ok()).collect();
        return Geometry::MultiLineString(MultiLineString::new(lines));
    }
    if parts.iter().all(|g| matches!(g, Geometry::Polygon(_))) && !parts.is_empty() {
        let polygons = parts.into_iter().filter_map(|g| Polygon::try_from(g).ok()).collect();
        return Geometry::MultiPolygon(MultiPolygon::new(polygons));
    }
    Geometry::GeometryCollection(GeometryCollection::new_from(parts))
}

/// Splits a geometry into its atomic parts, skipping empty ones.
pub fn components(geom: &Geometry<f64>) -> Vec<Geometry<f64>> {
    let mut out = Vec::new();
    collect_components(geom, &mut out);
    out
}

fn collect_components(geom: &Geometry<f64>, out: &mut Vec<Geometry<f64>>) {
    match geom {
        Geometry::Point(p) => out.push(Geometry::Point(*p)),
        Geometry::MultiPoint(mp) => out.extend(mp.iter().map(|p| Geometry::Point(*p))),
        Geometry::LineString(ls) => {
            if !ls.0.is_empty() { out.push(Geometry::LineString(ls.clone())) }
        }
        Geometry::MultiLineString(mls) => {
            out.extend(mls.iter().filter(|ls| !ls.0.is_empty()).cloned().map(Geometry::LineString));
        }
        Geometry::Polygon(p) => {
            if !p.exterior().0.is_empty() { out.push(Geometry::Polygon(p.clone())) }
        }
        Geometry::MultiPolygon(mp) => {
            out.extend(mp.iter().filter(|p| !p.exterior().0.is_empty()).cloned().map(Geometry::Polygon));
        }
        Geometry::GeometryCollection(gc) => gc.iter().for_each(|g| collect_components(g, out)),
        other => collect_components(&normalize(other.clone()), out),
    }
}

/// The polygonal parts of a geometry.
pub fn polygons(geom: &Geometry<f64>) -> Vec<Polygon<f64>> {
    components(geom).into_iter().filter_map(|g| Polygon::try_from(g).ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Rect, coord, point, polygon};

    #[test]
    fn builds_most_specific_type() {
        let a = point!(x: 0.0, y: 0.0);
        let b = point!(x: 1.0, y: 0.0);
        assert_eq!(build_geometry(vec![a.into()]), Geometry::Point(a));
        assert!(matches!(build_geometry(vec![a.into(), b.into()]), Geometry::MultiPoint(mp) if mp.0.len() == 2));

        let square = polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0)];
        assert!(matches!(
            build_geometry(vec![a.into(), square.into()]),
            Geometry::GeometryCollection(gc) if gc.len() == 2
        ));
        assert!(matches!(build_geometry(vec![]), Geometry::GeometryCollection(gc) if gc.is_empty()));
    }

    #[test]
    fn rects_become_polygons() {
        let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 1.0 });
        let Geometry::Polygon(p) = normalize(rect.into()) else { panic!("expected a polygon") };
        assert_eq!(p.exterior().0.len(), 5);
    }

    #[test]
    fn empty_results_have_the_requested_dimension() {
        use crate::geom::dimension;
        for d in [Dimension::False, Dimension::Point, Dimension::Line, Dimension::Area] {
            assert_eq!(dimension(&empty_of_dimension(d)), d);
        }
    }
}
