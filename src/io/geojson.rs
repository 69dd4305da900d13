use anyhow::{Context, Result, anyhow, bail};
use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use serde_json::{Value, json};

use crate::geom::normalize;

/// Convert a geometry to a GeoJSON geometry object.
pub fn to_geojson(geom: &Geometry<f64>) -> Value {
    match geom {
        Geometry::Point(p) => json!({ "type": "Point", "coordinates": coord_json(p.0) }),
        Geometry::MultiPoint(mp) => json!({
            "type": "MultiPoint",
            "coordinates": mp.iter().map(|p| coord_json(p.0)).collect::<Vec<_>>(),
        }),
        Geometry::LineString(ls) => json!({ "type": "LineString", "coordinates": line_json(ls) }),
        Geometry::MultiLineString(mls) => json!({
            "type": "MultiLineString",
            "coordinates": mls.iter().map(line_json).collect::<Vec<_>>(),
        }),
        Geometry::Polygon(poly) => json!({ "type": "Polygon", "coordinates": polygon_json(poly) }),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.iter().map(polygon_json).collect::<Vec<_>>(),
        }),
        Geometry::GeometryCollection(gc) => json!({
            "type": "GeometryCollection",
            "geometries": gc.iter().map(to_geojson).collect::<Vec<_>>(),
        }),
        Geometry::Line(_) | Geometry::Rect(_) | Geometry::Triangle(_) => to_geojson(&normalize(geom.clone())),
    }
}

fn coord_json(c: Coord<f64>) -> Value { json!([c.x, c.y]) }

fn line_json(ls: &LineString<f64>) -> Vec<Value> {
    ls.coords().map(|&c| coord_json(c)).collect()
}

fn polygon_json(poly: &Polygon<f64>) -> Vec<Vec<Value>> {
    // an empty polygon has no rings at all
    if poly.exterior().0.is_empty() { return Vec::new() }
    std::iter::once(poly.exterior()).chain(poly.interiors()).map(line_json).collect()
}

/// Read a geometry from GeoJSON.
///
/// Accepts a geometry object, a Feature, or a FeatureCollection, of which
/// the first feature is used.
pub fn from_geojson(value: &Value) -> Result<Geometry<f64>> {
    match value["type"].as_str() {
        Some("FeatureCollection") => {
            let first = value["features"].as_array()
                .and_then(|features| features.first())
                .ok_or_else(|| anyhow!("[from_geojson] FeatureCollection has no features"))?;
            from_geojson(first)
        }
        Some("Feature") => parse_geometry(&value["geometry"]),
        Some(_) => parse_geometry(value),
        None => bail!("[from_geojson] Missing \"type\" member"),
    }
}

fn parse_geometry(value: &Value) -> Result<Geometry<f64>> {
    let kind = value["type"].as_str()
        .ok_or_else(|| anyhow!("[from_geojson] Geometry has no type"))?;
    if kind == "GeometryCollection" {
        let members = value["geometries"].as_array()
            .ok_or_else(|| anyhow!("[from_geojson] GeometryCollection has no geometries"))?;
        let geoms = members.iter().map(parse_geometry).collect::<Result<Vec<_>>>()?;
        return Ok(Geometry::GeometryCollection(GeometryCollection::new_from(geoms)));
    }

    let coords = &value["coordinates"];
    let geom = match kind {
        "Point" => Geometry::Point(Point(parse_coord(coords)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint::new(
            parse_array(coords)?.iter().map(|c| parse_coord(c).map(Point)).collect::<Result<_>>()?
        )),
        "LineString" => Geometry::LineString(parse_line(coords)?),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString::new(
            parse_array(coords)?.iter().map(parse_line).collect::<Result<_>>()?
        )),
        "Polygon" => Geometry::Polygon(parse_polygon(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon::new(
            parse_array(coords)?.iter().map(parse_polygon).collect::<Result<_>>()?
        )),
        other => bail!("[from_geojson] Unsupported geometry type {other:?}"),
    };
    Ok(geom)
}

fn parse_array(value: &Value) -> Result<&Vec<Value>> {
    value.as_array().ok_or_else(|| anyhow!("[from_geojson] Expected an array of coordinates"))
}

fn parse_coord(value: &Value) -> Result<Coord<f64>> {
    let pair = parse_array(value)?;
    let x = pair.first().and_then(Value::as_f64)
        .ok_or_else(|| anyhow!("Invalid coordinate: x must be a number"))?;
    let y = pair.get(1).and_then(Value::as_f64)
        .ok_or_else(|| anyhow!("Invalid coordinate: y must be a number"))?;
    Ok(Coord { x, y })
}

fn parse_line(value: &Value) -> Result<LineString<f64>> {
    Ok(LineString::new(parse_array(value)?.iter().map(parse_coord).collect::<Result<_>>()?))
}

/// Rings are closed if the input left them open.
fn parse_polygon(value: &Value) -> Result<Polygon<f64>> {
    let mut rings = parse_array(value)?.iter().map(parse_line);
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(vec![]));
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}

/// Write a geometry to GeoJSON bytes, optionally pretty-printed.
pub fn write_geojson_bytes(geom: &Geometry<f64>, pretty: bool) -> Result<Vec<u8>> {
    let value = to_geojson(geom);
    let bytes = if pretty { serde_json::to_vec_pretty(&value) } else { serde_json::to_vec(&value) };
    bytes.context("Failed to serialize GeoJSON to bytes")
}

/// Read a geometry from GeoJSON bytes.
pub fn read_geojson_bytes(bytes: &[u8]) -> Result<Geometry<f64>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON bytes")?;
    from_geojson(&value)
}
