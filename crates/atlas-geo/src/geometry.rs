//! Conversions from GeoJSON geometry values to `geo` geometries

use geo::{
    Coord, Geometry as GeoGeometry, GeometryCollection, InteriorPoint, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use geojson::Value;

fn to_coord(position: &[f64]) -> Option<Coord> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn to_line_string(positions: &[Vec<f64>]) -> Option<LineString> {
    positions
        .iter()
        .map(|p| to_coord(p))
        .collect::<Option<Vec<_>>>()
        .map(LineString::new)
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Option<Polygon> {
    let mut rings = rings.iter().map(|ring| to_line_string(ring));
    let exterior = rings.next()??;
    let interiors = rings.collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

/// Convert a GeoJSON geometry value to a `geo` geometry
///
/// Returns `None` for positions with fewer than two or non-finite ordinates,
/// and for polygons without an exterior ring.
pub fn to_geo_geometry(value: &Value) -> Option<GeoGeometry> {
    match value {
        Value::Point(position) => to_coord(position).map(|c| GeoGeometry::Point(Point::from(c))),
        Value::MultiPoint(positions) => {
            let points = positions
                .iter()
                .map(|p| to_coord(p).map(Point::from))
                .collect::<Option<Vec<_>>>()?;
            Some(GeoGeometry::MultiPoint(MultiPoint(points)))
        }
        Value::LineString(positions) => to_line_string(positions).map(GeoGeometry::LineString),
        Value::MultiLineString(lines) => {
            let lines = lines
                .iter()
                .map(|line| to_line_string(line))
                .collect::<Option<Vec<_>>>()?;
            Some(GeoGeometry::MultiLineString(MultiLineString(lines)))
        }
        Value::Polygon(rings) => to_polygon(rings).map(GeoGeometry::Polygon),
        Value::MultiPolygon(polygons) => {
            let polygons = polygons
                .iter()
                .map(|p| to_polygon(p))
                .collect::<Option<Vec<_>>>()?;
            Some(GeoGeometry::MultiPolygon(MultiPolygon(polygons)))
        }
        Value::GeometryCollection(members) => {
            let members = members
                .iter()
                .map(|g| to_geo_geometry(&g.value))
                .collect::<Option<Vec<_>>>()?;
            Some(GeoGeometry::GeometryCollection(GeometryCollection(members)))
        }
    }
}

/// A point guaranteed to lie inside the geometry, as `(lon, lat)`
pub fn representative_point(value: &Value) -> Option<(f64, f64)> {
    let point = to_geo_geometry(value)?.interior_point()?;
    Some((point.x(), point.y()))
}
