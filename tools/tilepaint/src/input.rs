use anyhow::{Context, Result};
use geo::Coord;
use geojson::{Feature, GeoJson, JsonObject, JsonValue, Value};
use std::path::Path;
use tilepaint_core::{GeometryKind, RawFeature, Tags};

/// Read map features from a GeoJSON file.
/// Accepts a Geometry, a Feature or a FeatureCollection.
pub fn read_features(path: &Path) -> Result<Vec<RawFeature>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    let geojson: GeoJson = content
        .parse()
        .with_context(|| format!("Failed to parse GeoJSON from: {}", path.display()))?;

    Ok(features_from_geojson(geojson))
}

pub fn features_from_geojson(geojson: GeoJson) -> Vec<RawFeature> {
    match geojson {
        GeoJson::Geometry(geom) => split_geometry(&geom.value, &Tags::new(), None),
        GeoJson::Feature(feature) => feature_to_raw(feature),
        GeoJson::FeatureCollection(fc) => fc.features.into_iter().flat_map(feature_to_raw).collect(),
    }
}

fn feature_to_raw(feature: Feature) -> Vec<RawFeature> {
    let Some(geometry) = feature.geometry else {
        log::debug!("Skipping feature without geometry");
        return Vec::new();
    };

    let properties = feature.properties.unwrap_or_default();
    let tags = properties_to_tags(&properties);
    let label = string_property(&properties, "label").or_else(|| string_property(&properties, "name"));

    split_geometry(&geometry.value, &tags, label)
}

/// Properties in document order; nested values and nulls are dropped
fn properties_to_tags(properties: &JsonObject) -> Tags {
    properties
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                JsonValue::String(s) => s.clone(),
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key.clone(), value))
        })
        .collect()
}

fn string_property<'a>(properties: &'a JsonObject, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(JsonValue::as_str)
}

/// Multi-part geometries become one feature per part sharing the tags.
/// Polygons keep only their exterior ring.
fn split_geometry(value: &Value, tags: &Tags, label: Option<&str>) -> Vec<RawFeature> {
    let parts: Vec<(GeometryKind, Vec<Coord<f64>>)> = match value {
        Value::Point(p) => vec![(GeometryKind::Point, vec![position_to_coord(p)])],
        Value::MultiPoint(points) => points
            .iter()
            .map(|p| (GeometryKind::Point, vec![position_to_coord(p)]))
            .collect(),
        Value::LineString(line) => vec![(GeometryKind::LineString, positions_to_coords(line))],
        Value::MultiLineString(lines) => lines
            .iter()
            .map(|line| (GeometryKind::LineString, positions_to_coords(line)))
            .collect(),
        Value::Polygon(rings) => rings
            .first()
            .map(|exterior| (GeometryKind::Polygon, positions_to_coords(exterior)))
            .into_iter()
            .collect(),
        Value::MultiPolygon(polygons) => polygons
            .iter()
            .filter_map(|rings| rings.first())
            .map(|exterior| (GeometryKind::Polygon, positions_to_coords(exterior)))
            .collect(),
        Value::GeometryCollection(geometries) => {
            return geometries
                .iter()
                .flat_map(|g| split_geometry(&g.value, tags, label))
                .collect();
        }
    };

    parts
        .into_iter()
        .map(|(geometry, coords)| RawFeature {
            geometry,
            coords,
            tags: tags.clone(),
            label: label.map(str::to_string),
        })
        .collect()
}

fn position_to_coord(position: &[f64]) -> Coord<f64> {
    Coord {
        x: position.first().copied().unwrap_or(0.0),
        y: position.get(1).copied().unwrap_or(0.0),
    }
}

fn positions_to_coords(positions: &[Vec<f64>]) -> Vec<Coord<f64>> {
    positions.iter().map(|p| position_to_coord(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<RawFeature> {
        features_from_geojson(json.parse().unwrap())
    }

    #[test]
    fn test_feature_collection() {
        let features = parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [13.4, 52.5] },
                        "properties": { "place": "city", "name": "Berlin", "population": 3645000 }
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] },
                        "properties": { "highway": "primary", "oneway": true, "ref": null }
                    }
                ]
            }"#,
        );

        assert_eq!(features.len(), 2);

        let city = &features[0];
        assert_eq!(city.geometry, GeometryKind::Point);
        assert_eq!(city.coords, vec![Coord { x: 13.4, y: 52.5 }]);
        assert_eq!(city.label(), Some("Berlin"));
        assert_eq!(
            city.tags.iter().collect::<Vec<_>>(),
            vec![("place", "city"), ("name", "Berlin"), ("population", "3645000")]
        );

        let road = &features[1];
        assert_eq!(road.geometry, GeometryKind::LineString);
        assert_eq!(road.tags.first_value("oneway"), Some("true"));
        assert_eq!(road.tags.first_value("ref"), None);
        assert_eq!(road.label(), None);
    }

    #[test]
    fn test_label_property_wins() {
        let features = parse(
            r#"{
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [0, 0] },
                "properties": { "name": "Official", "label": "Shown" }
            }"#,
        );
        assert_eq!(features[0].label(), Some("Shown"));
    }

    #[test]
    fn test_multi_geometries_split() {
        let features = parse(
            r#"{
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0, 0], [1, 0], [1, 1], [0, 0]], [[0.2, 0.2], [0.4, 0.2], [0.3, 0.3], [0.2, 0.2]]],
                        [[[5, 5], [6, 5], [6, 6], [5, 5]]]
                    ]
                },
                "properties": { "natural": "water" }
            }"#,
        );

        assert_eq!(features.len(), 2);
        for feature in &features {
            assert_eq!(feature.geometry, GeometryKind::Polygon);
            assert_eq!(feature.coords.len(), 4);
            assert_eq!(feature.tags.first_value("natural"), Some("water"));
        }
    }

    #[test]
    fn test_missing_geometry_is_skipped() {
        let features = parse(r#"{ "type": "Feature", "geometry": null, "properties": {} }"#);
        assert!(features.is_empty());
    }
}
