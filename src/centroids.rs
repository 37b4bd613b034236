use geo::algorithm::bounding_rect::BoundingRect;
use geo::algorithm::centroid::Centroid;
use geo::{Geometry, Rect};
use geojson::{Geometry as GeoJsonGeometry, Value as GeoJsonValue};
use serde_json::Value;

use crate::combiner::ParcelFeature;
use crate::error::{CombineError, Result};

// Reads the `geometry` member of a collected feature. Only used for derived
// outputs, the combined collection keeps the original JSON.
pub fn parse_geometry(feature: &Value) -> Option<Geometry<f64>> {
    let geometry = feature.get("geometry")?;
    if geometry.is_null() {
        return None;
    }
    let geojson_geometry: GeoJsonGeometry = serde_json::from_value(geometry.clone()).ok()?;
    Geometry::try_from(geojson_geometry).ok()
}

/// One Point feature per parcel, placed at the parcel centroid and carrying
/// the parcel's properties unchanged. Parcels without a usable geometry are
/// skipped.
pub fn centroid_features(features: &[Value]) -> Result<Vec<Value>> {
    let mut points = Vec::with_capacity(features.len());

    for (index, feature) in features.iter().enumerate() {
        let Some(centroid) = parse_geometry(feature).and_then(|g| g.centroid()) else {
            log::warn!("No centroid for feature {}, skipping", index);
            continue;
        };

        let point = GeoJsonGeometry::new(GeoJsonValue::from(&centroid));
        let geometry =
            serde_json::to_value(&point).map_err(|source| CombineError::Serialize { source })?;
        let properties = feature.get("properties").cloned().unwrap_or(Value::Null);

        points.push(
            ParcelFeature {
                geometry,
                properties,
            }
            .into_value(),
        );
    }

    log::info!("Derived {} centroids from {} features", points.len(), features.len());
    Ok(points)
}

// Overall bounding rectangle of every readable geometry
pub fn extent(features: &[Value]) -> Option<Rect<f64>> {
    let mut min_x = f64::MAX;
    let mut min_y = f64::MAX;
    let mut max_x = f64::MIN;
    let mut max_y = f64::MIN;
    let mut found = false;

    for geometry in features.iter().filter_map(parse_geometry) {
        if let Some(bbox) = geometry.bounding_rect() {
            min_x = min_x.min(bbox.min().x);
            min_y = min_y.min(bbox.min().y);
            max_x = max_x.max(bbox.max().x);
            max_y = max_y.max(bbox.max().y);
            found = true;
        }
    }

    found.then(|| Rect::new((min_x, min_y), (max_x, max_y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(x: f64, y: f64, size: f64, name: &str) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [x, y], [x + size, y], [x + size, y + size], [x, y + size], [x, y]
                ]]
            },
            "properties": { "name": name }
        })
    }

    #[test]
    fn centroid_of_square_is_its_middle() {
        let points = centroid_features(&[square(0.0, 0.0, 2.0, "a")]).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0],
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [1.0, 1.0] },
                "properties": { "name": "a" }
            })
        );
    }

    #[test]
    fn features_without_geometry_are_skipped() {
        let features = vec![
            json!({ "type": "Feature", "geometry": null, "properties": {} }),
            json!({ "type": "Feature", "geometry": { "type": "Blob" }, "properties": {} }),
            json!({ "unrelated": true }),
            square(10.0, 10.0, 4.0, "kept"),
        ];
        let points = centroid_features(&features).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0]["properties"]["name"], "kept");
        assert_eq!(points[0]["geometry"]["coordinates"], json!([12.0, 12.0]));
    }

    #[test]
    fn extent_spans_all_parcels() {
        let features = vec![square(0.0, 0.0, 1.0, "a"), square(5.0, -3.0, 2.0, "b")];
        let rect = extent(&features).unwrap();
        assert_eq!((rect.min().x, rect.min().y), (0.0, -3.0));
        assert_eq!((rect.max().x, rect.max().y), (7.0, 1.0));
    }

    #[test]
    fn extent_of_nothing_is_none() {
        assert!(extent(&[]).is_none());
        assert!(extent(&[json!({ "geometry": null })]).is_none());
    }
}
