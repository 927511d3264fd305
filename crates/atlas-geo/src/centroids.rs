use crate::boundaries::dept_code;
use geojson::FeatureCollection;
use serde::Serialize;

/// Label anchor of one département
///
/// Coordinates are absent when the feature has no usable geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeptCentroid {
    pub dept: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl DeptCentroid {
    pub fn is_located(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// Representative interior point of every coded boundary feature
///
/// Features without a `code` property are skipped with a warning.
#[cfg(feature = "geometry")]
pub fn compute_centroids(collection: &FeatureCollection) -> Vec<DeptCentroid> {
    use crate::geometry::representative_point;

    let mut centroids = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        let Some(dept) = dept_code(feature) else {
            tracing::warn!("Skipping boundary feature without a département code");
            continue;
        };

        let point = match &feature.geometry {
            Some(geometry) => {
                let point = representative_point(&geometry.value);
                if point.is_none() {
                    tracing::warn!("Could not place a point inside département {}", dept);
                }
                point
            }
            None => {
                tracing::warn!("Département {} has no geometry", dept);
                None
            }
        };

        centroids.push(DeptCentroid {
            dept,
            lat: point.map(|(_, lat)| lat),
            lon: point.map(|(lon, _)| lon),
        });
    }

    log_extent(&centroids);
    centroids
}

#[cfg(not(feature = "geometry"))]
pub fn compute_centroids(collection: &FeatureCollection) -> Vec<DeptCentroid> {
    tracing::warn!(
        "Built without the `geometry` feature; no points computed for {} features",
        collection.features.len()
    );
    Vec::new()
}

#[cfg(feature = "geometry")]
fn log_extent(centroids: &[DeptCentroid]) {
    let located: Vec<(f64, f64)> = centroids
        .iter()
        .filter_map(|c| Some((c.lat?, c.lon?)))
        .collect();
    if located.is_empty() {
        return;
    }

    let (lat_min, lat_max) = bounds(located.iter().map(|&(lat, _)| lat));
    let (lon_min, lon_max) = bounds(located.iter().map(|&(_, lon)| lon));
    tracing::info!(
        "Computed {} points (lat {:.2}..{:.2}, lon {:.2}..{:.2})",
        located.len(),
        lat_min,
        lat_max,
        lon_min,
        lon_max
    );
}

#[cfg(feature = "geometry")]
fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

#[cfg(all(test, feature = "geometry"))]
mod tests {
    use super::*;
    use crate::boundaries::parse_boundaries;

    #[test]
    fn test_compute_centroids() {
        let collection = parse_boundaries(
            r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"code": "01"},
                 "geometry": {"type": "Polygon", "coordinates": [[[5.0, 46.0], [6.0, 46.0], [6.0, 47.0], [5.0, 47.0], [5.0, 46.0]]]}},
                {"type": "Feature", "properties": {"code": "02"}, "geometry": null},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1.0, 1.0]}}
            ]
        }"#,
        )
        .unwrap();

        let centroids = compute_centroids(&collection);
        assert_eq!(centroids.len(), 2);

        let ain = &centroids[0];
        assert_eq!(ain.dept, "01");
        assert!(ain.is_located());
        let (lat, lon) = (ain.lat.unwrap(), ain.lon.unwrap());
        assert!((46.0..=47.0).contains(&lat));
        assert!((5.0..=6.0).contains(&lon));

        assert_eq!(centroids[1].dept, "02");
        assert!(!centroids[1].is_located());
    }

    #[test]
    fn test_empty_collection() {
        let collection = parse_boundaries(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(compute_centroids(&collection).is_empty());
    }
}
