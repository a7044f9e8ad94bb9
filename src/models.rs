//! Wire types for the geo-data service.
//!
//! Everything here is transient: fetched fresh per navigation, never cached or
//! persisted. The upstream API is loose about field naming (`lat` vs
//! `latitude`, `area` vs `area_km2`), so the detail struct accepts both
//! spellings via serde aliases.

use serde::Deserialize;

use crate::geometry::LatLng;

/// Response envelope wrapped around every payload.
///
/// `success: false` is treated as a failed fetch even on a 2xx status.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the service considers the request fulfilled.
    pub success: bool,
    /// The actual payload.
    pub data: T,
}

/// One row of a listing endpoint: an opaque code plus its display name.
///
/// Codes are unique within their level but only resolvable together with
/// their ancestor codes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationOption {
    /// Opaque identifier, e.g. `"31"` for DKI Jakarta.
    pub code: String,
    /// Human-readable name.
    pub name: String,
}

/// Per-entity attributes returned by a detail or geo endpoint.
///
/// Coordinates and boundary payloads are only present for Province and City;
/// District and Village carry descriptive attributes only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoDetail {
    /// Display name of the entity.
    #[serde(default)]
    pub name: String,
    /// Latitude in degrees, when the service knows it.
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    /// Longitude in degrees, when the service knows it.
    #[serde(default, alias = "lng", alias = "lon")]
    pub longitude: Option<f64>,
    /// Resident population.
    #[serde(default)]
    pub population: Option<u64>,
    /// Area in square kilometres.
    #[serde(default, alias = "area")]
    pub area_km2: Option<f64>,
    /// Elevation above sea level in metres.
    #[serde(default, alias = "elevation")]
    pub elevation_m: Option<i64>,
    /// Offset from UTC in hours (WIB = 7, WITA = 8, WIT = 9).
    #[serde(default, alias = "timezone")]
    pub utc_offset: Option<i32>,
    /// Raw boundary payload: a polygon or multi-polygon, either as a nested
    /// array or as a JSON-encoded string. Left untyped so the normalizer can
    /// defend against both encodings.
    #[serde(default, alias = "polygon")]
    pub boundary: Option<serde_json::Value>,
}

impl GeoDetail {
    /// The entity's coordinate, when both components are present.
    pub fn coordinate(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng { lat, lng }),
            _ => None,
        }
    }

    /// Key/value rows for the info panel. Absent attributes render as "N/A"
    /// rather than being omitted, so the panel layout stays stable.
    pub fn info_pairs(&self) -> Vec<(&'static str, String)> {
        fn cell<T: std::fmt::Display>(value: &Option<T>) -> String {
            match value {
                Some(v) => v.to_string(),
                None => "N/A".to_string(),
            }
        }

        vec![
            ("Name", self.name.clone()),
            ("Population", cell(&self.population)),
            ("Area (km²)", cell(&self.area_km2)),
            ("Elevation (m)", cell(&self.elevation_m)),
            (
                "Timezone",
                match self.utc_offset {
                    Some(offset) => format!("UTC{offset:+}"),
                    None => "N/A".to_string(),
                },
            ),
            (
                "Coordinate",
                match self.coordinate() {
                    Some(c) => format!("{:.5}, {:.5}", c.lat, c.lng),
                    None => "N/A".to_string(),
                },
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_accepts_short_field_names() {
        let detail: GeoDetail = serde_json::from_value(json!({
            "name": "DKI Jakarta",
            "lat": -6.2,
            "lng": 106.8,
            "area": 664.0,
        }))
        .unwrap();
        assert_eq!(detail.name, "DKI Jakarta");
        assert_eq!(detail.coordinate().unwrap().lat, -6.2);
        assert_eq!(detail.area_km2, Some(664.0));
    }

    #[test]
    fn detail_accepts_long_field_names() {
        let detail: GeoDetail = serde_json::from_value(json!({
            "name": "Jawa Barat",
            "latitude": -6.9,
            "longitude": 107.6,
            "population": 48_274_000u64,
            "timezone": 7,
        }))
        .unwrap();
        assert_eq!(detail.coordinate().unwrap().lng, 107.6);
        assert_eq!(detail.population, Some(48_274_000));
        assert_eq!(detail.utc_offset, Some(7));
    }

    #[test]
    fn coordinate_requires_both_components() {
        let detail: GeoDetail = serde_json::from_value(json!({
            "name": "Kecamatan Gambir",
            "lat": -6.17,
        }))
        .unwrap();
        assert!(detail.coordinate().is_none());
    }

    #[test]
    fn info_pairs_render_missing_attributes_as_na() {
        let detail: GeoDetail =
            serde_json::from_value(json!({ "name": "Gambir" })).unwrap();
        let rows = detail.info_pairs();
        assert_eq!(rows[0], ("Name", "Gambir".to_string()));
        assert!(rows[1..].iter().all(|(_, v)| v == "N/A"));
    }

    #[test]
    fn info_pairs_format_timezone_offset() {
        let detail: GeoDetail =
            serde_json::from_value(json!({ "name": "Jayapura", "timezone": 9 }))
                .unwrap();
        let rows = detail.info_pairs();
        let tz = rows.iter().find(|(k, _)| *k == "Timezone").unwrap();
        assert_eq!(tz.1, "UTC+9");
    }

    #[test]
    fn boundary_stays_untyped() {
        let detail: GeoDetail = serde_json::from_value(json!({
            "name": "DKI Jakarta",
            "boundary": "[[1,2],[3,4],[5,6]]",
        }))
        .unwrap();
        assert!(detail.boundary.unwrap().is_string());
    }
}
