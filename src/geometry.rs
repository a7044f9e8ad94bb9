//! Defensive normalization of boundary geometry.
//!
//! The upstream service is inconsistent about how it encodes polygon
//! boundaries: sometimes a native nested array, sometimes the same array
//! JSON-encoded into a string; sometimes a single ring, sometimes a
//! multi-polygon; rings may be open or closed and may contain junk points.
//! [`normalize_boundary`] turns any of those shapes into a validated list of
//! closed rings, and absorbs every malformation by logging and skipping; a
//! bad boundary must never take the map down.

use log::warn;
use serde_json::Value;

use crate::level::AdministrativeLevel;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude, positive north.
    pub lat: f64,
    /// Longitude, positive east.
    pub lng: f64,
}

/// A single closed polygon loop: at least three valid points, first point
/// equal to the last.
pub type Ring = Vec<LatLng>;

/// Cosmetic styling for a boundary layer. Collaborator data; the core never
/// interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryStyle {
    /// Stroke/fill color as a CSS color string.
    pub color: String,
    /// Stroke weight in pixels.
    pub weight: f32,
    /// Fill opacity, 0.0 to 1.0.
    pub fill_opacity: f32,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        BoundaryStyle {
            color: "#3388ff".to_string(),
            weight: 2.0,
            fill_opacity: 0.15,
        }
    }
}

impl BoundaryStyle {
    /// Per-level color scheme so nested boundaries stay distinguishable.
    pub fn for_level(level: AdministrativeLevel) -> Self {
        let color = match level {
            AdministrativeLevel::Province => "#1d4ed8",
            AdministrativeLevel::City => "#0d9488",
            AdministrativeLevel::District => "#b45309",
            AdministrativeLevel::Village => "#86198f",
        };
        BoundaryStyle {
            color: color.to_string(),
            ..BoundaryStyle::default()
        }
    }
}

/// Normalizes a raw boundary payload into zero or more closed rings.
///
/// The payload may be a JSON-encoded string or a native array; a single ring
/// (`[[lat, lng], ...]`) or a multi-polygon (`[[[lat, lng], ...], ...]`).
/// Points that are not two-element numeric pairs, or that do not coerce to a
/// finite float, are dropped; rings left with fewer than three points are
/// discarded; surviving open rings are closed by appending a copy of their
/// first point.
///
/// An empty result means "no renderable boundary" and callers must suppress
/// the layer rather than draw an empty shape. This function never fails and
/// is idempotent: feeding its output back in yields the same rings.
pub fn normalize_boundary(payload: &Value) -> Vec<Ring> {
    let parsed;
    let value = match payload {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(inner) => {
                parsed = inner;
                &parsed
            }
            Err(e) => {
                warn!("discarding boundary payload with malformed JSON: {e}");
                return Vec::new();
            }
        },
        other => other,
    };

    let Some(outer) = value.as_array() else {
        warn!("discarding boundary payload: expected an array, got {value}");
        return Vec::new();
    };
    if outer.is_empty() {
        return Vec::new();
    }

    if is_multi_polygon(outer) {
        outer
            .iter()
            .filter_map(|candidate| candidate.as_array())
            .filter_map(|points| normalize_ring(points))
            .collect()
    } else {
        normalize_ring(outer).into_iter().collect()
    }
}

/// Multi-polygon detection by nesting depth: the payload is a list of rings
/// when the first element's first element is itself an array.
fn is_multi_polygon(outer: &[Value]) -> bool {
    outer
        .first()
        .and_then(Value::as_array)
        .and_then(|inner| inner.first())
        .map(Value::is_array)
        .unwrap_or(false)
}

fn normalize_ring(points: &[Value]) -> Option<Ring> {
    let mut ring: Ring = points.iter().filter_map(coerce_point).collect();
    if ring.len() < 3 {
        if !points.is_empty() {
            warn!(
                "discarding degenerate ring: {} of {} points valid",
                ring.len(),
                points.len()
            );
        }
        return None;
    }
    if ring.first() != ring.last() {
        let first = ring[0];
        ring.push(first);
    }
    Some(ring)
}

fn coerce_point(value: &Value) -> Option<LatLng> {
    let pair = value.as_array()?;
    if pair.len() != 2 {
        return None;
    }
    Some(LatLng {
        lat: coerce_number(&pair[0])?,
        lng: coerce_number(&pair[1])?,
    })
}

/// Coerces a JSON value to a finite float. Numeric strings are accepted (the
/// upstream occasionally stringifies coordinates); everything else is junk.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rings_to_payload(rings: &[Ring]) -> Value {
        json!(rings
            .iter()
            .map(|ring| ring.iter().map(|p| vec![p.lat, p.lng]).collect::<Vec<_>>())
            .collect::<Vec<_>>())
    }

    #[test]
    fn closes_an_open_ring() {
        let rings = normalize_boundary(&json!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]));
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0].first(), rings[0].last());
    }

    #[test]
    fn keeps_an_already_closed_ring() {
        let rings =
            normalize_boundary(&json!([[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [0.0, 0.0]]));
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
    }

    #[test]
    fn parses_string_encoded_payload() {
        let payload = json!("[[0,0],[0,1],[1,0]]");
        let rings = normalize_boundary(&payload);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].first(), rings[0].last());
    }

    #[test]
    fn handles_multi_polygon() {
        let payload = json!([
            [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]],
            [[5.0, 5.0], [5.0, 6.0], [6.0, 5.0], [5.0, 5.0]],
        ]);
        let rings = normalize_boundary(&payload);
        assert_eq!(rings.len(), 2);
        assert!(rings.iter().all(|r| r.first() == r.last() && r.len() >= 4));
    }

    #[test]
    fn malformed_json_text_yields_empty() {
        assert!(normalize_boundary(&json!("not json")).is_empty());
    }

    #[test]
    fn empty_array_yields_empty() {
        assert!(normalize_boundary(&json!([])).is_empty());
    }

    #[test]
    fn non_array_payload_yields_empty() {
        assert!(normalize_boundary(&json!({"rings": []})).is_empty());
        assert!(normalize_boundary(&json!(42)).is_empty());
    }

    #[test]
    fn two_point_rings_are_discarded() {
        let payload = json!([[[0.0, 0.0], [1.0, 1.0]]]);
        assert!(normalize_boundary(&payload).is_empty());
    }

    #[test]
    fn junk_points_are_dropped_before_the_size_check() {
        // Three valid points survive among the junk, so one closed ring results.
        let payload = json!([
            [0.0, 0.0],
            null,
            [0.0, 1.0],
            ["abc", 2.0],
            [1.0],
            [1.0, 0.0],
            [2.0, 3.0, 4.0],
        ]);
        let rings = normalize_boundary(&payload);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert!(rings[0]
            .iter()
            .all(|p| p.lat.is_finite() && p.lng.is_finite()));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let payload = json!([["0.5", "1.5"], [2.0, 3.0], [4.0, 5.0]]);
        let rings = normalize_boundary(&payload);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][0], LatLng { lat: 0.5, lng: 1.5 });
    }

    #[test]
    fn ring_dropped_when_too_few_points_remain_valid() {
        let payload = json!([[0.0, 0.0], [0.0, 1.0], null, "x"]);
        assert!(normalize_boundary(&payload).is_empty());
    }

    #[test]
    fn normalization_is_idempotent() {
        let payload = json!([
            [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]],
            [[5.0, 5.0], [5.0, 6.0], [6.0, 5.0], [5.0, 5.0]],
        ]);
        let once = normalize_boundary(&payload);
        let twice = normalize_boundary(&rings_to_payload(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn per_level_styles_differ_by_color_only() {
        let province = BoundaryStyle::for_level(AdministrativeLevel::Province);
        let village = BoundaryStyle::for_level(AdministrativeLevel::Village);
        assert_ne!(province.color, village.color);
        assert_eq!(province.weight, village.weight);
    }
}
