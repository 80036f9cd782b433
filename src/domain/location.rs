use serde::Serialize;

/// A WGS84 point as `(latitude, longitude)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Parse a `"lat, lng"` string.
///
/// Only the first two comma-separated pieces are read. Returns `None` for
/// missing or non-numeric pieces, NaN/infinite values, and points outside
/// the valid latitude/longitude range.
pub fn parse_location(text: &str) -> Option<Coordinates> {
    let mut parts = text.split(',').map(str::trim);

    let lat = parts.next()?.parse::<f64>().ok()?;
    let lng = parts.next()?.parse::<f64>().ok()?;

    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return None;
    }

    Some(Coordinates { lat, lng })
}
