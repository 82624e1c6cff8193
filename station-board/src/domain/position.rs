//! Geographic positions.

use std::fmt;

/// Mean Earth radius in meters, for great-circle distance.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A geographic position in decimal degrees.
///
/// The default value is `(0.0, 0.0)`, which is what a station record
/// gets when its source document carries no position at all.
///
/// # Examples
///
/// ```
/// use station_board::domain::GeoPoint;
///
/// let termini = GeoPoint::new(41.901, 12.501);
/// let tiburtina = GeoPoint::new(41.910, 12.525);
///
/// // About two kilometers apart
/// let d = termini.distance_m(&tiburtina);
/// assert!(d > 1_000.0 && d < 3_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a position from latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another position, in meters.
    ///
    /// Uses the haversine formula on a spherical Earth, which is more
    /// than accurate enough for ordering stations by distance.
    pub fn distance_m(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

        EARTH_RADIUS_M * 2.0 * a.sqrt().asin()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}
