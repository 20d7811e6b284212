//! Spherical geometry helpers shared by every strategy.
//!
//! All functions treat the Earth as a sphere of radius [`EARTH_RADIUS_KM`]
//! and take coordinates in decimal degrees.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check the latitude/longitude ranges.
    ///
    /// `label` prefixes the offending field in the error (e.g. `start.lat`).
    pub fn validate(&self, label: &str) -> Result<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinate {
                field: format!("{label}.lat"),
                value: self.lat,
                expected: "a latitude between -90 and 90",
            });
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinate {
                field: format!("{label}.lng"),
                value: self.lng,
                expected: "a longitude between -180 and 180",
            });
        }
        Ok(())
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_distance(*self, *other)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`. Range checks are left to [`Point::validate`].
impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG but got '{s}'"))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
        let lng = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude '{}': {e}", lng.trim()))?;
        Ok(Point::new(lat, lng))
    }
}

/// Great-circle distance between two points in kilometres.
///
/// `d = 2R·asin(√(sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)))`
pub fn haversine_distance(a: Point, b: Point) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();

    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Initial bearing from `from` towards `to`, in degrees clockwise from north.
pub fn initial_bearing(from: Point, to: Point) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let dlambda = (to.lng - from.lng).to_radians();

    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Point reached by travelling `distance_km` from `origin` along `bearing`.
pub fn destination(origin: Point, bearing: f64, distance_km: f64) -> Point {
    let delta = distance_km / EARTH_RADIUS_KM;
    let theta = bearing.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lng.to_radians();

    let sin_phi2 = phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos();
    let phi2 = sin_phi2.clamp(-1.0, 1.0).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);

    Point::new(phi2.to_degrees(), normalize_longitude(lambda2.to_degrees()))
}

/// Wrap a longitude into `[-180, 180]`.
pub fn normalize_longitude(lng: f64) -> f64 {
    let wrapped = (lng + 540.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lng > 0.0 {
        180.0
    } else {
        wrapped
    }
}
