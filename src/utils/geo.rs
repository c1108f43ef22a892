use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LNG_RANGE: (f64, f64) = (-180.0, 180.0);

/// A coordinate that is non-finite or outside its latitude/longitude domain
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid {field}: {value} (must be a finite number in [{min}, {max}])")]
pub struct InvalidInputError {
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

fn check_coordinate(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<f64, InvalidInputError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidInputError {
            field,
            value,
            min,
            max,
        })
    }
}

/// A (latitude, longitude) pair in degrees
///
/// Only constructible through [`GeoPoint::new`] (or deserialization, which
/// goes through it), so every value in circulation is in range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidInputError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidInputError> {
        Ok(Self {
            lat: check_coordinate("latitude", lat, LAT_RANGE)?,
            lng: check_coordinate("longitude", lng, LNG_RANGE)?,
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle distance to `other` in kilometers
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Calculate distance between two coordinates using Haversine formula
/// Returns distance in kilometers
///
/// No validation happens here; callers outside this module go through
/// [`compute_distance`] or [`GeoPoint::distance_to`].
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` a hair outside [0, 1]
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Validated great-circle distance in kilometers
pub fn compute_distance(
    lat1: f64,
    lng1: f64,
    lat2: f64,
    lng2: f64,
) -> Result<f64, InvalidInputError> {
    let from = GeoPoint::new(lat1, lng1)?;
    let to = GeoPoint::new(lat2, lng2)?;
    Ok(from.distance_to(&to))
}

/// Check if a point is within the allowed radius of a center
pub fn is_within_radius(point: &GeoPoint, center: &GeoPoint, max_radius_km: f64) -> bool {
    point.distance_to(center) <= max_radius_km
}

/// Axis-aligned lat/lng box, grown one point at a time.
///
/// Does not wrap the antimeridian: a box over points at lng 179 and -179
/// spans the whole globe rather than the 2 degrees between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLngBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl LatLngBounds {
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(points.next()?);
        for point in points {
            bounds.extend(point);
        }
        Some(bounds)
    }

    pub fn extend(&mut self, point: GeoPoint) {
        // min/max of in-range values stay in range
        self.south_west = GeoPoint {
            lat: self.south_west.lat.min(point.lat),
            lng: self.south_west.lng.min(point.lng),
        };
        self.north_east = GeoPoint {
            lat: self.north_east.lat.max(point.lat),
            lng: self.north_east.lng.max(point.lng),
        };
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.south_west.lat + self.north_east.lat) / 2.0,
            lng: (self.south_west.lng + self.north_east.lng) / 2.0,
        }
    }
}
